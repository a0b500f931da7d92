//! Door command dispatcher — turns `(endpoint, door, action)` into one hub
//! request and classifies what came back.

use doorbridge_domain::action::DoorAction;
use doorbridge_domain::command::{CommandOutcome, CommandResult};
use doorbridge_domain::door::DoorId;
use doorbridge_domain::hub::HubEndpoint;

use crate::ports::HubTransport;

/// Sends door commands to a hub through a [`HubTransport`].
///
/// Holds no per-door state; concurrent sends are independent.
pub struct DoorCommandDispatcher<T> {
    transport: T,
}

impl<T: HubTransport> DoorCommandDispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send `action` for `door_id` and report how it ended.
    ///
    /// Never fails: hub rejections and transport failures are returned as a
    /// [`CommandResult`] whose outcome says what happened.
    #[tracing::instrument(skip(self, endpoint), fields(hub = %endpoint))]
    pub async fn send(
        &self,
        endpoint: &HubEndpoint,
        door_id: &DoorId,
        action: DoorAction,
    ) -> CommandResult {
        let url = endpoint.command_url(door_id, action);
        let outcome = match self.transport.get(url).await {
            Ok(response) => CommandOutcome::from_status(response.status, &response.body),
            Err(failure) => CommandOutcome::transport(failure.detail),
        };

        match &outcome {
            CommandOutcome::Ok { status } => {
                tracing::debug!(%door_id, %action, status, "door command accepted");
            }
            CommandOutcome::HubError { status, body } => {
                tracing::warn!(%door_id, %action, status, body, "hub rejected door command");
            }
            CommandOutcome::TransportError { detail } => {
                tracing::error!(%door_id, %action, detail, "could not reach hub");
            }
        }

        CommandResult::now(action, outcome)
    }
}
