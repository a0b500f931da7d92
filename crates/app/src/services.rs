//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod discovery;
pub mod dispatcher;
pub mod doors;
pub mod reconcile;
pub mod setup;

use doorbridge_domain::discovery::{DatabaseCredentials, DiscoveryError, ImportSelection};
use doorbridge_domain::door::DoorRecord;

use crate::ports::DatabaseConnector;

/// One-shot discovery with a throwaway service.
///
/// # Errors
///
/// See [`discovery::DoorDiscoveryService::discover`].
pub async fn run_discovery<C: DatabaseConnector>(
    connector: C,
    credentials: &DatabaseCredentials,
) -> Result<Vec<DoorRecord>, DiscoveryError> {
    discovery::DoorDiscoveryService::new(connector)
        .discover(credentials)
        .await
}

/// Alias of [`reconcile::reconcile`] under its collaborator-facing name.
#[must_use]
pub fn apply_selection(candidates: Vec<DoorRecord>, selection: &ImportSelection) -> Vec<DoorRecord> {
    reconcile::reconcile(candidates, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::discovery::tests::{FakeDatabase, credentials};

    #[tokio::test]
    async fn should_discover_then_apply_selection() {
        let db = FakeDatabase::with_doors(&[(1, Some("Front Door")), (2, Some("Garage"))]);

        let candidates = run_discovery(db, &credentials()).await.unwrap();
        let selected = apply_selection(candidates, &ImportSelection::only(["2"]));

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].display_name, "Garage");
    }
}
