//! JSON REST handlers for doors and their actions.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use doorbridge_app::ports::{DatabaseConnector, HubTransport};
use doorbridge_app::services::doors::RegisteredDoor;
use doorbridge_domain::action::DoorAction;
use doorbridge_domain::command::CommandResult;
use doorbridge_domain::door::DoorId;

use crate::error::ApiError;
use crate::state::AppState;

/// A registered door.
#[derive(Debug, Serialize)]
pub struct DoorView {
    pub unique_id: String,
    pub door_id: DoorId,
    pub display_name: String,
    pub hub: String,
}

impl From<RegisteredDoor> for DoorView {
    fn from(door: RegisteredDoor) -> Self {
        Self {
            unique_id: door.unique_id,
            door_id: door.record.door_id,
            display_name: door.record.display_name,
            hub: door.endpoint.to_string(),
        }
    }
}

/// A door with the latest result of each action already executed.
#[derive(Debug, Serialize)]
pub struct DoorDetail {
    #[serde(flatten)]
    pub door: DoorView,
    pub last_results: Vec<ResultView>,
}

/// One action as offered to operators.
#[derive(Debug, Serialize)]
pub struct ActionView {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

impl From<DoorAction> for ActionView {
    fn from(action: DoorAction) -> Self {
        Self {
            key: action.key(),
            label: action.label(),
            icon: action.icon(),
        }
    }
}

/// A command result with its derived fields spelled out.
#[derive(Debug, Serialize)]
pub struct ResultView {
    #[serde(flatten)]
    pub result: CommandResult,
    pub success: bool,
    pub http_status: Option<u16>,
    pub error_detail: Option<String>,
    pub status_line: String,
}

impl From<CommandResult> for ResultView {
    fn from(result: CommandResult) -> Self {
        Self {
            success: result.success(),
            http_status: result.http_status(),
            error_detail: result.error_detail(),
            status_line: result.status_line(),
            result,
        }
    }
}

/// Possible responses from the execute endpoint.
pub enum ExecuteResponse {
    /// The hub accepted the command.
    Ok(Json<ResultView>),
    /// The hub rejected the command or could not be reached.
    BadGateway(Json<ResultView>),
}

impl IntoResponse for ExecuteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::BadGateway(json) => (StatusCode::BAD_GATEWAY, json).into_response(),
        }
    }
}

/// `GET /api/doors`
pub async fn list<T, C>(State(state): State<AppState<T, C>>) -> Json<Vec<DoorView>>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    let doors = state.door_service.list_doors();
    Json(doors.into_iter().map(DoorView::from).collect())
}

/// `GET /api/doors/{id}`
pub async fn get<T, C>(
    State(state): State<AppState<T, C>>,
    Path(id): Path<String>,
) -> Result<Json<DoorDetail>, ApiError>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    let door_id = DoorId::new(id);
    let door = state.door_service.get_door(&door_id)?;
    let last_results = state.door_service.last_results(&door_id)?;
    Ok(Json(DoorDetail {
        door: door.into(),
        last_results: last_results.into_iter().map(ResultView::from).collect(),
    }))
}

/// `GET /api/doors/{id}/actions`
pub async fn actions<T, C>(
    State(state): State<AppState<T, C>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ActionView>>, ApiError>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    let actions = state.door_service.list_actions(&DoorId::new(id))?;
    Ok(Json(actions.into_iter().map(ActionView::from).collect()))
}

/// `POST /api/doors/{id}/actions/{action}`
pub async fn execute<T, C>(
    State(state): State<AppState<T, C>>,
    Path((id, action)): Path<(String, String)>,
) -> Result<ExecuteResponse, ApiError>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    let action: DoorAction = action.parse()?;
    let result = state
        .door_service
        .execute_action(&DoorId::new(id), action)
        .await?;
    let view = Json(ResultView::from(result));
    if view.success {
        Ok(ExecuteResponse::Ok(view))
    } else {
        Ok(ExecuteResponse::BadGateway(view))
    }
}
