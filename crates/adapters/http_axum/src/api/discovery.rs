//! JSON REST handlers for the discovery workflow.
//!
//! Discovery is a two-step flow: preview the doors found in the database,
//! then import a selection of them.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use doorbridge_app::ports::{DatabaseConnector, HubTransport};
use doorbridge_domain::discovery::{DatabaseCredentials, ImportSelection};
use doorbridge_domain::door::DoorRecord;
use doorbridge_domain::setup::SetupReport;

use crate::error::ApiError;
use crate::state::AppState;

/// Candidates found in the database.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub doors: Vec<DoorRecord>,
}

/// Request body for importing discovered doors.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub database: DatabaseCredentials,
    #[serde(default)]
    pub selection: ImportSelection,
}

/// `POST /api/discovery`
pub async fn preview<T, C>(
    State(state): State<AppState<T, C>>,
    Json(credentials): Json<DatabaseCredentials>,
) -> Result<Json<PreviewResponse>, ApiError>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    credentials.validate()?;
    let doors = state
        .setup_service
        .discovery()
        .discover(&credentials)
        .await?;
    Ok(Json(PreviewResponse { doors }))
}

/// `POST /api/discovery/selection`
pub async fn import<T, C>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<SetupReport>, ApiError>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    let report = state
        .setup_service
        .import(
            &state.hub.host,
            state.hub.port,
            &request.database,
            &request.selection,
            &state.door_service,
        )
        .await?;
    Ok(Json(report))
}
