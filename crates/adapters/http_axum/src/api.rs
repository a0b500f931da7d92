//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod discovery;
#[allow(clippy::missing_errors_doc)]
pub mod doors;

use axum::Router;
use axum::routing::{get, post};

use doorbridge_app::ports::{DatabaseConnector, HubTransport};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<T, C>() -> Router<AppState<T, C>>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    Router::new()
        // Doors
        .route("/doors", get(doors::list::<T, C>))
        .route("/doors/{id}", get(doors::get::<T, C>))
        .route("/doors/{id}/actions", get(doors::actions::<T, C>))
        .route(
            "/doors/{id}/actions/{action}",
            post(doors::execute::<T, C>),
        )
        // Discovery
        .route("/discovery", post(discovery::preview::<T, C>))
        .route("/discovery/selection", post(discovery::import::<T, C>))
}
