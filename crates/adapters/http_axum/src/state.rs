//! Shared application state for axum handlers.

use std::sync::Arc;

use doorbridge_app::ports::{DatabaseConnector, HubTransport};
use doorbridge_app::services::doors::DoorService;
use doorbridge_app::services::setup::SetupService;

/// Where imported doors are registered: the configured hub host and,
/// when known, its port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubTarget {
    pub host: String,
    pub port: Option<u16>,
}

/// Application state shared across all axum handlers.
///
/// Generic over the hub transport and database connector to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<T, C> {
    pub door_service: Arc<DoorService<T>>,
    pub setup_service: Arc<SetupService<C>>,
    pub hub: Arc<HubTarget>,
}

impl<T, C> Clone for AppState<T, C> {
    fn clone(&self) -> Self {
        Self {
            door_service: Arc::clone(&self.door_service),
            setup_service: Arc::clone(&self.setup_service),
            hub: Arc::clone(&self.hub),
        }
    }
}

impl<T, C> AppState<T, C>
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// The door service is usually shared with the startup setup run before
    /// the HTTP state is built.
    pub fn from_arcs(
        door_service: Arc<DoorService<T>>,
        setup_service: Arc<SetupService<C>>,
        hub: HubTarget,
    ) -> Self {
        Self {
            door_service,
            setup_service,
            hub: Arc::new(hub),
        }
    }
}
