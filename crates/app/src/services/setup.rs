//! Setup workflow — decide which doors get registered, manually or from the
//! database, and register them.

use std::sync::Arc;

use doorbridge_domain::discovery::{DatabaseCredentials, ImportSelection};
use doorbridge_domain::door::DoorRecord;
use doorbridge_domain::error::{BridgeError, SetupError};
use doorbridge_domain::hub::{DEFAULT_HUB_PORT, HubEndpoint};
use doorbridge_domain::setup::{SetupPlan, SetupReport};

use super::discovery::DoorDiscoveryService;
use super::doors::DoorService;
use super::reconcile::reconcile;
use crate::ports::{DatabaseConnector, HubTransport};

/// Runs a [`SetupPlan`] against a [`DoorService`].
pub struct SetupService<C> {
    discovery: DoorDiscoveryService<C>,
}

impl<C: DatabaseConnector> SetupService<C> {
    pub fn new(discovery: DoorDiscoveryService<C>) -> Self {
        Self { discovery }
    }

    /// Borrow the discovery service, e.g. to preview candidates.
    pub fn discovery(&self) -> &DoorDiscoveryService<C> {
        &self.discovery
    }

    /// Register the doors described by `plan` against the hub at `hub_host`.
    ///
    /// In manual mode `hub_port` defaults to the standard hub port. In auto
    /// mode a missing `hub_port` is read from the database first.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] for a bad host, port, door or
    /// credentials, [`BridgeError::Discovery`] when the database cannot be
    /// read, and [`BridgeError::Setup`] when discovery or selection yields no
    /// door.
    #[tracing::instrument(skip(self, plan, doors))]
    pub async fn run<T: HubTransport>(
        &self,
        hub_host: &str,
        hub_port: Option<u16>,
        plan: &SetupPlan,
        doors: &DoorService<T>,
    ) -> Result<SetupReport, BridgeError> {
        match plan {
            SetupPlan::Manual { doors: records } => {
                let endpoint = HubEndpoint::new(hub_host, hub_port.unwrap_or(DEFAULT_HUB_PORT))?;
                let report = doors.register(&Arc::new(endpoint), records.clone())?;
                tracing::info!(created = report.created, skipped = report.skipped, "manual setup done");
                Ok(report)
            }
            SetupPlan::Auto {
                database,
                selection,
            } => {
                self.import(hub_host, hub_port, database, selection, doors)
                    .await
            }
        }
    }

    /// Discover, reconcile with `selection` and register the result.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    #[tracing::instrument(skip(self, credentials, selection, doors))]
    pub async fn import<T: HubTransport>(
        &self,
        hub_host: &str,
        hub_port: Option<u16>,
        credentials: &DatabaseCredentials,
        selection: &ImportSelection,
        doors: &DoorService<T>,
    ) -> Result<SetupReport, BridgeError> {
        credentials.validate()?;
        // Check the host before touching the database.
        HubEndpoint::new(hub_host, hub_port.unwrap_or(DEFAULT_HUB_PORT))?;

        let port = match hub_port {
            Some(port) => port,
            None => self.resolve_hub_port(credentials).await,
        };
        let endpoint = Arc::new(HubEndpoint::new(hub_host, port)?);

        let selected = self.select(credentials, selection).await?;
        let report = doors.register(&endpoint, selected)?;
        tracing::info!(
            hub = %endpoint,
            created = report.created,
            skipped = report.skipped,
            "door import done"
        );
        Ok(report)
    }

    async fn resolve_hub_port(&self, credentials: &DatabaseCredentials) -> u16 {
        if let Some(port) = self.discovery.detect_hub_port(credentials).await {
            return port;
        }
        tracing::warn!(port = DEFAULT_HUB_PORT, "falling back to default hub port");
        DEFAULT_HUB_PORT
    }

    async fn select(
        &self,
        credentials: &DatabaseCredentials,
        selection: &ImportSelection,
    ) -> Result<Vec<DoorRecord>, BridgeError> {
        let candidates = self.discovery.discover(credentials).await?;
        if candidates.is_empty() {
            return Err(SetupError::NoDoorsDiscovered.into());
        }
        let selected = reconcile(candidates, selection);
        if selected.is_empty() {
            return Err(SetupError::NoDoorsSelected.into());
        }
        Ok(selected)
    }
}
