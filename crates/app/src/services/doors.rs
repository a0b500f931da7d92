//! Door service — the registered doors, their actions and their last results.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use doorbridge_domain::action::DoorAction;
use doorbridge_domain::command::CommandResult;
use doorbridge_domain::door::{DoorId, DoorRecord};
use doorbridge_domain::error::{BridgeError, NotFoundError};
use doorbridge_domain::hub::HubEndpoint;
use doorbridge_domain::setup::SetupReport;
use indexmap::IndexMap;

use super::dispatcher::DoorCommandDispatcher;
use crate::ports::HubTransport;

/// A door as seen by callers: its record, hub and unique id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredDoor {
    pub unique_id: String,
    pub record: DoorRecord,
    pub endpoint: Arc<HubEndpoint>,
}

/// One independent door unit. Each unit owns its own result slots, so doors
/// never contend with each other.
#[derive(Debug)]
struct DoorUnit {
    door: RegisteredDoor,
    last_results: Mutex<HashMap<DoorAction, CommandResult>>,
}

impl DoorUnit {
    /// Store `result` unless a result completed later is already stored.
    /// Concurrent presses may finish out of order.
    fn remember(&self, result: CommandResult) {
        let mut results = self
            .last_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match results.get(&result.action) {
            Some(stored) if stored.timestamp > result.timestamp => {}
            _ => {
                results.insert(result.action, result);
            }
        }
    }
}

/// Application service exposing the registered doors.
pub struct DoorService<T> {
    dispatcher: DoorCommandDispatcher<T>,
    units: RwLock<IndexMap<DoorId, Arc<DoorUnit>>>,
}

impl<T: HubTransport> DoorService<T> {
    pub fn new(dispatcher: DoorCommandDispatcher<T>) -> Self {
        Self {
            dispatcher,
            units: RwLock::new(IndexMap::new()),
        }
    }

    /// Register `doors` against `endpoint`.
    ///
    /// A door whose id is already registered is skipped, never replaced.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] if a record is invalid; nothing
    /// is registered in that case.
    #[tracing::instrument(skip(self, endpoint, doors), fields(hub = %endpoint, count = doors.len()))]
    pub fn register(
        &self,
        endpoint: &Arc<HubEndpoint>,
        doors: Vec<DoorRecord>,
    ) -> Result<SetupReport, BridgeError> {
        for door in &doors {
            door.validate()?;
        }

        let mut units = self.units.write().unwrap_or_else(PoisonError::into_inner);
        let mut report = SetupReport::default();
        for record in doors {
            let unique_id = endpoint.unique_id(&record.door_id);
            if units.contains_key(&record.door_id) {
                tracing::info!(%unique_id, "door already configured, skipping");
                report.skipped += 1;
                continue;
            }
            units.insert(
                record.door_id.clone(),
                Arc::new(DoorUnit {
                    door: RegisteredDoor {
                        unique_id,
                        record,
                        endpoint: Arc::clone(endpoint),
                    },
                    last_results: Mutex::new(HashMap::new()),
                }),
            );
            report.created += 1;
        }
        Ok(report)
    }

    /// Every registered door, in registration order.
    pub fn list_doors(&self) -> Vec<RegisteredDoor> {
        self.units
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|unit| unit.door.clone())
            .collect()
    }

    /// Look a door up by id.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] when no door with `door_id` exists.
    pub fn get_door(&self, door_id: &DoorId) -> Result<RegisteredDoor, BridgeError> {
        Ok(self.unit(door_id)?.door.clone())
    }

    /// The actions a door supports, always the same four in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] for an unknown door.
    pub fn list_actions(&self, door_id: &DoorId) -> Result<[DoorAction; 4], BridgeError> {
        self.unit(door_id)?;
        Ok(DoorAction::ALL)
    }

    /// Send `action` to the door's hub and remember the result.
    ///
    /// A hub rejection or an unreachable hub is *not* an error here: it is
    /// reported through the returned [`CommandResult`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] for an unknown door.
    #[tracing::instrument(skip(self))]
    pub async fn execute_action(
        &self,
        door_id: &DoorId,
        action: DoorAction,
    ) -> Result<CommandResult, BridgeError> {
        let unit = self.unit(door_id)?;
        let result = self
            .dispatcher
            .send(&unit.door.endpoint, &unit.door.record.door_id, action)
            .await;
        unit.remember(result.clone());
        Ok(result)
    }

    /// The most recent result of each action already executed on a door,
    /// in action order.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] for an unknown door.
    pub fn last_results(&self, door_id: &DoorId) -> Result<Vec<CommandResult>, BridgeError> {
        let unit = self.unit(door_id)?;
        let results = unit
            .last_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(DoorAction::ALL
            .iter()
            .filter_map(|action| results.get(action).cloned())
            .collect())
    }

    fn unit(&self, door_id: &DoorId) -> Result<Arc<DoorUnit>, BridgeError> {
        self.units
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(door_id)
            .cloned()
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Door",
                    id: door_id.to_string(),
                }
                .into()
            })
    }
}
