//! Setup plan — the persisted record that decides which doors get registered.
//!
//! A plan is either a manual door list or database credentials plus an
//! import selection. The auto variant holds enough to re-run discovery on
//! every restart.

use serde::{Deserialize, Serialize};

use crate::discovery::{DatabaseCredentials, ImportSelection};
use crate::door::DoorRecord;

/// How the set of controllable doors is obtained.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SetupPlan {
    /// The operator lists every door by hand.
    Manual {
        #[serde(default)]
        doors: Vec<DoorRecord>,
    },
    /// Doors are discovered from the database, then filtered by `selection`.
    Auto {
        database: DatabaseCredentials,
        #[serde(default)]
        selection: ImportSelection,
    },
}

impl Default for SetupPlan {
    fn default() -> Self {
        Self::Manual { doors: Vec::new() }
    }
}

/// Summary of one setup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub created: usize,
    pub skipped: usize,
}
