//! Door discovery — reads the authoritative door list (and the hub port)
//! from the access-control database.

use doorbridge_domain::discovery::{DatabaseCredentials, DiscoveryError};
use doorbridge_domain::door::{DoorId, DoorRecord};
use indexmap::IndexMap;

use crate::ports::{DatabaseConnector, DatabaseSession, SqlRow, SqlValue};

/// Fixed query returning every door, ordered by description.
pub const DOOR_QUERY: &str =
    "SELECT Oid AS DoorId, Description AS DoorName, OutputPort FROM Door ORDER BY Description";

/// Fixed query returning the port the hub web service listens on.
pub const HUB_PORT_QUERY: &str = "SELECT ServerWebServicePort FROM GlobalControl";

/// A discovered door together with the raw `OutputPort` column.
///
/// `output_port` is carried as read and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDoor {
    pub record: DoorRecord,
    pub output_port: SqlValue,
}

/// Discovery use-cases, backed by a [`DatabaseConnector`].
pub struct DoorDiscoveryService<C> {
    connector: C,
}

impl<C: DatabaseConnector> DoorDiscoveryService<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Return the candidate door list, in the order the database returned it.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::ConnectionFailed`] when the database cannot
    /// be reached, [`DiscoveryError::QueryFailed`] when the query or row
    /// decoding fails.
    pub async fn discover(
        &self,
        credentials: &DatabaseCredentials,
    ) -> Result<Vec<DoorRecord>, DiscoveryError> {
        let doors = self.discover_with_ports(credentials).await?;
        Ok(doors.into_iter().map(|door| door.record).collect())
    }

    /// Same as [`discover`](Self::discover), keeping the `OutputPort` column.
    ///
    /// Rows sharing a door id collapse into one: the last row wins, at the
    /// position of the first.
    ///
    /// # Errors
    ///
    /// See [`discover`](Self::discover).
    #[tracing::instrument(skip(self, credentials), fields(kind = ?credentials.kind, database = %credentials.database))]
    pub async fn discover_with_ports(
        &self,
        credentials: &DatabaseCredentials,
    ) -> Result<Vec<DiscoveredDoor>, DiscoveryError> {
        let mut session = self.connector.connect(credentials).await.map_err(|err| {
            tracing::error!(error = %err, "door database connection failed");
            DiscoveryError::connection(err)
        })?;

        let queried = session.query(DOOR_QUERY).await;
        session.close().await;

        let rows = queried.map_err(|err| {
            tracing::error!(error = %err, "door query failed");
            DiscoveryError::query(err)
        })?;

        let mut doors: IndexMap<DoorId, DiscoveredDoor> = IndexMap::with_capacity(rows.len());
        for row in &rows {
            let door = decode_door(row).inspect_err(|err| {
                tracing::error!(error = %err, "undecodable door row");
            })?;
            doors.insert(door.record.door_id.clone(), door);
        }

        tracing::debug!(count = doors.len(), "discovered doors");
        Ok(doors.into_values().collect())
    }

    /// Read the hub web service port from the database.
    ///
    /// Returns `None` on any failure or when the stored value is not a valid
    /// port; the caller falls back to a default.
    #[tracing::instrument(skip(self, credentials))]
    pub async fn detect_hub_port(&self, credentials: &DatabaseCredentials) -> Option<u16> {
        let mut session = match self.connector.connect(credentials).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "could not connect to read the hub port");
                return None;
            }
        };

        let queried = session.query(HUB_PORT_QUERY).await;
        session.close().await;

        let rows = match queried {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "could not read the hub port");
                return None;
            }
        };

        let value = rows
            .first()
            .and_then(|row| row.get("ServerWebServicePort"))
            .and_then(SqlValue::as_int);
        match value.map(u16::try_from) {
            Some(Ok(port)) if port != 0 => Some(port),
            other => {
                tracing::warn!(value = ?other, "hub port missing or out of range");
                None
            }
        }
    }
}

fn decode_door(row: &SqlRow) -> Result<DiscoveredDoor, DiscoveryError> {
    let door_id = row
        .get("DoorId")
        .and_then(SqlValue::as_text)
        .map(DoorId::new)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| DiscoveryError::query("door row without an id"))?;
    let name = row.get("DoorName").and_then(SqlValue::as_text);
    let output_port = row.get("OutputPort").cloned().unwrap_or(SqlValue::Null);

    Ok(DiscoveredDoor {
        record: DoorRecord::discovered(door_id, name.as_deref()),
        output_port,
    })
}
