//! sqlx-backed [`DatabaseConnector`].

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use doorbridge_app::ports::{DatabaseConnector, DatabaseSession, PortError, SqlRow};
use doorbridge_domain::discovery::DatabaseCredentials;
use serde::Deserialize;
use sqlx::any::AnyConnectOptions;
use sqlx::{AnyConnection, ConnectOptions, Connection};

use crate::address::connection_url;
use crate::error::ConnectorError;
use crate::row::decode_row;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

static INSTALL_DRIVERS: Once = Once::new();

/// Connector settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Upper bound on opening one connection.
    pub connect_timeout_secs: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Opens one fresh connection per discovery run. There is no pool.
#[derive(Debug, Clone)]
pub struct SqlxConnector {
    connect_timeout: Duration,
}

impl Default for SqlxConnector {
    fn default() -> Self {
        Self::new(&ConnectorConfig::default())
    }
}

impl SqlxConnector {
    #[must_use]
    pub fn new(config: &ConnectorConfig) -> Self {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);
        Self {
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    async fn open(&self, credentials: &DatabaseCredentials) -> Result<SqlxSession, ConnectorError> {
        let url = connection_url(credentials)?;
        let options = AnyConnectOptions::from_url(&url)?;
        let connection = tokio::time::timeout(self.connect_timeout, options.connect())
            .await
            .map_err(|_| ConnectorError::Timeout(self.connect_timeout))??;
        tracing::debug!(kind = ?credentials.kind, "door database connected");
        Ok(SqlxSession { connection })
    }
}

impl DatabaseConnector for SqlxConnector {
    type Session = SqlxSession;

    fn connect(
        &self,
        credentials: &DatabaseCredentials,
    ) -> impl Future<Output = Result<Self::Session, PortError>> + Send {
        async move { Ok(self.open(credentials).await?) }
    }
}

/// One open connection.
pub struct SqlxSession {
    connection: AnyConnection,
}

impl DatabaseSession for SqlxSession {
    fn query(&mut self, sql: &str) -> impl Future<Output = Result<Vec<SqlRow>, PortError>> + Send {
        async move {
            let rows = sqlx::query(sql)
                .fetch_all(&mut self.connection)
                .await
                .map_err(ConnectorError::from)?;
            let decoded = rows
                .iter()
                .map(decode_row)
                .collect::<Result<Vec<_>, _>>()
                .map_err(ConnectorError::from)?;
            Ok(decoded)
        }
    }

    fn close(self) -> impl Future<Output = ()> + Send {
        async move {
            if let Err(err) = self.connection.close().await {
                tracing::debug!(error = %err, "closing door database connection failed");
            }
        }
    }
}
