//! Discovery inputs and failures — database credentials, import selection,
//! and the two ways a discovery run can fail.

use std::collections::BTreeSet;
use std::error::Error as StdError;

use secrecy::{ExposeSecret, SecretString};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::door::DoorId;
use crate::error::ValidationError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Database engine the door table lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Postgres,
    Mysql,
    /// File-backed database; `database` holds the file path and the network
    /// fields are ignored.
    Sqlite,
}

impl DatabaseKind {
    /// Port used when the credentials do not name one.
    #[must_use]
    pub const fn default_port(self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::Mysql => Some(3306),
            Self::Sqlite => None,
        }
    }

    #[must_use]
    pub const fn is_networked(self) -> bool {
        !matches!(self, Self::Sqlite)
    }
}

/// Everything needed to open one read-only connection to the door database.
///
/// The password is a [`SecretString`] and never shows up in `Debug` output.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseCredentials {
    #[serde(default)]
    pub kind: DatabaseKind,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    pub database: String,
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub password: SecretString,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

impl DatabaseCredentials {
    /// Port to connect to, falling back to the engine default.
    #[must_use]
    pub fn effective_port(&self) -> Option<u16> {
        self.port.or(self.kind.default_port())
    }

    /// Check that every field the engine needs is present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDatabaseField`] naming the first blank
    /// field, or [`ValidationError::InvalidPort`] for port `0`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.database.trim().is_empty() {
            return Err(ValidationError::EmptyDatabaseField("database"));
        }
        if !self.kind.is_networked() {
            return Ok(());
        }
        if self.host.trim().is_empty() {
            return Err(ValidationError::EmptyDatabaseField("host"));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyDatabaseField("username"));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::EmptyDatabaseField("password"));
        }
        if self.port == Some(0) {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

/// Which discovered doors the operator chose to import.
///
/// Serialized as the string `"all"` or as a list of door ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportSelection {
    #[default]
    All,
    Only(BTreeSet<DoorId>),
}

impl ImportSelection {
    /// Build an explicit selection from any list of ids.
    pub fn only<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DoorId>,
    {
        Self::Only(ids.into_iter().map(Into::into).collect())
    }

    /// Whether `door_id` is part of this selection.
    #[must_use]
    pub fn includes(&self, door_id: &DoorId) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(door_id),
        }
    }
}

impl Serialize for ImportSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Only(ids) => ids.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ImportSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Keyword(String),
            Ids(BTreeSet<DoorId>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Keyword(word) if word.eq_ignore_ascii_case("all") => Ok(Self::All),
            Raw::Keyword(word) => Err(D::Error::custom(format!(
                "expected \"all\" or a list of door ids, got {word:?}"
            ))),
            Raw::Ids(ids) => Ok(Self::Only(ids)),
        }
    }
}

/// Why a discovery run failed.
///
/// The two kinds call for different remediation, see [`guidance`](Self::guidance).
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The database could not be reached or refused the credentials.
    #[error("could not connect to the door database")]
    ConnectionFailed(#[source] BoxError),

    /// The connection worked but the door query did not.
    #[error("door query failed")]
    QueryFailed(#[source] BoxError),
}

impl DiscoveryError {
    pub fn connection(err: impl Into<BoxError>) -> Self {
        Self::ConnectionFailed(err.into())
    }

    pub fn query(err: impl Into<BoxError>) -> Self {
        Self::QueryFailed(err.into())
    }

    /// Stable machine name of the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "connection_failed",
            Self::QueryFailed(_) => "query_failed",
        }
    }

    /// What the operator should check.
    #[must_use]
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "check the database host, port, credentials and network",
            Self::QueryFailed(_) => "check that the Door table and its columns exist",
        }
    }

    /// The underlying cause, rendered for display.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::ConnectionFailed(source) | Self::QueryFailed(source) => source.to_string(),
        }
    }
}
