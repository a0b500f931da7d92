//! Database port — open a read-only session and run a fixed query.
//!
//! The application only ever runs two statements, so rows are exposed as a
//! small dynamic value type rather than typed structs.

use std::future::Future;

use doorbridge_domain::discovery::DatabaseCredentials;

use super::PortError;

/// One decoded column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
}

impl SqlValue {
    /// Render the value as text, `None` for `NULL`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Int(value) => Some(value.to_string()),
            Self::Text(value) => Some(value.clone()),
        }
    }

    /// Read the value as an integer, parsing text when needed.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Null => None,
            Self::Int(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

/// A row as `(column name, value)` pairs, in select-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlRow {
    columns: Vec<(String, SqlValue)>,
}

impl SqlRow {
    #[must_use]
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Self { columns }
    }

    /// Look a column up by name, ignoring ASCII case.
    ///
    /// Some engines fold unquoted aliases to lower case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(column, _)| column.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

/// Opens one session per discovery run.
pub trait DatabaseConnector: Send + Sync {
    type Session: DatabaseSession;

    /// Connect with the given credentials. Failing here means the database
    /// could not be reached or refused the login.
    fn connect(
        &self,
        credentials: &DatabaseCredentials,
    ) -> impl Future<Output = Result<Self::Session, PortError>> + Send;
}

/// A live, read-only connection.
pub trait DatabaseSession: Send {
    /// Run one statement and return every row.
    fn query(&mut self, sql: &str) -> impl Future<Output = Result<Vec<SqlRow>, PortError>> + Send;

    /// Close the connection. Errors while closing are swallowed.
    fn close(self) -> impl Future<Output = ()> + Send;
}
