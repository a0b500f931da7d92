//! Connection URL building.

use std::net::Ipv6Addr;

use doorbridge_domain::discovery::{DatabaseCredentials, DatabaseKind};
use secrecy::ExposeSecret;
use url::Url;

use crate::error::ConnectorError;

/// Build the read-only connection URL for `credentials`.
///
/// - `PostgreSQL` sessions default every transaction to read-only.
/// - `SQLite` files are opened with `mode=ro` and never created.
///
/// # Errors
///
/// Returns [`ConnectorError`] when the host or path cannot be encoded.
pub fn connection_url(credentials: &DatabaseCredentials) -> Result<Url, ConnectorError> {
    match credentials.kind {
        DatabaseKind::Sqlite => sqlite_url(&credentials.database),
        DatabaseKind::Postgres => {
            let mut url = network_url("postgres", credentials)?;
            url.query_pairs_mut()
                .append_pair("options", "-c default_transaction_read_only=on");
            Ok(url)
        }
        DatabaseKind::Mysql => network_url("mysql", credentials),
    }
}

fn network_url(scheme: &str, credentials: &DatabaseCredentials) -> Result<Url, ConnectorError> {
    let host = credentials.host.trim();
    let mut url = Url::parse(&format!("{scheme}://localhost"))?;
    let host = if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    url.set_host(Some(&host))?;
    let invalid = || ConnectorError::InvalidHost(credentials.host.clone());
    url.set_port(credentials.effective_port()).map_err(|()| invalid())?;
    url.set_username(credentials.username.trim())
        .map_err(|()| invalid())?;
    let password = credentials.password.expose_secret();
    if !password.is_empty() {
        url.set_password(Some(password)).map_err(|()| invalid())?;
    }
    url.set_path(credentials.database.trim());
    Ok(url)
}

fn sqlite_url(database: &str) -> Result<Url, ConnectorError> {
    let invalid = || ConnectorError::InvalidPath(database.to_string());
    let path = std::path::absolute(database.trim()).map_err(|_| invalid())?;
    let path = path.to_str().ok_or_else(invalid)?;
    let mut url = Url::parse("sqlite://")?;
    url.set_path(path);
    url.query_pairs_mut().append_pair("mode", "ro");
    Ok(url)
}
