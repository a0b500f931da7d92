//! Hub endpoint — the remote hub that drives the door actuators.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::action::DoorAction;
use crate::door::DoorId;
use crate::error::ValidationError;

/// Port the hub web service listens on when nothing else is known.
pub const DEFAULT_HUB_PORT: u16 = 4960;

/// Address of one hub.
///
/// Immutable once built. Doors registered against the same hub share one
/// endpoint through an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEndpoint", into = "RawEndpoint")]
pub struct HubEndpoint {
    host: String,
    port: u16,
    base: Url,
}

#[derive(Serialize, Deserialize)]
struct RawEndpoint {
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

fn default_port() -> u16 {
    DEFAULT_HUB_PORT
}

impl TryFrom<RawEndpoint> for HubEndpoint {
    type Error = ValidationError;

    fn try_from(raw: RawEndpoint) -> Result<Self, Self::Error> {
        Self::new(raw.host, raw.port)
    }
}

impl From<HubEndpoint> for RawEndpoint {
    fn from(endpoint: HubEndpoint) -> Self {
        Self {
            host: endpoint.host,
            port: endpoint.port,
        }
    }
}

impl HubEndpoint {
    /// Validate and build an endpoint.
    ///
    /// The host may be an IPv4/IPv6 address or a hostname; it is trimmed
    /// and must not contain whitespace or URL delimiters (`/ ? # @ :`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHost`], [`ValidationError::InvalidHost`]
    /// or [`ValidationError::InvalidPort`].
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ValidationError> {
        let host = host.into().trim().to_string();
        if host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        if host.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidHost(host));
        }
        if port == 0 {
            return Err(ValidationError::InvalidPort);
        }

        let authority = if host.parse::<Ipv6Addr>().is_ok() {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        let base = Url::parse(&format!("http://{authority}/"))
            .map_err(|_| ValidationError::InvalidHost(host.clone()))?;
        if !addresses_exactly(&base, &host, port) {
            return Err(ValidationError::InvalidHost(host));
        }

        Ok(Self { host, port, base })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Root URL of the hub, e.g. `http://hub.lan:4960/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build the command URL `http://{host}:{port}/admin/Door/{door_id}/{p1}/{p2}`.
    ///
    /// The door id is written as a single, percent-encoded path segment.
    #[must_use]
    pub fn command_url(&self, door_id: &DoorId, action: DoorAction) -> Url {
        let (first, second) = action.params();
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .clear()
                .push("admin")
                .push("Door")
                .push(door_id.as_str())
                .push(bool_segment(first))
                .push(bool_segment(second));
        }
        url
    }

    /// Identifier for one door behind this hub: `{host}:{port}:{door_id}`.
    #[must_use]
    pub fn unique_id(&self, door_id: &DoorId) -> String {
        format!("{}:{}:{door_id}", self.host, self.port)
    }
}

/// Whether `base` is exactly `http://{host}:{port}/`, so no URL delimiter in
/// the host moved the port, path or userinfo.
fn addresses_exactly(base: &Url, host: &str, port: u16) -> bool {
    let same_host = match base.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case(host),
        Some(Host::Ipv4(addr)) => host.parse::<Ipv4Addr>() == Ok(addr),
        Some(Host::Ipv6(addr)) => host.parse::<Ipv6Addr>() == Ok(addr),
        None => false,
    };
    same_host
        && base.port_or_known_default() == Some(port)
        && base.username().is_empty()
        && base.password().is_none()
        && base.path() == "/"
        && base.query().is_none()
        && base.fragment().is_none()
}

fn bool_segment(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

impl fmt::Display for HubEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> HubEndpoint {
        HubEndpoint::new("hub.lan", 4960).unwrap()
    }

    #[test]
    fn should_build_close_back_to_schedule_path() {
        let url = hub().command_url(&DoorId::new("7"), DoorAction::CloseBackToSchedule);
        assert_eq!(url.as_str(), "http://hub.lan:4960/admin/Door/7/true/true");
    }

    #[test]
    fn should_build_paths_for_every_action() {
        let door = DoorId::new("12");
        let paths: Vec<String> = DoorAction::ALL
            .iter()
            .map(|action| hub().command_url(&door, *action).path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/admin/Door/12/true/false",
                "/admin/Door/12/true/true",
                "/admin/Door/12/false/false",
                "/admin/Door/12/false/true",
            ]
        );
    }

    #[test]
    fn should_percent_encode_door_id_as_single_segment() {
        let url = hub().command_url(&DoorId::new("a/b c"), DoorAction::OpenForOneEntry);
        assert_eq!(url.path(), "/admin/Door/a%2Fb%20c/false/false");
    }

    #[test]
    fn should_bracket_ipv6_hosts() {
        let endpoint = HubEndpoint::new("::1", 8080).unwrap();
        assert_eq!(endpoint.base_url().as_str(), "http://[::1]:8080/");
    }

    #[test]
    fn should_trim_host() {
        let endpoint = HubEndpoint::new("  10.0.0.5 ", 80).unwrap();
        assert_eq!(endpoint.host(), "10.0.0.5");
    }

    #[test]
    fn should_reject_empty_host() {
        assert_eq!(HubEndpoint::new("   ", 4960), Err(ValidationError::EmptyHost));
    }

    #[test]
    fn should_reject_host_with_inner_whitespace() {
        assert!(matches!(
            HubEndpoint::new("hub lan", 4960),
            Err(ValidationError::InvalidHost(_))
        ));
    }

    #[test]
    fn should_reject_host_with_url_delimiters() {
        for host in ["hub/x", "hub?x", "hub#x", "evil@hub", "hub:81", "user:pw@hub"] {
            assert!(
                matches!(
                    HubEndpoint::new(host, 4960),
                    Err(ValidationError::InvalidHost(_))
                ),
                "{host} should be rejected"
            );
        }
    }

    #[test]
    fn should_keep_configured_port_on_default_http_port() {
        let endpoint = HubEndpoint::new("hub.lan", 80).unwrap();
        let url = endpoint.command_url(&DoorId::new("7"), DoorAction::CloseBackToSchedule);
        assert_eq!(url.as_str(), "http://hub.lan/admin/Door/7/true/true");
        assert!(HubEndpoint::new("hub/x", 80).is_err());
    }

    #[test]
    fn should_accept_mixed_case_hostname() {
        assert!(HubEndpoint::new("Mikvah-PC", 4960).is_ok());
    }

    #[test]
    fn should_reject_port_zero() {
        assert_eq!(HubEndpoint::new("hub", 0), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn should_format_unique_id_from_host_port_and_door() {
        assert_eq!(hub().unique_id(&DoorId::new("3")), "hub.lan:4960:3");
    }

    #[test]
    fn should_default_port_when_deserializing_without_one() {
        let endpoint: HubEndpoint = toml::from_str("host = 'mikvah-pc'").unwrap();
        assert_eq!(endpoint.port(), DEFAULT_HUB_PORT);
    }

    #[test]
    fn should_reject_invalid_host_when_deserializing() {
        let result: Result<HubEndpoint, _> = toml::from_str("host = ''\nport = 1");
        assert!(result.is_err());
    }
}
