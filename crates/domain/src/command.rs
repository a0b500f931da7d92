//! Command results — the classified outcome of one hub request.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::action::DoorAction;

/// Maximum number of characters of a hub response body kept for diagnostics.
pub const BODY_EXCERPT_LIMIT: usize = 200;

/// How a single hub command ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The hub answered with a 2xx status.
    Ok { status: u16 },
    /// The hub was reached but answered with a non-2xx status.
    ///
    /// `body` is a short excerpt of the response, kept for the operator only.
    HubError { status: u16, body: String },
    /// The hub could not be reached (refused, DNS, timeout, …).
    TransportError { detail: String },
}

impl CommandOutcome {
    /// Classify a received HTTP status.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        if (200..=299).contains(&status) {
            Self::Ok { status }
        } else {
            Self::HubError {
                status,
                body: excerpt(body),
            }
        }
    }

    /// Wrap a transport-level failure description.
    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::TransportError {
            detail: detail.into(),
        }
    }
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(BODY_EXCERPT_LIMIT).collect()
}

/// Result of one `send` call, stamped with the time it completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub action: DoorAction,
    pub outcome: CommandOutcome,
    pub timestamp: DateTime<Utc>,
}

impl CommandResult {
    /// Stamp an outcome with the current time.
    #[must_use]
    pub fn now(action: DoorAction, outcome: CommandOutcome) -> Self {
        Self {
            action,
            outcome,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        matches!(self.outcome, CommandOutcome::Ok { .. })
    }

    /// HTTP status, when the hub answered at all.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self.outcome {
            CommandOutcome::Ok { status } | CommandOutcome::HubError { status, .. } => {
                Some(status)
            }
            CommandOutcome::TransportError { .. } => None,
        }
    }

    /// Failure description, absent on success.
    #[must_use]
    pub fn error_detail(&self) -> Option<String> {
        match &self.outcome {
            CommandOutcome::Ok { .. } => None,
            CommandOutcome::HubError { status, body } if body.is_empty() => {
                Some(format!("HTTP {status}"))
            }
            CommandOutcome::HubError { status, body } => Some(format!("HTTP {status}: {body}")),
            CommandOutcome::TransportError { detail } => Some(detail.clone()),
        }
    }

    /// One-line status shown to operators (`OK (200)`, `HTTP 503: …`, `Error: …`).
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.outcome {
            CommandOutcome::Ok { status } => format!("OK ({status})"),
            CommandOutcome::HubError { .. } => self.error_detail().unwrap_or_default(),
            CommandOutcome::TransportError { detail } => format!("Error: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_every_2xx_as_ok() {
        for status in [200, 201, 204, 299] {
            assert_eq!(
                CommandOutcome::from_status(status, ""),
                CommandOutcome::Ok { status }
            );
        }
    }

    #[test]
    fn should_classify_other_statuses_as_hub_error_with_exact_status() {
        for status in [100, 199, 300, 302, 404, 500, 503] {
            assert!(matches!(
                CommandOutcome::from_status(status, ""),
                CommandOutcome::HubError { status: s, .. } if s == status
            ));
        }
    }

    #[test]
    fn should_truncate_hub_error_body() {
        let body = "x".repeat(500);
        let CommandOutcome::HubError { body, .. } = CommandOutcome::from_status(500, &body) else {
            panic!("expected HubError");
        };
        assert_eq!(body.len(), BODY_EXCERPT_LIMIT);
    }

    #[test]
    fn should_render_ok_status_line() {
        let result = CommandResult::now(
            DoorAction::OpenForOneEntry,
            CommandOutcome::Ok { status: 200 },
        );
        assert!(result.success());
        assert_eq!(result.http_status(), Some(200));
        assert_eq!(result.error_detail(), None);
        assert_eq!(result.status_line(), "OK (200)");
    }

    #[test]
    fn should_render_hub_error_with_body_excerpt() {
        let result = CommandResult::now(
            DoorAction::OpenForOneEntry,
            CommandOutcome::from_status(503, "door offline\n"),
        );
        assert!(!result.success());
        assert_eq!(result.http_status(), Some(503));
        assert_eq!(result.status_line(), "HTTP 503: door offline");
    }

    #[test]
    fn should_render_transport_error_without_status() {
        let result = CommandResult::now(
            DoorAction::CloseBackToSchedule,
            CommandOutcome::transport("connection refused"),
        );
        assert_eq!(result.http_status(), None);
        assert_eq!(result.error_detail().as_deref(), Some("connection refused"));
        assert_eq!(result.status_line(), "Error: connection refused");
    }

    #[test]
    fn should_serialize_outcome_with_kind_tag() {
        let json = serde_json::to_value(CommandOutcome::Ok { status: 204 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "ok", "status": 204}));
    }
}
