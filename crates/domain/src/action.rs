//! Door actions — the four fixed commands every door accepts.
//!
//! Each action maps to a static pair of boolean path parameters sent to the
//! hub. The mapping lives in [`DoorAction::params`] and is never computed
//! from anything else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the four commands a door understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DoorAction {
    /// Hold the door open until the next scheduled change.
    #[serde(rename = "open_until_next")]
    OpenTillNextSchedule,
    /// Close the door and return it to its schedule.
    #[serde(rename = "close_back_to_schedule")]
    CloseBackToSchedule,
    /// Release the door for a single entry.
    #[serde(rename = "open_one_entry")]
    OpenForOneEntry,
    /// Cancel a pending single-entry release.
    #[serde(rename = "close_if_single_open")]
    CloseIfOpenForOneEntry,
}

impl DoorAction {
    /// Every action, in the order they are presented to operators.
    pub const ALL: [Self; 4] = [
        Self::OpenTillNextSchedule,
        Self::CloseBackToSchedule,
        Self::OpenForOneEntry,
        Self::CloseIfOpenForOneEntry,
    ];

    /// The `(param1, param2)` pair appended to the hub command path.
    #[must_use]
    pub const fn params(self) -> (bool, bool) {
        match self {
            Self::OpenTillNextSchedule => (true, false),
            Self::CloseBackToSchedule => (true, true),
            Self::OpenForOneEntry => (false, false),
            Self::CloseIfOpenForOneEntry => (false, true),
        }
    }

    /// Stable machine key, also used as the serialized form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OpenTillNextSchedule => "open_until_next",
            Self::CloseBackToSchedule => "close_back_to_schedule",
            Self::OpenForOneEntry => "open_one_entry",
            Self::CloseIfOpenForOneEntry => "close_if_single_open",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenTillNextSchedule => "Open till next schedule",
            Self::CloseBackToSchedule => "Close back to schedule",
            Self::OpenForOneEntry => "Open for 1 entry",
            Self::CloseIfOpenForOneEntry => "Close if open for 1 entry",
        }
    }

    /// Icon hint for front-ends (Material Design Icons names).
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::OpenTillNextSchedule | Self::OpenForOneEntry => "mdi:turnstile",
            Self::CloseBackToSchedule | Self::CloseIfOpenForOneEntry => "mdi:turnstile-outline",
        }
    }
}

impl fmt::Display for DoorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DoorAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.key() == s)
            .ok_or_else(|| ValidationError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_open_till_next_schedule_to_true_false() {
        assert_eq!(DoorAction::OpenTillNextSchedule.params(), (true, false));
    }

    #[test]
    fn should_map_close_back_to_schedule_to_true_true() {
        assert_eq!(DoorAction::CloseBackToSchedule.params(), (true, true));
    }

    #[test]
    fn should_map_open_for_one_entry_to_false_false() {
        assert_eq!(DoorAction::OpenForOneEntry.params(), (false, false));
    }

    #[test]
    fn should_map_close_if_open_for_one_entry_to_false_true() {
        assert_eq!(DoorAction::CloseIfOpenForOneEntry.params(), (false, true));
    }

    #[test]
    fn should_give_every_action_a_distinct_parameter_pair() {
        let mut pairs: Vec<_> = DoorAction::ALL.iter().map(|a| a.params()).collect();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn should_parse_every_key_back_into_its_action() {
        for action in DoorAction::ALL {
            assert_eq!(action.key().parse::<DoorAction>().unwrap(), action);
        }
    }

    #[test]
    fn should_reject_unknown_key() {
        let result = "open_forever".parse::<DoorAction>();
        assert_eq!(
            result,
            Err(ValidationError::UnknownAction("open_forever".to_string()))
        );
    }

    #[test]
    fn should_serialize_as_key() {
        let json = serde_json::to_string(&DoorAction::CloseIfOpenForOneEntry).unwrap();
        assert_eq!(json, "\"close_if_single_open\"");
    }

    #[test]
    fn should_pick_outline_icon_for_closing_actions() {
        assert_eq!(DoorAction::CloseBackToSchedule.icon(), "mdi:turnstile-outline");
        assert_eq!(DoorAction::OpenForOneEntry.icon(), "mdi:turnstile");
    }
}
