//! Door — one physical door known to the hub.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Hub-defined door identifier.
///
/// Opaque to doorbridge: the hub may use integers or strings. Integer ids
/// coming from the database are stored in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DoorId(String);

impl DoorId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DoorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DoorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for DoorId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for DoorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self::from(number),
        })
    }
}

/// A door that can be registered as a controllable device.
///
/// Identity is [`door_id`](Self::door_id); `display_name` is presentation only.
///
/// Deserialization goes through [`DoorRecordBuilder`], so fields are trimmed
/// and validated the same way as hand-built records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDoorRecord")]
pub struct DoorRecord {
    pub door_id: DoorId,
    pub display_name: String,
}

#[derive(Deserialize)]
struct RawDoorRecord {
    door_id: DoorId,
    #[serde(alias = "door_name", alias = "name")]
    display_name: String,
}

impl TryFrom<RawDoorRecord> for DoorRecord {
    type Error = ValidationError;

    fn try_from(raw: RawDoorRecord) -> Result<Self, Self::Error> {
        Self::builder()
            .door_id(raw.door_id)
            .display_name(raw.display_name)
            .build()
    }
}

impl DoorRecord {
    /// Create a builder for constructing a [`DoorRecord`].
    #[must_use]
    pub fn builder() -> DoorRecordBuilder {
        DoorRecordBuilder::default()
    }

    /// Build a record from a discovered row, falling back to the identifier
    /// when the description is missing or blank.
    #[must_use]
    pub fn discovered(door_id: DoorId, description: Option<&str>) -> Self {
        let display_name = match description.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => door_id.to_string(),
        };
        Self {
            door_id,
            display_name,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDoorId`] or
    /// [`ValidationError::EmptyDoorName`] when either field is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.door_id.is_empty() {
            return Err(ValidationError::EmptyDoorId);
        }
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::EmptyDoorName);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`DoorRecord`].
#[derive(Debug, Default)]
pub struct DoorRecordBuilder {
    door_id: Option<DoorId>,
    display_name: Option<String>,
}

impl DoorRecordBuilder {
    #[must_use]
    pub fn door_id(mut self, door_id: impl Into<DoorId>) -> Self {
        self.door_id = Some(door_id.into());
        self
    }

    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Consume the builder, trim the fields, validate, and return a [`DoorRecord`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the id or name is missing or blank.
    pub fn build(self) -> Result<DoorRecord, ValidationError> {
        let record = DoorRecord {
            door_id: DoorId::new(
                self.door_id
                    .map(|id| id.as_str().trim().to_string())
                    .unwrap_or_default(),
            ),
            display_name: self
                .display_name
                .map(|name| name.trim().to_string())
                .unwrap_or_default(),
        };
        record.validate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_record_when_id_and_name_provided() {
        let record = DoorRecord::builder()
            .door_id("7")
            .display_name("  Front Door ")
            .build()
            .unwrap();
        assert_eq!(record.door_id.as_str(), "7");
        assert_eq!(record.display_name, "Front Door");
    }

    #[test]
    fn should_return_validation_error_when_id_is_blank() {
        let result = DoorRecord::builder().door_id("  ").display_name("X").build();
        assert_eq!(result, Err(ValidationError::EmptyDoorId));
    }

    #[test]
    fn should_return_validation_error_when_name_is_missing() {
        let result = DoorRecord::builder().door_id("3").build();
        assert_eq!(result, Err(ValidationError::EmptyDoorName));
    }

    #[test]
    fn should_fall_back_to_id_when_description_is_empty() {
        let record = DoorRecord::discovered(DoorId::from(2_i64), Some(""));
        assert_eq!(record.display_name, "2");
    }

    #[test]
    fn should_fall_back_to_id_when_description_is_null() {
        let record = DoorRecord::discovered(DoorId::new("gate-a"), None);
        assert_eq!(record.display_name, "gate-a");
    }

    #[test]
    fn should_keep_description_when_present() {
        let record = DoorRecord::discovered(DoorId::from(1_i64), Some("Front Door"));
        assert_eq!(record.display_name, "Front Door");
    }

    #[test]
    fn should_deserialize_integer_and_string_ids() {
        let from_int: DoorId = serde_json::from_str("42").unwrap();
        let from_text: DoorId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_int, from_text);
    }

    #[test]
    fn should_accept_door_name_alias_when_deserializing() {
        let record: DoorRecord =
            serde_json::from_str(r#"{"door_id": 5, "door_name": "Side Door"}"#).unwrap();
        assert_eq!(record.door_id.as_str(), "5");
        assert_eq!(record.display_name, "Side Door");
    }

    #[test]
    fn should_trim_fields_when_deserializing() {
        let record: DoorRecord =
            serde_json::from_str(r#"{"door_id": " 7 ", "display_name": " Front Door "}"#)
                .unwrap();
        assert_eq!(record.door_id.as_str(), "7");
        assert_eq!(record.display_name, "Front Door");
    }

    #[test]
    fn should_reject_blank_id_when_deserializing() {
        let result: Result<DoorRecord, _> =
            serde_json::from_str(r#"{"door_id": "  ", "display_name": "Ghost"}"#);
        assert!(result.is_err());
    }
}
