//! Schema vocabulary shared by host types and the attachment glue

use serde::{Deserialize, Serialize};

/// Semantic type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Timestamp,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Timestamp => "timestamp",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field declared on a host type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    /// Declared fields have no default, so a missing value reads as null
    pub nullable: bool,
}

impl FieldDefinition {
    /// A nullable field with no default value
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: true,
        }
    }
}

/// The four granular callbacks a host type exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    AfterCreate,
    AfterUpdate,
    AfterDestroy,
    AfterSave,
}

impl HookPoint {
    pub const ALL: [HookPoint; 4] = [
        HookPoint::AfterCreate,
        HookPoint::AfterUpdate,
        HookPoint::AfterDestroy,
        HookPoint::AfterSave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AfterCreate => "after_create",
            Self::AfterUpdate => "after_update",
            Self::AfterDestroy => "after_destroy",
            Self::AfterSave => "after_save",
        }
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Instance-level persistence event raised by the host persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceEvent {
    Create,
    Update,
    Destroy,
}

impl PersistenceEvent {
    /// Callbacks fired for this event, in firing order.
    ///
    /// Saves (create or update) also run the after-save chain; destroy does not.
    pub fn hook_points(&self) -> &'static [HookPoint] {
        match self {
            Self::Create => &[HookPoint::AfterCreate, HookPoint::AfterSave],
            Self::Update => &[HookPoint::AfterUpdate, HookPoint::AfterSave],
            Self::Destroy => &[HookPoint::AfterDestroy],
        }
    }
}

/// Capability sets that can be mixed into a host type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The attachment engine's core behavior
    AttachmentEngine,
    /// The engine's host-type integration layer
    HostGlue,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttachmentEngine => "attachment_engine",
            Self::HostGlue => "host_glue",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_event_hooks() {
        assert_eq!(
            PersistenceEvent::Create.hook_points(),
            &[HookPoint::AfterCreate, HookPoint::AfterSave]
        );
        assert_eq!(
            PersistenceEvent::Update.hook_points(),
            &[HookPoint::AfterUpdate, HookPoint::AfterSave]
        );
        assert_eq!(
            PersistenceEvent::Destroy.hook_points(),
            &[HookPoint::AfterDestroy]
        );
    }

    #[test]
    fn test_optional_field() {
        let field = FieldDefinition::optional("avatar_file_size", FieldType::Integer);
        assert!(field.nullable);
        assert_eq!(field.field_type.as_str(), "integer");
    }

    #[test]
    fn test_hook_point_serde() {
        let json = serde_json::to_string(&HookPoint::AfterDestroy).unwrap();
        assert_eq!(json, "\"after_destroy\"");
    }
}
