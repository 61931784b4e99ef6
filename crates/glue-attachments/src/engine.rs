//! Attachment Engine Seam
//!
//! The engine that stores, transforms, and serves files lives outside this crate.
//! The glue only needs to hand it a named attachment and its opaque options.

use std::collections::HashMap;

use glue_core::error::EngineConfigError;
use glue_core::types::Capability;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Capability set mixed into a host type before its first attachment is bound
pub const ENGINE_CAPABILITIES: [Capability; 2] =
    [Capability::AttachmentEngine, Capability::HostGlue];

/// Opaque engine configuration for one attachment (storage path template,
/// styles, validations, ...). The glue forwards it without inspecting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentOptions(Map<String, Value>);

impl AttachmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for AttachmentOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Registration entry point of an external attachment engine
#[cfg_attr(test, mockall::automock)]
pub trait AttachmentEngine: Send + Sync {
    /// Accept the configuration of attachment `name` on entity type `entity`
    fn configure_attachment(
        &self,
        entity: &str,
        name: &str,
        options: &AttachmentOptions,
    ) -> Result<(), EngineConfigError>;
}

/// A configuration accepted by `MemoryEngine`
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredAttachment {
    pub entity: String,
    pub name: String,
    pub options: AttachmentOptions,
}

/// In-memory engine that records every configuration call
#[derive(Default)]
pub struct MemoryEngine {
    calls: Mutex<Vec<ConfiguredAttachment>>,
    /// attachment name -> rejection message
    rejections: HashMap<String, String>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any configuration of `name` with `message`
    pub fn rejecting(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.rejections.insert(name.into(), message.into());
        self
    }

    /// Every accepted configuration, in call order
    pub fn configurations(&self) -> Vec<ConfiguredAttachment> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.name == name).count()
    }
}

impl AttachmentEngine for MemoryEngine {
    fn configure_attachment(
        &self,
        entity: &str,
        name: &str,
        options: &AttachmentOptions,
    ) -> Result<(), EngineConfigError> {
        if let Some(message) = self.rejections.get(name) {
            return Err(EngineConfigError::new(name, message.clone()));
        }

        self.calls.lock().push(ConfiguredAttachment {
            entity: entity.to_string(),
            name: name.to_string(),
            options: options.clone(),
        });
        debug!(entity, name, "Engine configured attachment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_are_transparent_json() {
        let options = AttachmentOptions::new()
            .with("styles", json!({ "thumb": "100x100" }))
            .with("path", ":rails_root/public/:id/:filename");

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["styles"]["thumb"], "100x100");

        let back: AttachmentOptions = serde_json::from_value(value).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_memory_engine_records_calls() {
        let engine = MemoryEngine::new();
        let options = AttachmentOptions::new().with("styles", json!({ "thumb": "100x100" }));

        engine.configure_attachment("User", "avatar", &options).unwrap();

        let calls = engine.configurations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].entity, "User");
        assert_eq!(calls[0].options, options);
        assert_eq!(engine.call_count("avatar"), 1);
        assert_eq!(engine.call_count("resume"), 0);
    }

    #[test]
    fn test_memory_engine_rejection() {
        let engine = MemoryEngine::new().rejecting("avatar", "unknown storage `ftp`");

        let err = engine
            .configure_attachment("User", "avatar", &AttachmentOptions::new())
            .unwrap_err();
        assert_eq!(err.attachment, "avatar");
        assert!(engine.configurations().is_empty());
    }
}
