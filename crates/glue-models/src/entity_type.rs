//! Host entity type with definition-time registries

use std::collections::HashMap;

use glue_core::error::{GlueError, GlueResult};
use glue_core::traits::{Callback, HostType};
use glue_core::types::{Capability, FieldDefinition, FieldType, HookPoint, PersistenceEvent};
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::document::Document;

#[derive(Default)]
struct Registry {
    /// Declared fields in declaration order
    fields: Vec<FieldDefinition>,
    callbacks: HashMap<HookPoint, Vec<Callback<Document>>>,
    /// Mixed-in capabilities in mix-in order; never shrinks
    capabilities: Vec<Capability>,
    attachments: Vec<String>,
}

impl Registry {
    fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A schema-evolvable entity type.
///
/// ```rust,ignore
/// let user = EntityType::new("User");
/// user.declare_field("email", FieldType::String)?;
/// let doc = user.new_document();
/// user.run_callbacks(PersistenceEvent::Create, &doc)?;
/// ```
pub struct EntityType {
    name: String,
    registry: RwLock<Registry>,
}

impl std::fmt::Debug for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("EntityType")
            .field("name", &self.name)
            .field("fields", &registry.fields)
            .field("capabilities", &registry.capabilities)
            .field("attachments", &registry.attachments)
            .finish()
    }
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: RwLock::new(Registry::default()),
        }
    }

    /// Declare a single nullable field
    pub fn declare_field(&self, name: impl Into<String>, field_type: FieldType) -> GlueResult<bool> {
        let added = self.add_fields(&[FieldDefinition::optional(name, field_type)])?;
        Ok(added == 1)
    }

    /// Snapshot of the declared fields
    pub fn fields(&self) -> Vec<FieldDefinition> {
        self.registry.read().fields.clone()
    }

    /// Snapshot of the mixed-in capabilities, in mix-in order
    pub fn capabilities(&self) -> Vec<Capability> {
        self.registry.read().capabilities.clone()
    }

    pub fn new_document(&self) -> Document {
        Document::new(self.name.clone())
    }

    /// Fire the callbacks for one persistence event on `document`.
    ///
    /// Callbacks run in registration order; the first failure stops the chain.
    pub fn run_callbacks(&self, event: PersistenceEvent, document: &Document) -> GlueResult<()> {
        for hook in event.hook_points() {
            self.fire(*hook, document)?;
        }
        Ok(())
    }

    /// Fire a single hook's callbacks
    pub fn fire(&self, hook: HookPoint, document: &Document) -> GlueResult<()> {
        // Cloned out so a callback may touch the registry without deadlocking
        let callbacks: Vec<Callback<Document>> = self
            .registry
            .read()
            .callbacks
            .get(&hook)
            .cloned()
            .unwrap_or_default();

        trace!(entity = %self.name, hook = %hook, count = callbacks.len(), "Firing callbacks");
        for callback in callbacks {
            callback(document)?;
        }
        Ok(())
    }
}

impl HostType for EntityType {
    type Instance = Document;

    fn type_name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<FieldDefinition> {
        self.registry.read().field(name).cloned()
    }

    fn field_count(&self) -> usize {
        self.registry.read().fields.len()
    }

    fn add_fields(&self, fields: &[FieldDefinition]) -> GlueResult<usize> {
        let mut registry = self.registry.write();

        for requested in fields {
            if let Some(existing) = registry.field(&requested.name) {
                if existing.field_type != requested.field_type {
                    return Err(GlueError::FieldConflict {
                        entity: self.name.clone(),
                        field: requested.name.clone(),
                        existing: existing.field_type,
                        requested: requested.field_type,
                    });
                }
            }
        }

        let mut added = 0;
        for requested in fields {
            if registry.field(&requested.name).is_none() {
                registry.fields.push(requested.clone());
                added += 1;
            }
        }

        debug!(entity = %self.name, added, total = registry.fields.len(), "Fields declared");
        Ok(added)
    }

    fn register_callback(&self, hook: HookPoint, callback: Callback<Document>) {
        self.registry
            .write()
            .callbacks
            .entry(hook)
            .or_default()
            .push(callback);
    }

    fn callback_count(&self, hook: HookPoint) -> usize {
        self.registry
            .read()
            .callbacks
            .get(&hook)
            .map_or(0, Vec::len)
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.registry.read().capabilities.contains(&capability)
    }

    fn extend_with(&self, capabilities: &[Capability]) -> bool {
        let mut registry = self.registry.write();
        if capabilities
            .iter()
            .all(|c| registry.capabilities.contains(c))
        {
            return false;
        }

        for capability in capabilities {
            if !registry.capabilities.contains(capability) {
                registry.capabilities.push(*capability);
            }
        }
        true
    }

    fn record_attachment(&self, name: &str) -> bool {
        let mut registry = self.registry.write();
        if registry.attachments.iter().any(|a| a == name) {
            return false;
        }
        registry.attachments.push(name.to_string());
        true
    }

    fn attachments(&self) -> Vec<String> {
        self.registry.read().attachments.clone()
    }
}
