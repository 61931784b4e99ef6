//! Attachment Binder
//!
//! Entry point for declaring an attachment slot on a host type.

use std::sync::Arc;

use glue_core::config::GlueConfig;
use glue_core::error::{GlueError, GlueResult};
use glue_core::traits::HostType;
use glue_core::types::FieldDefinition;
use tracing::{debug, info, instrument};

use crate::engine::{AttachmentEngine, AttachmentOptions, ENGINE_CAPABILITIES};
use crate::fields::{check_field_conflicts, derive_field_set, register_fields, validate_attachment_name};

/// Outcome of a successful binding
#[derive(Debug, Clone, PartialEq)]
pub struct BoundAttachment {
    pub entity: String,
    pub name: String,
    /// The five metadata fields now declared on the host
    pub fields: Vec<FieldDefinition>,
    /// Number of those fields this call added (0 when re-binding)
    pub fields_added: usize,
    /// Whether this call mixed the engine capabilities into the host
    pub mixed_in: bool,
}

/// Binds named attachments to host types and hands their options to the engine
pub struct AttachmentBinder<E: AttachmentEngine> {
    engine: Arc<E>,
    config: GlueConfig,
}

impl<E: AttachmentEngine> AttachmentBinder<E> {
    pub fn new(engine: Arc<E>, config: GlueConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Bind attachment `name` to `host`.
    ///
    /// Mixes the engine capabilities into `host` if it has none yet, forwards
    /// `options` to the engine unchanged, then declares the metadata fields.
    /// Binding a name again reconfigures the engine but adds no fields.
    #[instrument(skip(self, host, options), fields(entity = %host.type_name()))]
    pub fn bind_attachment<H: HostType>(
        &self,
        host: &H,
        name: &str,
        options: &AttachmentOptions,
    ) -> GlueResult<BoundAttachment> {
        self.validate_name(name)?;
        // Reject before the engine sees anything
        check_field_conflicts(host, name)?;

        let mixed_in = host.extend_with(&ENGINE_CAPABILITIES);
        if mixed_in {
            debug!(capabilities = ?ENGINE_CAPABILITIES, "Engine capabilities mixed in");
        }

        self.engine
            .configure_attachment(host.type_name(), name, options)?;

        let fields_added = register_fields(host, name)?;
        if !host.record_attachment(name) {
            debug!(attachment = name, "Attachment re-bound");
        }

        info!(attachment = name, fields_added, "Attachment bound");

        Ok(BoundAttachment {
            entity: host.type_name().to_string(),
            name: name.to_string(),
            fields: derive_field_set(name),
            fields_added,
            mixed_in,
        })
    }

    /// Old registration name, kept only to point callers at `bind_attachment`
    #[deprecated(note = "use `AttachmentBinder::bind_attachment` instead")]
    #[allow(deprecated)]
    pub fn bind_attachment_legacy<H: HostType>(
        &self,
        _host: &H,
        name: &str,
        options: &AttachmentOptions,
    ) -> GlueResult<BoundAttachment> {
        match crate::legacy::bind_attachment_legacy(name, options)? {}
    }

    fn validate_name(&self, name: &str) -> GlueResult<()> {
        validate_attachment_name(name)?;
        let max = self.config.max_attachment_name_length;
        if name.len() > max {
            return Err(GlueError::invalid_name(
                name,
                format!("must be at most {} characters", max),
            ));
        }
        Ok(())
    }
}
