//! # glue-attachments
//!
//! Attachment glue for schema-evolvable host types in Paperglue RS.
//!
//! ## Features
//!
//! - Attachment binding: mixes in the engine capabilities once per host type,
//!   forwards options to the engine, declares metadata fields
//! - Metadata field registration (`N_file_name`, `N_content_type`, `N_file_size`,
//!   `N_updated_at`, `N_fingerprint`)
//! - Unified "after persisted" callbacks mapped onto the host's granular hooks
//! - Deprecated legacy entry point that fails with a redirect
//!
//! ## Example
//!
//! ```rust,ignore
//! use glue_attachments::{AttachmentBinder, AttachmentOptions, MemoryEngine};
//! use glue_models::EntityType;
//! use std::sync::Arc;
//!
//! let binder = AttachmentBinder::new(Arc::new(MemoryEngine::new()), Default::default());
//! let user = EntityType::new("User");
//!
//! binder.bind_attachment(
//!     &user,
//!     "avatar",
//!     &AttachmentOptions::new().with("styles", json!({ "thumb": "100x100" })),
//! )?;
//! ```

pub mod binder;
pub mod engine;
pub mod fields;
pub mod legacy;
pub mod lifecycle;
pub mod metadata;

pub use binder::{AttachmentBinder, BoundAttachment};
pub use engine::{
    AttachmentEngine, AttachmentOptions, ConfiguredAttachment, MemoryEngine, ENGINE_CAPABILITIES,
};
pub use fields::{derive_field_set, register_fields, validate_attachment_name, MetadataField};
#[allow(deprecated)]
pub use legacy::bind_attachment_legacy;
pub use lifecycle::{on_persisted, PhaseSelector};
pub use metadata::{fingerprint, instances_with_attachment, AttachmentMetadata};

#[cfg(test)]
mod tests {
    use super::*;
    use glue_core::config::GlueConfig;
    use glue_core::error::GlueError;
    use glue_core::traits::HostType;
    use glue_core::types::{HookPoint, PersistenceEvent};
    use glue_models::{Document, EntityType};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_user_avatar_scenario() {
        let engine = Arc::new(MemoryEngine::new());
        let binder = AttachmentBinder::new(Arc::clone(&engine), GlueConfig::default());
        let user = EntityType::new("User");
        let options = AttachmentOptions::new().with("styles", json!({ "thumb": "100x100" }));

        binder.bind_attachment(&user, "avatar", &options).unwrap();

        let calls = engine.configurations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "avatar");
        assert_eq!(calls[0].options, options);
        assert_eq!(
            user.fields().iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec![
                "avatar_file_name",
                "avatar_content_type",
                "avatar_file_size",
                "avatar_updated_at",
                "avatar_fingerprint",
            ]
        );

        // The engine hooks its post-processing on the unified persisted event
        let processed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&processed);
        on_persisted(&user, None::<&str>, move |doc: &Document| {
            let meta = AttachmentMetadata::read(doc, "avatar");
            if let Some(fingerprint) = meta.fingerprint {
                sink.lock().push(fingerprint);
            }
            Ok(())
        });
        assert_eq!(user.callback_count(HookPoint::AfterSave), 1);

        let mut doc = user.new_document();
        let upload = AttachmentMetadata::from_upload("me.png", None, b"pixels");
        upload.assign(&mut doc, "avatar");

        user.run_callbacks(PersistenceEvent::Create, &doc).unwrap();
        user.run_callbacks(PersistenceEvent::Destroy, &doc).unwrap();

        assert_eq!(*processed.lock(), vec![fingerprint(b"pixels")]);
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_reexport_fails() {
        let err = bind_attachment_legacy("avatar", &AttachmentOptions::new()).unwrap_err();
        assert!(matches!(err, GlueError::DeprecatedApi { .. }));
    }
}
