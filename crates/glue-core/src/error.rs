//! Core error types for Paperglue RS
//!
//! Every failure surfaces synchronously to the caller of a definition-time
//! registration call; nothing here is retried or swallowed.

use thiserror::Error;

use crate::types::{FieldType, HookPoint};

/// Standard Result type for Paperglue operations
pub type GlueResult<T> = Result<T, GlueError>;

/// Core error type for all Paperglue operations
#[derive(Error, Debug)]
pub enum GlueError {
    #[error("Invalid attachment name `{name}`: {reason}")]
    InvalidAttachmentName { name: String, reason: String },

    #[error("Field `{field}` on {entity} is already declared as {existing}, cannot redeclare as {requested}")]
    FieldConflict {
        entity: String,
        field: String,
        existing: FieldType,
        requested: FieldType,
    },

    /// Raised by the attachment engine and passed through untouched
    #[error(transparent)]
    Engine(#[from] EngineConfigError),

    #[error("{called} is deprecated, use '{replacement}' instead")]
    DeprecatedApi {
        called: &'static str,
        replacement: &'static str,
    },

    #[error("Callback failed in {hook}: {message}")]
    Callback { hook: HookPoint, message: String },
}

/// Error reported by an attachment engine while accepting a configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Attachment engine rejected `{attachment}`: {message}")]
pub struct EngineConfigError {
    pub attachment: String,
    pub message: String,
}

impl EngineConfigError {
    pub fn new(attachment: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            attachment: attachment.into(),
            message: message.into(),
        }
    }
}

impl GlueError {
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        GlueError::InvalidAttachmentName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn callback(hook: HookPoint, message: impl Into<String>) -> Self {
        GlueError::Callback {
            hook,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GlueError::InvalidAttachmentName { .. } => "invalid_attachment_name",
            GlueError::FieldConflict { .. } => "field_conflict",
            GlueError::Engine(_) => "engine_config_error",
            GlueError::DeprecatedApi { .. } => "deprecated_api",
            GlueError::Callback { .. } => "callback_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_transparent() {
        let inner = EngineConfigError::new("avatar", "unknown storage `ftp`");
        let err: GlueError = inner.clone().into();

        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.error_code(), "engine_config_error");
        match err {
            GlueError::Engine(e) => assert_eq!(e, inner),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deprecated_message_names_replacement() {
        let err = GlueError::DeprecatedApi {
            called: "has_attached_file",
            replacement: "bind_attachment",
        };
        assert_eq!(
            err.to_string(),
            "has_attached_file is deprecated, use 'bind_attachment' instead"
        );
    }

    #[test]
    fn test_error_codes() {
        let errors = [
            GlueError::invalid_name("", "must not be empty"),
            GlueError::from(EngineConfigError::new("avatar", "bad path")),
            GlueError::DeprecatedApi {
                called: "bind_attachment_legacy",
                replacement: "bind_attachment",
            },
            GlueError::callback(HookPoint::AfterSave, "boom"),
        ];
        let codes: Vec<&str> = errors.iter().map(GlueError::error_code).collect();
        assert_eq!(
            codes,
            vec![
                "invalid_attachment_name",
                "engine_config_error",
                "deprecated_api",
                "callback_failed"
            ]
        );
    }

    #[test]
    fn test_field_conflict_message() {
        let err = GlueError::FieldConflict {
            entity: "User".into(),
            field: "avatar_file_size".into(),
            existing: FieldType::String,
            requested: FieldType::Integer,
        };
        assert_eq!(err.error_code(), "field_conflict");
        assert!(err.to_string().contains("avatar_file_size"));
        assert!(err.to_string().contains("string"));
    }
}
