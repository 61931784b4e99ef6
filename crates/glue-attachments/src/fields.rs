//! Field Registrar
//!
//! Each attachment slot `N` owns five nullable metadata fields on its host type:
//!
//! | Field             | Type      |
//! |-------------------|-----------|
//! | `N_file_name`     | string    |
//! | `N_content_type`  | string    |
//! | `N_file_size`     | integer   |
//! | `N_updated_at`    | timestamp |
//! | `N_fingerprint`   | string    |

use std::sync::LazyLock;

use glue_core::error::{GlueError, GlueResult};
use glue_core::traits::HostType;
use glue_core::types::{FieldDefinition, FieldType};
use regex::Regex;
use tracing::debug;

static ATTACHMENT_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid attachment name regex")
});

/// One of the five metadata fields of an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    FileName,
    ContentType,
    FileSize,
    UpdatedAt,
    Fingerprint,
}

impl MetadataField {
    pub const ALL: [MetadataField; 5] = [
        MetadataField::FileName,
        MetadataField::ContentType,
        MetadataField::FileSize,
        MetadataField::UpdatedAt,
        MetadataField::Fingerprint,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::FileName => "file_name",
            Self::ContentType => "content_type",
            Self::FileSize => "file_size",
            Self::UpdatedAt => "updated_at",
            Self::Fingerprint => "fingerprint",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::FileSize => FieldType::Integer,
            Self::UpdatedAt => FieldType::Timestamp,
            Self::FileName | Self::ContentType | Self::Fingerprint => FieldType::String,
        }
    }

    /// Field name for this metadata on attachment `attachment`
    pub fn field_name(&self, attachment: &str) -> String {
        format!("{}_{}", attachment, self.suffix())
    }
}

/// Check that `name` can prefix the metadata suffixes.
///
/// Identifier characters only, and no trailing underscore since the suffixes
/// bring their own separator.
pub fn validate_attachment_name(name: &str) -> GlueResult<()> {
    if name.is_empty() {
        return Err(GlueError::invalid_name(name, "must not be empty"));
    }
    if !ATTACHMENT_NAME_PATTERN.is_match(name) {
        return Err(GlueError::invalid_name(
            name,
            "must start with a letter or underscore and contain only letters, digits, and underscores",
        ));
    }
    if name.ends_with('_') {
        return Err(GlueError::invalid_name(
            name,
            "must not end with the `_` separator",
        ));
    }
    Ok(())
}

/// The five metadata field definitions for `attachment`, in declaration order
pub fn derive_field_set(attachment: &str) -> Vec<FieldDefinition> {
    MetadataField::ALL
        .iter()
        .map(|field| FieldDefinition::optional(field.field_name(attachment), field.field_type()))
        .collect()
}

/// Fail if any derived field is already declared on `host` with another type
pub fn check_field_conflicts<H: HostType>(host: &H, attachment: &str) -> GlueResult<()> {
    for requested in derive_field_set(attachment) {
        if let Some(existing) = host.field(&requested.name) {
            if existing.field_type != requested.field_type {
                return Err(conflict(attachment, &requested.name, existing.field_type));
            }
        }
    }
    Ok(())
}

/// Declare the metadata fields of `attachment` on `host`.
///
/// Fields already present with the right type are left alone, so registering
/// the same attachment again adds nothing. Returns the number of fields added.
pub fn register_fields<H: HostType>(host: &H, attachment: &str) -> GlueResult<usize> {
    validate_attachment_name(attachment)?;

    let added = host
        .add_fields(&derive_field_set(attachment))
        .map_err(|err| match err {
            GlueError::FieldConflict {
                field, existing, ..
            } => conflict(attachment, &field, existing),
            other => other,
        })?;

    if added == 0 {
        debug!(entity = %host.type_name(), attachment, "Metadata fields already declared");
    } else {
        debug!(entity = %host.type_name(), attachment, added, "Metadata fields declared");
    }
    Ok(added)
}

fn conflict(attachment: &str, field: &str, existing: FieldType) -> GlueError {
    GlueError::invalid_name(
        attachment,
        format!("field `{}` is already declared as {}", field, existing),
    )
}
