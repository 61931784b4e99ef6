//! Attachment metadata values stored on documents

use chrono::{DateTime, Utc};
use glue_models::Document;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::fields::MetadataField;

/// The five metadata values of one attachment on one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentMetadata {
    /// Original file name
    pub file_name: Option<String>,
    /// MIME content type
    pub content_type: Option<String>,
    /// File size in bytes
    pub file_size: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
    /// SHA256 hex digest of the content
    pub fingerprint: Option<String>,
}

impl AttachmentMetadata {
    /// Describe an uploaded file.
    ///
    /// Without an explicit content type one is guessed from the file extension.
    pub fn from_upload(file_name: &str, content_type: Option<&str>, data: &[u8]) -> Self {
        let content_type = content_type.map(str::to_string).unwrap_or_else(|| {
            mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .to_string()
        });

        Self {
            file_name: Some(file_name.to_string()),
            content_type: Some(content_type),
            file_size: byte_size(data.len()),
            updated_at: Some(Utc::now()),
            fingerprint: Some(fingerprint(data)),
        }
    }

    /// An attachment is present once it has a file name
    pub fn is_present(&self) -> bool {
        self.file_name.is_some()
    }

    /// Read the values of `attachment` from `document`
    pub fn read(document: &Document, attachment: &str) -> Self {
        let name = |field: MetadataField| field.field_name(attachment);
        Self {
            file_name: document
                .get_str(&name(MetadataField::FileName))
                .map(str::to_string),
            content_type: document
                .get_str(&name(MetadataField::ContentType))
                .map(str::to_string),
            file_size: document.get_i64(&name(MetadataField::FileSize)),
            updated_at: document.get_timestamp(&name(MetadataField::UpdatedAt)),
            fingerprint: document
                .get_str(&name(MetadataField::Fingerprint))
                .map(str::to_string),
        }
    }

    /// Write these values into `document` under `attachment`'s field names
    pub fn assign(&self, document: &mut Document, attachment: &str) {
        let name = |field: MetadataField| field.field_name(attachment);
        document.set_optional(name(MetadataField::FileName), self.file_name.clone());
        document.set_optional(name(MetadataField::ContentType), self.content_type.clone());
        document.set_optional(name(MetadataField::FileSize), self.file_size);
        document.set_timestamp(name(MetadataField::UpdatedAt), self.updated_at);
        document.set_optional(name(MetadataField::Fingerprint), self.fingerprint.clone());
    }

    /// Null out every metadata field of `attachment`
    pub fn clear(document: &mut Document, attachment: &str) {
        Self::default().assign(document, attachment);
    }
}

/// Byte count as stored in `N_file_size`; null when it does not fit
fn byte_size(len: usize) -> Option<i64> {
    i64::try_from(len).ok()
}

/// SHA256 hex digest used as the attachment fingerprint
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Documents that currently carry a file in `attachment`, for bulk jobs such as
/// reprocessing styles
pub fn instances_with_attachment<'a, I>(
    documents: I,
    attachment: &'a str,
) -> impl Iterator<Item = &'a Document> + 'a
where
    I: IntoIterator<Item = &'a Document>,
    I::IntoIter: 'a,
{
    let field = MetadataField::FileName.field_name(attachment);
    documents
        .into_iter()
        .filter(move |doc| !doc.is_null(&field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_upload() {
        let meta = AttachmentMetadata::from_upload("me.png", None, b"hello");

        assert_eq!(meta.file_name.as_deref(), Some("me.png"));
        assert_eq!(meta.content_type.as_deref(), Some("image/png"));
        assert_eq!(meta.file_size, Some(5));
        assert_eq!(
            meta.fingerprint.as_deref(),
            Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
        );
        assert!(meta.updated_at.is_some());
    }

    #[test]
    fn test_explicit_and_unknown_content_type() {
        let explicit = AttachmentMetadata::from_upload("scan", Some("application/pdf"), b"%PDF");
        assert_eq!(explicit.content_type.as_deref(), Some("application/pdf"));

        let unknown = AttachmentMetadata::from_upload("blob", None, b"");
        assert_eq!(
            unknown.content_type.as_deref(),
            Some("application/octet-stream")
        );
        assert_eq!(unknown.file_size, Some(0));
    }

    #[test]
    fn test_byte_size_bounds() {
        assert_eq!(byte_size(0), Some(0));
        assert_eq!(byte_size(i64::MAX as usize), Some(i64::MAX));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_length_is_null() {
        assert_eq!(byte_size(i64::MAX as usize + 1), None);
        assert_eq!(byte_size(usize::MAX), None);
    }

    #[test]
    fn test_assign_read_and_clear() {
        let mut doc = Document::new("User");
        let meta = AttachmentMetadata::from_upload("cv.pdf", None, b"resume body");

        meta.assign(&mut doc, "resume");
        assert_eq!(doc.get_i64("resume_file_size"), Some(11));
        assert_eq!(AttachmentMetadata::read(&doc, "resume"), meta);
        assert!(!AttachmentMetadata::read(&doc, "avatar").is_present());

        AttachmentMetadata::clear(&mut doc, "resume");
        assert!(doc.is_null("resume_file_name"));
        assert!(doc.is_null("resume_updated_at"));
        assert_eq!(AttachmentMetadata::read(&doc, "resume"), AttachmentMetadata::default());
    }

    #[test]
    fn test_instances_with_attachment() {
        let mut with_avatar = Document::new("User");
        AttachmentMetadata::from_upload("me.png", None, b"png").assign(&mut with_avatar, "avatar");

        let without = Document::new("User");
        let mut cleared = Document::new("User");
        AttachmentMetadata::clear(&mut cleared, "avatar");

        let docs = vec![with_avatar.clone(), without, cleared];
        let found: Vec<&Document> = instances_with_attachment(&docs, "avatar").collect();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, with_avatar.id);
        assert_eq!(instances_with_attachment(&docs, "resume").count(), 0);
    }
}
