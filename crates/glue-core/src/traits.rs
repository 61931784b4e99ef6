//! Core traits at the seam between the attachment glue and a host persistence layer

use std::sync::Arc;

use crate::error::GlueResult;
use crate::types::{Capability, FieldDefinition, HookPoint};

/// A lifecycle callback registered on a host type
pub type Callback<I> = Arc<dyn Fn(&I) -> GlueResult<()> + Send + Sync>;

/// A schema-evolvable entity type whose registries can be extended at definition time.
///
/// Methods take `&self`: implementations keep their registries behind a lock so a
/// type can be shared process-wide while it is being declared.
pub trait HostType: Send + Sync {
    /// Instance type passed to lifecycle callbacks
    type Instance;

    /// Human-readable type name for logs and error messages
    fn type_name(&self) -> &str;

    /// Look up a declared field
    fn field(&self, name: &str) -> Option<FieldDefinition>;

    /// Number of declared fields
    fn field_count(&self) -> usize;

    /// Declare every field not yet present, as one step.
    ///
    /// Returns how many fields were added. A name already declared with the same
    /// type is skipped; one declared with a different type fails the whole call
    /// before anything is added.
    fn add_fields(&self, fields: &[FieldDefinition]) -> GlueResult<usize>;

    /// Append a callback to one of the four granular hooks
    fn register_callback(&self, hook: HookPoint, callback: Callback<Self::Instance>);

    /// Number of callbacks registered on a hook
    fn callback_count(&self, hook: HookPoint) -> usize;

    fn has_capability(&self, capability: Capability) -> bool;

    /// Mix in a capability set unless every member is already present.
    ///
    /// The check and the insert happen under one lock; returns `true` only for the
    /// call that performed the mix-in.
    fn extend_with(&self, capabilities: &[Capability]) -> bool;

    /// Remember that an attachment slot is bound; `false` when it already was
    fn record_attachment(&self, name: &str) -> bool;

    /// Attachment slots bound so far, in binding order
    fn attachments(&self) -> Vec<String>;
}
