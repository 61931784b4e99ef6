//! # glue-models
//!
//! Host entity types for Paperglue RS.
//!
//! An `EntityType` is a schema-evolvable record type: fields, lifecycle callbacks,
//! and capability mix-ins are added while the type is being declared, with no
//! migration step. Instances are schema-less `Document`s.

pub use glue_core::traits::{Callback, HostType};

pub mod document;
pub mod entity_type;

pub use document::Document;
pub use entity_type::EntityType;
