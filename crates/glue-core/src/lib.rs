//! # glue-core
//!
//! Core types, traits, and utilities for Paperglue RS.
//!
//! This crate provides the foundational building blocks used across the other crates:
//! - Common error types and the `GlueResult` alias
//! - Schema vocabulary (field types, lifecycle hook points, capabilities)
//! - The `HostType` trait implemented by schema-evolvable entity types
//! - Configuration and logging bootstrap

pub mod config;
pub mod error;
pub mod telemetry;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
