//! Lifecycle Normalizer
//!
//! Host types only expose four granular callbacks. Code written against a single
//! "after persisted" (after commit) event registers through `on_persisted`, which
//! picks exactly one of them.

use std::sync::Arc;

use glue_core::error::GlueResult;
use glue_core::traits::HostType;
use glue_core::types::HookPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Requested phase of a persisted-event registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseSelector {
    Create,
    Update,
    Destroy,
    #[default]
    Save,
}

impl PhaseSelector {
    /// Exact match on the lowercase phase names; anything else selects `Save`
    pub fn parse(selector: &str) -> Self {
        match selector {
            "create" => Self::Create,
            "update" => Self::Update,
            "destroy" => Self::Destroy,
            "save" => Self::Save,
            other => {
                debug!(selector = other, "Unrecognized phase selector, using save");
                Self::Save
            }
        }
    }

    pub fn hook_point(&self) -> HookPoint {
        match self {
            Self::Create => HookPoint::AfterCreate,
            Self::Update => HookPoint::AfterUpdate,
            Self::Destroy => HookPoint::AfterDestroy,
            Self::Save => HookPoint::AfterSave,
        }
    }
}

impl From<&str> for PhaseSelector {
    fn from(selector: &str) -> Self {
        Self::parse(selector)
    }
}

impl From<Option<&str>> for PhaseSelector {
    fn from(selector: Option<&str>) -> Self {
        selector.map(Self::parse).unwrap_or_default()
    }
}

impl From<Option<PhaseSelector>> for PhaseSelector {
    fn from(selector: Option<PhaseSelector>) -> Self {
        selector.unwrap_or_default()
    }
}

/// Register `handler` on the one hook matching `selector`.
///
/// Returns the hook that received it.
pub fn on_persisted<H, F>(host: &H, selector: impl Into<PhaseSelector>, handler: F) -> HookPoint
where
    H: HostType,
    F: Fn(&H::Instance) -> GlueResult<()> + Send + Sync + 'static,
{
    let hook = selector.into().hook_point();
    host.register_callback(hook, Arc::new(handler));
    debug!(entity = %host.type_name(), hook = %hook, "Persisted callback registered");
    hook
}
