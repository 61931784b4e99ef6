//! Deprecation Guard
//!
//! The old registration name shadowed the engine's own entry point and was easy
//! to call by mistake. It now fails immediately and names its replacement.

use std::convert::Infallible;

use glue_core::error::{GlueError, GlueResult};
use tracing::warn;

use crate::engine::AttachmentOptions;

/// Name of the entry point that replaced the legacy one
pub const REPLACEMENT: &str = "bind_attachment";

/// Always fails with `GlueError::DeprecatedApi`; never touches any host type.
#[deprecated(note = "use `AttachmentBinder::bind_attachment` instead")]
pub fn bind_attachment_legacy(name: &str, _options: &AttachmentOptions) -> GlueResult<Infallible> {
    warn!(attachment = name, replacement = REPLACEMENT, "Deprecated attachment registration called");
    Err(GlueError::DeprecatedApi {
        called: "bind_attachment_legacy",
        replacement: REPLACEMENT,
    })
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;

    #[test]
    fn test_always_fails() {
        for name in ["avatar", "", "resume"] {
            let err = bind_attachment_legacy(name, &AttachmentOptions::new()).unwrap_err();
            match err {
                GlueError::DeprecatedApi {
                    called,
                    replacement,
                } => {
                    assert_eq!(called, "bind_attachment_legacy");
                    assert_eq!(replacement, "bind_attachment");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
