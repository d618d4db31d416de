//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::path::PathStyle;

/// Switches that relax the per-verb body policy and pick the output flavour.
///
/// Passed by reference into every rule-building and synthesis call; nothing
/// reads it from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Accept `body` on DELETE routes.
    pub allow_delete_body: bool,
    /// Accept PATCH routes without a `body`.
    pub allow_empty_patch_body: bool,
    /// Bind through the call carrier instead of the framework extractors.
    pub use_structured_encoding: bool,
    pub path_style: PathStyle,
}
