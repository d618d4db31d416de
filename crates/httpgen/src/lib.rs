//! Directive-driven HTTP routing glue.
//!
//! Interface contracts carry `#[http(...)]` lines in their method docs. This
//! crate parses those lines, builds route rules under a per-verb body policy,
//! and synthesizes the handlers and registration routine that expose each
//! method over HTTP.
//!
//! ```text
//! discover -> directive -> rule -> interface -> synth -> codegen
//! ```

pub mod codegen;
pub mod directive;
pub mod discover;
pub mod error;
pub mod generate;
pub mod http;
pub mod interface;
mod method;
mod parse_utils;
pub mod rule;
pub mod synth;

#[cfg(test)]
mod test_helpers;

pub use codegen::render_module;
pub use directive::{parse_directive, split_docs};
pub use discover::{Discovered, discover, resolve_sources};
pub use error::{DirectiveError, GenError, GenErrorKind};
pub use generate::{Artifacts, Outcome, generate_batch, generate_interface};
pub use interface::build_interface;
pub use rule::{build_rule, build_rules};
pub use synth::synthesize;
