//! httpgen core - route, handler and configuration types
//!
//! Every stage of the generator exchanges the immutable values defined here:
//! directives go in, route rules and handler plans come out.

pub mod config;
pub mod decl;
pub mod directive;
pub mod handler;
pub mod model;
pub mod path;
pub mod route;

pub use config::*;
pub use decl::*;
pub use directive::*;
pub use handler::*;
pub use model::*;
pub use path::*;
pub use route::*;
