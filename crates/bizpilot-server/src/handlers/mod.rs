//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for one dashboard panel.

pub mod compliance;
pub mod dataset;
pub mod scenario;
pub mod status;
pub mod workflow;

// Re-export all handlers for use in router
pub use compliance::*;
pub use dataset::*;
pub use scenario::*;
pub use status::*;
pub use workflow::*;
