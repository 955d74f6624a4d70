//! Spec document subsystem.
//!
//! # Data Flow
//! ```text
//! OpenAPI document (JSON or YAML)
//!     → document.rs (decode & version gate)
//!     → endpoint.rs (one Endpoint per path/verb pair)
//!     → ordered Vec<Endpoint> (document order preserved)
//!     → handed to the route tree for insertion
//! ```
//!
//! # Design Decisions
//! - Documents are decoded into serde_json values regardless of source
//!   format; YAML is transcoded on the way in
//! - Version gate (3.1+) runs before any path is looked at
//! - Path and verb iteration order follows the document; it becomes
//!   route insertion order, which is semantically significant
//! - Definition metadata is carried opaquely and never inspected

pub mod document;
pub mod endpoint;

pub use document::{Document, SpecError};
pub use endpoint::{CompileError, Endpoint, Method};
