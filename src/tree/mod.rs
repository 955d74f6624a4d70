//! Route tree subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint list (document order)
//!     → node.rs (insert: peel segments, get-or-create children)
//!     → RouteTree (arena of nodes, frozen after the last insert)
//!     → classified and emitted on demand, never mutated again
//! ```
//!
//! # Design Decisions
//! - Tree built once at compile time, read-only afterwards
//! - Nodes live in an arena owned by the tree; ids are plain indices and
//!   the parent link is a non-owning id, never used for lifetime management
//! - Children are insertion-ordered; sibling order is emission order
//! - Explicit get-or-create instead of auto-vivifying map access

pub mod node;

pub use node::{NodeId, RouteNode, RouteTree};
