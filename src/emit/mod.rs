//! Route emission subsystem.
//!
//! # Data Flow
//! ```text
//! RouteTree (frozen)
//!     → draw.rs (per-mode traversal, scope bookkeeping)
//!     → decl.rs (resource declarations & individual route entries)
//!     → any RouteSink implementation
//!     → table.rs (expansion into concrete verb/path/handler rows)
//! ```
//!
//! # Design Decisions
//! - The emitter performs no I/O; it writes declarations into an injected
//!   sink that knows the host dispatch table
//! - Dispatch over route modes is an explicit match, one function per arm
//! - Emission order is deterministic: node insertion order drives it

pub mod decl;
pub mod draw;
pub mod table;

pub use decl::{RecordingSink, ResourceDecl, RouteDeclaration, RouteEntry, RouteSink, Scope};
pub use draw::draw;
pub use table::{RouteRow, RouteTable};
