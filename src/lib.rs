//! OpenAPI route compiler.
//!
//! Compiles a flat list of endpoint declarations from an OpenAPI 3.1+
//! document into a RESTful route tree, inferring resource / namespace /
//! member-action structure purely from path shape and verb.
//!
//! # Architecture Overview
//!
//! ```text
//! OpenAPI document (JSON/YAML)
//!     │
//!     ▼
//! ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐
//! │   spec   │────▶│   tree   │────▶│ classify │────▶│   emit   │
//! │ document │     │  insert  │     │  modes & │     │  draw →  │
//! │ endpoint │     │  (arena) │     │  actions │     │  sink    │
//! └──────────┘     └──────────┘     └──────────┘     └────┬─────┘
//!                                                         │
//!                                        ┌────────────────┼─────────┐
//!                                        ▼                ▼         ▼
//!                                   RouteTable        lookup      mount
//!                                   (dispatch rows)   (handler    (axum
//!                                                     → def)      router)
//! ```
//!
//! The whole pipeline runs once, synchronously, at build time; everything
//! downstream of insertion reads a frozen tree.

pub mod classify;
pub mod emit;
pub mod lookup;
pub mod mount;
pub mod spec;
pub mod tree;

pub use classify::{Action, ActionMode, ResourceKind, RouteMode};
pub use emit::{draw, RouteDeclaration, RouteSink, RouteTable};
pub use lookup::{build_lookup, HandlerKey, Lookup, RouteResolver, UnresolvableRoute};
pub use spec::{CompileError, Document, Endpoint, Method, SpecError};
pub use tree::RouteTree;
