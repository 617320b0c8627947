//! Shared foundation for the SiteExpress client-behavior toolkit.
//!
//! Everything the toolkit does to the host page — cookie reads and writes,
//! analytics command pushes, random draws, DOM mutation — goes through the
//! collaborator traits defined here, so behaviors stay deterministic under
//! test and portable across host bindings.
//!
//! # Modules
//!
//! - [`cookies`] — TTL'd cookie store trait and in-memory jar
//! - [`analytics`] — legacy ga.js command queue trait and capture queue
//! - [`random`] — uniform random source trait
//! - [`dom`] — element and content-target abstractions
//! - [`error`] — toolkit error type

pub mod analytics;
pub mod cookies;
pub mod dom;
pub mod error;
pub mod random;

pub use error::{ToolkitError, ToolkitResult};
