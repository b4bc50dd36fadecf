//! Core types and defaults for gobox.
//!
//! This crate defines the immutable parameter bundle threaded through the
//! build pipeline ([`BuildSpec`]), repository reference resolution
//! ([`resolve_binary_name`]), image tag derivation ([`ImageTag`]), and the
//! shared error type.

pub mod config;
pub mod error;
pub mod reference;
pub mod spec;
pub mod tag;

pub use error::{Error, Result};
pub use reference::resolve_binary_name;
pub use spec::BuildSpec;
pub use tag::ImageTag;
