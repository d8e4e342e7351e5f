//! Dialplan engine - number generation and area resolution
//!
//! This crate implements the two pipelines that share the area-code index:
//! - Number generation (round-robin over codes, collision-free padding)
//! - Area resolution (longest-prefix match over a bounded length window)
//!
//! The two are linked by one law: every generated number resolves back to
//! the area code it was generated for.

pub mod generator;
pub mod resolver;

pub use generator::{generate, GeneratedRecord, NumberGenerator};
pub use resolver::{normalize, resolve, AreaResolver};
