//! Internal crate for `cimbar-rs`.
//!
//! This crate is kept separate from the top-level crate so the actual codec
//! implementation (`cimbar_types`) can be depended on directly by tools that
//! don't want the CLI dependency tree, and should not be used directly.
//!
//! # Examples
//!
//! ```rust
//! use cimbar_internal::prelude::*;
//!
//! let config = Config::baseline();
//! ```

/// `use cimbar_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export cimbar_types for convenience
pub use cimbar_types;
