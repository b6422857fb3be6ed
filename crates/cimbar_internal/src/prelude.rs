//! Prelude module for `cimbar_internal`.
//!
//! # Examples
//!
//! ```rust
//! use cimbar_internal::prelude::*;
//!
//! let config = Config::baseline();
//! let enc = Codec::new(config.clone());
//! ```

// Re-export everything from cimbar_types::prelude
#[doc(inline)]
pub use cimbar_types::prelude::*;

// Re-export the entire cimbar_types module for advanced usage
#[doc(inline)]
pub use cimbar_types;
