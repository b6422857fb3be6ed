//! Prelude module for `cimbar_types`.
//!
//! # Examples
//!
//! ```rust
//! use cimbar_types::prelude::*;
//!
//! let config = Config::baseline();
//! let codec = Codec::new(&config);
//! let writer = FrameWriter::new(&config);
//! let frame = writer.write(&codec, b"hello");
//! ```

#[doc(inline)]
pub use crate::codec::Codec;

#[doc(inline)]
pub use crate::concurrent::{CapturedFrame, ConcurrentSink};

#[doc(inline)]
pub use crate::config::Config;

#[doc(inline)]
pub use crate::ecc::{AlignedStream, Chunk, RsStream};

#[doc(inline)]
pub use crate::error::{CimbarError, Result};

#[doc(inline)]
pub use crate::extractor::{ExtractResult, Extractor};

#[doc(inline)]
pub use crate::fountain::{FountainDecoderSink, FountainEncoder, FountainMetadata};

#[doc(inline)]
pub use crate::frame::{CellReadout, FrameReader, FrameWriter};

#[doc(inline)]
pub use crate::lattice::Lattice;
