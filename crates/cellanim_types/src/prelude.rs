//! Prelude module for `cellanim_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and functions.
//!
//! # Examples
//!
//! ```
//! use cellanim_types::prelude::*;
//!
//! let config = AnimationConfig::default();
//! assert_eq!(config.strategy, Strategy::Grouped);
//! ```

#[doc(inline)]
pub use crate::color::Color;

#[doc(inline)]
pub use crate::config::AnimationConfig;

#[doc(inline)]
pub use crate::encode::{encode_sequence, CellRecord, DeltaEncoder, EncodedFrame, Strategy};

#[doc(inline)]
pub use crate::error::CodecError;

#[doc(inline)]
pub use crate::grid::{FrameGrid, PixelSource, RgbFrame};

#[doc(inline)]
pub use crate::pipeline::{generate_module, Generated, GenerationReport};

#[doc(inline)]
pub use crate::sequence::FrameSequence;

#[doc(inline)]
pub use crate::vba::emit_module;

#[doc(inline)]
pub use crate::chunk::chunk_statement;
