//! This crate provides the core types and codec pipeline for the `cellanim-rs` project.
//!
//! An animation goes through four stages, each its own module:
//!
//! - **[`grid`]**: resample decoded source frames onto a fixed cell grid and
//!   quantize every pixel ([`color`])
//! - **[`sequence`]**: collect the grids into an ordered sequence with
//!   uniform dimensions and a frame delay
//! - **[`encode`]**: encode each frame under one of three strategies
//!   (enumeration, grouped, delta)
//! - **[`vba`]**: emit one self-contained VBA module, chunking long data
//!   literals ([`chunk`]) to fit the host's statement limits
//!
//! [`pipeline::generate_module`] runs all four stages in one call.
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use cellanim_types::prelude::*;
//!
//! let frames = vec![RgbFrame::filled(8, 8, Color::new(200, 30, 30)).unwrap()];
//! let config = AnimationConfig {
//! 	target_width: 8,
//! 	target_height: 8,
//! 	strategy: Strategy::Grouped,
//! 	..AnimationConfig::default()
//! };
//!
//! let generated = generate_module(&frames, &config).unwrap();
//! assert!(generated.module.contains("Sub StartAnimation()"));
//! ```

pub mod chunk;
pub mod color;
pub mod config;
pub mod encode;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod sequence;
pub mod vba;

/// `use cellanim_types::prelude::*;` to import commonly used items.
pub mod prelude;
