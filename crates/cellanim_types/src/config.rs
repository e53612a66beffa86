//! Generation configuration.
//!
//! One [`AnimationConfig`] describes a whole generation run. Validation is
//! fail-fast: an invalid configuration is rejected before any frame is
//! touched.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::encode::Strategy;
use crate::error::CodecError;

/// Configuration surface for one generation run.
///
/// # Examples
///
/// ```
/// use cellanim_types::config::AnimationConfig;
/// use cellanim_types::encode::Strategy;
///
/// let config = AnimationConfig {
/// 	strategy: Strategy::Delta,
/// 	..AnimationConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
	/// Grid width in cells
	pub target_width: u32,
	/// Grid height in cells
	pub target_height: u32,
	/// Quantization levels per color channel (1-256)
	pub palette_size: u16,
	/// Delay between frames in milliseconds
	pub frame_delay_ms: u32,
	/// Frame encoding strategy
	pub strategy: Strategy,
	/// Background color, treated as transparent by the enumeration and
	/// grouped strategies
	pub background: Color,
}

impl Default for AnimationConfig {
	fn default() -> Self {
		Self {
			target_width: 32,
			target_height: 32,
			palette_size: 16,
			frame_delay_ms: 200,
			strategy: Strategy::Grouped,
			background: Color::WHITE,
		}
	}
}

impl AnimationConfig {
	/// Checks the configuration before any work happens.
	///
	/// # Errors
	///
	/// - [`CodecError::InvalidDimensions`] for a zero target dimension
	/// - [`CodecError::InvalidPaletteSize`] for a palette size of 0 or over 256
	pub fn validate(&self) -> Result<(), CodecError> {
		if self.target_width == 0 || self.target_height == 0 {
			return Err(CodecError::InvalidDimensions {
				width: self.target_width,
				height: self.target_height,
			});
		}
		if self.palette_size == 0 || self.palette_size > 256 {
			return Err(CodecError::InvalidPaletteSize {
				palette_size: self.palette_size,
			});
		}
		Ok(())
	}

	/// The background color after quantization.
	///
	/// Grid cells are compared against the background after both went
	/// through the quantizer, so a 255-channel white still matches its
	/// 240-channel quantized form at palette size 16.
	///
	/// # Errors
	///
	/// Returns [`CodecError::InvalidPaletteSize`] from the quantizer.
	pub fn quantized_background(&self) -> Result<Color, CodecError> {
		self.background.quantize(self.palette_size)
	}
}
