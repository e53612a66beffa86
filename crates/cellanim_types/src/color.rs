//! Color representation and the step quantizer.
//!
//! The palette is implicit: it is defined entirely by the quantization
//! function, never materialized as a lookup table. Each channel is floored
//! to the nearest multiple of `256 / palette_size`, so quantization is
//! idempotent and equality after quantization is exact.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// RGB color with 8-bit channels.
///
/// Immutable value type; equality is exact. Alpha is handled at the
/// decoding boundary (frames are composited over the background color
/// before they reach the pipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
}

impl Color {
	/// Pure white, the conventional background color.
	pub const WHITE: Self = Self::new(255, 255, 255);

	/// Pure black.
	pub const BLACK: Self = Self::new(0, 0, 0);

	/// Creates a new RGB color.
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self {
			r,
			g,
			b,
		}
	}

	/// Creates a grayscale color.
	pub const fn gray(value: u8) -> Self {
		Self::new(value, value, value)
	}

	/// Quantizes the color to `palette_size` evenly spaced levels per channel.
	///
	/// Each channel becomes `(channel / step) * step` with
	/// `step = 256 / palette_size` (integer division), i.e. it is floored to
	/// the step boundary below it. Result channels are always multiples of
	/// `step` within `[0, 256 - step]`.
	///
	/// Quantization is idempotent: `c.quantize(p)?.quantize(p)? == c.quantize(p)?`.
	///
	/// # Errors
	///
	/// Returns [`CodecError::InvalidPaletteSize`] when `palette_size` is 0
	/// (the step would divide by zero) or greater than 256 (the step would
	/// collapse to zero).
	pub fn quantize(self, palette_size: u16) -> Result<Self, CodecError> {
		if palette_size == 0 || palette_size > 256 {
			return Err(CodecError::InvalidPaletteSize {
				palette_size,
			});
		}

		let step = 256 / u32::from(palette_size);
		let floor = |channel: u8| ((u32::from(channel) / step) * step) as u8;

		Ok(Self::new(floor(self.r), floor(self.g), floor(self.b)))
	}

	/// Returns the color as a `#rrggbb` hex string.
	pub fn to_hex(self) -> String {
		format!("#{}", hex::encode([self.r, self.g, self.b]))
	}

	/// Parses a `rrggbb` hex string (with or without a leading `#`).
	///
	/// # Errors
	///
	/// Returns an error message when the input is not exactly six hex digits.
	pub fn from_hex(s: &str) -> Result<Self, String> {
		let digits = s.strip_prefix('#').unwrap_or(s);
		let bytes = hex::decode(digits).map_err(|e| format!("invalid hex color {s:?}: {e}"))?;
		match bytes[..] {
			[r, g, b] => Ok(Self::new(r, g, b)),
			_ => Err(format!("invalid hex color {s:?}: expected 6 hex digits")),
		}
	}

	/// Returns the color as a VBA `RGB(r,g,b)` literal.
	///
	/// Compact form without spaces, suitable for per-cell data statements.
	pub fn vba_literal(self) -> String {
		format!("RGB({},{},{})", self.r, self.g, self.b)
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::WHITE
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_color_creation() {
		let color = Color::new(255, 128, 64);
		assert_eq!(color.r, 255);
		assert_eq!(color.g, 128);
		assert_eq!(color.b, 64);
	}

	#[test]
	fn test_color_gray() {
		let color = Color::gray(128);
		assert_eq!(color, Color::new(128, 128, 128));
	}

	#[test]
	fn test_quantize_floors_to_step() {
		// palette 16 -> step 16
		let color = Color::new(255, 17, 15).quantize(16).unwrap();
		assert_eq!(color, Color::new(240, 16, 0));
	}

	#[test]
	fn test_quantize_identity_at_full_palette() {
		let color = Color::new(13, 77, 201);
		assert_eq!(color.quantize(256).unwrap(), color);
	}

	#[test]
	fn test_quantize_single_level() {
		// palette 1 -> step 256 -> everything collapses to black
		let color = Color::new(255, 128, 1).quantize(1).unwrap();
		assert_eq!(color, Color::BLACK);
	}

	#[test]
	fn test_quantize_idempotent() {
		for palette_size in [1u16, 2, 4, 8, 16, 32, 64, 128, 256] {
			for value in [0u8, 1, 15, 16, 127, 128, 254, 255] {
				let color = Color::new(value, value.wrapping_mul(3), 255 - value);
				let once = color.quantize(palette_size).unwrap();
				let twice = once.quantize(palette_size).unwrap();
				assert_eq!(once, twice, "palette {palette_size}, value {value}");
			}
		}
	}

	#[test]
	fn test_quantize_rejects_zero_palette() {
		let err = Color::WHITE.quantize(0).expect_err("palette 0 should fail");
		match err {
			CodecError::InvalidPaletteSize {
				palette_size,
			} => assert_eq!(palette_size, 0),
			_ => panic!("Unexpected error: {err:?}"),
		}
	}

	#[test]
	fn test_quantize_rejects_oversized_palette() {
		assert!(Color::WHITE.quantize(257).is_err());
	}

	#[test]
	fn test_to_hex() {
		assert_eq!(Color::WHITE.to_hex(), "#ffffff");
		assert_eq!(Color::new(255, 0, 16).to_hex(), "#ff0010");
	}

	#[test]
	fn test_from_hex_roundtrip() {
		let color = Color::new(18, 52, 86);
		assert_eq!(Color::from_hex(&color.to_hex()).unwrap(), color);
		assert_eq!(Color::from_hex("ff0000").unwrap(), Color::new(255, 0, 0));
	}

	#[test]
	fn test_from_hex_rejects_garbage() {
		assert!(Color::from_hex("red").is_err());
		assert!(Color::from_hex("#ffff").is_err());
		assert!(Color::from_hex("#ffffffff").is_err());
	}

	#[test]
	fn test_vba_literal() {
		assert_eq!(Color::new(240, 0, 16).vba_literal(), "RGB(240,0,16)");
	}
}
