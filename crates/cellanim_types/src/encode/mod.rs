//! Frame encoding strategies.
//!
//! Three interchangeable strategies turn a [`FrameGrid`] into an encoded
//! frame the emitted VBA module can decode with `Split` and `CInt` alone:
//!
//! - **Enumeration**: one `(x, y, color)` record per non-background cell;
//!   the host writes one cell-assignment statement per record.
//! - **Grouped**: cells grouped by color, wire format
//!   `r,g,b:x1,y1;x2,y2|...`; usually the most compact for sprite-like
//!   frames with few colors.
//! - **Delta**: only cells that changed since the previous frame, wire
//!   format `x,y,r,g,b|...`; the host keeps a persistent surface and never
//!   clears between frames.
//!
//! All coordinates in encoded payloads are 1-based. Enumeration and
//! grouped skip the background color entirely (their decode contract
//! pre-clears the surface); delta's frame 0 encodes the complete grid
//! because its surface is never pre-cleared.
//!
//! Every encoder has a Rust-side decode counterpart used by the round-trip
//! tests, mirroring the wire behavior of the emitted VBA routines.

pub mod delta;
pub mod enumeration;
pub mod grouped;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CodecError;
use crate::grid::FrameGrid;
use crate::sequence::FrameSequence;

pub use self::delta::DeltaEncoder;

/// Frame encoding strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
	/// One cell-assignment statement per non-background cell
	Enumeration,
	/// Cells grouped by color into one token per color
	Grouped,
	/// Only cells that changed since the previous frame
	Delta,
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Enumeration => "enumeration",
			Self::Grouped => "grouped",
			Self::Delta => "delta",
		};
		f.write_str(name)
	}
}

impl FromStr for Strategy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"enumeration" => Ok(Self::Enumeration),
			"grouped" => Ok(Self::Grouped),
			"delta" => Ok(Self::Delta),
			_ => Err(format!(
				"unknown strategy {s:?} (expected enumeration, grouped or delta)"
			)),
		}
	}
}

/// One `(x, y, color)` cell record produced by the enumeration strategy.
///
/// Coordinates are 1-based grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRecord {
	/// 1-based column within the grid
	pub x: u32,
	/// 1-based row within the grid
	pub y: u32,
	/// Quantized cell color
	pub color: Color,
}

/// One frame encoded under one strategy.
///
/// Opaque to everything but the matching decode contract; the emitter
/// turns `Cells` into per-cell statements and the string payloads into
/// chunked data-table literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedFrame {
	/// Enumeration records, row-major
	Cells(Vec<CellRecord>),
	/// Color-grouped payload string
	Grouped(String),
	/// Delta change-list payload string
	Delta(String),
}

impl EncodedFrame {
	/// Length of the encoded payload in characters.
	///
	/// For enumeration this is the number of records, since each record
	/// becomes its own host statement rather than part of a data string.
	pub fn payload_len(&self) -> usize {
		match self {
			Self::Cells(records) => records.len(),
			Self::Grouped(payload) | Self::Delta(payload) => payload.len(),
		}
	}
}

/// Encodes every frame of a sequence under one strategy.
///
/// `background` must already be quantized with the same palette as the
/// grids so background comparison is exact.
///
/// # Errors
///
/// - [`CodecError::EmptySource`] for a sequence with no frames
/// - [`CodecError::DimensionMismatch`] when a grid disagrees with the
///   sequence dimensions (unreachable for sequences built through
///   [`FrameSequence::push`], which enforces this on construction)
pub fn encode_sequence(
	sequence: &FrameSequence,
	strategy: Strategy,
	background: Color,
) -> Result<Vec<EncodedFrame>, CodecError> {
	if sequence.is_empty() {
		return Err(CodecError::EmptySource);
	}

	let width = sequence.width();
	let height = sequence.height();
	let mut encoded = Vec::with_capacity(sequence.len());

	match strategy {
		Strategy::Enumeration => {
			for (frame, grid) in sequence.grids().iter().enumerate() {
				let records = enumeration::encode(grid, width, height, background, frame)?;
				debug!("Frame {frame}: {} enumeration records", records.len());
				encoded.push(EncodedFrame::Cells(records));
			}
		}
		Strategy::Grouped => {
			for (frame, grid) in sequence.grids().iter().enumerate() {
				let payload = grouped::encode(grid, width, height, background, frame)?;
				debug!("Frame {frame}: {} grouped chars", payload.len());
				encoded.push(EncodedFrame::Grouped(payload));
			}
		}
		Strategy::Delta => {
			let mut encoder = DeltaEncoder::new(width, height);
			for (frame, grid) in sequence.grids().iter().enumerate() {
				let payload = encoder.encode_next(frame, grid)?;
				debug!("Frame {frame}: {} delta chars", payload.len());
				encoded.push(EncodedFrame::Delta(payload));
			}
		}
	}

	Ok(encoded)
}

/// Checks a grid against the declared sequence dimensions.
pub(crate) fn check_dimensions(
	grid: &FrameGrid,
	width: u32,
	height: u32,
	frame: usize,
) -> Result<(), CodecError> {
	if grid.width() != width || grid.height() != height {
		return Err(CodecError::DimensionMismatch {
			frame,
			expected_width: width,
			expected_height: height,
			actual_width: grid.width(),
			actual_height: grid.height(),
		});
	}
	Ok(())
}

/// Parses one decimal coordinate or channel field from a payload.
pub(crate) fn parse_field(field: &str, frame: usize) -> Result<u32, CodecError> {
	field.parse().map_err(|_| CodecError::MalformedPayload {
		frame,
		message: format!("expected an integer, got {field:?}"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_strategy_from_str() {
		assert_eq!("enumeration".parse::<Strategy>().unwrap(), Strategy::Enumeration);
		assert_eq!("GROUPED".parse::<Strategy>().unwrap(), Strategy::Grouped);
		assert_eq!("delta".parse::<Strategy>().unwrap(), Strategy::Delta);
		assert!("rle".parse::<Strategy>().is_err());
	}

	#[test]
	fn test_strategy_display_roundtrip() {
		for strategy in [Strategy::Enumeration, Strategy::Grouped, Strategy::Delta] {
			assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
		}
	}

	#[test]
	fn test_encode_sequence_rejects_empty() {
		let sequence = FrameSequence::new(2, 2, 100).unwrap();
		assert!(matches!(
			encode_sequence(&sequence, Strategy::Grouped, Color::WHITE),
			Err(CodecError::EmptySource)
		));
	}
}
