//! Cell-enumeration encoding.
//!
//! The simplest strategy: one [`CellRecord`] per non-background cell, in
//! row-major order. The emitter writes each record as its own
//! `Cells(...).Interior.Color = RGB(...)` statement inside a per-frame
//! subroutine, so no data string or chunking is involved.
//!
//! Decode contract: the surface is pre-cleared to the background color,
//! then every record sets its cell. Background cells are never emitted.

use crate::color::Color;
use crate::error::CodecError;
use crate::grid::FrameGrid;

use super::{CellRecord, check_dimensions};

/// Encodes a grid as cell records, skipping background cells.
///
/// # Errors
///
/// Returns [`CodecError::DimensionMismatch`] when the grid does not match
/// the declared `width` x `height`.
pub fn encode(
	grid: &FrameGrid,
	width: u32,
	height: u32,
	background: Color,
	frame: usize,
) -> Result<Vec<CellRecord>, CodecError> {
	check_dimensions(grid, width, height, frame)?;

	Ok(grid
		.cells()
		.filter(|&(_, _, color)| color != background)
		.map(|(x, y, color)| CellRecord {
			x,
			y,
			color,
		})
		.collect())
}

/// Replays cell records onto a background-cleared surface.
///
/// The Rust-side mirror of the emitted decode routine, used to verify the
/// round-trip property.
///
/// # Errors
///
/// Returns [`CodecError::MalformedPayload`] for a record outside the grid.
pub fn decode(
	records: &[CellRecord],
	width: u32,
	height: u32,
	background: Color,
	frame: usize,
) -> Result<FrameGrid, CodecError> {
	let mut grid = FrameGrid::filled(width, height, background)?;
	for record in records {
		if !grid.contains(record.x, record.y) {
			return Err(CodecError::MalformedPayload {
				frame,
				message: format!(
					"cell ({}, {}) outside {width}x{height} grid",
					record.x, record.y
				),
			});
		}
		grid.set(record.x, record.y, record.color);
	}
	Ok(grid)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_grid() -> FrameGrid {
		let mut grid = FrameGrid::filled(3, 2, Color::WHITE).unwrap();
		grid.set(1, 1, Color::new(240, 0, 0));
		grid.set(3, 2, Color::new(0, 0, 240));
		grid
	}

	#[test]
	fn test_encode_skips_background() {
		let records = encode(&sample_grid(), 3, 2, Color::WHITE, 0).unwrap();
		assert_eq!(records.len(), 2);
		assert!(records.iter().all(|r| r.color != Color::WHITE));
	}

	#[test]
	fn test_encode_is_row_major_with_one_based_coordinates() {
		let records = encode(&sample_grid(), 3, 2, Color::WHITE, 0).unwrap();
		assert_eq!((records[0].x, records[0].y), (1, 1));
		assert_eq!((records[1].x, records[1].y), (3, 2));
	}

	#[test]
	fn test_roundtrip() {
		let grid = sample_grid();
		let records = encode(&grid, 3, 2, Color::WHITE, 0).unwrap();
		let decoded = decode(&records, 3, 2, Color::WHITE, 0).unwrap();
		assert_eq!(decoded, grid);
	}

	#[test]
	fn test_all_background_frame_encodes_empty() {
		let grid = FrameGrid::filled(4, 4, Color::WHITE).unwrap();
		let records = encode(&grid, 4, 4, Color::WHITE, 0).unwrap();
		assert!(records.is_empty());

		let decoded = decode(&records, 4, 4, Color::WHITE, 0).unwrap();
		assert_eq!(decoded, grid);
	}

	#[test]
	fn test_encode_rejects_dimension_mismatch() {
		let err = encode(&sample_grid(), 4, 4, Color::WHITE, 7).expect_err("should fail");
		match err {
			CodecError::DimensionMismatch {
				frame,
				..
			} => assert_eq!(frame, 7),
			_ => panic!("Unexpected error: {err:?}"),
		}
	}

	#[test]
	fn test_decode_rejects_out_of_range_record() {
		let records = vec![CellRecord {
			x: 5,
			y: 1,
			color: Color::BLACK,
		}];
		assert!(matches!(
			decode(&records, 3, 2, Color::WHITE, 0),
			Err(CodecError::MalformedPayload { .. })
		));
	}
}
