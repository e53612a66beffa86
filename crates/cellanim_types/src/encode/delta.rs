//! Inter-frame delta encoding.
//!
//! Each frame encodes only the cells whose quantized color differs from
//! the same coordinate in the previous frame. Wire format:
//!
//! ```text
//! x,y,r,g,b|x,y,r,g,b|...
//! ```
//!
//! Frame 0 has no previous frame, so every cell counts as a change and the
//! complete grid is encoded, background included. That is the uniform
//! frame-0 rule for this strategy: the host surface is persistent and is
//! never pre-cleared, so frame 0 must establish the full initial state.
//!
//! Frames must be fed strictly in order; replaying the payloads for frames
//! `0..=n` cumulatively reproduces frame `n` exactly.

use crate::error::CodecError;
use crate::grid::FrameGrid;

use super::{check_dimensions, parse_field};

/// Stateful delta encoder holding the previously encoded grid.
///
/// # Examples
///
/// ```
/// use cellanim_types::encode::DeltaEncoder;
/// use cellanim_types::grid::FrameGrid;
/// use cellanim_types::color::Color;
///
/// let mut encoder = DeltaEncoder::new(2, 2);
/// let frame0 = FrameGrid::filled(2, 2, Color::WHITE).unwrap();
/// let mut frame1 = frame0.clone();
/// frame1.set(1, 1, Color::BLACK);
///
/// assert_eq!(encoder.encode_next(0, &frame0).unwrap().split('|').count(), 4);
/// assert_eq!(encoder.encode_next(1, &frame1).unwrap(), "1,1,0,0,0");
/// ```
#[derive(Debug, Clone)]
pub struct DeltaEncoder {
	width: u32,
	height: u32,
	previous: Option<FrameGrid>,
	next_frame: usize,
}

impl DeltaEncoder {
	/// Creates an encoder for a sequence of `width` x `height` grids.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			previous: None,
			next_frame: 0,
		}
	}

	/// Encodes the next frame against the previously encoded one.
	///
	/// A frame with no changes encodes as the empty string.
	///
	/// # Errors
	///
	/// - [`CodecError::FrameOrder`] when `frame` is not the next expected index
	/// - [`CodecError::DimensionMismatch`] when the grid does not match the
	///   declared sequence dimensions
	pub fn encode_next(&mut self, frame: usize, grid: &FrameGrid) -> Result<String, CodecError> {
		if frame != self.next_frame {
			return Err(CodecError::FrameOrder {
				expected: self.next_frame,
				actual: frame,
			});
		}
		check_dimensions(grid, self.width, self.height, frame)?;

		let changes: Vec<String> = grid
			.cells()
			.filter(|&(x, y, color)| match &self.previous {
				Some(previous) => previous.get(x, y) != color,
				None => true,
			})
			.map(|(x, y, color)| format!("{x},{y},{},{},{}", color.r, color.g, color.b))
			.collect();

		self.previous = Some(grid.clone());
		self.next_frame += 1;

		Ok(changes.join("|"))
	}
}

/// Applies one delta payload to a persistent surface.
///
/// The Rust-side mirror of the emitted decode routine: the surface is
/// mutated in place and must never be cleared between frames.
///
/// # Errors
///
/// Returns [`CodecError::MalformedPayload`] for a payload that does not
/// follow the wire format or addresses a cell outside the surface.
pub fn apply(surface: &mut FrameGrid, payload: &str, frame: usize) -> Result<(), CodecError> {
	if payload.is_empty() {
		return Ok(());
	}

	for change in payload.split('|') {
		let fields: Vec<u32> = change
			.split(',')
			.map(|field| parse_field(field, frame))
			.collect::<Result<_, _>>()?;
		let [x, y, r, g, b] = fields[..] else {
			return Err(CodecError::MalformedPayload {
				frame,
				message: format!("change {change:?} must have 5 fields"),
			});
		};
		if r > 255 || g > 255 || b > 255 {
			return Err(CodecError::MalformedPayload {
				frame,
				message: format!("change {change:?} has a channel over 255"),
			});
		}
		if !surface.contains(x, y) {
			return Err(CodecError::MalformedPayload {
				frame,
				message: format!(
					"cell ({x}, {y}) outside {}x{} surface",
					surface.width(),
					surface.height()
				),
			});
		}
		surface.set(x, y, crate::color::Color::new(r as u8, g as u8, b as u8));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::color::Color;

	const RED: Color = Color::new(240, 0, 0);

	#[test]
	fn test_frame_zero_encodes_complete_grid() {
		let mut encoder = DeltaEncoder::new(2, 2);
		let grid = FrameGrid::filled(2, 2, Color::WHITE).unwrap();
		let payload = encoder.encode_next(0, &grid).unwrap();
		// All four cells, background included
		assert_eq!(payload.split('|').count(), 4);
		assert!(payload.starts_with("1,1,255,255,255"));
	}

	#[test]
	fn test_single_changed_cell() {
		// Frame 0 all background, frame 1 sets one red cell at (1,1)
		let mut encoder = DeltaEncoder::new(2, 2);
		let frame0 = FrameGrid::filled(2, 2, Color::new(240, 240, 240)).unwrap();
		let mut frame1 = frame0.clone();
		frame1.set(1, 1, RED);

		encoder.encode_next(0, &frame0).unwrap();
		let payload = encoder.encode_next(1, &frame1).unwrap();
		assert_eq!(payload, "1,1,240,0,0");
	}

	#[test]
	fn test_unchanged_frame_encodes_empty() {
		let mut encoder = DeltaEncoder::new(2, 2);
		let grid = FrameGrid::filled(2, 2, RED).unwrap();
		encoder.encode_next(0, &grid).unwrap();
		assert_eq!(encoder.encode_next(1, &grid).unwrap(), "");
	}

	#[test]
	fn test_out_of_order_frames_rejected() {
		let mut encoder = DeltaEncoder::new(2, 2);
		let grid = FrameGrid::filled(2, 2, RED).unwrap();
		encoder.encode_next(0, &grid).unwrap();

		let err = encoder.encode_next(2, &grid).expect_err("skipping a frame should fail");
		match err {
			CodecError::FrameOrder {
				expected,
				actual,
			} => {
				assert_eq!(expected, 1);
				assert_eq!(actual, 2);
			}
			_ => panic!("Unexpected error: {err:?}"),
		}
	}

	#[test]
	fn test_cumulative_replay_reproduces_every_frame() {
		// Moving dot over a colored background
		let background = Color::new(16, 16, 16);
		let mut grids = Vec::new();
		for i in 0..4u32 {
			let mut grid = FrameGrid::filled(4, 4, background).unwrap();
			grid.set(i + 1, 1, RED);
			grids.push(grid);
		}

		let mut encoder = DeltaEncoder::new(4, 4);
		let payloads: Vec<String> = grids
			.iter()
			.enumerate()
			.map(|(frame, grid)| encoder.encode_next(frame, grid).unwrap())
			.collect();

		// Replay cumulatively, never clearing, checking every intermediate state
		let mut surface = FrameGrid::filled(4, 4, Color::WHITE).unwrap();
		for (frame, payload) in payloads.iter().enumerate() {
			apply(&mut surface, payload, frame).unwrap();
			assert_eq!(surface, grids[frame], "frame {frame}");
		}
	}

	#[test]
	fn test_apply_rejects_malformed_change() {
		let mut surface = FrameGrid::filled(2, 2, Color::WHITE).unwrap();
		assert!(matches!(
			apply(&mut surface, "1,1,240,0", 3),
			Err(CodecError::MalformedPayload { frame: 3, .. })
		));
		assert!(matches!(
			apply(&mut surface, "9,9,240,0,0", 0),
			Err(CodecError::MalformedPayload { .. })
		));
		assert!(matches!(
			apply(&mut surface, "1,1,999,0,0", 0),
			Err(CodecError::MalformedPayload { .. })
		));
	}
}
