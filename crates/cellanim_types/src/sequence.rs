//! Ordered frame sequences with global animation metadata.

use crate::error::CodecError;
use crate::grid::FrameGrid;

/// The ordered list of frame grids for one animation, plus the global
/// metadata every stage after the grid builder needs: uniform grid
/// dimensions and the inter-frame delay.
///
/// Built once from the decoded source, consumed once by the encoder and
/// emitter, then discarded. Uniform dimensions are enforced by
/// construction: [`FrameSequence::push`] rejects a grid whose size differs
/// from the sequence's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
	width: u32,
	height: u32,
	frame_delay_ms: u32,
	grids: Vec<FrameGrid>,
}

impl FrameSequence {
	/// Creates an empty sequence with the given grid dimensions and
	/// inter-frame delay.
	///
	/// # Errors
	///
	/// Returns [`CodecError::InvalidDimensions`] when either dimension is zero.
	pub fn new(width: u32, height: u32, frame_delay_ms: u32) -> Result<Self, CodecError> {
		if width == 0 || height == 0 {
			return Err(CodecError::InvalidDimensions {
				width,
				height,
			});
		}
		Ok(Self {
			width,
			height,
			frame_delay_ms,
			grids: Vec::new(),
		})
	}

	/// Appends a frame grid to the sequence.
	///
	/// # Errors
	///
	/// Returns [`CodecError::DimensionMismatch`] (carrying the frame index)
	/// when the grid's dimensions differ from the sequence's.
	pub fn push(&mut self, grid: FrameGrid) -> Result<(), CodecError> {
		if grid.width() != self.width || grid.height() != self.height {
			return Err(CodecError::DimensionMismatch {
				frame: self.grids.len(),
				expected_width: self.width,
				expected_height: self.height,
				actual_width: grid.width(),
				actual_height: grid.height(),
			});
		}
		self.grids.push(grid);
		Ok(())
	}

	/// Number of frames in the sequence.
	pub fn len(&self) -> usize {
		self.grids.len()
	}

	/// Returns `true` when the sequence holds no frames.
	pub fn is_empty(&self) -> bool {
		self.grids.is_empty()
	}

	/// Grid width shared by every frame.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Grid height shared by every frame.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Inter-frame delay in milliseconds.
	pub fn frame_delay_ms(&self) -> u32 {
		self.frame_delay_ms
	}

	/// All frame grids in playback order.
	pub fn grids(&self) -> &[FrameGrid] {
		&self.grids
	}

	/// The grid at `index`, or `None` past the end.
	pub fn get(&self, index: usize) -> Option<&FrameGrid> {
		self.grids.get(index)
	}
}
