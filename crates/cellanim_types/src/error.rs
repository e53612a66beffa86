//! Error types for the animation codec pipeline.

use thiserror::Error;

/// Errors that can occur while quantizing, encoding, chunking or emitting
/// an animation.
///
/// The pipeline is a one-shot batch transform: every error is terminal and
/// aborts the whole run, so each variant carries enough context (frame
/// index, expected/actual values) to diagnose the failure without a retry.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Palette size outside the supported per-channel range
	#[error("Invalid palette size {palette_size}: must be between 1 and 256 levels per channel")]
	InvalidPaletteSize {
		/// Requested quantization levels per channel
		palette_size: u16,
	},

	/// Target grid dimensions are unusable
	#[error("Invalid grid dimensions {width}x{height}: both sides must be at least 1")]
	InvalidDimensions {
		/// Requested grid width in cells
		width: u32,
		/// Requested grid height in cells
		height: u32,
	},

	/// Chunker limits are unusable
	#[error(
		"Invalid chunk limits: max_len {max_len}, max_fragments {max_fragments} (both must be at least 1)"
	)]
	InvalidChunkLimits {
		/// Soft per-fragment length limit
		max_len: usize,
		/// Hard fragment count limit
		max_fragments: usize,
	},

	/// The decoded source contains no frames or no pixels
	#[error("Source sequence is empty: nothing to encode")]
	EmptySource,

	/// A frame's dimensions do not match the declared sequence dimensions
	#[error(
		"Frame {frame} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}"
	)]
	DimensionMismatch {
		/// Index of the offending frame
		frame: usize,
		/// Declared sequence width
		expected_width: u32,
		/// Declared sequence height
		expected_height: u32,
		/// Width of the offending frame
		actual_width: u32,
		/// Height of the offending frame
		actual_height: u32,
	},

	/// Delta frames were fed out of order
	#[error("Delta encoder expected frame {expected}, got frame {actual}")]
	FrameOrder {
		/// Frame index the encoder was waiting for
		expected: usize,
		/// Frame index that was actually supplied
		actual: usize,
	},

	/// Encoded frame list does not line up with the sequence
	#[error("Encoded frame count {actual} does not match sequence frame count {expected}")]
	FrameCountMismatch {
		/// Number of frames in the sequence
		expected: usize,
		/// Number of encoded frames supplied
		actual: usize,
	},

	/// An encoded payload could not be parsed back into a grid
	#[error("Malformed encoded payload for frame {frame}: {message}")]
	MalformedPayload {
		/// Index of the frame whose payload failed to parse
		frame: usize,
		/// Details of the parse failure
		message: String,
	},
}
