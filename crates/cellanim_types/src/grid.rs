//! Frame grids and the grid builder.
//!
//! A [`FrameGrid`] is the quantized 2-D cell grid for one animation frame.
//! It is created once by [`FrameGrid::from_source`] (resample, then
//! quantize every pixel) and never mutated by later pipeline stages; the
//! mutable accessors exist for decoders that replay encoded frames onto a
//! surface.
//!
//! Grid coordinates are 1-based throughout, matching the host worksheet's
//! `Cells(row, col)` addressing. Source pixels are 0-based.

use log::debug;

use crate::color::Color;
use crate::error::CodecError;

/// Read access to a decoded source frame.
///
/// Implemented by [`RgbFrame`] and by whatever adapter the caller wraps
/// around an image library's frame buffer. Coordinates are 0-based.
pub trait PixelSource {
	/// Source width in pixels.
	fn width(&self) -> u32;

	/// Source height in pixels.
	fn height(&self) -> u32;

	/// Color of the pixel at 0-based `(x, y)`.
	fn pixel(&self, x: u32, y: u32) -> Color;
}

/// A plain RGB pixel buffer, row-major.
///
/// The concrete [`PixelSource`] used by the command line front-end after
/// compositing decoded frames over the background color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
	width: u32,
	height: u32,
	pixels: Vec<Color>,
}

impl RgbFrame {
	/// Creates a frame filled with a single color.
	///
	/// # Errors
	///
	/// Returns [`CodecError::EmptySource`] when either dimension is zero.
	pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, CodecError> {
		if width == 0 || height == 0 {
			return Err(CodecError::EmptySource);
		}
		Ok(Self {
			width,
			height,
			pixels: vec![color; (width * height) as usize],
		})
	}

	/// Sets the pixel at 0-based `(x, y)`.
	///
	/// # Panics
	///
	/// Panics when the coordinates are outside the frame.
	pub fn set(&mut self, x: u32, y: u32, color: Color) {
		assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside {self}");
		self.pixels[(y * self.width + x) as usize] = color;
	}
}

impl PixelSource for RgbFrame {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn pixel(&self, x: u32, y: u32) -> Color {
		self.pixels[(y * self.width + x) as usize]
	}
}

impl std::fmt::Display for RgbFrame {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "RgbFrame {}x{}", self.width, self.height)
	}
}

/// A 2-D grid of quantized colors for one frame.
///
/// Fixed width and height for the whole animation sequence; every cell
/// satisfies the quantizer's postcondition when built through
/// [`FrameGrid::from_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameGrid {
	width: u32,
	height: u32,
	cells: Vec<Color>,
}

impl FrameGrid {
	/// Creates a grid filled with a single color.
	///
	/// Used by decoders to pre-clear a surface to the background color, and
	/// as the initial persistent surface for delta replay.
	///
	/// # Errors
	///
	/// Returns [`CodecError::InvalidDimensions`] when either dimension is zero.
	pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, CodecError> {
		if width == 0 || height == 0 {
			return Err(CodecError::InvalidDimensions {
				width,
				height,
			});
		}
		Ok(Self {
			width,
			height,
			cells: vec![color; (width * height) as usize],
		})
	}

	/// Builds a grid from a decoded source frame.
	///
	/// Resamples the source to exactly `target_width` x `target_height`
	/// with nearest-neighbor sampling, then quantizes every pixel to
	/// `palette_size` levels per channel. Deterministic: the same source
	/// and parameters always produce the same grid.
	///
	/// # Errors
	///
	/// - [`CodecError::InvalidDimensions`] when a target dimension is zero
	/// - [`CodecError::EmptySource`] when the source has no pixels
	/// - [`CodecError::InvalidPaletteSize`] from the quantizer
	pub fn from_source<S: PixelSource>(
		source: &S,
		target_width: u32,
		target_height: u32,
		palette_size: u16,
	) -> Result<Self, CodecError> {
		if target_width == 0 || target_height == 0 {
			return Err(CodecError::InvalidDimensions {
				width: target_width,
				height: target_height,
			});
		}
		if source.width() == 0 || source.height() == 0 {
			return Err(CodecError::EmptySource);
		}

		let mut cells = Vec::with_capacity((target_width * target_height) as usize);
		for y in 0..target_height {
			for x in 0..target_width {
				// Nearest-neighbor: map the cell center back onto the source
				let src_x = x * source.width() / target_width;
				let src_y = y * source.height() / target_height;
				cells.push(source.pixel(src_x, src_y).quantize(palette_size)?);
			}
		}

		debug!(
			"Built {}x{} grid from {}x{} source (palette {})",
			target_width,
			target_height,
			source.width(),
			source.height(),
			palette_size
		);

		Ok(Self {
			width: target_width,
			height: target_height,
			cells,
		})
	}

	/// Grid width in cells.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Grid height in cells.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Color of the cell at 1-based `(x, y)`.
	///
	/// # Panics
	///
	/// Panics when the coordinates are outside the grid.
	pub fn get(&self, x: u32, y: u32) -> Color {
		self.cells[self.index(x, y)]
	}

	/// Sets the cell at 1-based `(x, y)`.
	///
	/// # Panics
	///
	/// Panics when the coordinates are outside the grid.
	pub fn set(&mut self, x: u32, y: u32, color: Color) {
		let index = self.index(x, y);
		self.cells[index] = color;
	}

	/// Returns `true` when 1-based `(x, y)` lies inside the grid.
	pub fn contains(&self, x: u32, y: u32) -> bool {
		(1..=self.width).contains(&x) && (1..=self.height).contains(&y)
	}

	/// Iterates over all cells in row-major order as `(x, y, color)` with
	/// 1-based coordinates.
	pub fn cells(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
		self.cells.iter().enumerate().map(|(i, &color)| {
			let x = i as u32 % self.width + 1;
			let y = i as u32 / self.width + 1;
			(x, y, color)
		})
	}

	fn index(&self, x: u32, y: u32) -> usize {
		assert!(
			self.contains(x, y),
			"cell ({x}, {y}) outside {}x{} grid (coordinates are 1-based)",
			self.width,
			self.height
		);
		((y - 1) * self.width + (x - 1)) as usize
	}
}

impl std::fmt::Display for FrameGrid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "FrameGrid {}x{}", self.width, self.height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn checkerboard(width: u32, height: u32) -> RgbFrame {
		let mut frame = RgbFrame::filled(width, height, Color::WHITE).unwrap();
		for y in 0..height {
			for x in 0..width {
				if (x + y) % 2 == 1 {
					frame.set(x, y, Color::BLACK);
				}
			}
		}
		frame
	}

	#[test]
	fn test_filled_rejects_zero_dimensions() {
		assert!(RgbFrame::filled(0, 4, Color::WHITE).is_err());
		assert!(FrameGrid::filled(4, 0, Color::WHITE).is_err());
	}

	#[test]
	fn test_identity_resample() {
		let frame = checkerboard(4, 4);
		let grid = FrameGrid::from_source(&frame, 4, 4, 256).unwrap();

		assert_eq!(grid.width(), 4);
		assert_eq!(grid.height(), 4);
		// 1-based grid coordinates against 0-based source coordinates
		assert_eq!(grid.get(1, 1), Color::WHITE);
		assert_eq!(grid.get(2, 1), Color::BLACK);
		assert_eq!(grid.get(1, 2), Color::BLACK);
	}

	#[test]
	fn test_downsample_dimensions() {
		let frame = checkerboard(64, 48);
		let grid = FrameGrid::from_source(&frame, 32, 16, 16).unwrap();
		assert_eq!(grid.width(), 32);
		assert_eq!(grid.height(), 16);
	}

	#[test]
	fn test_upsample_repeats_pixels() {
		let mut frame = RgbFrame::filled(2, 1, Color::WHITE).unwrap();
		frame.set(1, 0, Color::BLACK);

		let grid = FrameGrid::from_source(&frame, 4, 2, 256).unwrap();
		// Left half comes from source pixel 0, right half from pixel 1
		assert_eq!(grid.get(1, 1), Color::WHITE);
		assert_eq!(grid.get(2, 1), Color::WHITE);
		assert_eq!(grid.get(3, 2), Color::BLACK);
		assert_eq!(grid.get(4, 2), Color::BLACK);
	}

	#[test]
	fn test_cells_are_quantized() {
		let frame = RgbFrame::filled(3, 3, Color::new(255, 100, 7)).unwrap();
		let grid = FrameGrid::from_source(&frame, 3, 3, 16).unwrap();
		for (_, _, color) in grid.cells() {
			assert_eq!(color, Color::new(240, 96, 0));
			assert_eq!(color.quantize(16).unwrap(), color);
		}
	}

	#[test]
	fn test_from_source_rejects_bad_targets() {
		let frame = checkerboard(4, 4);
		assert!(matches!(
			FrameGrid::from_source(&frame, 0, 4, 16),
			Err(CodecError::InvalidDimensions { .. })
		));
		assert!(matches!(
			FrameGrid::from_source(&frame, 4, 4, 0),
			Err(CodecError::InvalidPaletteSize { .. })
		));
	}

	#[test]
	fn test_cells_iterator_order_and_coordinates() {
		let mut grid = FrameGrid::filled(2, 2, Color::WHITE).unwrap();
		grid.set(2, 1, Color::BLACK);

		let cells: Vec<_> = grid.cells().collect();
		assert_eq!(cells.len(), 4);
		assert_eq!(cells[0], (1, 1, Color::WHITE));
		assert_eq!(cells[1], (2, 1, Color::BLACK));
		assert_eq!(cells[2], (1, 2, Color::WHITE));
		assert_eq!(cells[3], (2, 2, Color::WHITE));
	}

	#[test]
	#[should_panic(expected = "coordinates are 1-based")]
	fn test_get_rejects_zero_coordinate() {
		let grid = FrameGrid::filled(2, 2, Color::WHITE).unwrap();
		let _ = grid.get(0, 1);
	}
}
