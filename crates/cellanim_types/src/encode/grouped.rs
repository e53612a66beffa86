//! Color-grouped encoding.
//!
//! Groups the coordinates of same-colored cells so each color is spelled
//! out once per frame. Wire format, decodable with nested `Split` calls
//! only:
//!
//! ```text
//! r,g,b:x1,y1;x2,y2;...|r,g,b:...
//! ```
//!
//! Groups are joined by `|`, the color header and coordinate list by `:`,
//! coordinates by `;`, fields by `,`. Groups appear in first-occurrence
//! order of their color during the row-major scan, and coordinates within
//! a group keep scan order, so encoding is byte-for-byte deterministic.
//! Background groups are omitted entirely; an all-background frame encodes
//! as the empty string.

use crate::color::Color;
use crate::error::CodecError;
use crate::grid::FrameGrid;

use super::{check_dimensions, parse_field};

/// Encodes a grid as color groups, skipping the background color.
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
) -> Result<String, CodecError> {
	check_dimensions(grid, width, height, frame)?;

	// Insertion-order grouping; a Vec keeps first-occurrence order where a
	// hash map would not. Grids are small enough that the linear color
	// lookup does not matter.
	let mut groups: Vec<(Color, Vec<(u32, u32)>)> = Vec::new();
	for (x, y, color) in grid.cells() {
		if color == background {
			continue;
		}
		match groups.iter_mut().find(|(c, _)| *c == color) {
			Some((_, coords)) => coords.push((x, y)),
			None => groups.push((color, vec![(x, y)])),
		}
	}

	let payload = groups
		.iter()
		.map(|(color, coords)| {
			let list = coords
				.iter()
				.map(|(x, y)| format!("{x},{y}"))
				.collect::<Vec<_>>()
				.join(";");
			format!("{},{},{}:{list}", color.r, color.g, color.b)
		})
		.collect::<Vec<_>>()
		.join("|");

	Ok(payload)
}

/// Replays a grouped payload onto a background-cleared surface.
///
/// The Rust-side mirror of the emitted decode routine, used to verify the
/// round-trip property.
///
/// # Errors
///
/// Returns [`CodecError::MalformedPayload`] for a payload that does not
/// follow the wire format or addresses a cell outside the grid.
pub fn decode(
	payload: &str,
	width: u32,
	height: u32,
	background: Color,
	frame: usize,
) -> Result<FrameGrid, CodecError> {
	let mut grid = FrameGrid::filled(width, height, background)?;
	if payload.is_empty() {
		return Ok(grid);
	}

	for group in payload.split('|') {
		let (header, list) = group.split_once(':').ok_or_else(|| CodecError::MalformedPayload {
			frame,
			message: format!("group {group:?} has no ':' separator"),
		})?;

		let channels: Vec<u32> = header
			.split(',')
			.map(|field| parse_field(field, frame))
			.collect::<Result<_, _>>()?;
		let [r, g, b] = channels[..] else {
			return Err(CodecError::MalformedPayload {
				frame,
				message: format!("color header {header:?} must have 3 fields"),
			});
		};
		if channels.iter().any(|&c| c > 255) {
			return Err(CodecError::MalformedPayload {
				frame,
				message: format!("color header {header:?} has a channel over 255"),
			});
		}
		let color = Color::new(r as u8, g as u8, b as u8);

		for coord in list.split(';') {
			let (x, y) = coord.split_once(',').ok_or_else(|| CodecError::MalformedPayload {
				frame,
				message: format!("coordinate {coord:?} has no ',' separator"),
			})?;
			let (x, y) = (parse_field(x, frame)?, parse_field(y, frame)?);
			if !grid.contains(x, y) {
				return Err(CodecError::MalformedPayload {
					frame,
					message: format!("cell ({x}, {y}) outside {width}x{height} grid"),
				});
			}
			grid.set(x, y, color);
		}
	}

	Ok(grid)
}
