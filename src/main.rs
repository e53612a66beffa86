//! Animation module generator.
//!
//! Decodes a GIF (or a single static image), runs the generation pipeline
//! and writes the resulting VBA module to a `.bas` file next to the input.

use std::{
	fs::{self, File},
	io::BufReader,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use cellanim_rs::prelude::*;
use clap::Parser;
use image::{AnimationDecoder, RgbaImage, codecs::gif::GifDecoder};
use log::info;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();
	run(cli)
}

#[derive(Parser)]
#[command(name = "cellanim")]
#[command(author = "cellanim-rs project")]
#[command(version)]
#[command(about = "Turn an animated GIF into a self-contained VBA pixel animation", long_about = None)]
struct Cli {
	/// Input image: an animated GIF, or any static image for a single frame
	#[arg(value_name = "FILE")]
	input: PathBuf,

	/// Output path for the VBA module (defaults to `<input>_animation.bas`)
	#[arg(short, long, value_name = "FILE")]
	output: Option<PathBuf>,

	/// Grid width in cells
	#[arg(short = 'W', long, value_name = "CELLS", default_value_t = 32)]
	width: u32,

	/// Grid height in cells (defaults to the grid width)
	#[arg(short = 'H', long, value_name = "CELLS")]
	height: Option<u32>,

	/// Quantization levels per color channel (1-256)
	#[arg(short, long, value_name = "LEVELS", default_value_t = 16)]
	palette: u16,

	/// Delay between frames in milliseconds
	#[arg(short, long, value_name = "MS", default_value_t = 200)]
	delay: u32,

	/// Frame encoding strategy: enumeration, grouped or delta
	#[arg(short, long, default_value = "grouped")]
	strategy: Strategy,

	/// Background color as RGB hex, treated as transparent by the
	/// enumeration and grouped strategies
	#[arg(short, long, value_name = "HEX", default_value = "ffffff", value_parser = Color::from_hex)]
	background: Color,

	/// Print a JSON generation report to stdout
	#[arg(long, default_value_t = false)]
	report: bool,
}

fn run(cli: Cli) -> Result<()> {
	let config = AnimationConfig {
		target_width: cli.width,
		target_height: cli.height.unwrap_or(cli.width),
		palette_size: cli.palette,
		frame_delay_ms: cli.delay,
		strategy: cli.strategy,
		background: cli.background,
	};

	let frames = load_frames(&cli.input, cli.background)?;
	info!("Decoded {} frame(s) from {}", frames.len(), cli.input.display());

	let generated = generate_module(&frames, &config)
		.with_context(|| format!("Failed to generate a module from {}", cli.input.display()))?;

	let output = cli.output.unwrap_or_else(|| default_output(&cli.input));
	fs::write(&output, &generated.module)
		.with_context(|| format!("Failed to write {}", output.display()))?;
	info!("Wrote {} ({} bytes)", output.display(), generated.report.module_bytes);

	if cli.report {
		println!("{}", serde_json::to_string_pretty(&generated.report)?);
	}

	Ok(())
}

fn default_output(input: &Path) -> PathBuf {
	let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
	input.with_file_name(format!("{stem}_animation.bas"))
}

/// Decodes the input into RGB frames, compositing alpha over `background`.
fn load_frames(path: &Path, background: Color) -> Result<Vec<RgbFrame>> {
	if !path.is_file() {
		bail!("Input file {} does not exist", path.display());
	}

	let is_gif = path
		.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));

	let frames = if is_gif {
		let reader = BufReader::new(
			File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
		);
		let decoder = GifDecoder::new(reader)
			.with_context(|| format!("Failed to decode {}", path.display()))?;
		decoder
			.into_frames()
			.collect_frames()
			.with_context(|| format!("Failed to decode frames of {}", path.display()))?
			.iter()
			.map(|frame| composite(frame.buffer(), background))
			.collect::<Result<Vec<_>>>()?
	} else {
		let image = image::open(path)
			.with_context(|| format!("Failed to decode {}", path.display()))?;
		vec![composite(&image.to_rgba8(), background)?]
	};

	if frames.is_empty() {
		bail!("{} contains no frames", path.display());
	}
	Ok(frames)
}

/// Flattens an RGBA buffer over the background color.
fn composite(buffer: &RgbaImage, background: Color) -> Result<RgbFrame> {
	let (width, height) = buffer.dimensions();
	let mut frame = RgbFrame::filled(width, height, background)
		.context("Decoded frame has no pixels")?;

	for (x, y, pixel) in buffer.enumerate_pixels() {
		let [r, g, b, a] = pixel.0;
		let blend = |channel: u8, bg: u8| -> u8 {
			((u16::from(channel) * u16::from(a) + u16::from(bg) * u16::from(255 - a)) / 255) as u8
		};
		frame.set(
			x,
			y,
			Color::new(blend(r, background.r), blend(g, background.g), blend(b, background.b)),
		);
	}

	Ok(frame)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_output_path() {
		assert_eq!(
			default_output(Path::new("art/dancing.gif")),
			PathBuf::from("art/dancing_animation.bas")
		);
	}

	#[test]
	fn test_composite_opaque_keeps_pixel() {
		let mut buffer = RgbaImage::new(2, 1);
		buffer.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
		buffer.put_pixel(1, 0, image::Rgba([0, 0, 0, 0]));

		let frame = composite(&buffer, Color::WHITE).unwrap();
		assert_eq!(frame.pixel(0, 0), Color::new(10, 20, 30));
		// Fully transparent pixel becomes the background
		assert_eq!(frame.pixel(1, 0), Color::WHITE);
	}

	#[test]
	fn test_composite_blends_partial_alpha() {
		let mut buffer = RgbaImage::new(1, 1);
		buffer.put_pixel(0, 0, image::Rgba([0, 0, 0, 128]));

		let frame = composite(&buffer, Color::WHITE).unwrap();
		// Half-transparent black over white lands mid-gray
		assert_eq!(frame.pixel(0, 0), Color::new(127, 127, 127));
	}
}
