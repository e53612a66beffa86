//! Emits the generated VBA module text.
//!
//! Emission is append-only string building over a fixed section order, so
//! the output is byte-for-byte deterministic for a given sequence, encoded
//! frame list and configuration. Every emitted decode routine restricts
//! itself to `Split`, `CInt` and `Cells` so the module runs under
//! `Option Explicit` with no host references beyond the worksheet.

use crate::chunk::chunk_statement;
use crate::color::Color;
use crate::config::AnimationConfig;
use crate::encode::{CellRecord, EncodedFrame, Strategy};
use crate::error::CodecError;
use crate::sequence::FrameSequence;

use super::constants::{
	CELL_COLUMN_WIDTH, CELL_ROW_HEIGHT, MAX_DATA_STATEMENT_LEN, MAX_FRAGMENTS, START_COL, START_ROW,
};

/// Emits one complete VBA module for an encoded sequence.
///
/// `frames` must hold one encoded frame per sequence frame, produced under
/// `config.strategy`. The returned text is the whole module, ready to be
/// written to a `.bas` file.
///
/// # Errors
///
/// - [`CodecError::EmptySource`] for an empty frame list
/// - [`CodecError::FrameCountMismatch`] when `frames` and the sequence
///   disagree on frame count
/// - [`CodecError::MalformedPayload`] when a frame was encoded under a
///   different strategy than `config.strategy`
pub fn emit_module(
	sequence: &FrameSequence,
	frames: &[EncodedFrame],
	config: &AnimationConfig,
) -> Result<String, CodecError> {
	config.validate()?;
	if frames.is_empty() {
		return Err(CodecError::EmptySource);
	}
	if frames.len() != sequence.len() {
		return Err(CodecError::FrameCountMismatch {
			expected: sequence.len(),
			actual: frames.len(),
		});
	}

	let background = config.quantized_background()?;

	let mut module = String::new();
	emit_header(&mut module, sequence, config);
	emit_driver(&mut module, config.strategy, background);

	match config.strategy {
		Strategy::Enumeration => {
			let records = cell_frames(frames)?;
			emit_frame_subs(&mut module, &records);
			emit_enumeration_dispatcher(&mut module, records.len());
		}
		Strategy::Grouped => {
			let payloads = string_frames(frames, Strategy::Grouped)?;
			emit_data_function(&mut module, "GetFrameData", &payloads)?;
			emit_grouped_decoder(&mut module);
		}
		Strategy::Delta => {
			let payloads = string_frames(frames, Strategy::Delta)?;
			emit_data_function(&mut module, "GetDelta", &payloads)?;
			emit_delta_decoder(&mut module);
		}
	}

	Ok(module)
}

fn cell_frames(frames: &[EncodedFrame]) -> Result<Vec<&[CellRecord]>, CodecError> {
	frames
		.iter()
		.enumerate()
		.map(|(frame, encoded)| match encoded {
			EncodedFrame::Cells(records) => Ok(records.as_slice()),
			_ => Err(CodecError::MalformedPayload {
				frame,
				message: "expected enumeration records for the enumeration strategy".to_string(),
			}),
		})
		.collect()
}

fn string_frames(frames: &[EncodedFrame], strategy: Strategy) -> Result<Vec<&str>, CodecError> {
	frames
		.iter()
		.enumerate()
		.map(|(frame, encoded)| match (strategy, encoded) {
			(Strategy::Grouped, EncodedFrame::Grouped(payload))
			| (Strategy::Delta, EncodedFrame::Delta(payload)) => Ok(payload.as_str()),
			_ => Err(CodecError::MalformedPayload {
				frame,
				message: format!("expected a {strategy} payload for the {strategy} strategy"),
			}),
		})
		.collect()
}

fn emit_header(out: &mut String, sequence: &FrameSequence, config: &AnimationConfig) {
	out.push_str("Option Explicit\n");
	out.push('\n');
	out.push_str("' Generated cell animation module\n");
	out.push_str(&format!("' Strategy: {}\n", config.strategy));
	out.push('\n');
	out.push_str(&format!(
		"Const FRAME_DELAY As Long = {}\n",
		sequence.frame_delay_ms()
	));
	out.push_str(&format!("Const NUM_FRAMES As Integer = {}\n", sequence.len()));
	out.push_str(&format!("Const GRID_WIDTH As Integer = {}\n", sequence.width()));
	out.push_str(&format!("Const GRID_HEIGHT As Integer = {}\n", sequence.height()));
	out.push_str(&format!("Const START_COL As Integer = {START_COL}\n"));
	out.push_str(&format!("Const START_ROW As Integer = {START_ROW}\n"));
	out.push('\n');
	out.push_str("Dim shouldStop As Boolean\n");
	out.push('\n');
}

fn emit_driver(out: &mut String, strategy: Strategy, background: Color) {
	let clear = background.vba_literal();
	let surface = "Range(Cells(START_ROW, START_COL), \
	               Cells(START_ROW + GRID_HEIGHT - 1, START_COL + GRID_WIDTH - 1))";

	out.push_str("Sub InitializeAnimation()\n");
	out.push_str("    Dim surface As Range\n");
	out.push_str(&format!("    Set surface = {surface}\n"));
	out.push_str(&format!("    surface.Interior.Color = {clear}\n"));
	out.push_str(&format!("    surface.ColumnWidth = {CELL_COLUMN_WIDTH}\n"));
	out.push_str(&format!("    surface.RowHeight = {CELL_ROW_HEIGHT}\n"));
	out.push_str("    shouldStop = True\n");
	out.push_str("    DrawFrame 0\n");
	out.push_str("    MsgBox \"Animation initialized. Run StartAnimation to begin.\"\n");
	out.push_str("End Sub\n");
	out.push('\n');

	out.push_str("Sub StartAnimation()\n");
	out.push_str("    Dim currentFrame As Integer\n");
	// Delta playback relies on a persistent surface, so only the other
	// strategies clear between frames.
	if strategy != Strategy::Delta {
		out.push_str("    Dim surface As Range\n");
		out.push_str(&format!("    Set surface = {surface}\n"));
	}
	out.push_str("    shouldStop = False\n");
	out.push_str("    currentFrame = 0\n");
	out.push_str("    Do While Not shouldStop\n");
	if strategy != Strategy::Delta {
		out.push_str(&format!("        surface.Interior.Color = {clear}\n"));
	}
	out.push_str("        DrawFrame currentFrame\n");
	out.push_str("        Application.Wait Now + FRAME_DELAY / 86400000\n");
	out.push_str("        DoEvents\n");
	out.push_str("        currentFrame = (currentFrame + 1) Mod NUM_FRAMES\n");
	out.push_str("    Loop\n");
	out.push_str("End Sub\n");
	out.push('\n');

	out.push_str("Sub StopAnimation()\n");
	out.push_str("    shouldStop = True\n");
	out.push_str("End Sub\n");
	out.push('\n');
}

fn emit_frame_subs(out: &mut String, records: &[&[CellRecord]]) {
	for (frame, cells) in records.iter().enumerate() {
		out.push_str(&format!("Sub DrawFrame{frame}()\n"));
		for cell in *cells {
			out.push_str(&format!(
				"    Cells(START_ROW + {}, START_COL + {}).Interior.Color = {}\n",
				cell.y - 1,
				cell.x - 1,
				cell.color.vba_literal()
			));
		}
		out.push_str("End Sub\n");
		out.push('\n');
	}
}

fn emit_enumeration_dispatcher(out: &mut String, frame_count: usize) {
	out.push_str("Sub DrawFrame(frameIndex As Integer)\n");
	out.push_str("    Select Case frameIndex\n");
	for frame in 0..frame_count {
		out.push_str(&format!("        Case {frame}: DrawFrame{frame}\n"));
	}
	out.push_str("    End Select\n");
	out.push_str("End Sub\n");
	out.push('\n');
}

/// Emits a `Select Case` data table returning one payload per frame.
///
/// Payloads past the statement limit are split by [`chunk_statement`] and
/// rejoined with ` & _` continuations so the host accepts the literal.
fn emit_data_function(out: &mut String, name: &str, payloads: &[&str]) -> Result<(), CodecError> {
	out.push_str(&format!("Function {name}(frameIndex As Integer) As String\n"));
	out.push_str("    Select Case frameIndex\n");
	for (frame, payload) in payloads.iter().enumerate() {
		let fragments = chunk_statement(payload, MAX_DATA_STATEMENT_LEN, MAX_FRAGMENTS)?;
		if let [fragment] = fragments.as_slice() {
			out.push_str(&format!("        Case {frame}: {name} = \"{fragment}\"\n"));
		} else {
			out.push_str(&format!("        Case {frame}\n"));
			out.push_str(&format!("            {name} = "));
			for (i, fragment) in fragments.iter().enumerate() {
				if i > 0 {
					out.push_str(" & _\n                ");
				}
				out.push_str(&format!("\"{fragment}\""));
			}
			out.push('\n');
		}
	}
	out.push_str(&format!("        Case Else: {name} = \"\"\n"));
	out.push_str("    End Select\n");
	out.push_str("End Function\n");
	out.push('\n');
	Ok(())
}

fn emit_grouped_decoder(out: &mut String) {
	out.push_str("Sub DrawFrame(frameIndex As Integer)\n");
	out.push_str("    Dim data As String\n");
	out.push_str("    Dim groups() As String\n");
	out.push_str("    Dim parts() As String\n");
	out.push_str("    Dim colorParts() As String\n");
	out.push_str("    Dim coords() As String\n");
	out.push_str("    Dim xy() As String\n");
	out.push_str("    Dim i As Integer\n");
	out.push_str("    Dim j As Integer\n");
	out.push('\n');
	out.push_str("    data = GetFrameData(frameIndex)\n");
	out.push_str("    If Len(data) = 0 Then Exit Sub\n");
	out.push('\n');
	out.push_str("    groups = Split(data, \"|\")\n");
	out.push_str("    For i = LBound(groups) To UBound(groups)\n");
	out.push_str("        parts = Split(groups(i), \":\")\n");
	out.push_str("        colorParts = Split(parts(0), \",\")\n");
	out.push_str("        coords = Split(parts(1), \";\")\n");
	out.push_str("        For j = LBound(coords) To UBound(coords)\n");
	out.push_str("            xy = Split(coords(j), \",\")\n");
	out.push_str(
		"            Cells(START_ROW + CInt(xy(1)) - 1, START_COL + CInt(xy(0)) - 1)\
		 .Interior.Color = _\n",
	);
	out.push_str(
		"                RGB(CInt(colorParts(0)), CInt(colorParts(1)), CInt(colorParts(2)))\n",
	);
	out.push_str("        Next j\n");
	out.push_str("    Next i\n");
	out.push_str("End Sub\n");
	out.push('\n');
}

fn emit_delta_decoder(out: &mut String) {
	out.push_str("Sub DrawFrame(frameIndex As Integer)\n");
	out.push_str("    Dim delta As String\n");
	out.push_str("    Dim changes() As String\n");
	out.push_str("    Dim parts() As String\n");
	out.push_str("    Dim i As Integer\n");
	out.push('\n');
	out.push_str("    delta = GetDelta(frameIndex)\n");
	out.push_str("    If Len(delta) = 0 Then Exit Sub\n");
	out.push('\n');
	out.push_str("    changes = Split(delta, \"|\")\n");
	out.push_str("    For i = LBound(changes) To UBound(changes)\n");
	out.push_str("        parts = Split(changes(i), \",\")\n");
	out.push_str(
		"        Cells(START_ROW + CInt(parts(1)) - 1, START_COL + CInt(parts(0)) - 1)\
		 .Interior.Color = _\n",
	);
	out.push_str("            RGB(CInt(parts(2)), CInt(parts(3)), CInt(parts(4)))\n");
	out.push_str("    Next i\n");
	out.push_str("End Sub\n");
	out.push('\n');
}
