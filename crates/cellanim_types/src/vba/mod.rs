//! VBA module generation.
//!
//! The final pipeline stage: turns an encoded frame list into one
//! self-contained VBA module the user pastes into the host's editor. The
//! module carries everything the host needs: constants, per-frame data,
//! a decode routine matching the chosen strategy, a frame dispatcher and a
//! playback driver with `InitializeAnimation` / `StartAnimation` /
//! `StopAnimation` entry points.
//!
//! # Module layout
//!
//! ```text
//! Option Explicit
//! Const FRAME_DELAY / NUM_FRAMES / GRID_WIDTH / GRID_HEIGHT / START_COL / START_ROW
//! Dim shouldStop
//!
//! Sub InitializeAnimation()      ' size the grid, pre-clear, draw frame 0
//! Sub StartAnimation()           ' cooperative loop, stop flag checked once per frame
//! Sub StopAnimation()            ' sets the flag; honored within one frame period
//!
//! <data section>                 ' per-frame subs, or a Select Case data table
//! <decode routine / dispatcher>  ' Split/CInt only
//! ```
//!
//! # Host constraints
//!
//! The host rejects over-long statements and caps continuation fragments
//! per statement; data literals are chunked accordingly (see
//! [`constants`]). Playback runs on a persistent surface for the delta
//! strategy (never cleared between frames) and a pre-cleared surface for
//! the other two.

pub mod constants;
pub mod emit;

pub use self::emit::emit_module;
