//! Host-side limits and worksheet placement constants.

/// Soft limit on one data statement's literal length in characters.
///
/// The host rejects logical lines past 1023 characters; 900 leaves room
/// for the assignment prefix, quotes and continuation syntax around each
/// fragment.
pub const MAX_DATA_STATEMENT_LEN: usize = 900;

/// Hard cap on fragments per chunked data statement.
///
/// The host allows at most 25 continued lines per logical statement; 12
/// fragments (11 continuations) stays well below it.
pub const MAX_FRAGMENTS: usize = 12;

/// First worksheet row of the animation surface (1-based).
pub const START_ROW: u32 = 2;

/// First worksheet column of the animation surface (1-based).
pub const START_COL: u32 = 2;

/// Column width applied to the surface so cells render roughly square.
pub const CELL_COLUMN_WIDTH: u32 = 2;

/// Row height applied to the surface.
pub const CELL_ROW_HEIGHT: u32 = 15;
