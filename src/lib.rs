//! `cellanim-rs` turns animated GIFs into self-contained Excel VBA pixel animations.
//!
//! The heavy lifting lives in the `cellanim_types` crate; this crate
//! re-exports it and adds the `cellanim` command line front-end.

pub use cellanim_types::*;
