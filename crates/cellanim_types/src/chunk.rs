//! Statement chunking for hosts with line-length limits.
//!
//! The host runtime rejects statements past a character limit and caps how
//! many continuation fragments one logical statement may span. The chunker
//! splits an encoded payload into fragments that concatenate back to the
//! original; the emitter joins them with the host's line-continuation
//! syntax.
//!
//! The fragment-count cap is the hard constraint. When an even `max_len`
//! split would need too many fragments, the chunker relaxes to a larger
//! uniform fragment size of `ceil(len / max_fragments)` so the count bound
//! always holds, even though individual fragments may then exceed the soft
//! `max_len` preference.

use crate::error::CodecError;

/// Splits `s` into at most `max_fragments` contiguous fragments whose
/// concatenation equals `s` exactly.
///
/// A string within `max_len` comes back as a singleton. Lengths are
/// measured in characters, matching how the host counts statement length;
/// encoded payloads are ASCII, where characters and bytes coincide.
///
/// # Errors
///
/// Returns [`CodecError::InvalidChunkLimits`] when either limit is zero.
///
/// # Examples
///
/// ```
/// use cellanim_types::chunk::chunk_statement;
///
/// let fragments = chunk_statement("abcdefgh", 3, 10).unwrap();
/// assert_eq!(fragments, ["abc", "def", "gh"]);
/// assert_eq!(fragments.concat(), "abcdefgh");
/// ```
pub fn chunk_statement(
	s: &str,
	max_len: usize,
	max_fragments: usize,
) -> Result<Vec<String>, CodecError> {
	if max_len == 0 || max_fragments == 0 {
		return Err(CodecError::InvalidChunkLimits {
			max_len,
			max_fragments,
		});
	}

	let chars: Vec<char> = s.chars().collect();
	if chars.len() <= max_len {
		return Ok(vec![s.to_string()]);
	}

	let mut size = max_len;
	if chars.len().div_ceil(size) > max_fragments {
		// Fragment count is the hard limit; grow fragments past max_len
		size = chars.len().div_ceil(max_fragments);
	}

	Ok(chars.chunks(size).map(|fragment| fragment.iter().collect()).collect())
}
