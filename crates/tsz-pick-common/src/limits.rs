//! Centralized output bounds for a type query.
//!
//! A single answer has to stay small enough to read at a glance and to pass
//! to another tool without paging, no matter how large the queried type is.
//! These values are the defaults; callers can override them per query.

/// Maximum number of call signatures reported, and separately the maximum
/// number of construct signatures.
pub const MAX_SIGNATURES: usize = 5;

/// Maximum number of properties reported for the queried type.
///
/// Properties are sorted by name before the bound is applied, so the kept
/// subset is stable across runs.
pub const MAX_PROPERTIES: usize = 25;

/// Maximum number of declarations reported for the resolved symbol.
pub const MAX_DECLARATIONS: usize = 10;

/// Maximum length, in UTF-16 code units, of a condensed declaration snippet,
/// including the trailing ellipsis when the snippet is cut.
pub const MAX_SNIPPET_LEN: usize = 200;

/// Marker appended to a snippet that was cut at `MAX_SNIPPET_LEN`.
pub const SNIPPET_ELLIPSIS: char = '\u{2026}';
