//! Position and line-map utilities.
//!
//! The type checker addresses source text with offsets counted in UTF-16 code
//! units, while Rust strings are indexed by bytes. Everything in this module
//! speaks UTF-16 so offsets computed here line up with the checker's own
//! syntax tree.

/// A position in a source file (0-indexed line and character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column in UTF-16 code units
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Line map for offset <-> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
    /// Total length of the text in UTF-16 code units
    text_len: u32,
}

impl LineMap {
    /// Build a line map from source text.
    ///
    /// Line breaks are `\n`, `\r\n`, a lone `\r`, and the Unicode line and
    /// paragraph separators, which is the set the checker's scanner uses.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut offset = 0u32;
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            offset += ch.len_utf16() as u32;
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        offset += 1;
                    }
                    line_starts.push(offset);
                }
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(offset),
                _ => {}
            }
        }

        LineMap {
            line_starts,
            text_len: offset,
        }
    }

    /// Convert an offset to a Position (line, character).
    /// Offsets past the end of the text are clamped to the end.
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let offset = offset.min(self.text_len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);

        Position {
            line: line as u32,
            character: offset - line_start,
        }
    }

    /// Convert a Position (line, character) to an offset.
    ///
    /// Returns `None` when the line does not exist or the character runs past
    /// the start of the next line (or past the end of the text on the last
    /// line). A character that lands on the line terminator itself is valid.
    pub fn position_to_offset(&self, position: Position) -> Option<u32> {
        let line_idx = position.line as usize;
        let line_start = *self.line_starts.get(line_idx)?;
        let offset = line_start.checked_add(position.character)?;

        match self.line_starts.get(line_idx + 1) {
            Some(&next_start) if offset < next_start => Some(offset),
            Some(_) => None,
            None if offset <= self.text_len => Some(offset),
            None => None,
        }
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the starting offset of a line.
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Length of the mapped text in UTF-16 code units.
    pub fn text_len(&self) -> u32 {
        self.text_len
    }
}

/// Convert a byte offset into `text` to a UTF-16 offset.
///
/// Byte offsets that fall inside a multi-byte character count the whole
/// character as preceding the offset.
pub fn utf16_offset_of(text: &str, byte_offset: usize) -> u32 {
    let mut utf16 = 0u32;
    for (idx, ch) in text.char_indices() {
        if idx >= byte_offset {
            break;
        }
        utf16 += ch.len_utf16() as u32;
    }
    utf16
}

/// Convert a UTF-16 offset into `text` to a byte offset.
///
/// Returns `None` if the offset is past the end of the text or splits a
/// surrogate pair.
pub fn byte_offset_of(text: &str, utf16_offset: u32) -> Option<usize> {
    let mut utf16 = 0u32;
    for (idx, ch) in text.char_indices() {
        if utf16 == utf16_offset {
            return Some(idx);
        }
        if utf16 > utf16_offset {
            return None;
        }
        utf16 += ch.len_utf16() as u32;
    }
    (utf16 == utf16_offset).then_some(text.len())
}
