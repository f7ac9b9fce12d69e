//! Turning a position or pattern query into an exact offset.
//!
//! Offsets are UTF-16 offsets and line/column pairs are 1-based on this side
//! of the oracle; the oracle itself speaks 0-based lines and characters.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, trace};
use tsz_pick_common::utf16_offset_of;
use tsz_pick_oracle::TypeOracle;

use crate::error::{PickError, Result};

/// A complete query: which file, which project, and where in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub file: PathBuf,
    /// Explicit tsconfig file or directory; discovered when absent
    pub project: Option<PathBuf>,
    pub target: QueryTarget,
}

/// Where in the file the query points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// 1-based line and column.
    Position { line: u32, column: u32 },
    /// The `index`-th match (0-based) of a regular expression.
    Pattern {
        pattern: String,
        flags: Option<String>,
        index: usize,
    },
}

/// Raw query input as a caller supplies it, before validation.
///
/// Exactly one of a complete `line`/`column` pair or a `pattern` must be
/// present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryArgs {
    pub file: PathBuf,
    #[serde(default)]
    pub project: Option<PathBuf>,
    #[serde(default)]
    pub line: Option<i64>,
    #[serde(default)]
    pub column: Option<i64>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub flags: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
}

impl QueryArgs {
    /// Validate the raw input into a [`Query`].
    pub fn into_query(self) -> Result<Query> {
        let target = match (self.line, self.column, self.pattern) {
            (None, None, Some(pattern)) => QueryTarget::Pattern {
                pattern,
                flags: self.flags,
                index: self.index.unwrap_or(0),
            },
            (Some(line), Some(column), None) => QueryTarget::Position {
                line: positive(line, "line")?,
                column: positive(column, "column")?,
            },
            (None, None, None) => {
                return Err(PickError::invalid_query(
                    "expected either a line/column position or a pattern",
                ));
            }
            (Some(_), Some(_), Some(_)) => {
                return Err(PickError::invalid_query(
                    "a position and a pattern cannot be combined",
                ));
            }
            (line, column, _) => {
                return Err(PickError::invalid_query(format!(
                    "a position needs both line and column (got line {}, column {})",
                    describe(line),
                    describe(column)
                )));
            }
        };

        Ok(Query {
            file: self.file,
            project: self.project,
            target,
        })
    }
}

fn positive(value: i64, what: &str) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| {
            PickError::invalid_query(format!("{what} must be a positive integer, got {value}"))
        })
}

fn describe(value: Option<i64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

/// Exact location a query resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// 0-based UTF-16 offset into the file's full text
    pub offset: u32,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
    /// Text matched by a pattern query; empty for position queries
    pub matched_text: String,
}

/// Resolve `target` against the text of `file_name`.
pub fn resolve<O: TypeOracle + ?Sized>(
    oracle: &O,
    file_name: &str,
    source_text: &str,
    target: &QueryTarget,
) -> Result<ResolvedLocation> {
    let location = match target {
        QueryTarget::Position { line, column } => {
            resolve_position(oracle, file_name, *line, *column)?
        }
        QueryTarget::Pattern {
            pattern,
            flags,
            index,
        } => resolve_pattern(oracle, file_name, source_text, pattern, flags.as_deref(), *index)?,
    };
    debug!(
        offset = location.offset,
        line = location.line,
        column = location.column,
        "resolved query"
    );
    Ok(location)
}

fn resolve_position<O: TypeOracle + ?Sized>(
    oracle: &O,
    file_name: &str,
    line: u32,
    column: u32,
) -> Result<ResolvedLocation> {
    if line == 0 || column == 0 {
        return Err(PickError::invalid_query(format!(
            "line and column are 1-based (got line {line}, column {column})"
        )));
    }

    let offset = oracle
        .offset_of(file_name, line - 1, column - 1)
        .ok_or_else(|| {
            PickError::invalid_query(format!(
                "line {line}, column {column} is outside {file_name}"
            ))
        })?;

    Ok(ResolvedLocation {
        offset,
        line,
        column,
        matched_text: String::new(),
    })
}

fn resolve_pattern<O: TypeOracle + ?Sized>(
    oracle: &O,
    file_name: &str,
    source_text: &str,
    pattern: &str,
    flags: Option<&str>,
    index: usize,
) -> Result<ResolvedLocation> {
    let flags = global_flags(flags);
    let matcher = Matcher::build(pattern, &flags)?;

    let mut seen = 0;
    let mut found = None;
    matcher.walk(source_text, |start, end| {
        if seen == index {
            found = Some((start, end));
            return false;
        }
        seen += 1;
        true
    })?;
    let Some((start, end)) = found else {
        return Err(PickError::invalid_query(format!(
            "pattern /{pattern}/{flags} matched {seen} time(s) in {file_name}; index {index} is out of range"
        )));
    };

    let offset = utf16_offset_of(source_text, start);
    let (line, character) = oracle
        .line_and_character_of(file_name, offset)
        .ok_or_else(|| {
            PickError::invalid_query(format!("offset {offset} is outside {file_name}"))
        })?;

    Ok(ResolvedLocation {
        offset,
        line: line + 1,
        column: character + 1,
        matched_text: source_text[start..end].to_string(),
    })
}

/// Pattern flags with `g` always present.
fn global_flags(flags: Option<&str>) -> String {
    let mut flags = flags.unwrap_or_default().to_string();
    if !flags.contains('g') {
        flags.push('g');
    }
    flags
}

/// A compiled pattern query.
///
/// `Fancy` holds patterns that need lookaround or backreferences, which only
/// the backtracking engine supports.
enum Matcher {
    Plain(Regex),
    Fancy(Box<fancy_regex::Regex>),
}

impl Matcher {
    fn build(pattern: &str, flags: &str) -> Result<Self> {
        let mut builder = RegexBuilder::new(pattern);
        builder.crlf(true);
        let mut inline = String::new();
        for flag in flags.chars() {
            match flag {
                // Repeat matching is how we iterate; Unicode is always on.
                'g' | 'u' => {}
                'i' => {
                    builder.case_insensitive(true);
                    inline.push('i');
                }
                'm' => {
                    builder.multi_line(true);
                    inline.push('m');
                }
                's' => {
                    builder.dot_matches_new_line(true);
                    inline.push('s');
                }
                other => {
                    return Err(PickError::invalid_query(format!(
                        "unsupported pattern flag '{other}' in '{flags}'"
                    )));
                }
            }
        }

        let plain_err = match builder.build() {
            Ok(regex) => return Ok(Self::Plain(regex)),
            Err(err) => err,
        };
        trace!(%plain_err, "retrying pattern on the backtracking engine");

        let fancy_pattern = if inline.is_empty() {
            pattern.to_string()
        } else {
            format!("(?{inline}){pattern}")
        };
        fancy_regex::Regex::new(&fancy_pattern)
            .map(|regex| Self::Fancy(Box::new(regex)))
            .map_err(|err| PickError::invalid_query(format!("invalid pattern /{pattern}/: {err}")))
    }

    /// Byte span of the leftmost match starting at or after `pos`.
    fn find_at(&self, text: &str, pos: usize) -> Result<Option<(usize, usize)>> {
        match self {
            Self::Plain(regex) => Ok(regex.find_at(text, pos).map(|m| (m.start(), m.end()))),
            Self::Fancy(regex) => regex
                .find_from_pos(text, pos)
                .map(|found| found.map(|m| (m.start(), m.end())))
                .map_err(|err| PickError::invalid_query(format!("pattern search failed: {err}"))),
        }
    }

    /// Visit matches in textual order until `visit` returns `false`.
    ///
    /// Each search resumes where the previous match ended; after an empty
    /// match it resumes one character later.
    fn walk(&self, text: &str, mut visit: impl FnMut(usize, usize) -> bool) -> Result<()> {
        let mut pos = 0;
        while pos <= text.len() {
            let Some((start, end)) = self.find_at(text, pos)? else {
                break;
            };
            if !visit(start, end) {
                break;
            }
            pos = if end > start {
                end
            } else {
                text[end..]
                    .chars()
                    .next()
                    .map_or(text.len() + 1, |ch| end + ch.len_utf8())
            };
        }
        Ok(())
    }
}
