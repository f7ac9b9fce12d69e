//! Flattening checker diagnostics for output.

use serde::Serialize;
use tracing::debug;
use tsz_pick_oracle::{MessageChain, OracleDiagnostic, TypeOracle};

/// A diagnostic as it appears in a result.
///
/// `file`, `line` and `column` are present together or not at all; a
/// diagnostic without a file and start offset is global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticSummary {
    /// Lower-case category name: `error`, `warning`, `suggestion`, `message`
    pub category: String,
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// Every pre-emit diagnostic the program reports for `file_name`, in the
/// order the oracle returns them.
pub fn report<O: TypeOracle + ?Sized>(oracle: &O, file_name: &str) -> Vec<DiagnosticSummary> {
    let diagnostics: Vec<DiagnosticSummary> = oracle
        .pre_emit_diagnostics(file_name)
        .iter()
        .map(|diag| summarize(oracle, diag))
        .collect();
    debug!(file = file_name, count = diagnostics.len(), "collected diagnostics");
    diagnostics
}

fn summarize<O: TypeOracle + ?Sized>(oracle: &O, diag: &OracleDiagnostic) -> DiagnosticSummary {
    let location = diag.file.as_deref().zip(diag.start).and_then(|(file, start)| {
        let (line, character) = oracle.line_and_character_of(file, start)?;
        Some((file.to_string(), line + 1, character + 1))
    });
    let (file, line, column) = match location {
        Some((file, line, column)) => (Some(file), Some(line), Some(column)),
        None => (None, None, None),
    };

    DiagnosticSummary {
        category: diag.category.name().to_lowercase(),
        code: diag.code,
        message: flatten_message_chain(&diag.message),
        file,
        line,
        column,
    }
}

/// Join a message chain into one string: each nested message goes on its
/// own line, indented two spaces per level.
pub fn flatten_message_chain(chain: &MessageChain) -> String {
    let mut out = String::new();
    write_chain(chain, 0, &mut out);
    out
}

fn write_chain(chain: &MessageChain, depth: usize, out: &mut String) {
    if depth > 0 {
        out.push('\n');
        for _ in 0..depth {
            out.push_str("  ");
        }
    }
    out.push_str(&chain.message_text);
    for next in &chain.next {
        write_chain(next, depth + 1, out);
    }
}
