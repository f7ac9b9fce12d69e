//! Query resolution and fact aggregation for tsz-pick.
//!
//! Given a checker program (a [`TypeOracle`]) and a query, this crate
//! resolves the query to an offset, finds the deepest node there, asks the
//! oracle what it knows about that node, and assembles a [`ResultRecord`].
//! Project discovery and program construction live above this crate.

pub mod diagnostics;
pub mod error;
pub mod facts;
pub mod locate;
pub mod options;
pub mod query;
pub mod record;

pub use diagnostics::{DiagnosticSummary, flatten_message_chain, report};
pub use error::{PickError, Result};
pub use facts::{
    DeclarationSummary, Facts, PropertySummary, SignatureSummary, SymbolSummary, aggregate,
    condense_snippet,
};
pub use locate::locate;
pub use options::{PickLimits, PickOptions};
pub use query::{Query, QueryArgs, QueryTarget, ResolvedLocation, resolve};
pub use record::{Omit, RecordPosition, ResultRecord, assemble};

use tracing::debug_span;
use tsz_pick_oracle::TypeOracle;

/// Answer a query against a program that already contains `file_name`.
///
/// `project` is the descriptor reported in the result.
pub fn pick_in_program<O: TypeOracle + ?Sized>(
    oracle: &O,
    file_name: &str,
    project: Option<String>,
    target: &QueryTarget,
    options: &PickOptions,
) -> Result<ResultRecord> {
    let _span = debug_span!("pick_in_program", file = file_name).entered();

    let (Some(root), Some(source_text)) =
        (oracle.source_file(file_name), oracle.source_text(file_name))
    else {
        return Err(PickError::OracleConstruction(format!(
            "{file_name} is not part of the program"
        )));
    };

    let location = resolve(oracle, file_name, source_text, target)?;
    let node = locate(oracle, root, location.offset);
    let facts = aggregate(oracle, node, &options.limits);
    let diagnostics = report(oracle, file_name);

    let record = assemble(
        file_name.to_string(),
        project,
        location,
        oracle.node_kind(node).to_string(),
        facts,
        diagnostics,
    );
    Ok(record.with_omissions(options.omit))
}
