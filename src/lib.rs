//! Ask the TypeScript type checker what it knows about one place in a file.
//!
//! [`pick_type`] takes a file, an optional project pointer, and either a
//! 1-based line/column or a regular expression with a match index. It finds
//! the file's project, has a [`ProgramHost`] build a checker program for it,
//! and reports the type, symbol, signatures, properties, declarations and
//! diagnostics at that location as a [`ResultRecord`].
//!
//! Each call builds its own program; nothing is cached between queries.

pub mod tracing_config;

use std::path::Path;

use tracing::{debug, debug_span};

pub use tsz_pick_common::{FlagSummary, LineMap, Position};
pub use tsz_pick_engine::{
    DeclarationSummary, DiagnosticSummary, Omit, PickError, PickLimits, PickOptions,
    PropertySummary, Query, QueryArgs, QueryTarget, RecordPosition, Result, ResultRecord,
    SignatureSummary, SymbolSummary, pick_in_program,
};
pub use tsz_pick_oracle::{SignatureKind, TypeOracle};
pub use tsz_pick_project::{CompilerOptions, Project};

/// Builds the checker program a query runs against.
///
/// The program must contain `file` under its canonical path, written with
/// [`Path::display`]. `project` is `None` when no tsconfig governs the file,
/// in which case default compiler options apply.
pub trait ProgramHost {
    type Program: TypeOracle;

    fn create_program(
        &self,
        file: &Path,
        project: Option<&Project>,
    ) -> anyhow::Result<Self::Program>;
}

impl<F, P> ProgramHost for F
where
    F: Fn(&Path, Option<&Project>) -> anyhow::Result<P>,
    P: TypeOracle,
{
    type Program = P;

    fn create_program(&self, file: &Path, project: Option<&Project>) -> anyhow::Result<P> {
        self(file, project)
    }
}

/// Answer a type query.
///
/// Fails with exactly one [`PickError`]: the file does not exist, the
/// project cannot be resolved, the program cannot be built, or the query
/// does not land in the file.
pub fn pick_type<H: ProgramHost + ?Sized>(
    host: &H,
    query: &Query,
    options: &PickOptions,
) -> Result<ResultRecord> {
    let _span = debug_span!("pick_type", file = %query.file.display()).entered();

    let file = std::fs::canonicalize(&query.file)
        .ok()
        .filter(|path| path.is_file())
        .ok_or_else(|| PickError::FileNotFound(query.file.clone()))?;

    let project = tsz_pick_project::resolve_project(&file, query.project.as_deref())
        .map_err(|err| PickError::ProjectResolution(format!("{err:#}")))?;
    debug!(
        project = ?project.as_ref().map(|p| &p.config_path),
        "resolved project"
    );

    let program = host
        .create_program(&file, project.as_ref())
        .map_err(|err| PickError::OracleConstruction(format!("{err:#}")))?;

    let file_name = file.display().to_string();
    pick_in_program(
        &program,
        &file_name,
        project.as_ref().map(Project::descriptor),
        &query.target,
        options,
    )
}

/// Validate raw caller input and answer it.
pub fn pick_type_args<H: ProgramHost + ?Sized>(
    host: &H,
    args: QueryArgs,
    options: &PickOptions,
) -> Result<ResultRecord> {
    pick_type(host, &args.into_query()?, options)
}

/// Render a record as JSON.
pub fn render_json(record: &ResultRecord, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    }
}
