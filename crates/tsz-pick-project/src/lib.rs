//! Project discovery for tsz-pick.
//!
//! Finds the tsconfig a file belongs to (or validates an explicit one) and
//! loads it, following `extends` chains. Errors are `anyhow` errors with
//! context attached at each step; callers flatten them into their own error
//! type.

pub mod config;
pub mod discovery;

pub use config::{CompilerOptions, TsConfig, load_tsconfig, parse_tsconfig};
pub use discovery::{Project, find_tsconfig, resolve_project, resolve_tsconfig_path};
