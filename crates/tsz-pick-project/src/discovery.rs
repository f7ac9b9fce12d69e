//! Locating the project a file belongs to.

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::config::{CompilerOptions, TsConfig, load_tsconfig};

const TSCONFIG_FILE_NAME: &str = "tsconfig.json";

/// A loaded project configuration.
#[derive(Debug, Clone)]
pub struct Project {
    /// Canonical path of the tsconfig file
    pub config_path: PathBuf,
    /// Directory containing the tsconfig file
    pub root_dir: PathBuf,
    pub config: TsConfig,
}

impl Project {
    /// Load the project described by the tsconfig at `config_path`.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = load_tsconfig(config_path)?;
        let config_path = canonicalize_or_owned(config_path);
        let root_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            config_path,
            root_dir,
            config,
        })
    }

    /// Compiler options, defaulted when the config has none.
    pub fn compiler_options(&self) -> CompilerOptions {
        self.config.compiler_options.clone().unwrap_or_default()
    }

    /// The descriptor reported alongside an answer.
    pub fn descriptor(&self) -> String {
        self.config_path.display().to_string()
    }
}

/// Find the nearest `tsconfig.json` in `start` or any of its ancestors.
pub fn find_tsconfig(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(TSCONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
        .map(|candidate| canonicalize_or_owned(&candidate))
}

/// Resolve an explicit project pointer against `cwd`.
///
/// A directory means the `tsconfig.json` inside it. The result must be an
/// existing file.
pub fn resolve_tsconfig_path(cwd: &Path, project: &Path) -> Result<PathBuf> {
    let mut candidate = if project.is_absolute() {
        project.to_path_buf()
    } else {
        cwd.join(project)
    };

    if candidate.is_dir() {
        candidate = candidate.join(TSCONFIG_FILE_NAME);
    }

    if !candidate.exists() {
        bail!("tsconfig not found at {}", candidate.display());
    }

    if !candidate.is_file() {
        bail!("project path is not a file: {}", candidate.display());
    }

    Ok(canonicalize_or_owned(&candidate))
}

/// Determine the project for `file`.
///
/// With an explicit pointer, the pointer must name a loadable tsconfig. Without
/// one, the nearest tsconfig above the file is used if it exists; a file with
/// no tsconfig above it is checked with default options (`Ok(None)`).
pub fn resolve_project(file: &Path, project: Option<&Path>) -> Result<Option<Project>> {
    if let Some(project) = project {
        let cwd = std::env::current_dir()?;
        let config_path = resolve_tsconfig_path(&cwd, project)?;
        tracing::debug!(config = %config_path.display(), "using explicit project");
        return Project::load(&config_path).map(Some);
    }

    let Some(start) = file.parent() else {
        return Ok(None);
    };
    match find_tsconfig(start) {
        Some(config_path) => {
            tracing::debug!(config = %config_path.display(), "discovered project");
            Project::load(&config_path).map(Some)
        }
        None => {
            tracing::debug!(file = %file.display(), "no tsconfig found; using default options");
            Ok(None)
        }
    }
}

fn canonicalize_or_owned(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
