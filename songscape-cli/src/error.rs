//! Error types emitted by the Songscape CLI.
//!
//! Every command helper returns `Result<_, CliError>`, so keep the variants
//! small; the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use songscape_core::{ErrorKind, QueryError};
use songscape_data::LoadError;
use thiserror::Error;

/// Errors emitted by the Songscape CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The dataset path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// The dataset path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// The dataset path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Loading the dataset failed.
    #[error("failed to load dataset: {0}")]
    Load(#[from] LoadError),
    /// User songs that no chart in the dataset contains.
    #[error("unknown song titles: {}", .titles.join(", "))]
    UnknownSongs { titles: Vec<String> },
    /// The query services rejected the request.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// Serializing a command result failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing a command result failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Domain classification for load and query failures.
    ///
    /// Returns `None` for configuration and output problems.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Load(err) => Some(err.kind()),
            Self::Query(err) => Some(err.kind()),
            Self::UnknownSongs { .. } => Some(ErrorKind::NotFound),
            _ => None,
        }
    }
}
