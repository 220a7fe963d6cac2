//! Error types produced while reading chart datasets.

use std::{io, num::ParseIntError};

use camino::Utf8PathBuf;
use songscape_core::{ErrorKind, TreeError};
use thiserror::Error;

/// A dataset row that cannot become part of the tree.
///
/// Row numbers are 1-based; columns are 1-based positions in the row.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    /// The row did not hold three labels and one to five song entries.
    #[error("row {row}: expected 4 to 8 columns, found {found}")]
    ColumnCount {
        /// Row number.
        row: u64,
        /// Columns present.
        found: usize,
    },
    /// The continent or country label was blank.
    #[error("row {row}: {column} label is empty")]
    MissingLabel {
        /// Row number.
        row: u64,
        /// `"continent"` or `"country"`.
        column: &'static str,
    },
    /// Every song cell in the row was blank.
    #[error("row {row}: no song entries")]
    NoSongs {
        /// Row number.
        row: u64,
    },
    /// A song entry did not split into title, artist and streams.
    #[error("row {row}, column {column}: expected \"<title>, <artist>, <streams>\", got {entry:?}")]
    SongEntry {
        /// Row number.
        row: u64,
        /// Column holding the entry.
        column: usize,
        /// Raw cell contents.
        entry: String,
    },
    /// The stream count was not a non-negative integer.
    #[error("row {row}, column {column}: invalid stream count {value:?}")]
    Streams {
        /// Row number.
        row: u64,
        /// Column holding the entry.
        column: usize,
        /// Rejected text.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The tree refused the row's songs.
    #[error("row {row}: {source}")]
    Tree {
        /// Row number.
        row: u64,
        /// Rejection reported by the tree.
        #[source]
        source: TreeError,
    },
}

impl RecordError {
    /// Classify the error; every malformed row is an invalid argument.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }

    /// 1-based row number of the offending record.
    #[must_use]
    pub const fn row(&self) -> u64 {
        match self {
            Self::ColumnCount { row, .. }
            | Self::MissingLabel { row, .. }
            | Self::NoSongs { row }
            | Self::SongEntry { row, .. }
            | Self::Streams { row, .. }
            | Self::Tree { row, .. } => *row,
        }
    }
}

/// Errors raised while loading a dataset into a tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset {path}: {source}")]
    Open {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The CSV reader failed on a row.
    #[error("failed to read dataset row {row}: {source}")]
    Csv {
        /// 1-based row number.
        row: u64,
        /// Reader error.
        #[source]
        source: csv::Error,
    },
    /// A row was read but could not be loaded.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl LoadError {
    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorKind::NotFound
            }
            Self::Open { .. } | Self::Csv { .. } => ErrorKind::InvalidArgument,
            Self::Record(err) => err.kind(),
        }
    }
}
