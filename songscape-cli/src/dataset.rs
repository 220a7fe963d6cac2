//! Resolving and loading the chart dataset shared by every subcommand.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use songscape_core::normalise_text;
use songscape_data::{Catalogue, dataset_is_file, load_catalogue};

use crate::{ARG_DATASET, CliError};

/// Take the merged dataset path or report which flag and variable to set.
pub(crate) fn require_dataset(
    dataset: Option<Utf8PathBuf>,
    env: &'static str,
) -> Result<Utf8PathBuf, CliError> {
    dataset.ok_or(CliError::MissingArgument {
        field: ARG_DATASET,
        env,
    })
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match dataset_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Check the dataset path, then load and index it.
pub(crate) fn open_catalogue(path: &Utf8Path) -> Result<Catalogue, CliError> {
    require_existing(path, ARG_DATASET)?;
    let catalogue = load_catalogue(path)?;
    debug!("catalogue ready: {} rows", catalogue.summary.rows);
    Ok(catalogue)
}

/// Reject user songs the catalogue has never seen, naming all of them at once.
pub(crate) fn check_known_songs(catalogue: &Catalogue, songs: &[String]) -> Result<(), CliError> {
    let titles: Vec<String> = songs
        .iter()
        .map(|song| normalise_text(song))
        .filter(|title| !catalogue.index.songs().contains(title))
        .collect();
    if titles.is_empty() {
        Ok(())
    } else {
        Err(CliError::UnknownSongs { titles })
    }
}
