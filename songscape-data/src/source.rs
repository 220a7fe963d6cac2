//! Capability-based access to dataset files.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

use crate::LoadError;

/// Open the dataset at `path` using ambient authority.
///
/// # Errors
/// Returns [`LoadError::Open`] when the file cannot be opened.
pub fn open_dataset(path: &Utf8Path) -> Result<fs_utf8::File, LoadError> {
    fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Report whether `path` names a regular file rather than a directory.
///
/// # Errors
/// Returns the I/O error raised while opening the parent directory or reading
/// metadata; a missing file reports [`io::ErrorKind::NotFound`].
pub fn dataset_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("dataset path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}
