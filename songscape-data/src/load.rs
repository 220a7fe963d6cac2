//! One-pass loading of a chart dataset into a [`Tree`].

use std::io::Read;

use camino::Utf8Path;
use log::{debug, info};
use songscape_core::Tree;

use crate::record::CityRecord;
use crate::source::open_dataset;
use crate::{CatalogueIndex, LoadError, RecordError};

/// Counts gathered while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows read.
    pub rows: u64,
    /// Rows describing a whole country.
    pub country_rows: u64,
    /// Songs attached.
    pub songs: u64,
}

/// A loaded tree with its derived index.
#[derive(Debug, Clone)]
pub struct Catalogue {
    /// The region tree.
    pub tree: Tree,
    /// Label and title sets built from `tree`.
    pub index: CatalogueIndex,
    /// Load counts.
    pub summary: LoadSummary,
}

/// Build a tree from headerless CSV rows.
///
/// Rows are inserted in file order, which fixes the traversal order every
/// tie-break relies on.
///
/// # Errors
/// Returns [`LoadError::Csv`] when the reader fails and
/// [`LoadError::Record`] for the first row that cannot be loaded.
///
/// # Examples
/// ```
/// use songscape_data::load_tree;
///
/// let csv = "Tokyo,Japan,Asia,\"Idol, YOASOBI, 100\"\n0,Iceland,Europe,\"Hey, Band, 5\"\n";
/// let (tree, summary) = load_tree(csv.as_bytes()).expect("valid dataset");
/// assert_eq!(tree.cities().count(), 2);
/// assert_eq!(summary.country_rows, 1);
/// ```
pub fn load_tree<R: Read>(reader: R) -> Result<(Tree, LoadSummary), LoadError> {
    let mut dataset = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut tree = Tree::new();
    let mut summary = LoadSummary::default();

    for (row, result) in (1_u64..).zip(dataset.records()) {
        let record = result.map_err(|source| LoadError::Csv { row, source })?;
        let parsed = CityRecord::from_csv(row, &record)?;
        let path = parsed.path();
        tree.insert_region_path(&path)
            .map_err(|source| RecordError::Tree { row, source })?;
        for song in parsed.songs.iter().cloned() {
            tree.attach_song(&path, song)
                .map_err(|source| RecordError::Tree { row, source })?;
            summary.songs += 1;
        }
        debug!("row {row}: {} songs under {}", parsed.songs.len(), path.join("/"));
        summary.rows = row;
        if parsed.is_country_wide() {
            summary.country_rows += 1;
        }
    }

    info!(
        "loaded {} rows ({} country-wide) holding {} songs",
        summary.rows, summary.country_rows, summary.songs
    );
    Ok((tree, summary))
}

/// Load the dataset at `path` and index it.
///
/// # Errors
/// Returns [`LoadError::Open`] when the file cannot be opened, otherwise the
/// errors of [`load_tree`].
pub fn load_catalogue(path: &Utf8Path) -> Result<Catalogue, LoadError> {
    let file = open_dataset(path)?;
    let (tree, summary) = load_tree(file)?;
    let index = CatalogueIndex::build(&tree);
    info!(
        "indexed {path}: {} continents, {} countries, {} cities, {} titles",
        index.continents().len(),
        index.countries().len(),
        index.cities().len(),
        index.songs().len()
    );
    Ok(Catalogue {
        tree,
        index,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use songscape_core::{ErrorKind, TreeError};

    const TWO_ROWS: &str = "\
Tokyo,Japan,Asia,\"a, x, 10\",\"b, y, 9\"
0,Chile,America,\"c, z, 8\"
";

    #[rstest]
    fn loads_rows_in_file_order() {
        let (tree, summary) = load_tree(TWO_ROWS.as_bytes()).expect("valid dataset");
        let paths: Vec<_> = tree.cities().map(|entry| entry.path.join("/")).collect();
        assert_eq!(paths, ["Asia/Japan/Tokyo", "America/Chile/0"]);
        assert_eq!(
            summary,
            LoadSummary {
                rows: 2,
                country_rows: 1,
                songs: 3
            }
        );
    }

    #[rstest]
    fn empty_input_builds_an_empty_tree() {
        let (tree, summary) = load_tree(&b""[..]).expect("empty dataset");
        assert!(tree.root().children().is_empty());
        assert_eq!(summary, LoadSummary::default());
    }

    #[rstest]
    fn repeated_city_rows_are_rejected() {
        let csv = "Tokyo,Japan,Asia,\"a, x, 1\"\nTokyo,Japan,Asia,\"b, x, 1\"\n";
        let err = load_tree(csv.as_bytes()).expect_err("duplicate city");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        match err {
            LoadError::Record(RecordError::Tree { row, source }) => {
                assert_eq!(row, 2);
                assert!(matches!(source, TreeError::RankOutOfOrder { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    fn rows_without_songs_are_rejected() {
        let csv = "0,Iceland,Europe,,,,,\nTokyo,Japan,Asia,\"a, x, 1\"\n";
        let err = load_tree(csv.as_bytes()).expect_err("empty chart row");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        match err {
            LoadError::Record(RecordError::NoSongs { row }) => assert_eq!(row, 1),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    fn malformed_rows_carry_their_number() {
        let csv = "Tokyo,Japan,Asia,\"a, x, 1\"\nLima,Peru,America,\"b, x, many\"\n";
        let err = load_tree(csv.as_bytes()).expect_err("bad streams");
        match err {
            LoadError::Record(record) => assert_eq!(record.row(), 2),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
