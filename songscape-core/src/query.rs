//! Region-level queries: top songs, shared artists and songs, closest country.

use std::collections::BTreeSet;

use log::debug;

use crate::aggregate::{artist_set, ranked_songs, song_set};
use crate::{Granularity, QueryError, RegionNode, SongKey, Tree};

/// Read-only query front end over a built [`Tree`].
///
/// # Examples
/// ```
/// use songscape_core::{QueryService, Song, Tree};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tree = Tree::new();
/// tree.attach_song(&["Europe", "X"], Song::new("a", "y", 3, 1)?)?;
/// tree.attach_song(&["Europe", "Y"], Song::new("b", "y", 2, 1)?)?;
/// let service = QueryService::new(&tree);
/// assert_eq!(service.common_artist("X", "Y")?, ["y"]);
/// assert_eq!(service.most_common_artist_country("X")?, "Y");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'t> {
    tree: &'t Tree,
}

impl<'t> QueryService<'t> {
    /// Borrow `tree` for querying.
    #[must_use]
    pub const fn new(tree: &'t Tree) -> Self {
        Self { tree }
    }

    /// The most streamed `n` songs under the region labelled `label`.
    ///
    /// Repeated `(title, artist)` pairs are merged and their streams summed.
    /// Ties fall back to the best rank seen, then title, then artist.
    ///
    /// # Errors
    /// Returns [`QueryError::ZeroCount`] when `n` is zero and
    /// [`QueryError::RegionNotFound`] when no region carries `label`.
    pub fn top_n(&self, n: usize, label: &str) -> Result<Vec<SongKey>, QueryError> {
        if n == 0 {
            return Err(QueryError::ZeroCount { argument: "n" });
        }
        let region = self.tree.find_region(label)?;
        Ok(ranked_songs(region)
            .into_iter()
            .take(n)
            .map(|song| song.key())
            .collect())
    }

    /// Artists charting in both countries, sorted ascending.
    ///
    /// # Errors
    /// Returns [`QueryError::CountryNotFound`] when either label names no
    /// country.
    pub fn common_artist(&self, first: &str, second: &str) -> Result<Vec<String>, QueryError> {
        let left = artist_set(self.country(first)?);
        let right = artist_set(self.country(second)?);
        Ok(left
            .intersection(&right)
            .map(|artist| (*artist).to_owned())
            .collect())
    }

    /// Songs charting in both countries, sorted by title then artist.
    ///
    /// # Errors
    /// Returns [`QueryError::CountryNotFound`] when either label names no
    /// country.
    pub fn common_song(&self, first: &str, second: &str) -> Result<Vec<SongKey>, QueryError> {
        let left = song_set(self.country(first)?);
        let right = song_set(self.country(second)?);
        Ok(left
            .intersection(&right)
            .map(|key| SongKey::from_ref(*key))
            .collect())
    }

    /// The other country sharing the most artists with `country`.
    ///
    /// # Errors
    /// Returns [`QueryError::CountryNotFound`] for an unknown country and
    /// [`QueryError::NoOtherCountry`] when the tree holds no other country.
    pub fn most_common_artist_country(&self, country: &str) -> Result<String, QueryError> {
        self.closest_country(country, artist_set)
    }

    /// The other country sharing the most songs with `country`.
    ///
    /// # Errors
    /// Returns [`QueryError::CountryNotFound`] for an unknown country and
    /// [`QueryError::NoOtherCountry`] when the tree holds no other country.
    pub fn most_common_song_country(&self, country: &str) -> Result<String, QueryError> {
        self.closest_country(country, song_set)
    }

    fn country(&self, label: &str) -> Result<&'t RegionNode, QueryError> {
        self.tree
            .find_region_at(label, Granularity::Country)
            .ok_or_else(|| QueryError::CountryNotFound {
                label: label.to_owned(),
            })
    }

    /// Scan every other country node in traversal order; the first maximum
    /// wins. A namesake on another continent still counts as another country.
    fn closest_country<T, F>(&self, country: &str, features: F) -> Result<String, QueryError>
    where
        T: Ord,
        F: Fn(&'t RegionNode) -> BTreeSet<T>,
    {
        let origin = self.country(country)?;
        let target = features(origin);
        let mut best: Option<(&str, usize)> = None;
        let mut compared = 0_usize;
        for entry in self.tree.regions(Granularity::Country) {
            let candidate = entry.node;
            if std::ptr::eq(candidate, origin) {
                continue;
            }
            compared += 1;
            let overlap = features(candidate).intersection(&target).count();
            if best.is_none_or(|(_, top)| overlap > top) {
                best = Some((candidate.label(), overlap));
            }
        }
        debug!("compared {country} against {compared} other countries");
        best.map(|(label, _)| label.to_owned())
            .ok_or_else(|| QueryError::NoOtherCountry {
                country: country.to_owned(),
            })
    }
}
