//! Song suggestions drawn from the regions most similar to a listener.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::debug;

use crate::{Granularity, QueryError, SimilarityScorer, Song, Tree, collect_songs};

/// Caps applied by [`RecommendationEngine::recommend_songs`].
///
/// Converts from a `(max_recommendations, max_regions)` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecommendationLimits {
    /// Most songs to return.
    pub max_recommendations: usize,
    /// Most similar regions to draw candidates from.
    pub max_regions: usize,
}

impl RecommendationLimits {
    /// Bundle the two caps.
    #[must_use]
    pub const fn new(max_recommendations: usize, max_regions: usize) -> Self {
        Self {
            max_recommendations,
            max_regions,
        }
    }

    /// Check both caps are at least one.
    ///
    /// # Errors
    /// Returns [`QueryError::ZeroCount`] naming the first zero cap.
    pub const fn validate(self) -> Result<Self, QueryError> {
        if self.max_recommendations == 0 {
            return Err(QueryError::ZeroCount {
                argument: "max_recommendations",
            });
        }
        if self.max_regions == 0 {
            return Err(QueryError::ZeroCount {
                argument: "max_regions",
            });
        }
        Ok(self)
    }
}

impl From<(usize, usize)> for RecommendationLimits {
    fn from((max_recommendations, max_regions): (usize, usize)) -> Self {
        Self::new(max_recommendations, max_regions)
    }
}

/// A suggested song.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Recommendation {
    /// Normalised title.
    pub title: String,
    /// Normalised artist.
    pub artist: String,
    /// Number of considered regions charting the song.
    pub regions: usize,
    /// Streams summed over the considered regions.
    pub streams: u64,
    /// Best rank seen in any considered city.
    pub best_rank: u8,
}

#[derive(Debug)]
struct Candidate<'t> {
    title: &'t str,
    artist: &'t str,
    regions: usize,
    streams: u64,
    best_rank: u8,
}

impl Candidate<'_> {
    fn into_recommendation(self) -> Recommendation {
        Recommendation {
            title: self.title.to_owned(),
            artist: self.artist.to_owned(),
            regions: self.regions,
            streams: self.streams,
            best_rank: self.best_rank,
        }
    }
}

/// Turns similarity scores into song suggestions.
///
/// # Examples
/// ```
/// use songscape_core::{Granularity, RecommendationEngine, Song, Tree};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tree = Tree::new();
/// let tokyo = ["Asia", "Japan", "Tokyo"];
/// tree.attach_song(&tokyo, Song::new("Idol", "YOASOBI", 9, 1)?)?;
/// tree.attach_song(&tokyo, Song::new("Show", "Ado", 8, 2)?)?;
/// let picks = RecommendationEngine::new(&tree).recommend_songs(
///     (3, 1),
///     &["idol"],
///     Granularity::City,
///     false,
/// )?;
/// assert_eq!(picks.len(), 1);
/// assert_eq!(picks[0].title, "show");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'t> {
    scorer: SimilarityScorer<'t>,
}

impl<'t> RecommendationEngine<'t> {
    /// Borrow `tree` for recommending.
    #[must_use]
    pub const fn new(tree: &'t Tree) -> Self {
        Self {
            scorer: SimilarityScorer::new(tree),
        }
    }

    /// Suggest songs the listener has not named, drawn from the
    /// `max_regions` regions at `granularity` most similar to `user_songs`.
    ///
    /// Candidates are ordered by how many of those regions chart them, then
    /// by summed streams, then by best rank, then alphabetically.
    ///
    /// # Errors
    /// Returns [`QueryError::ZeroCount`] for a zero limit,
    /// [`QueryError::UserSongCount`] unless one to five titles are given and
    /// [`QueryError::SongNotFound`] for a title absent from the tree.
    pub fn recommend_songs<S: AsRef<str>>(
        &self,
        limits: impl Into<RecommendationLimits>,
        user_songs: &[S],
        granularity: Granularity,
        ranked: bool,
    ) -> Result<Vec<Recommendation>, QueryError> {
        let limits = limits.into().validate()?;
        let titles = self.scorer.user_titles(user_songs)?;
        let user: Vec<&str> = titles.iter().map(String::as_str).collect();
        let excluded: BTreeSet<&str> = user.iter().copied().collect();

        let mut candidates: BTreeMap<(&str, &str), Candidate<'t>> = BTreeMap::new();
        let considered = self.scorer.scored_regions(&user, granularity, ranked);
        for region in considered.iter().take(limits.max_regions) {
            let mut seen_here = BTreeSet::new();
            for song in collect_songs(region.node) {
                if excluded.contains(song.title()) {
                    continue;
                }
                let first_in_region = seen_here.insert(song.key_ref());
                merge(&mut candidates, song, first_in_region);
            }
        }
        debug!(
            "{} candidate songs from {} regions",
            candidates.len(),
            considered.len().min(limits.max_regions)
        );

        let mut ranked_candidates: Vec<_> = candidates.into_values().collect();
        ranked_candidates.sort_by(|a, b| {
            b.regions
                .cmp(&a.regions)
                .then(b.streams.cmp(&a.streams))
                .then(a.best_rank.cmp(&b.best_rank))
                .then_with(|| a.title.cmp(b.title))
                .then_with(|| a.artist.cmp(b.artist))
        });
        Ok(ranked_candidates
            .into_iter()
            .take(limits.max_recommendations)
            .map(Candidate::into_recommendation)
            .collect())
    }
}

fn merge<'t>(
    candidates: &mut BTreeMap<(&'t str, &'t str), Candidate<'t>>,
    song: &'t Song,
    first_in_region: bool,
) {
    let region_hit = usize::from(first_in_region);
    candidates
        .entry(song.key_ref())
        .and_modify(|candidate| {
            candidate.regions += region_hit;
            candidate.streams = candidate.streams.saturating_add(song.streams());
            candidate.best_rank = candidate.best_rank.min(song.rank());
        })
        .or_insert(Candidate {
            title: song.title(),
            artist: song.artist(),
            regions: region_hit,
            streams: song.streams(),
            best_rank: song.rank(),
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::test_support::{TreeBuilder, overlap_world};
    use rstest::rstest;

    #[rstest]
    fn never_returns_user_titles() {
        let tree = overlap_world();
        let picks = RecommendationEngine::new(&tree)
            .recommend_songs((20, 4), &["a", "j"], Granularity::City, false)
            .expect("valid query");
        assert!(picks.iter().all(|p| p.title != "a" && p.title != "j"));
        assert_eq!(picks.len(), 12);
    }

    #[rstest]
    fn songs_shared_by_regions_come_first() {
        let tree = overlap_world();
        let picks = RecommendationEngine::new(&tree)
            .recommend_songs(
                RecommendationLimits::new(3, 2),
                &["a", "b"],
                Granularity::City,
                false,
            )
            .expect("valid query");
        // Paris and Chile both chart c, d and e with equal totals.
        let summary: Vec<_> = picks
            .iter()
            .map(|p| (p.title.as_str(), p.regions, p.streams))
            .collect();
        assert_eq!(summary, [("e", 2, 70), ("d", 2, 70), ("c", 2, 70)]);
    }

    #[rstest]
    fn ties_fall_back_to_best_rank() {
        let tree = TreeBuilder::new()
            .city(["A", "B", "C"], &[("seed", "s", 9), ("low", "x", 5), ("high", "x", 5)])
            .build();
        let picks = RecommendationEngine::new(&tree)
            .recommend_songs((2, 1), &["seed"], Granularity::City, false)
            .expect("valid query");
        let titles: Vec<_> = picks.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["low", "high"]);
        assert_eq!(picks.first().map(|p| p.best_rank), Some(2));
    }

    #[rstest]
    fn repeats_within_a_region_count_once() {
        let tree = TreeBuilder::new()
            .city(["Europe", "France", "Paris"], &[("seed", "s", 1), ("x", "y", 10)])
            .city(["Europe", "France", "Lyon"], &[("seed", "s", 1), ("x", "y", 15)])
            .build();
        let picks = RecommendationEngine::new(&tree)
            .recommend_songs((1, 1), &["seed"], Granularity::Country, false)
            .expect("valid query");
        assert_eq!(
            picks,
            [Recommendation {
                title: "x".into(),
                artist: "y".into(),
                regions: 1,
                streams: 25,
                best_rank: 2,
            }]
        );
    }

    #[rstest]
    #[case((0, 1), &["a"], ErrorKind::InvalidArgument)]
    #[case((1, 0), &["a"], ErrorKind::InvalidArgument)]
    #[case((1, 1), &["nope"], ErrorKind::NotFound)]
    fn rejects_bad_input(
        #[case] limits: (usize, usize),
        #[case] user: &[&str],
        #[case] kind: ErrorKind,
    ) {
        let tree = overlap_world();
        let err = RecommendationEngine::new(&tree)
            .recommend_songs(limits, user, Granularity::City, true)
            .expect_err("bad input");
        assert_eq!(err.kind(), kind);
    }
}
