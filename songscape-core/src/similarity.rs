//! Score a listener's song list against the charts of every region.
//!
//! A region's list is its top [`REGION_LIST_LEN`] titles by summed streams,
//! the same ordering [`QueryService::top_n`](crate::QueryService::top_n)
//! uses. Two [`ListScorer`] implementations compare it with the user list:
//! [`UnrankedOverlap`] treats both as sets, [`RankedOverlap`] also rewards
//! matching positions.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::Serialize;

use log::debug;

use crate::aggregate::charted_songs;
use crate::{Granularity, MAX_RANK, MIN_RANK, QueryError, RegionNode, Tree, normalise_text};

/// Number of titles taken from each region, and the longest user list.
pub const REGION_LIST_LEN: usize = MAX_RANK as usize;

/// Compare a user list with a region list.
///
/// Both slices are ordered best first. Implementations must return a finite
/// value in `0.0..=1.0`; [`ListScorer::sanitise`] applies those guards.
///
/// # Examples
/// ```
/// use songscape_core::{ListScorer, RankedOverlap, UnrankedOverlap};
///
/// let user = ["a", "b"];
/// let region = ["b", "a", "c"];
/// assert!((UnrankedOverlap.score(&user, &region) - 2.0 / 3.0).abs() < 1e-6);
/// assert!((RankedOverlap.score(&user, &region) - 0.75).abs() < 1e-6);
/// ```
pub trait ListScorer: Send + Sync {
    /// Similarity of `user` to `region`.
    fn score(&self, user: &[&str], region: &[&str]) -> f32;

    /// Map non-finite values to `0.0` and clamp to `0.0..=1.0`.
    fn sanitise(score: f32) -> f32
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

/// Shared distinct titles over the longer of the two lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnrankedOverlap;

impl ListScorer for UnrankedOverlap {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "overlap ratio of two short list lengths"
    )]
    fn score(&self, user: &[&str], region: &[&str]) -> f32 {
        let longest = user.len().max(region.len());
        if longest == 0 {
            return 0.0;
        }
        let user_set: BTreeSet<&str> = user.iter().copied().collect();
        let region_set: BTreeSet<&str> = region.iter().copied().collect();
        let common = user_set.intersection(&region_set).count();
        Self::sanitise(common as f32 / longest as f32)
    }
}

/// Position-weighted overlap.
///
/// Each user title found in the region list earns `1 - |i - j| / 4`, where
/// `i` and `j` are its positions in the two lists, so a match at the same
/// position earns `1.0` and a match four places away earns nothing. The sum
/// is divided by the user list length.
#[derive(Debug, Default, Clone, Copy)]
pub struct RankedOverlap;

impl RankedOverlap {
    const SPAN: f32 = (MAX_RANK - MIN_RANK) as f32;
}

impl ListScorer for RankedOverlap {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "rank distances are small integers weighted into a ratio"
    )]
    fn score(&self, user: &[&str], region: &[&str]) -> f32 {
        if user.is_empty() {
            return 0.0;
        }
        let total: f32 = user
            .iter()
            .enumerate()
            .filter_map(|(i, title)| {
                region
                    .iter()
                    .position(|candidate| candidate == title)
                    .map(|j| (1.0 - i.abs_diff(j) as f32 / Self::SPAN).max(0.0))
            })
            .sum();
        Self::sanitise(total / user.len() as f32)
    }
}

/// Similarity of one region to the user list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RegionScore {
    /// Value in `0.0..=1.0`.
    pub score: f32,
    /// Labels from the continent down to the region.
    pub path: Vec<String>,
}

/// A region with its score, still borrowing the tree.
#[derive(Debug, Clone)]
pub(crate) struct ScoredRegion<'t> {
    pub(crate) node: &'t RegionNode,
    pub(crate) path: Vec<&'t str>,
    pub(crate) score: f32,
}

/// Scores user song lists against the regions of a [`Tree`].
///
/// # Examples
/// ```
/// use songscape_core::{Granularity, SimilarityScorer, Song, Tree};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tree = Tree::new();
/// tree.attach_song(&["Asia", "Japan", "Tokyo"], Song::new("Idol", "YOASOBI", 9, 1)?)?;
/// tree.attach_song(&["Asia", "Korea", "Seoul"], Song::new("Hype", "Boys", 9, 1)?)?;
/// let best = SimilarityScorer::new(&tree).region_personality(
///     1,
///     &[" IDOL "],
///     Granularity::City,
///     false,
/// )?;
/// assert_eq!(best[0].path, ["Asia", "Japan", "Tokyo"]);
/// assert_eq!(best[0].score, 1.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer<'t> {
    tree: &'t Tree,
}

impl<'t> SimilarityScorer<'t> {
    /// Borrow `tree` for scoring.
    #[must_use]
    pub const fn new(tree: &'t Tree) -> Self {
        Self { tree }
    }

    /// The `num_regions` regions at `granularity` most similar to
    /// `user_songs`, best first.
    ///
    /// Titles are matched after trimming and lowercasing. Equal scores keep
    /// depth-first traversal order. `ranked` selects [`RankedOverlap`] over
    /// [`UnrankedOverlap`].
    ///
    /// # Errors
    /// Returns [`QueryError::ZeroCount`] when `num_regions` is zero,
    /// [`QueryError::UserSongCount`] unless one to five titles are given and
    /// [`QueryError::SongNotFound`] for a title absent from the tree.
    pub fn region_personality<S: AsRef<str>>(
        &self,
        num_regions: usize,
        user_songs: &[S],
        granularity: Granularity,
        ranked: bool,
    ) -> Result<Vec<RegionScore>, QueryError> {
        if num_regions == 0 {
            return Err(QueryError::ZeroCount {
                argument: "num_regions",
            });
        }
        let titles = self.user_titles(user_songs)?;
        let user: Vec<&str> = titles.iter().map(String::as_str).collect();
        Ok(self
            .scored_regions(&user, granularity, ranked)
            .into_iter()
            .take(num_regions)
            .map(|region| RegionScore {
                score: region.score,
                path: region.path.iter().map(|label| (*label).to_owned()).collect(),
            })
            .collect())
    }

    /// Normalise and validate a user song list.
    ///
    /// Repeated titles keep their first position.
    pub(crate) fn user_titles<S: AsRef<str>>(
        &self,
        user_songs: &[S],
    ) -> Result<Vec<String>, QueryError> {
        if !(1..=REGION_LIST_LEN).contains(&user_songs.len()) {
            return Err(QueryError::UserSongCount {
                count: user_songs.len(),
            });
        }
        let known = self.tree.song_titles();
        let mut titles: Vec<String> = Vec::with_capacity(user_songs.len());
        for raw in user_songs {
            let title = normalise_text(raw.as_ref());
            if !known.contains(title.as_str()) {
                return Err(QueryError::SongNotFound { title });
            }
            if !titles.contains(&title) {
                titles.push(title);
            }
        }
        Ok(titles)
    }

    /// Every region at `granularity`, scored and sorted best first.
    pub(crate) fn scored_regions(
        &self,
        user: &[&str],
        granularity: Granularity,
        ranked: bool,
    ) -> Vec<ScoredRegion<'t>> {
        let mut scored = if ranked {
            self.score_all(&RankedOverlap, user, granularity)
        } else {
            self.score_all(&UnrankedOverlap, user, granularity)
        };
        // Stable, so ties stay in traversal order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(
            "scored {} {granularity} regions against {} user titles",
            scored.len(),
            user.len()
        );
        scored
    }

    fn score_all<L: ListScorer>(
        &self,
        scorer: &L,
        user: &[&str],
        granularity: Granularity,
    ) -> Vec<ScoredRegion<'t>> {
        self.tree
            .regions(granularity)
            .map(|entry| {
                let region = region_list(entry.node);
                ScoredRegion {
                    score: scorer.score(user, &region),
                    node: entry.node,
                    path: entry.path,
                }
            })
            .collect()
    }
}

/// The region's top titles by chart position.
///
/// Songs charting in several cities take their best rank; summed streams
/// break ties between equal ranks.
fn region_list(node: &RegionNode) -> Vec<&str> {
    charted_songs(node)
        .into_iter()
        .take(REGION_LIST_LEN)
        .map(|song| song.title)
        .collect()
}
