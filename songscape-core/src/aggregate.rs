//! Recursive song collection and tree-wide region lookup.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::{Granularity, NodeBody, QueryError, RegionNode, Song, SongKey, Tree};

/// Collect every song under `node`.
///
/// A city yields its songs in rank order; any higher node concatenates its
/// children in order. Nothing is deduplicated: the same `(title, artist)` may
/// chart in several cities of one region.
///
/// # Examples
/// ```
/// use songscape_core::{Song, Tree, collect_songs};
///
/// # fn main() -> Result<(), songscape_core::TreeError> {
/// let mut tree = Tree::new();
/// tree.attach_song(&["Asia", "Japan", "Tokyo"], Song::new("a", "x", 5, 1)?)?;
/// tree.attach_song(&["Asia", "Japan", "Osaka"], Song::new("a", "x", 3, 1)?)?;
/// assert_eq!(collect_songs(tree.root()).len(), 2);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn collect_songs(node: &RegionNode) -> Vec<&Song> {
    let mut songs = Vec::new();
    extend_songs(node, &mut songs);
    songs
}

fn extend_songs<'a>(node: &'a RegionNode, songs: &mut Vec<&'a Song>) {
    match node.body() {
        NodeBody::Songs(leaves) => songs.extend(leaves),
        NodeBody::Regions(children) => {
            for child in children {
                extend_songs(child, songs);
            }
        }
    }
}

/// Distinct artists charting anywhere under `node`.
pub(crate) fn artist_set(node: &RegionNode) -> BTreeSet<&str> {
    collect_songs(node).into_iter().map(Song::artist).collect()
}

/// Distinct `(title, artist)` keys charting anywhere under `node`.
pub(crate) fn song_set(node: &RegionNode) -> BTreeSet<(&str, &str)> {
    collect_songs(node).into_iter().map(Song::key_ref).collect()
}

/// One `(title, artist)` key with its streams summed across a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AggregatedSong<'a> {
    pub(crate) title: &'a str,
    pub(crate) artist: &'a str,
    pub(crate) streams: u64,
    pub(crate) best_rank: u8,
}

impl AggregatedSong<'_> {
    pub(crate) fn key(self) -> SongKey {
        SongKey::from_ref((self.title, self.artist))
    }

    /// Most streamed first, then best rank, then alphabetical.
    fn by_popularity(&self, other: &Self) -> Ordering {
        other
            .streams
            .cmp(&self.streams)
            .then(self.best_rank.cmp(&other.best_rank))
            .then_with(|| self.title.cmp(other.title))
            .then_with(|| self.artist.cmp(other.artist))
    }

    /// Best chart position first, then most streamed, then alphabetical.
    fn by_chart_position(&self, other: &Self) -> Ordering {
        self.best_rank
            .cmp(&other.best_rank)
            .then(other.streams.cmp(&self.streams))
            .then_with(|| self.title.cmp(other.title))
            .then_with(|| self.artist.cmp(other.artist))
    }
}

/// Group the songs under `node` by key and order them by popularity.
pub(crate) fn ranked_songs(node: &RegionNode) -> Vec<AggregatedSong<'_>> {
    let mut ranked = grouped_songs(node);
    ranked.sort_by(AggregatedSong::by_popularity);
    ranked
}

/// Group the songs under `node` by key and order them by chart position.
///
/// For a city this is exactly its chart.
pub(crate) fn charted_songs(node: &RegionNode) -> Vec<AggregatedSong<'_>> {
    let mut charted = grouped_songs(node);
    charted.sort_by(AggregatedSong::by_chart_position);
    charted
}

fn grouped_songs(node: &RegionNode) -> Vec<AggregatedSong<'_>> {
    let mut grouped: BTreeMap<(&str, &str), AggregatedSong<'_>> = BTreeMap::new();
    for song in collect_songs(node) {
        grouped
            .entry(song.key_ref())
            .and_modify(|entry| {
                entry.streams = entry.streams.saturating_add(song.streams());
                entry.best_rank = entry.best_rank.min(song.rank());
            })
            .or_insert(AggregatedSong {
                title: song.title(),
                artist: song.artist(),
                streams: song.streams(),
                best_rank: song.rank(),
            });
    }
    grouped.into_values().collect()
}

impl Tree {
    /// Find the first region carrying `label` at any depth.
    ///
    /// The search is depth-first from the root, so a continent is checked
    /// before its countries and a country before its cities.
    ///
    /// # Errors
    /// Returns [`QueryError::RegionNotFound`] when no node carries the label.
    pub fn find_region(&self, label: &str) -> Result<&RegionNode, QueryError> {
        find_in(self.root(), label).ok_or_else(|| QueryError::RegionNotFound {
            label: label.to_owned(),
        })
    }

    /// Find the first region carrying `label` at one level only.
    #[must_use]
    pub fn find_region_at(&self, label: &str, granularity: Granularity) -> Option<&RegionNode> {
        self.regions(granularity)
            .map(|entry| entry.node)
            .find(|node| node.label() == label)
    }

    /// Every distinct song title in the tree.
    pub(crate) fn song_titles(&self) -> BTreeSet<&str> {
        collect_songs(self.root())
            .into_iter()
            .map(Song::title)
            .collect()
    }
}

fn find_in<'a>(node: &'a RegionNode, label: &str) -> Option<&'a RegionNode> {
    if node.label() == label {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| find_in(child, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TreeBuilder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn world() -> Tree {
        TreeBuilder::new()
            .city(
                ["Asia", "Japan", "Tokyo"],
                &[("a", "x", 100), ("b", "y", 50)],
            )
            .city(["Asia", "Japan", "Osaka"], &[("b", "y", 70), ("c", "z", 60)])
            .country(["Europe", "Japan"], &[("d", "w", 1)])
            .build()
    }

    #[rstest]
    fn collects_in_child_order_without_dedup(world: Tree) {
        let japan = world.navigate(&["Asia", "Japan"]).expect("Japan");
        let titles: Vec<_> = collect_songs(japan).into_iter().map(Song::title).collect();
        assert_eq!(titles, ["a", "b", "b", "c"]);
    }

    #[rstest]
    fn ranking_sums_streams_across_cities(world: Tree) {
        let japan = world.navigate(&["Asia", "Japan"]).expect("Japan");
        let ranked = ranked_songs(japan);
        let summary: Vec<_> = ranked.iter().map(|s| (s.title, s.streams)).collect();
        assert_eq!(summary, [("b", 120), ("a", 100), ("c", 60)]);
        assert_eq!(ranked.first().map(|s| s.best_rank), Some(1));
    }

    #[rstest]
    fn ties_break_on_best_rank_then_title() {
        let tree = TreeBuilder::new()
            .city(["A", "B", "C"], &[("zeta", "x", 10), ("alpha", "x", 10)])
            .city(["A", "B", "D"], &[("omega", "x", 10), ("beta", "x", 5)])
            .build();
        let titles: Vec<_> = ranked_songs(tree.root())
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, ["omega", "zeta", "alpha", "beta"]);
    }

    #[rstest]
    fn find_region_prefers_depth_first_order(world: Tree) {
        let found = world.find_region("Japan").expect("Japan exists");
        assert_eq!(found.children().len(), 2, "Asian Japan is found first");
        let world_root = world.find_region("World").expect("root label");
        assert_eq!(world_root.label(), "World");
    }

    #[rstest]
    fn find_region_reports_unknown_labels(world: Tree) {
        let err = world.find_region("Atlantis").expect_err("unknown label");
        assert_eq!(
            err,
            QueryError::RegionNotFound {
                label: "Atlantis".into()
            }
        );
    }

    #[rstest]
    fn find_region_at_restricts_depth(world: Tree) {
        assert!(world.find_region_at("Tokyo", Granularity::Country).is_none());
        assert!(world.find_region_at("Tokyo", Granularity::City).is_some());
    }

    #[rstest]
    fn sets_deduplicate(world: Tree) {
        assert_eq!(
            artist_set(world.root()).into_iter().collect::<Vec<_>>(),
            ["w", "x", "y", "z"]
        );
        assert_eq!(song_set(world.root()).len(), 4);
        assert_eq!(world.song_titles().len(), 4);
    }
}
