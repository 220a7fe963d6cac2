//! Property-based tests over randomly generated chart worlds.
//!
//! # Invariants tested
//!
//! - **City capacity:** every city holds five songs in ascending rank and
//!   rejects a sixth.
//! - **Collection size:** `collect_songs(root)` yields five songs per city.
//! - **Top-N provenance:** `top_n` only returns songs charting in the region.
//! - **Symmetry:** `common_artist(a, b) == common_artist(b, a)`.
//! - **Self-exclusion:** the closest country is never the queried one.
//! - **Perfect match:** a city's own chart scores `1.0` in both modes.
//! - **Recommendation exclusion:** suggestions never repeat a user title.
#![expect(
    clippy::expect_used,
    clippy::float_arithmetic,
    reason = "property assertions unwrap generated fixtures and compare scores"
)]

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use songscape_core::{
    Granularity, QueryService, RecommendationEngine, SimilarityScorer, Song, SongKey, Tree,
    TreeError, collect_songs,
};

const TOLERANCE: f32 = 1e-6;

/// `(continent, country, city)` indices; city `0` is the synthetic city.
type CityId = (u8, u8, u8);
/// `(title, artist, streams)` indices in rank order.
type Chart = Vec<(u8, u8, u64)>;

fn chart_strategy() -> impl Strategy<Value = Chart> {
    (
        prop::collection::btree_set(0_u8..10, 5),
        prop::collection::vec(0_u8..6, 5),
        prop::collection::vec(0_u64..10_000, 5),
    )
        .prop_map(|(titles, artists, streams)| {
            titles
                .into_iter()
                .zip(artists)
                .zip(streams)
                .map(|((title, artist), plays)| (title, artist, plays))
                .collect()
        })
}

fn world_strategy() -> impl Strategy<Value = BTreeMap<CityId, Chart>> {
    prop::collection::btree_map((0_u8..3, 0_u8..3, 0_u8..3), chart_strategy(), 1..10)
}

fn path_of((continent, country, city): CityId) -> Vec<String> {
    let mut path = vec![format!("K{continent}"), format!("C{continent}-{country}")];
    if city > 0 {
        path.push(format!("Y{city}"));
    }
    path
}

fn build_tree(world: &BTreeMap<CityId, Chart>) -> Tree {
    let mut tree = Tree::new();
    for (id, chart) in world {
        let path = path_of(*id);
        for (rank, (title, artist, streams)) in (1_u8..).zip(chart) {
            let song = Song::new(&format!("t{title}"), &format!("r{artist}"), *streams, rank)
                .expect("generated rank is valid");
            tree.attach_song(&path, song).expect("generated city accepts song");
        }
    }
    tree
}

fn country_labels(tree: &Tree) -> Vec<String> {
    tree.regions(Granularity::Country)
        .map(|entry| entry.node.label().to_owned())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: cities hold five ascending ranks and refuse a sixth song.
    #[test]
    fn cities_respect_capacity(world in world_strategy()) {
        let mut tree = build_tree(&world);
        for entry in tree.cities() {
            let ranks: Vec<u8> = entry.node.songs().iter().map(Song::rank).collect();
            prop_assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        }
        let first = path_of(*world.keys().next().expect("at least one city"));
        let extra = Song::new("extra", "artist", 1, 5).expect("valid song");
        let err = tree.attach_song(&first, extra).expect_err("city is full");
        let is_city_full = matches!(err, TreeError::CityFull { .. });
        prop_assert!(is_city_full);
    }

    /// Property: the root collects exactly five songs per city.
    #[test]
    fn root_collects_every_song(world in world_strategy()) {
        let tree = build_tree(&world);
        prop_assert_eq!(collect_songs(tree.root()).len(), 5 * tree.cities().count());
        prop_assert_eq!(tree.cities().count(), world.len());
    }

    /// Property: `top_n` never invents songs.
    #[test]
    fn top_n_comes_from_the_region(world in world_strategy(), n in 1_usize..12) {
        let tree = build_tree(&world);
        let service = QueryService::new(&tree);
        for label in country_labels(&tree) {
            let region = tree.find_region(&label).expect("country exists");
            let present: BTreeSet<SongKey> =
                collect_songs(region).into_iter().map(Song::key).collect();
            let top = service.top_n(n, &label).expect("valid query");
            prop_assert!(top.len() <= n);
            prop_assert!(top.iter().all(|key| present.contains(key)));
        }
    }

    /// Property: shared artists do not depend on argument order.
    #[test]
    fn common_artist_is_symmetric(world in world_strategy()) {
        let tree = build_tree(&world);
        let service = QueryService::new(&tree);
        let labels = country_labels(&tree);
        for first in &labels {
            for second in &labels {
                prop_assert_eq!(
                    service.common_artist(first, second).expect("both exist"),
                    service.common_artist(second, first).expect("both exist")
                );
            }
        }
    }

    /// Property: the closest country is another country.
    #[test]
    fn closest_country_excludes_itself(world in world_strategy()) {
        let tree = build_tree(&world);
        let service = QueryService::new(&tree);
        let labels = country_labels(&tree);
        for label in &labels {
            match service.most_common_artist_country(label) {
                Ok(closest) => prop_assert_ne!(&closest, label),
                Err(err) => prop_assert_eq!(labels.len(), 1, "unexpected error {}", err),
            }
        }
    }

    /// Property: a city's own chart, in chart order, scores `1.0` against it.
    #[test]
    fn own_chart_scores_one(world in world_strategy(), ranked in any::<bool>()) {
        let tree = build_tree(&world);
        let entry = tree.cities().next().expect("at least one city");
        let user: Vec<&str> = entry.node.songs().iter().map(Song::title).collect();
        let path = entry.owned_path();

        let scores = SimilarityScorer::new(&tree)
            .region_personality(usize::MAX, &user, Granularity::City, ranked)
            .expect("valid query");
        let own = scores
            .iter()
            .find(|score| score.path == path)
            .expect("city was scored");
        prop_assert!((own.score - 1.0).abs() <= TOLERANCE);
        prop_assert!(scores.iter().all(|score| (0.0..=1.0).contains(&score.score)));
    }

    /// Property: recommendations never repeat a title the user supplied.
    #[test]
    fn recommendations_exclude_user_titles(
        world in world_strategy(),
        take in 1_usize..=5,
        regions in 1_usize..5,
        ranked in any::<bool>(),
    ) {
        let tree = build_tree(&world);
        let user: Vec<&str> = collect_songs(tree.root())
            .into_iter()
            .map(Song::title)
            .take(take)
            .collect();
        let picks = RecommendationEngine::new(&tree)
            .recommend_songs((10, regions), &user, Granularity::Country, ranked)
            .expect("valid query");
        prop_assert!(picks.len() <= 10);
        prop_assert!(picks.iter().all(|pick| !user.contains(&pick.title.as_str())));
    }
}
