//! Tree builders shared by unit tests, behaviour tests and benchmarks.

use crate::{Song, Tree};

/// `(title, artist, streams)` triple; ranks follow slice order.
pub type ChartEntry<'a> = (&'a str, &'a str, u64);

/// Fluent builder for small hand-written trees.
///
/// Every method panics on input the tree rejects, which keeps fixtures short.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: Tree,
}

impl TreeBuilder {
    /// Start from an empty `World` root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `[continent, country, city]` chart.
    ///
    /// # Panics
    /// Panics when the tree rejects the path or a song.
    #[must_use]
    pub fn city(self, path: [&str; 3], chart: &[ChartEntry<'_>]) -> Self {
        self.chart(&path, chart)
    }

    /// Add a `[continent, country]` chart held by the synthetic `"0"` city.
    ///
    /// # Panics
    /// Panics when the tree rejects the path or a song.
    #[must_use]
    pub fn country(self, path: [&str; 2], chart: &[ChartEntry<'_>]) -> Self {
        self.chart(&path, chart)
    }

    #[expect(clippy::expect_used, reason = "fixtures fail loudly on bad input")]
    fn chart(mut self, path: &[&str], chart: &[ChartEntry<'_>]) -> Self {
        self.tree
            .insert_region_path(path)
            .expect("fixture path is valid");
        for (rank, (title, artist, streams)) in (1_u8..).zip(chart) {
            let song = Song::new(title, artist, *streams, rank).expect("fixture rank is valid");
            self.tree
                .attach_song(path, song)
                .expect("fixture city accepts the song");
        }
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Tree {
        self.tree
    }
}

/// Asia, Japan, Tokyo holding songs `a` to `e` by artists `v` to `z`, with
/// streams falling from 100 to 10.
#[must_use]
pub fn japan_chart() -> Tree {
    TreeBuilder::new()
        .city(
            ["Asia", "Japan", "Tokyo"],
            &[
                ("a", "v", 100),
                ("b", "w", 80),
                ("c", "x", 60),
                ("d", "y", 40),
                ("e", "z", 10),
            ],
        )
        .build()
}

/// Three countries with overlapping charts, used by the similarity and
/// recommendation tests.
///
/// - `Europe/France/Paris`: `a b c d e`
/// - `Europe/France/Lyon`: `a f g h i`
/// - `Asia/Japan/Tokyo`: `j k l m n`
/// - `America/Chile` (no cities): `e d c b a`
#[must_use]
pub fn overlap_world() -> Tree {
    TreeBuilder::new()
        .city(
            ["Europe", "France", "Paris"],
            &[
                ("a", "p", 50),
                ("b", "p", 40),
                ("c", "q", 30),
                ("d", "q", 20),
                ("e", "r", 10),
            ],
        )
        .city(
            ["Europe", "France", "Lyon"],
            &[
                ("a", "p", 45),
                ("f", "s", 35),
                ("g", "s", 25),
                ("h", "t", 15),
                ("i", "t", 5),
            ],
        )
        .city(
            ["Asia", "Japan", "Tokyo"],
            &[
                ("j", "u", 90),
                ("k", "u", 70),
                ("l", "v", 50),
                ("m", "v", 30),
                ("n", "w", 10),
            ],
        )
        .country(
            ["America", "Chile"],
            &[
                ("e", "r", 60),
                ("d", "q", 50),
                ("c", "q", 40),
                ("b", "p", 30),
                ("a", "p", 20),
            ],
        )
        .build()
}
