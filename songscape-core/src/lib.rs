//! Core domain types and query engine for Songscape.
//!
//! The crate models a world of "top songs" charts as a fixed-depth tree:
//! `World` at the root, then continents, countries and cities. Cities hold up
//! to five ranked [`Song`] leaves. The tree is built once by a loader and is
//! read-only afterwards; every query type borrows it immutably.
//!
//! Query surfaces:
//! - [`QueryService`] answers top-N, common artist/song and closest-country
//!   questions.
//! - [`SimilarityScorer`] scores a user's song list against every region at a
//!   [`Granularity`].
//! - [`RecommendationEngine`] turns the most similar regions into song
//!   suggestions.
//!
//! # Examples
//!
//! ```
//! use songscape_core::{QueryService, Song, Tree};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = Tree::new();
//! let tokyo = ["Asia", "Japan", "Tokyo"];
//! tree.insert_region_path(&tokyo)?;
//! tree.attach_song(&tokyo, Song::new("Idol", "YOASOBI", 100, 1)?)?;
//! tree.attach_song(&tokyo, Song::new("Bling-Bang", "Creepy Nuts", 80, 2)?)?;
//!
//! let top = QueryService::new(&tree).top_n(1, "Japan")?;
//! assert_eq!(top[0].title, "idol");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod error;
mod granularity;
mod query;
mod recommend;
mod similarity;
mod song;
mod tree;
mod walk;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aggregate::collect_songs;
pub use error::{ErrorKind, QueryError, TreeError};
pub use granularity::Granularity;
pub use query::QueryService;
pub use recommend::{Recommendation, RecommendationEngine, RecommendationLimits};
pub use similarity::{
    ListScorer, REGION_LIST_LEN, RankedOverlap, RegionScore, SimilarityScorer, UnrankedOverlap,
};
pub use song::{MAX_RANK, MIN_RANK, Song, SongKey, normalise_text};
pub use tree::{NodeBody, ROOT_LABEL, RegionNode, SYNTHETIC_CITY_LABEL, Tree};
pub use walk::{RegionEntry, RegionWalk};
