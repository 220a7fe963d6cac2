//! Facade crate for Songscape, a query engine over regional top-songs charts.
//!
//! Re-exports the core tree, query and recommendation types. The CSV loader
//! sits behind the `loader` feature.

#![forbid(unsafe_code)]

pub use songscape_core::{
    ErrorKind, Granularity, ListScorer, QueryError, QueryService, RankedOverlap, Recommendation,
    RecommendationEngine, RecommendationLimits, RegionNode, RegionScore, SimilarityScorer, Song,
    SongKey, Tree, TreeError, UnrankedOverlap,
};

#[cfg(feature = "loader")]
pub use songscape_data::{Catalogue, CatalogueIndex, LoadError, load_catalogue, load_tree};
