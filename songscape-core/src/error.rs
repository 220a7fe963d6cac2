//! Error types raised while building and querying the region tree.

use thiserror::Error;

/// Coarse classification shared by every Songscape error.
///
/// Presentation layers use it to decide whether to re-prompt for a different
/// key or for a different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A region, country or song title does not exist, or an operation that
    /// needs another entity found none.
    NotFound,
    /// A count, granularity, path or record was unusable.
    InvalidArgument,
}

/// Errors raised while inserting into or navigating the region tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A region path had no segments.
    #[error("region path must contain at least one label")]
    EmptyPath,
    /// A region path reached below the city level.
    #[error("region path {path:?} is deeper than the city level")]
    PathTooDeep {
        /// Offending path.
        path: Vec<String>,
    },
    /// Songs can only attach under a country or city path.
    #[error("songs attach to a country or city path, got {depth} segment(s)")]
    NotACityPath {
        /// Number of segments supplied.
        depth: usize,
    },
    /// Navigation reached a label that does not exist.
    #[error("region {label:?} not found under {parent:?}")]
    SegmentNotFound {
        /// Label of the last region reached.
        parent: String,
        /// Missing child label.
        label: String,
    },
    /// A region path tried to descend into a city that already holds songs.
    #[error("region {label:?} holds songs and cannot hold child regions")]
    HoldsSongs {
        /// Label of the song-holding node.
        label: String,
    },
    /// A song was attached to a node that already holds child regions.
    #[error("region {label:?} holds child regions and cannot hold songs")]
    HoldsRegions {
        /// Label of the region-holding node.
        label: String,
    },
    /// A city already holds a full chart.
    #[error("city {label:?} already holds five songs")]
    CityFull {
        /// City label.
        label: String,
    },
    /// Songs must arrive in strictly ascending rank.
    #[error("rank {rank} cannot follow rank {previous} in city {label:?}")]
    RankOutOfOrder {
        /// City label.
        label: String,
        /// Rank of the rejected song.
        rank: u8,
        /// Rank of the city's current last song.
        previous: u8,
    },
    /// A rank fell outside `1..=5`.
    #[error("rank {rank} is outside 1..=5")]
    RankOutOfRange {
        /// Rejected rank.
        rank: u8,
    },
}

impl TreeError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SegmentNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyPath
            | Self::PathTooDeep { .. }
            | Self::NotACityPath { .. }
            | Self::HoldsSongs { .. }
            | Self::HoldsRegions { .. }
            | Self::CityFull { .. }
            | Self::RankOutOfOrder { .. }
            | Self::RankOutOfRange { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Errors raised by the query, similarity and recommendation services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// No region anywhere in the tree carries the label.
    #[error("region {label:?} not found")]
    RegionNotFound {
        /// Requested label.
        label: String,
    },
    /// No country carries the label.
    #[error("country {label:?} not found")]
    CountryNotFound {
        /// Requested label.
        label: String,
    },
    /// A user-supplied title does not appear anywhere in the tree.
    #[error("song {title:?} not found")]
    SongNotFound {
        /// Normalised title.
        title: String,
    },
    /// The tree holds no country other than the queried one.
    #[error("no country other than {country:?} to compare against")]
    NoOtherCountry {
        /// Queried country.
        country: String,
    },
    /// A count argument was zero.
    #[error("{argument} must be at least 1")]
    ZeroCount {
        /// Name of the offending argument.
        argument: &'static str,
    },
    /// The user song list was empty or longer than a chart.
    #[error("expected between 1 and 5 user songs, got {count}")]
    UserSongCount {
        /// Number of songs supplied.
        count: usize,
    },
    /// A granularity string named no tree level.
    #[error("unknown granularity {value:?} (expected continent, country or city)")]
    UnknownGranularity {
        /// Rejected input.
        value: String,
    },
}

impl QueryError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RegionNotFound { .. }
            | Self::CountryNotFound { .. }
            | Self::SongNotFound { .. }
            | Self::NoOtherCountry { .. } => ErrorKind::NotFound,
            Self::ZeroCount { .. } | Self::UserSongCount { .. } | Self::UnknownGranularity { .. } => {
                ErrorKind::InvalidArgument
            }
        }
    }
}
