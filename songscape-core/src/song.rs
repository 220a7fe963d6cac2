//! Song leaves and their identity keys.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TreeError;

/// Best rank a song can hold within its city.
pub const MIN_RANK: u8 = 1;

/// Worst rank a city tracks. Cities hold at most this many songs.
pub const MAX_RANK: u8 = 5;

/// Trim surrounding whitespace and lowercase text used as a song field.
///
/// Titles and artists are compared exactly, so every entry point that accepts
/// user or record text funnels through this function.
///
/// # Examples
/// ```
/// use songscape_core::normalise_text;
///
/// assert_eq!(normalise_text("  Flowers "), "flowers");
/// ```
#[must_use]
pub fn normalise_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A single charting song within a city.
///
/// Title and artist are stored normalised (see [`normalise_text`]); the rank
/// is the song's 1-based position in its originating city's chart.
///
/// # Examples
/// ```
/// use songscape_core::Song;
///
/// # fn main() -> Result<(), songscape_core::TreeError> {
/// let song = Song::new(" Flowers", "Miley Cyrus ", 1_200, 1)?;
/// assert_eq!(song.title(), "flowers");
/// assert_eq!(song.artist(), "miley cyrus");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Song {
    title: String,
    artist: String,
    streams: u64,
    rank: u8,
}

impl Song {
    /// Validate the rank and construct a song with normalised text fields.
    ///
    /// # Errors
    /// Returns [`TreeError::RankOutOfRange`] when `rank` is outside
    /// `MIN_RANK..=MAX_RANK`.
    pub fn new(title: &str, artist: &str, streams: u64, rank: u8) -> Result<Self, TreeError> {
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            return Err(TreeError::RankOutOfRange { rank });
        }
        Ok(Self {
            title: normalise_text(title),
            artist: normalise_text(artist),
            streams,
            rank,
        })
    }

    /// Normalised song title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Normalised main artist.
    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Stream count reported for the originating city.
    #[must_use]
    pub const fn streams(&self) -> u64 {
        self.streams
    }

    /// Position within the originating city's chart.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Owned identity key used for overlap and deduplication.
    #[must_use]
    pub fn key(&self) -> SongKey {
        SongKey {
            title: self.title.clone(),
            artist: self.artist.clone(),
        }
    }

    pub(crate) fn key_ref(&self) -> (&str, &str) {
        (&self.title, &self.artist)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

/// Identity of a song across cities: its `(title, artist)` pair.
///
/// Ordering is by title, then artist, which is the order used for sorted
/// query results.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SongKey {
    /// Normalised title.
    pub title: String,
    /// Normalised main artist.
    pub artist: String,
}

impl SongKey {
    pub(crate) fn from_ref((title, artist): (&str, &str)) -> Self {
        Self {
            title: title.to_owned(),
            artist: artist.to_owned(),
        }
    }
}

impl fmt::Display for SongKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}
