//! Parse one dataset row into labels and ranked songs.
//!
//! A row reads `city, country, continent, song_1, ..., song_5` with no header.
//! Each song cell holds `"<title>, <artist>, <streams>"`; the cell is split
//! from the right, so a title may itself contain `", "`. Ranks follow column
//! order, and an empty trailing cell leaves its rank unused.

use csv::StringRecord;
use songscape_core::{MAX_RANK, SYNTHETIC_CITY_LABEL, Song};

use crate::RecordError;

/// Columns before the first song cell.
const LABEL_COLUMNS: usize = 3;
const MIN_COLUMNS: usize = LABEL_COLUMNS + 1;
const MAX_COLUMNS: usize = LABEL_COLUMNS + MAX_RANK as usize;

/// One parsed dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRecord {
    /// City label, or `"0"` when the row describes a whole country.
    pub city: String,
    /// Country label.
    pub country: String,
    /// Continent label.
    pub continent: String,
    /// Songs in rank order.
    pub songs: Vec<Song>,
}

impl CityRecord {
    /// Parse a CSV record read at 1-based position `row`.
    ///
    /// Labels keep their casing and lose surrounding whitespace. An empty
    /// city cell is treated as the synthetic `"0"` city.
    ///
    /// # Errors
    /// Returns a [`RecordError`] describing the first malformed cell, or
    /// [`RecordError::NoSongs`] when every song cell is blank.
    pub fn from_csv(row: u64, record: &StringRecord) -> Result<Self, RecordError> {
        let found = record.len();
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&found) {
            return Err(RecordError::ColumnCount { row, found });
        }
        let label = |index: usize| record.get(index).map(str::trim).unwrap_or_default();

        let city = match label(0) {
            "" => SYNTHETIC_CITY_LABEL,
            other => other,
        };
        let country = required(row, label(1), "country")?;
        let continent = required(row, label(2), "continent")?;

        let mut songs = Vec::with_capacity(found - LABEL_COLUMNS);
        for (rank, (index, cell)) in (1_u8..).zip(record.iter().enumerate().skip(LABEL_COLUMNS)) {
            if cell.trim().is_empty() {
                continue;
            }
            songs.push(parse_song_entry(row, index + 1, cell, rank)?);
        }
        if songs.is_empty() {
            return Err(RecordError::NoSongs { row });
        }

        Ok(Self {
            city: city.to_owned(),
            country: country.to_owned(),
            continent: continent.to_owned(),
            songs,
        })
    }

    /// Whether the row stands for a country without a city breakdown.
    #[must_use]
    pub fn is_country_wide(&self) -> bool {
        self.city == SYNTHETIC_CITY_LABEL
    }

    /// Tree path the row's songs attach to.
    ///
    /// Country-wide rows stop at the country, so the tree supplies the
    /// synthetic city itself.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        let mut path = vec![self.continent.as_str(), self.country.as_str()];
        if !self.is_country_wide() {
            path.push(self.city.as_str());
        }
        path
    }
}

fn required<'a>(row: u64, value: &'a str, column: &'static str) -> Result<&'a str, RecordError> {
    if value.is_empty() {
        return Err(RecordError::MissingLabel { row, column });
    }
    Ok(value)
}

/// Parse one `"<title>, <artist>, <streams>"` cell.
///
/// Title and artist are normalised by [`Song::new`]; streams must be a
/// non-negative integer.
///
/// # Errors
/// Returns [`RecordError::SongEntry`] when the cell lacks two commas or a
/// part is blank, and [`RecordError::Streams`] for a bad stream count.
///
/// # Examples
/// ```
/// use songscape_data::parse_song_entry;
///
/// let song = parse_song_entry(1, 4, "Hello, World, Band, 1200", 1).expect("valid entry");
/// assert_eq!(song.title(), "hello, world");
/// assert_eq!(song.artist(), "band");
/// assert_eq!(song.streams(), 1200);
/// ```
pub fn parse_song_entry(
    row: u64,
    column: usize,
    cell: &str,
    rank: u8,
) -> Result<Song, RecordError> {
    let malformed = || RecordError::SongEntry {
        row,
        column,
        entry: cell.to_owned(),
    };
    let mut parts = cell.rsplitn(3, ',').map(str::trim);
    let (Some(streams), Some(artist), Some(title)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };
    if title.is_empty() || artist.is_empty() {
        return Err(malformed());
    }
    let plays = streams.parse::<u64>().map_err(|source| RecordError::Streams {
        row,
        column,
        value: streams.to_owned(),
        source,
    })?;
    Song::new(title, artist, plays, rank).map_err(|source| RecordError::Tree { row, source })
}
