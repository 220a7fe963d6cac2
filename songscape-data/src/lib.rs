//! Dataset loading for Songscape.
//!
//! Responsibilities:
//! - Parse headerless chart CSV rows into labels and ranked songs.
//! - Build a [`songscape_core::Tree`] in one pass, in file order.
//! - Derive the [`CatalogueIndex`] label and title sets after loading.
//!
//! Boundaries:
//! - Query semantics live in `songscape-core`; this crate only builds trees.
//! - Filesystem access goes through `cap-std` ambient authority.
//!
//! Invariants:
//! - Errors carry the 1-based row number of the offending record.
//! - No global state: every load returns its own tree and index.

#![forbid(unsafe_code)]

mod error;
mod index;
mod load;
mod record;
mod source;

pub use error::{LoadError, RecordError};
pub use index::CatalogueIndex;
pub use load::{Catalogue, LoadSummary, load_catalogue, load_tree};
pub use record::{CityRecord, parse_song_entry};
pub use source::{dataset_is_file, open_dataset};
