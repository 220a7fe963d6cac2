//! Label and title sets derived from a loaded tree.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::Serialize;

use songscape_core::{SYNTHETIC_CITY_LABEL, Tree};

/// Every continent, country, real city and song title in a tree.
///
/// Built once after loading and handed to presentation code, which uses it to
/// validate input before calling the query services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CatalogueIndex {
    continents: BTreeSet<String>,
    countries: BTreeSet<String>,
    cities: BTreeSet<String>,
    songs: BTreeSet<String>,
}

impl CatalogueIndex {
    /// Walk every city of `tree` once. Synthetic `"0"` cities are left out
    /// of the city set but their songs are indexed.
    #[must_use]
    pub fn build(tree: &Tree) -> Self {
        let mut index = Self::default();
        for entry in tree.cities() {
            if let [continent, country, city] = entry.path.as_slice() {
                index.continents.insert((*continent).to_owned());
                index.countries.insert((*country).to_owned());
                if *city != SYNTHETIC_CITY_LABEL {
                    index.cities.insert((*city).to_owned());
                }
            }
            index
                .songs
                .extend(entry.node.songs().iter().map(|song| song.title().to_owned()));
        }
        index
    }

    /// Continent labels.
    #[must_use]
    pub const fn continents(&self) -> &BTreeSet<String> {
        &self.continents
    }

    /// Country labels.
    #[must_use]
    pub const fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }

    /// City labels, excluding `"0"`.
    #[must_use]
    pub const fn cities(&self) -> &BTreeSet<String> {
        &self.cities
    }

    /// Normalised song titles.
    #[must_use]
    pub const fn songs(&self) -> &BTreeSet<String> {
        &self.songs
    }

    /// Whether any continent, country or city carries `label`.
    #[must_use]
    pub fn has_region(&self, label: &str) -> bool {
        self.continents.contains(label) || self.countries.contains(label) || self.cities.contains(label)
    }
}
