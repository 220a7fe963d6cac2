//! Tree levels a region-scoped query can operate at.
//!
//! # Examples
//! ```
//! use songscape_core::Granularity;
//!
//! let level: Granularity = "Country".parse().expect("known level");
//! assert_eq!(level, Granularity::Country);
//! assert_eq!(level.depth(), 2);
//! assert_eq!(Granularity::City.to_string(), "city");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Depth of a region below the `World` root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Granularity {
    /// Depth 1.
    Continent,
    /// Depth 2.
    Country,
    /// Depth 3.
    City,
}

impl Granularity {
    /// Every level, shallowest first.
    pub const ALL: [Self; 3] = [Self::Continent, Self::Country, Self::City];

    /// Distance from the `World` root.
    #[must_use]
    pub const fn depth(self) -> usize {
        match self {
            Self::Continent => 1,
            Self::Country => 2,
            Self::City => 3,
        }
    }

    /// Lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continent => "continent",
            Self::Country => "country",
            Self::City => "city",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Granularity {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continent" => Ok(Self::Continent),
            "country" => Ok(Self::Country),
            "city" => Ok(Self::City),
            _ => Err(QueryError::UnknownGranularity {
                value: s.to_owned(),
            }),
        }
    }
}
