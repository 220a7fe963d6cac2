//! Chart queries: `top`, `common-artists`, `common-songs` and
//! `closest-country`.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use songscape_core::QueryService;

use crate::dataset::{open_catalogue, require_dataset};
use crate::output::write_json;
use crate::{
    ARG_BY, ARG_COUNT, ARG_COUNTRY, ARG_DATASET, ARG_FIRST, ARG_REGION, ARG_SECOND, CliError,
    DEFAULT_TOP_COUNT, ENV_CLOSEST_COUNTRY, ENV_CLOSEST_DATASET, ENV_COMMON_DATASET,
    ENV_COMMON_FIRST, ENV_COMMON_SECOND, ENV_TOP_DATASET, ENV_TOP_REGION,
};

/// CLI arguments for the `top` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List the most streamed songs charting anywhere inside a \
                 continent, country or city. Streams are summed when a song \
                 charts in several cities.",
    about = "Show the most streamed songs of a region"
)]
#[ortho_config(prefix = "SONGSCAPE")]
pub(crate) struct TopArgs {
    /// Path to the chart CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Continent, country or city label.
    #[arg(long = ARG_REGION, value_name = "label")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// How many songs to list (defaults to 5).
    #[arg(long = ARG_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
}

impl TopArgs {
    pub(crate) fn into_config(self) -> Result<TopConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TopConfig::try_from(merged)
    }
}

/// Resolved `top` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TopConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) region: String,
    pub(crate) count: usize,
}

impl TryFrom<TopArgs> for TopConfig {
    type Error = CliError;

    fn try_from(args: TopArgs) -> Result<Self, Self::Error> {
        let dataset = require_dataset(args.dataset, ENV_TOP_DATASET)?;
        let region = args.region.ok_or(CliError::MissingArgument {
            field: ARG_REGION,
            env: ENV_TOP_REGION,
        })?;
        Ok(Self {
            dataset,
            region,
            count: args.count.unwrap_or(DEFAULT_TOP_COUNT),
        })
    }
}

pub(crate) fn run_top_with(args: TopArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = open_catalogue(&config.dataset)?;
    let songs = QueryService::new(&catalogue.tree).top_n(config.count, &config.region)?;
    write_json(writer, &songs)
}

/// CLI arguments shared by `common-artists` and `common-songs`.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compare the charts of two countries. Every city chart in \
                 a country contributes to its set.",
    about = "Compare two countries"
)]
#[ortho_config(prefix = "SONGSCAPE")]
pub(crate) struct CommonArgs {
    /// Path to the chart CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// First country.
    #[arg(long = ARG_FIRST, value_name = "country")]
    #[serde(default)]
    pub(crate) first: Option<String>,
    /// Second country.
    #[arg(long = ARG_SECOND, value_name = "country")]
    #[serde(default)]
    pub(crate) second: Option<String>,
}

impl CommonArgs {
    pub(crate) fn into_config(self) -> Result<CommonConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CommonConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommonConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) first: String,
    pub(crate) second: String,
}

impl TryFrom<CommonArgs> for CommonConfig {
    type Error = CliError;

    fn try_from(args: CommonArgs) -> Result<Self, Self::Error> {
        let dataset = require_dataset(args.dataset, ENV_COMMON_DATASET)?;
        let first = args.first.ok_or(CliError::MissingArgument {
            field: ARG_FIRST,
            env: ENV_COMMON_FIRST,
        })?;
        let second = args.second.ok_or(CliError::MissingArgument {
            field: ARG_SECOND,
            env: ENV_COMMON_SECOND,
        })?;
        Ok(Self {
            dataset,
            first,
            second,
        })
    }
}

pub(crate) fn run_common_artists_with(
    args: CommonArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = open_catalogue(&config.dataset)?;
    let artists = QueryService::new(&catalogue.tree).common_artist(&config.first, &config.second)?;
    write_json(writer, &artists)
}

pub(crate) fn run_common_songs_with(
    args: CommonArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = open_catalogue(&config.dataset)?;
    let songs = QueryService::new(&catalogue.tree).common_song(&config.first, &config.second)?;
    write_json(writer, &songs)
}

/// What `closest-country` compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ClosestBy {
    /// Shared main artists.
    #[default]
    Artist,
    /// Shared songs.
    Song,
}

/// CLI arguments for the `closest-country` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find the country whose charts overlap most with the given \
                 country, counting either shared artists or shared songs. \
                 Ties go to the country listed first in the dataset.",
    about = "Find the country most like another"
)]
#[ortho_config(prefix = "SONGSCAPE")]
pub(crate) struct ClosestCountryArgs {
    /// Path to the chart CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Country to compare from.
    #[arg(long = ARG_COUNTRY, value_name = "label")]
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Compare shared artists or shared songs (defaults to artist).
    #[arg(long = ARG_BY, value_enum, value_name = "measure")]
    #[serde(default)]
    pub(crate) by: Option<ClosestBy>,
}

impl ClosestCountryArgs {
    pub(crate) fn into_config(self) -> Result<ClosestCountryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClosestCountryConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClosestCountryConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) country: String,
    pub(crate) by: ClosestBy,
}

impl TryFrom<ClosestCountryArgs> for ClosestCountryConfig {
    type Error = CliError;

    fn try_from(args: ClosestCountryArgs) -> Result<Self, Self::Error> {
        let dataset = require_dataset(args.dataset, ENV_CLOSEST_DATASET)?;
        let country = args.country.ok_or(CliError::MissingArgument {
            field: ARG_COUNTRY,
            env: ENV_CLOSEST_COUNTRY,
        })?;
        Ok(Self {
            dataset,
            country,
            by: args.by.unwrap_or_default(),
        })
    }
}

/// Answer printed by `closest-country`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ClosestCountry {
    pub(crate) country: String,
    pub(crate) by: ClosestBy,
    pub(crate) closest: String,
}

pub(crate) fn run_closest_country_with(
    args: ClosestCountryArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = open_catalogue(&config.dataset)?;
    let service = QueryService::new(&catalogue.tree);
    let closest = match config.by {
        ClosestBy::Artist => service.most_common_artist_country(&config.country)?,
        ClosestBy::Song => service.most_common_song_country(&config.country)?,
    };
    write_json(
        writer,
        &ClosestCountry {
            country: config.country,
            by: config.by,
            closest,
        },
    )
}
