//! Listener-facing commands: `personality` and `recommend`.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use songscape_core::{
    Granularity, RecommendationEngine, RecommendationLimits, SimilarityScorer,
};

use crate::dataset::{check_known_songs, open_catalogue, require_dataset};
use crate::output::write_json;
use crate::{
    ARG_DATASET, ARG_GRANULARITY, ARG_MAX_RECOMMENDATIONS, ARG_MAX_REGIONS, ARG_RANKED,
    ARG_REGIONS, ARG_SONG, CliError, DEFAULT_GRANULARITY, DEFAULT_MAX_RECOMMENDATIONS,
    DEFAULT_MAX_REGIONS, DEFAULT_PERSONALITY_REGIONS, ENV_PERSONALITY_DATASET,
    ENV_RECOMMEND_DATASET,
};

fn parse_granularity(value: Option<&str>) -> Result<Granularity, CliError> {
    value.map_or(Ok(DEFAULT_GRANULARITY), |level| {
        level.parse().map_err(CliError::Query)
    })
}

/// CLI arguments for the `personality` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score up to five favourite songs against the chart of \
                 every region at one level and print the closest matches. \
                 Ranked scoring also rewards songs holding similar chart \
                 positions.",
    about = "Find the regions whose charts match your taste"
)]
#[ortho_config(prefix = "SONGSCAPE")]
pub(crate) struct PersonalityArgs {
    /// Path to the chart CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// A favourite song title, best first. Repeat up to five times.
    #[arg(long = ARG_SONG, value_name = "title")]
    #[serde(default)]
    pub(crate) songs: Vec<String>,
    /// How many regions to print (defaults to 5).
    #[arg(long = ARG_REGIONS, value_name = "n")]
    #[serde(default)]
    pub(crate) regions: Option<usize>,
    /// continent, country or city (defaults to country).
    #[arg(long = ARG_GRANULARITY, value_name = "level")]
    #[serde(default)]
    pub(crate) granularity: Option<String>,
    /// Weigh matches by chart position.
    #[arg(
        long = ARG_RANKED,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) ranked: Option<bool>,
}

impl PersonalityArgs {
    pub(crate) fn into_config(self) -> Result<PersonalityConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PersonalityConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PersonalityConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) songs: Vec<String>,
    pub(crate) regions: usize,
    pub(crate) granularity: Granularity,
    pub(crate) ranked: bool,
}

impl TryFrom<PersonalityArgs> for PersonalityConfig {
    type Error = CliError;

    fn try_from(args: PersonalityArgs) -> Result<Self, Self::Error> {
        let dataset = require_dataset(args.dataset, ENV_PERSONALITY_DATASET)?;
        let granularity = parse_granularity(args.granularity.as_deref())?;
        Ok(Self {
            dataset,
            songs: args.songs,
            regions: args.regions.unwrap_or(DEFAULT_PERSONALITY_REGIONS),
            granularity,
            ranked: args.ranked.unwrap_or(false),
        })
    }
}

pub(crate) fn run_personality_with(
    args: PersonalityArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = open_catalogue(&config.dataset)?;
    check_known_songs(&catalogue, &config.songs)?;
    let scores = SimilarityScorer::new(&catalogue.tree).region_personality(
        config.regions,
        &config.songs,
        config.granularity,
        config.ranked,
    )?;
    write_json(writer, &scores)
}

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Suggest songs from the regions whose charts best match up \
                 to five favourite songs. Songs you named are never \
                 suggested.",
    about = "Recommend songs from regions that share your taste"
)]
#[ortho_config(prefix = "SONGSCAPE")]
pub(crate) struct RecommendArgs {
    /// Path to the chart CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// A favourite song title, best first. Repeat up to five times.
    #[arg(long = ARG_SONG, value_name = "title")]
    #[serde(default)]
    pub(crate) songs: Vec<String>,
    /// Most songs to suggest (defaults to 10).
    #[arg(long = ARG_MAX_RECOMMENDATIONS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_recommendations: Option<usize>,
    /// Most similar regions to draw from (defaults to 3).
    #[arg(long = ARG_MAX_REGIONS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_regions: Option<usize>,
    /// continent, country or city (defaults to country).
    #[arg(long = ARG_GRANULARITY, value_name = "level")]
    #[serde(default)]
    pub(crate) granularity: Option<String>,
    /// Weigh matches by chart position.
    #[arg(
        long = ARG_RANKED,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) ranked: Option<bool>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) songs: Vec<String>,
    pub(crate) limits: RecommendationLimits,
    pub(crate) granularity: Granularity,
    pub(crate) ranked: bool,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let dataset = require_dataset(args.dataset, ENV_RECOMMEND_DATASET)?;
        let granularity = parse_granularity(args.granularity.as_deref())?;
        let limits = RecommendationLimits::new(
            args.max_recommendations
                .unwrap_or(DEFAULT_MAX_RECOMMENDATIONS),
            args.max_regions.unwrap_or(DEFAULT_MAX_REGIONS),
        )
        .validate()?;
        Ok(Self {
            dataset,
            songs: args.songs,
            limits,
            granularity,
            ranked: args.ranked.unwrap_or(false),
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = open_catalogue(&config.dataset)?;
    check_known_songs(&catalogue, &config.songs)?;
    let suggestions = RecommendationEngine::new(&catalogue.tree).recommend_songs(
        config.limits,
        &config.songs,
        config.granularity,
        config.ranked,
    )?;
    write_json(writer, &suggestions)
}
