//! Command-line interface for querying Songscape chart datasets.
//!
//! Every subcommand takes the dataset path from `--dataset`, a
//! `SONGSCAPE_CMDS_<SUBCOMMAND>_DATASET` variable or a configuration file,
//! loads the CSV once, and prints its answer to stdout as pretty JSON.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use songscape_core::Granularity;

mod dataset;
mod error;
mod list;
mod output;
mod personality;
mod query;

pub use error::CliError;

use list::{ListArgs, run_list_with};
use personality::{PersonalityArgs, RecommendArgs, run_personality_with, run_recommend_with};
use query::{
    ClosestCountryArgs, CommonArgs, TopArgs, run_closest_country_with, run_common_artists_with,
    run_common_songs_with, run_top_with,
};

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_REGION: &str = "region";
pub(crate) const ARG_COUNT: &str = "count";
pub(crate) const ARG_FIRST: &str = "first";
pub(crate) const ARG_SECOND: &str = "second";
pub(crate) const ARG_COUNTRY: &str = "country";
pub(crate) const ARG_BY: &str = "by";
pub(crate) const ARG_SONG: &str = "song";
pub(crate) const ARG_REGIONS: &str = "regions";
pub(crate) const ARG_GRANULARITY: &str = "granularity";
pub(crate) const ARG_RANKED: &str = "ranked";
pub(crate) const ARG_MAX_RECOMMENDATIONS: &str = "max-recommendations";
pub(crate) const ARG_MAX_REGIONS: &str = "max-regions";
pub(crate) const ARG_KIND: &str = "kind";

pub(crate) const ENV_TOP_DATASET: &str = "SONGSCAPE_CMDS_TOP_DATASET";
pub(crate) const ENV_TOP_REGION: &str = "SONGSCAPE_CMDS_TOP_REGION";
pub(crate) const ENV_COMMON_DATASET: &str = "SONGSCAPE_CMDS_COMMON_DATASET";
pub(crate) const ENV_COMMON_FIRST: &str = "SONGSCAPE_CMDS_COMMON_FIRST";
pub(crate) const ENV_COMMON_SECOND: &str = "SONGSCAPE_CMDS_COMMON_SECOND";
pub(crate) const ENV_CLOSEST_DATASET: &str = "SONGSCAPE_CMDS_CLOSEST_COUNTRY_DATASET";
pub(crate) const ENV_CLOSEST_COUNTRY: &str = "SONGSCAPE_CMDS_CLOSEST_COUNTRY_COUNTRY";
pub(crate) const ENV_PERSONALITY_DATASET: &str = "SONGSCAPE_CMDS_PERSONALITY_DATASET";
pub(crate) const ENV_RECOMMEND_DATASET: &str = "SONGSCAPE_CMDS_RECOMMEND_DATASET";
pub(crate) const ENV_LIST_DATASET: &str = "SONGSCAPE_CMDS_LIST_DATASET";
pub(crate) const ENV_LIST_KIND: &str = "SONGSCAPE_CMDS_LIST_KIND";

pub(crate) const DEFAULT_TOP_COUNT: usize = 5;
pub(crate) const DEFAULT_PERSONALITY_REGIONS: usize = 5;
pub(crate) const DEFAULT_MAX_RECOMMENDATIONS: usize = 10;
pub(crate) const DEFAULT_MAX_REGIONS: usize = 3;
pub(crate) const DEFAULT_GRANULARITY: Granularity = Granularity::Country;

/// Run the Songscape CLI with the current process arguments and environment.
///
/// # Errors
/// Returns the first [`CliError`] raised while parsing, loading or querying.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command_with(cli.command, &mut stdout)
}

pub(crate) fn run_command_with(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Top(args) => run_top_with(args, writer),
        Command::CommonArtists(args) => run_common_artists_with(args, writer),
        Command::CommonSongs(args) => run_common_songs_with(args, writer),
        Command::ClosestCountry(args) => run_closest_country_with(args, writer),
        Command::Personality(args) => run_personality_with(args, writer),
        Command::Recommend(args) => run_recommend_with(args, writer),
        Command::List(args) => run_list_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "songscape",
    about = "Query regional top-songs charts",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Most streamed songs inside a region.
    Top(TopArgs),
    /// Artists charting in both countries.
    CommonArtists(CommonArgs),
    /// Songs charting in both countries.
    CommonSongs(CommonArgs),
    /// Country with the largest chart overlap.
    ClosestCountry(ClosestCountryArgs),
    /// Regions whose charts best match a song list.
    Personality(PersonalityArgs),
    /// Songs from the best-matching regions.
    Recommend(RecommendArgs),
    /// Labels or titles present in the dataset.
    List(ListArgs),
}

#[cfg(test)]
mod tests;
