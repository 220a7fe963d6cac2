//! The `list` subcommand: dump one of the catalogue's label sets.

use std::collections::BTreeSet;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use songscape_data::CatalogueIndex;

use crate::dataset::{open_catalogue, require_dataset};
use crate::output::write_json;
use crate::{ARG_DATASET, ARG_KIND, CliError, ENV_LIST_DATASET, ENV_LIST_KIND};

/// Which label set to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ListKind {
    Continents,
    Countries,
    /// Real cities; country-wide charts are left out.
    Cities,
    /// Normalised song titles.
    Songs,
}

impl ListKind {
    pub(crate) const fn select(self, index: &CatalogueIndex) -> &BTreeSet<String> {
        match self {
            Self::Continents => index.continents(),
            Self::Countries => index.countries(),
            Self::Cities => index.cities(),
            Self::Songs => index.songs(),
        }
    }
}

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print the sorted continents, countries, cities or song \
                 titles found in the dataset, for use as query input.",
    about = "List the labels or titles in a dataset"
)]
#[ortho_config(prefix = "SONGSCAPE")]
pub(crate) struct ListArgs {
    /// continents, countries, cities or songs.
    #[arg(value_enum, value_name = ARG_KIND)]
    #[serde(default)]
    pub(crate) kind: Option<ListKind>,
    /// Path to the chart CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl ListArgs {
    pub(crate) fn into_config(self) -> Result<ListConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ListConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) kind: ListKind,
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        let dataset = require_dataset(args.dataset, ENV_LIST_DATASET)?;
        let kind = args.kind.ok_or(CliError::MissingArgument {
            field: ARG_KIND,
            env: ENV_LIST_KIND,
        })?;
        Ok(Self { dataset, kind })
    }
}

pub(crate) fn run_list_with(args: ListArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = open_catalogue(&config.dataset)?;
    write_json(writer, config.kind.select(&catalogue.index))
}
