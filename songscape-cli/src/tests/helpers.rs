//! Test helpers for writing chart datasets and invoking subcommands.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

pub(super) const SAMPLE_CHARTS: &str = "\
Tokyo,Japan,Asia,\"Idol, YOASOBI, 100\",\"Bling-Bang, Creepy Nuts, 80\",\"Flowers, Miley Cyrus, 60\"
Osaka,Japan,Asia,\"Flowers, Miley Cyrus, 70\",\"Idol, YOASOBI, 50\"
Seoul,South Korea,Asia,\"Flowers, Miley Cyrus, 90\",\"Hype Boy, NewJeans, 85\"
Paris,France,Europe,\"Flowers, Miley Cyrus, 40\",\"Tattoo, Loreen, 30\"
,Iceland,Europe,\"Tattoo, Loreen, 20\",\"Hype Boy, NewJeans, 10\"
";

#[derive(Debug)]
pub(super) struct ChartFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
    dataset: Utf8PathBuf,
}

impl ChartFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let dataset = root.join("charts.csv");
        std::fs::write(&dataset, SAMPLE_CHARTS).expect("write dataset");
        Self {
            _dir: dir,
            root,
            dataset,
        }
    }

    pub(super) fn dataset(&self) -> &Utf8Path {
        &self.dataset
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn missing(&self) -> Utf8PathBuf {
        self.root.join("absent.csv")
    }
}

/// Parse `argv` as a `songscape` command line, run it, and decode the JSON
/// it prints.
pub(super) fn invoke<S: AsRef<str>>(argv: &[S]) -> Result<Value, CliError> {
    let invocation = std::iter::once("songscape").chain(argv.iter().map(AsRef::as_ref));
    let cli = Cli::try_parse_from(invocation).map_err(CliError::ArgumentParsing)?;
    let mut stdout = Vec::new();
    run_command_with(cli.command, &mut stdout)?;
    assert!(stdout.ends_with(b"\n"), "output should end with a newline");
    Ok(serde_json::from_slice(&stdout).expect("command prints JSON"))
}

/// Run a subcommand against `dataset`, appending `--dataset <path>`.
pub(super) fn invoke_on(dataset: &Utf8Path, argv: &[&str]) -> Result<Value, CliError> {
    let mut full: Vec<String> = argv.iter().map(|arg| (*arg).to_owned()).collect();
    full.extend([format!("--{ARG_DATASET}"), dataset.as_str().to_owned()]);
    invoke(&full)
}

pub(super) fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("JSON array")
        .iter()
        .map(|item| item.as_str().expect("JSON string").to_owned())
        .collect()
}

pub(super) fn field(value: &Value, name: &str) -> Vec<String> {
    value
        .as_array()
        .expect("JSON array")
        .iter()
        .map(|item| {
            item.get(name)
                .and_then(Value::as_str)
                .expect("string field")
                .to_owned()
        })
        .collect()
}
