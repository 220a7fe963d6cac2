//! Behaviour scenarios for loading chart datasets from disk.
#![expect(
    clippy::expect_used,
    reason = "behaviour steps fail fast on broken fixtures"
)]

use camino::{Utf8Path, Utf8PathBuf};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

use songscape_core::ErrorKind;
use songscape_data::{Catalogue, LoadError, load_catalogue};

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/charts.csv");

#[derive(Debug)]
struct LoadWorld {
    scratch: TempDir,
    path: RefCell<Utf8PathBuf>,
    outcome: RefCell<Option<Result<Catalogue, LoadError>>>,
}

impl LoadWorld {
    fn new() -> Self {
        Self {
            scratch: TempDir::new().expect("create temp dir"),
            path: RefCell::new(Utf8PathBuf::from(SAMPLE)),
            outcome: RefCell::new(None),
        }
    }

    fn scratch_path(&self, name: &str) -> Utf8PathBuf {
        Utf8Path::from_path(self.scratch.path())
            .expect("utf-8 temp dir")
            .join(name)
    }

    fn catalogue(&self) -> std::cell::Ref<'_, Catalogue> {
        std::cell::Ref::map(self.outcome.borrow(), |outcome| {
            outcome
                .as_ref()
                .expect("dataset loaded")
                .as_ref()
                .expect("load should succeed")
        })
    }

    fn error(&self) -> std::cell::Ref<'_, LoadError> {
        std::cell::Ref::map(self.outcome.borrow(), |outcome| {
            outcome
                .as_ref()
                .expect("dataset loaded")
                .as_ref()
                .expect_err("load should fail")
        })
    }
}

#[fixture]
fn world() -> LoadWorld {
    LoadWorld::new()
}

#[given("the sample chart dataset")]
fn sample_dataset(#[from(world)] world: &LoadWorld) {
    world.path.replace(Utf8PathBuf::from(SAMPLE));
}

#[given("a dataset path that does not exist")]
fn missing_dataset(#[from(world)] world: &LoadWorld) {
    world.path.replace(world.scratch_path("absent.csv"));
}

#[given("a dataset whose row {row} has a bad stream count")]
fn malformed_dataset(#[from(world)] world: &LoadWorld, row: u64) {
    let path = world.scratch_path("malformed.csv");
    let mut lines = vec!["Lima,Peru,America,\"a, x, 1\""; 3];
    let bad_index = usize::try_from(row - 1).expect("small row number");
    if let Some(line) = lines.get_mut(bad_index) {
        *line = "Quito,Ecuador,America,\"b, y, plenty\"";
    }
    std::fs::write(&path, lines.join("\n")).expect("write dataset");
    world.path.replace(path);
}

#[when("I load the dataset")]
fn load_dataset(#[from(world)] world: &LoadWorld) {
    let outcome = load_catalogue(&world.path.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the tree holds {count} cities")]
fn tree_holds(#[from(world)] world: &LoadWorld, count: usize) {
    assert_eq!(world.catalogue().tree.cities().count(), count);
}

#[then("the index lists {countries} countries and {cities} real cities")]
fn index_lists(#[from(world)] world: &LoadWorld, countries: usize, cities: usize) {
    let catalogue = world.catalogue();
    assert_eq!(catalogue.index.countries().len(), countries);
    assert_eq!(catalogue.index.cities().len(), cities);
}

#[then("the title \"{title}\" is indexed")]
fn title_indexed(#[from(world)] world: &LoadWorld, title: String) {
    assert!(world.catalogue().index.songs().contains(&title));
}

#[then("loading fails as not found")]
fn fails_not_found(#[from(world)] world: &LoadWorld) {
    assert_eq!(world.error().kind(), ErrorKind::NotFound);
}

#[then("loading fails on row {row}")]
fn fails_on_row(#[from(world)] world: &LoadWorld, row: u64) {
    let error = world.error();
    match &*error {
        LoadError::Record(record) => assert_eq!(record.row(), row),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}

macro_rules! register_loading_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/loading.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: LoadWorld) {
            let _ = world;
        }
    };
}

register_loading_scenario!(sample_charts, "loading the sample charts");
register_loading_scenario!(missing_file, "a missing dataset is reported");
register_loading_scenario!(malformed_row, "a malformed row is reported with its number");
