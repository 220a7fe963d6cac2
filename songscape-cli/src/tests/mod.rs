//! Shared test harness modules for the Songscape CLI.

use super::*;

mod helpers;
