//! These structs provide the CLI interface for the rental-ledger CLI.

use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// rental-ledger: Normalizes vacation rental bookings and expenses into typed records.
///
/// Every year of bookings and expenses lives in its own spreadsheet, and the column layout of the
/// rentals sheet changed several times over the years. This program reads CSV exports of those
/// sheets, maps each year's layout onto one data model, validates every record and prints a
/// summary per year.
///
/// Set RENTAL_LEDGER_IN_TEST_MODE to any non-empty value to run against built-in sample data
/// instead of the CSV exports.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and initialize the configuration file.
    ///
    /// Afterwards, export each sheet listed in the config (or in the built-in registry) as CSV to
    /// `<data_dir>/<spreadsheet_id>/<sheet_name>.csv`.
    Init,
    /// Load, normalize and validate the data, and print a summary per year.
    Load(LoadArgs),
    /// Inspect or clear the cache of raw sheet data.
    Cache(CacheArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where configuration, exports and the cache are held. Defaults to
    /// ~/rental-ledger
    #[arg(long, env = "RENTAL_LEDGER_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// (Not shown): Args for the `rental-ledger load` command.
#[derive(Debug, Parser, Clone)]
pub struct LoadArgs {
    /// The years to load. Defaults to every registered year.
    #[arg(long, value_delimiter = ',')]
    years: Vec<i32>,
}

impl LoadArgs {
    pub fn new(years: Vec<i32>) -> Self {
        Self { years }
    }

    /// The requested years, or `None` for every registered year.
    pub fn years(&self) -> Option<&[i32]> {
        if self.years.is_empty() {
            None
        } else {
            Some(&self.years)
        }
    }
}

/// (Not shown): Args for the `rental-ledger cache` command.
#[derive(Debug, Parser, Clone)]
pub struct CacheArgs {
    #[command(subcommand)]
    action: CacheAction,
}

impl CacheArgs {
    pub fn new(action: CacheAction) -> Self {
        Self { action }
    }

    pub fn action(&self) -> CacheAction {
        self.action
    }
}

#[derive(Subcommand, Debug, Clone, Copy, Eq, PartialEq)]
pub enum CacheAction {
    /// Show how many sheets are cached and the age of the oldest.
    Info,
    /// Delete every cached sheet.
    Clear,
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("rental-ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or RENTAL_LEDGER_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("rental-ledger")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load_years() {
        let args = Args::try_parse_from([
            "rental-ledger",
            "--home",
            "/tmp/ledger",
            "load",
            "--years",
            "2024,2023",
        ])
        .unwrap();
        assert_eq!(args.common().home().path(), Path::new("/tmp/ledger"));
        match args.command() {
            Command::Load(load) => assert_eq!(load.years(), Some(&[2024, 2023][..])),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_load_all_years() {
        let args = Args::try_parse_from(["rental-ledger", "load"]).unwrap();
        match args.command() {
            Command::Load(load) => assert_eq!(load.years(), None),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_cache_clear_and_log_level() {
        let args =
            Args::try_parse_from(["rental-ledger", "--log-level", "debug", "cache", "clear"])
                .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        match args.command() {
            Command::Cache(cache) => assert_eq!(cache.action(), CacheAction::Clear),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
