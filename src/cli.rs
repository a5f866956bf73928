use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Administration tool of the sismika earthquake portal.
#[derive(Debug, Parser)]
#[command(name = "sismika", version, about)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bulk-load reference data from a CSV dump
    Import {
        #[command(subcommand)]
        dataset: ImportDataset,
    },
    /// Recompute every event title against the current gazetteer
    BackfillTitles,
    /// Delete pending and confirmed sessions that have expired
    PurgeSessions,
    /// Print record counts of the store
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum ImportDataset {
    /// Gazetteer entries from the PSGC publication
    Locations {
        /// CSV file with one row per place
        csv: PathBuf,
    },
    /// Archived earthquake reports
    Earthquakes {
        /// CSV file with one row per event
        csv: PathBuf,
    },
    /// Seismic station registry
    Stations {
        /// CSV file with one row per station
        csv: PathBuf,
    },
}
