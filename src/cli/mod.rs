//! Command-line interface.

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, Settings};

#[derive(Parser)]
#[command(name = "univscrape")]
#[command(about = "Enrich a university roster with encyclopedia stats, social metrics and SaaS vendors")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Roster CSV to read and update
    #[arg(long, global = true, env = "UNIVSCRAPE_ROSTER")]
    roster: Option<PathBuf>,

    /// Enable verbose logging and per-request progress lines
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich the next batch of rows with encyclopedia and social data
    Enrich {
        /// Rows to enrich this run
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Probe every website for every vendor in the vendor list
    Vendors {
        /// Vendor list CSV (needs a "Vendors" column)
        #[arg(long, env = "UNIVSCRAPE_VENDORS")]
        vendors: Option<PathBuf>,
        /// Do not print the roster table when done
        #[arg(long)]
        no_table: bool,
    },

    /// Enrich a batch, then run the vendor pass
    Run {
        /// Rows to enrich this run
        #[arg(short, long)]
        batch_size: Option<usize>,
        /// Vendor list CSV (needs a "Vendors" column)
        #[arg(long, env = "UNIVSCRAPE_VENDORS")]
        vendors: Option<PathBuf>,
    },

    /// Show which rows the next enrichment run would pick
    Select {
        /// Rows to enrich this run
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Print the roster as a table
    Show {
        /// Maximum displayed width of a cell
        #[arg(long, default_value = "40")]
        max_width: usize,
    },
}

/// Parse arguments, resolve settings and dispatch.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).await?;
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    if let Some(roster) = cli.roster {
        settings.roster_path = roster;
    }

    let verbose = cli.verbose;

    match cli.command {
        Commands::Enrich { batch_size } => {
            apply_batch_size(&mut settings, batch_size);
            commands::cmd_enrich(&settings, verbose).await
        }
        Commands::Vendors { vendors, no_table } => {
            apply_vendors_path(&mut settings, vendors);
            commands::cmd_vendors(&settings, verbose, !no_table).await
        }
        Commands::Run {
            batch_size,
            vendors,
        } => {
            apply_batch_size(&mut settings, batch_size);
            apply_vendors_path(&mut settings, vendors);
            commands::cmd_enrich(&settings, verbose).await?;
            commands::cmd_vendors(&settings, verbose, true).await
        }
        Commands::Select { batch_size } => {
            apply_batch_size(&mut settings, batch_size);
            commands::cmd_select(&settings)
        }
        Commands::Show { max_width } => commands::cmd_show(&settings, max_width),
    }
}

fn apply_batch_size(settings: &mut Settings, batch_size: Option<usize>) {
    if let Some(n) = batch_size {
        settings.batch_size = n;
    }
}

fn apply_vendors_path(settings: &mut Settings, vendors: Option<PathBuf>) {
    if let Some(path) = vendors {
        settings.vendors_path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_enrich() {
        let cli = Cli::try_parse_from(["univscrape", "-v", "enrich", "--batch-size", "10"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Enrich {
                batch_size: Some(10)
            }
        ));
    }

    #[test]
    fn test_parse_vendors_global_roster() {
        let cli = Cli::try_parse_from([
            "univscrape",
            "vendors",
            "--roster",
            "data.csv",
            "--no-table",
        ])
        .unwrap();
        assert_eq!(cli.roster, Some(PathBuf::from("data.csv")));
        assert!(matches!(cli.command, Commands::Vendors { no_table: true, .. }));
    }
}
