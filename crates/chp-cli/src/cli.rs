//! CLI definition using clap

use chp_domain::model::MonthSlot;
use chp_types::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chp-inspector")]
#[command(version)]
#[command(about = "CHP 108A bus maintenance & safety inspection forms")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the 12 inspection dates projected from an anchor date
    Schedule {
        /// Anchor date (YYYY-MM-DD)
        anchor: String,

        /// Also report the inspection following this slot (e.g. MAR)
        #[arg(long)]
        after: Option<MonthSlot>,

        /// Reference date for --after (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Create a new inspection record file
    New {
        /// Output record file (JSON)
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Fill the vehicle header from this fleet unit
        #[arg(long, short = 'u')]
        unit: Option<String>,

        /// Project all 12 dates from this anchor date (YYYY-MM-DD)
        #[arg(long, short = 'a')]
        anchor: Option<String>,

        /// Mark every month as passed
        #[arg(long, conflicts_with = "all_def")]
        all_ok: bool,

        /// Mark every month as deficient
        #[arg(long)]
        all_def: bool,

        /// Odometer reading for a month, SLOT=READING (repeatable)
        #[arg(long = "odometer", value_name = "SLOT=READING")]
        odometers: Vec<String>,

        /// Sampled deficiency rate for a month, SLOT=PERCENT with PERCENT in
        /// 0, 3, 5, 10 (repeatable)
        #[arg(long = "rate", value_name = "SLOT=PERCENT")]
        rates: Vec<String>,

        /// Seed for deficiency sampling (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// PNG or JPEG signature applied to every marked month
        #[arg(long)]
        signature: Option<PathBuf>,
    },

    /// Export a record as the CHP 108A PDF
    Export {
        /// Path to record file (JSON)
        record: PathBuf,

        /// Output directory. Uses config value if not specified.
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Also write the repair log as an Excel workbook
        #[arg(long)]
        xlsx: bool,

        /// Print-only document without fillable fields
        #[arg(long)]
        flat: bool,
    },

    /// List the deduplicated deficiencies of a record
    Deficiencies {
        /// Path to record file (JSON)
        record: PathBuf,
    },

    /// List fleet vehicles
    Fleet,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set a key, KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        sets: Vec<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new_with_repeated_rates() {
        let cli = Cli::try_parse_from([
            "chp-inspector",
            "new",
            "-o",
            "rec.json",
            "--rate",
            "MAR=5",
            "--rate",
            "jun=10",
            "--all-ok",
        ])
        .unwrap();
        match cli.command {
            Commands::New { rates, all_ok, .. } => {
                assert_eq!(rates, vec!["MAR=5", "jun=10"]);
                assert!(all_ok);
            }
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn test_all_ok_conflicts_with_all_def() {
        let args = ["chp-inspector", "new", "-o", "r.json", "--all-ok", "--all-def"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_schedule_after_parses_slot() {
        let cli =
            Cli::try_parse_from(["chp-inspector", "schedule", "2025-01-15", "--after", "jan"])
                .unwrap();
        match cli.command {
            Commands::Schedule { after, .. } => assert_eq!(after, Some(MonthSlot::Jan)),
            _ => panic!("expected schedule"),
        }
    }
}
