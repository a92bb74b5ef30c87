use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for medtracker
/// CLI application to record medications and doses with SQLite
#[derive(Parser)]
#[command(
    name = "medtracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple medication tracker: record medications, log doses and review a day-by-day timeline",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity and foreign keys")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage medications
    #[command(subcommand)]
    Med(MedCommands),

    /// Log a dose of a medication as taken
    Take {
        /// Medication id (see `med list`)
        medication_id: i64,

        /// When the dose was taken: "YYYY-MM-DD HH:MM" or "HH:MM" (today).
        /// Defaults to now.
        #[arg(long = "at", value_name = "WHEN")]
        at: Option<String>,
    },

    /// Inspect or delete logged doses
    #[command(subcommand)]
    Dose(DoseCommands),

    /// Show the dose timeline grouped by day
    Timeline {
        /// Period to show.
        ///
        /// Supported values:
        /// - YYYY-MM       → that month (e.g. "2025-10")
        /// - YYYY-MM-DD    → the month containing that day
        /// - month         → the current month
        /// - recent        → yesterday and today
        /// - all           → the whole archive
        ///
        /// If omitted, `default_window` from the configuration is used.
        #[arg(long, short)]
        period: Option<String>,

        /// Newest first (overrides `timeline_order`)
        #[arg(long, conflicts_with = "asc")]
        desc: bool,

        /// Oldest first (overrides `timeline_order`)
        #[arg(long)]
        asc: bool,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip on Windows, tar.gz on Unix)
        #[arg(long)]
        compress: bool,

        /// Overwrite the destination without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export logged doses with their dose numbers
    Export {
        /// Export format
        #[arg(long, value_enum, value_name = "FORMAT", default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Period to export (same values as `timeline --period`).
        /// If omitted, everything is exported.
        #[arg(long, short, value_name = "PERIOD")]
        period: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum MedCommands {
    /// Add a medication
    Add {
        /// Display name
        name: String,

        /// Dosage, free text (e.g. "500 mg")
        #[arg(long, default_value = "")]
        dosage: String,

        /// Frequency, free text (e.g. "Twice a day")
        #[arg(long, default_value = "")]
        frequency: String,
    },

    /// List medications
    List,

    /// Edit a medication in place (its dose logs are kept)
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        dosage: Option<String>,

        #[arg(long)]
        frequency: Option<String>,
    },

    /// Delete a medication together with all of its dose logs
    Del {
        id: i64,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DoseCommands {
    /// Dose history of a medication, newest first
    List { medication_id: i64 },

    /// Delete one dose log (no-op if the id does not exist)
    Del { log_id: i64 },
}
