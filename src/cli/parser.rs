use crate::core::import::OverwritePolicy;
use crate::export::{ExportFormat, ExportView};
use clap::{Parser, Subcommand};

/// Command-line interface definition for trainstat
/// CLI application to track training attendance with SQLite
#[derive(Parser)]
#[command(
    name = "trainstat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track members, trainers, training sessions and attendance in a local SQLite database",
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

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage members
    Member {
        #[command(subcommand)]
        action: PersonAction,
    },

    /// Manage trainers
    Trainer {
        #[command(subcommand)]
        action: PersonAction,
    },

    /// Manage training sessions
    Training {
        #[command(subcommand)]
        action: TrainingAction,
    },

    /// Record attendance for a training session
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },

    /// Import members, trainers or trainings from a CSV file
    Import {
        #[command(subcommand)]
        target: ImportTarget,
    },

    /// Statistics over a date range
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Manage the stored logo image
    Logo {
        #[command(subcommand)]
        action: LogoAction,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

/// Shared verb set for members and trainers.
#[derive(Subcommand)]
pub enum PersonAction {
    /// Add a new person
    Add {
        vorname: String,
        nachname: String,

        #[arg(long = "ext-id", help = "External id used for CSV reconciliation")]
        external_id: Option<String>,
    },

    /// Edit an existing person (omitted fields keep their value)
    Edit {
        id: i64,

        #[arg(long)]
        vorname: Option<String>,

        #[arg(long)]
        nachname: Option<String>,

        #[arg(long = "ext-id")]
        external_id: Option<String>,
    },

    /// Delete a person by id
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// List persons, sorted by surname
    List {
        #[arg(long, help = "Case-insensitive substring over first and last name")]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TrainingAction {
    /// Add a new training session
    Add {
        /// Date (YYYY-MM-DD or DD.MM.YYYY)
        #[arg(long)]
        date: String,

        #[arg(long)]
        thema: String,

        #[arg(long, help = "Id of the first (required) trainer")]
        trainer1: i64,

        #[arg(long, help = "Id of the optional second trainer")]
        trainer2: Option<i64>,
    },

    /// List trainings split into open and completed buckets
    List {
        #[arg(long, help = "Case-insensitive substring over the topic")]
        thema: Option<String>,

        #[arg(long, help = "Trainer id, matches either slot")]
        trainer: Option<i64>,

        #[arg(long, help = "Inclusive lower date bound")]
        from: Option<String>,

        #[arg(long, help = "Inclusive upper date bound")]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AttendanceAction {
    /// Show the attendance sheet of a session
    Show { training: i64 },

    /// Edit attendance interactively (current attendees preselected)
    Edit { training: i64 },

    /// Replace attendance non-interactively
    Set {
        training: i64,

        #[arg(
            long,
            value_delimiter = ',',
            conflicts_with_all = ["all", "none"],
            help = "Comma-separated member ids to mark present"
        )]
        members: Vec<i64>,

        #[arg(long, help = "Mark every member present")]
        all: bool,

        #[arg(long, help = "Mark every member absent")]
        none: bool,
    },
}

#[derive(Subcommand)]
pub enum ImportTarget {
    /// Import members (columns: Vorname, Nachname, ID)
    Members {
        file: String,

        #[arg(long, value_enum, default_value = "ask")]
        overwrite: OverwritePolicy,
    },

    /// Import trainers (columns: Vorname, Nachname, ID)
    Trainers {
        file: String,

        #[arg(long, value_enum, default_value = "ask")]
        overwrite: OverwritePolicy,
    },

    /// Import trainings (columns: Datum, Thema, Trainer1, Trainer2, ID)
    Trainings {
        file: String,

        #[arg(long, value_enum, default_value = "ask")]
        overwrite: OverwritePolicy,
    },
}

#[derive(Subcommand)]
pub enum StatsAction {
    /// Attendance ranking per member
    Members {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Training count per topic
    Topics {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Session count per trainer
    Trainers {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Export a view as CSV, JSON, XLSX or PDF
    Export {
        #[arg(long, value_enum, default_value = "attendance")]
        view: ExportView,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing output file")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum LogoAction {
    /// Store an image file (max 200 KiB) as the logo
    Set { file: String },

    /// Show mime type and size of the stored logo
    Show,

    /// Write the stored logo back to a file
    Export { file: String },

    /// Remove the stored logo
    Remove {
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}
