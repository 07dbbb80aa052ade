use crate::core::window::ViewUnit;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for babysteps
/// Baby-care log: feedings, diapers, growth and more, synced to your server
#[derive(Parser, Debug)]
#[command(
    name = "babysteps",
    version = env!("CARGO_PKG_VERSION"),
    about = "A baby-care log CLI: record feedings, diapers and growth, and review them by day, week or month",
    long_about = None
)]
pub struct Cli {
    /// Override the local cache path (useful for tests or a second child)
    #[arg(global = true, long = "cache")]
    pub cache: Option<String>,

    /// Override the remote service base URL
    #[arg(global = true, long = "api")]
    pub api: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Log diagnostics at debug level on stderr
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which window a view shows.
#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// View unit
    #[arg(long, value_enum, default_value = "day")]
    pub unit: ViewUnit,

    /// Anchor date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Custom window start (YYYY-MM-DD, inclusive); implies --unit custom
    #[arg(long)]
    pub from: Option<String>,

    /// Custom window end (YYYY-MM-DD, inclusive); implies --unit custom
    #[arg(long)]
    pub to: Option<String>,

    /// Move the anchor by N units (negative = back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub shift: i32,

    /// Jump to today's day view (ignores the other window options)
    #[arg(long)]
    pub today: bool,
}

/// Fields every entry kind accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct EntryArgs {
    /// When it happened ("YYYY-MM-DD HH:MM", "HH:MM" for today); defaults to now
    #[arg(long, global = true)]
    pub at: Option<String>,

    /// Free-text note
    #[arg(long, global = true)]
    pub note: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EntryKind {
    /// Feeding: breast (minutes) or bottle/formula/solid (amount)
    Feeding {
        /// breast | bottle | formula | solid
        method: String,
        /// Amount in ml
        #[arg(long)]
        amount: Option<f64>,
        /// Total minutes
        #[arg(long)]
        duration: Option<f64>,
        /// Minutes on the left side
        #[arg(long)]
        left: Option<f64>,
        /// Minutes on the right side
        #[arg(long)]
        right: Option<f64>,
        /// left | right | both
        #[arg(long)]
        side: Option<String>,
    },
    /// Diaper change
    Diaper {
        /// wet | dirty | both
        status: String,
    },
    /// Growth record or milestone
    Growth {
        /// What happened ("first smile", "monthly check")
        event: String,
        /// milestone | physical | teeth | health | skill
        #[arg(long, default_value = "milestone")]
        category: String,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
    },
    /// Vaccination
    Vaccine {
        name: String,
        /// Next dose date (YYYY-MM-DD)
        #[arg(long)]
        next: Option<String>,
    },
    /// Vitamin or other supplement
    Supplement {
        name: String,
        #[arg(long)]
        dosage: Option<String>,
    },
    /// Free note
    Note { content: String },
    /// Saved report advice
    Advice {
        #[arg(long)]
        title: String,
        content: String,
        /// Window the advice was written for
        #[arg(long, value_enum)]
        report_type: Option<ViewUnit>,
    },
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the configuration and the local cache
    Init,

    /// Log in and store the session token in the configuration
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account on the remote service
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Replace the local cache with the remote profile and log
    Pull,

    /// Show the child's profile, or update it when any field is given
    Profile {
        #[arg(long)]
        name: Option<String>,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth: Option<String>,
        /// boy | girl
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Record a new entry
    Add {
        #[command(flatten)]
        common: EntryArgs,
        #[command(subcommand)]
        kind: EntryKind,
    },

    /// Replace the content of an existing entry
    Edit {
        /// Entry id
        id: String,
        #[command(flatten)]
        common: EntryArgs,
        #[command(subcommand)]
        kind: EntryKind,
    },

    /// Delete an entry
    Del {
        /// Entry id
        id: String,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List entries of a window, grouped by day
    List {
        #[command(flatten)]
        window: WindowArgs,
        /// Only these types (feeding, diaper, growth, vaccine, supplement, note, advice)
        #[arg(long = "type", value_delimiter = ',')]
        types: Vec<String>,
        /// Expand every day instead of only the most recent one
        #[arg(long)]
        expand: bool,
    },

    /// Per-hour or per-day totals of a window
    Stats {
        #[command(flatten)]
        window: WindowArgs,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Time since the last feeding, diaper and supplement
    Status,

    /// Build the AI report input for a window, optionally saving advice
    Report {
        #[command(flatten)]
        window: WindowArgs,
        /// Print the report context as JSON
        #[arg(long)]
        json: bool,
        /// Save this text as an ADVICE entry for the window
        #[arg(long)]
        save_advice: Option<String>,
        /// Title of the saved advice
        #[arg(long, requires = "save_advice")]
        title: Option<String>,
    },

    /// Export entries to JSON or CSV
    Export {
        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// YYYY, YYYY-MM, YYYY-MM-DD or start:end of the same shape; "all" = everything
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace the local entries and profile with a JSON export
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Import even when the file is older than the local data
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the local cache
    Backup {
        /// Destination file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip)
        #[arg(long)]
        compress: bool,

        /// Overwrite without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
