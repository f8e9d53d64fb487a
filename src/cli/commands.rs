use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "modelkit")]
#[command(version, about = "Create, inspect and exercise base entity records")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); overrides MODELKIT_LOG_LEVEL
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a fresh record
    Create {
        /// Print the serialized mapping instead of the display form
        #[arg(long)]
        json: bool,
    },

    /// Reconstruct a record from a serialized mapping and display it
    Show {
        #[command(flatten)]
        source: RecordSource,
    },

    /// Invoke a record method by name (to_dict, save, __str__)
    Call {
        /// Method name
        method: String,

        /// Arguments passed to the method
        args: Vec<String>,

        #[command(flatten)]
        source: RecordSource,
    },
}

/// Where a serialized record comes from. With none given, `call` works on
/// a fresh record and `show` fails.
#[derive(Args, Debug, Default)]
pub struct RecordSource {
    /// Serialized record as a JSON object
    #[arg(long, conflicts_with_all = ["file", "stdin"])]
    pub record: Option<String>,

    /// Read the serialized record from a file
    #[arg(long, value_name = "PATH", conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the serialized record from stdin
    #[arg(long)]
    pub stdin: bool,
}
