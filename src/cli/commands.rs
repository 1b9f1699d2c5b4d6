//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the stdio tool server (default)
//! - tools: print the tool catalog
//! - call: invoke one tool and print the result

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// brokr - Alpaca brokerage and market data served as callable tools
#[derive(Parser, Debug)]
#[command(name = "brokr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the stdio tool server (the default when no subcommand is given)
    Serve,

    /// Print the tool catalog
    Tools {
        /// Include parameter schemas in the output
        #[arg(short, long)]
        schemas: bool,
    },

    /// Invoke one tool and print its result as JSON
    Call {
        /// Tool name (e.g. get_clock, place_limit_order)
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        arguments: String,
    },
}
