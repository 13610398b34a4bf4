//! CLI argument definitions for the `mend` binary.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface for the mend refactoring tool.
#[derive(Parser, Debug)]
#[command(name = "mend", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Tracing filter expression for diagnostic output on stderr.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub(crate) log_filter: String,
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Lists the available recipes.
    List {
        /// Emits the recipe catalogue as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Applies a recipe to one or more source files.
    Apply {
        /// Stable name of the recipe to run.
        #[arg(long, value_name = "NAME")]
        recipe: String,
        /// Rewrites the files in place instead of printing the result.
        #[arg(long)]
        write: bool,
        /// Source files to rewrite.
        #[arg(value_name = "FILE", required = true)]
        files: Vec<Utf8PathBuf>,
    },
}
