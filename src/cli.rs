use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::analyze::AnalyzeArgs;
use crate::commands::config::ConfigCommands;
use crate::commands::publish::PublishArgs;

#[derive(Parser)]
#[command(
    name = "issue-digest",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Debug)]
pub enum Commands {
    /// Summarize cached issue exports into a CSV report
    Analyze(AnalyzeArgs),

    /// Upload the CSV report to a new Google spreadsheet
    Publish(PublishArgs),

    /// Configuration file tools
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
