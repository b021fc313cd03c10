//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use outreach_domain::EffortLevel;
use std::path::PathBuf;

/// Outreach - research a prospect and draft three personalized emails.
#[derive(Debug, Parser)]
#[command(name = "outreach")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "OUTREACH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable output (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Research a prospect and generate three outreach emails
    Generate(GenerateArgs),

    /// Record the text actually sent for one of the generated emails
    Feedback(FeedbackArgs),

    /// Show recent generation requests
    History(HistoryArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Full name of the prospect
    #[arg(short, long)]
    pub name: String,

    /// LinkedIn profile URL
    #[arg(short, long)]
    pub linkedin: Option<String>,

    /// Company website
    #[arg(long)]
    pub company: Option<String>,

    /// X (Twitter) profile URL
    #[arg(short, long)]
    pub x: Option<String>,

    /// Maximum words per email
    #[arg(short, long)]
    pub word_limit: Option<u32>,

    /// Thinking effort
    #[arg(short, long, value_enum, default_value = "low")]
    pub effort: EffortArg,

    /// File holding a past conversation with the prospect
    #[arg(long)]
    pub past_conversation: Option<PathBuf>,

    /// Extra style instructions for this request
    #[arg(short, long)]
    pub instructions: Option<String>,

    /// Knowledge document (overrides the configured path)
    #[arg(short, long)]
    pub knowledge: Option<PathBuf>,
}

/// Arguments for the feedback command.
#[derive(Debug, Parser)]
pub struct FeedbackArgs {
    /// Entry ID printed by `generate`
    pub id: String,

    /// Email number (1-3)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
    pub slot: u8,

    /// Text that was actually sent
    pub text: Option<String>,

    /// Read the sent text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Read the sent text from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Maximum number of entries (defaults to the configured history limit)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Effort argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EffortArg {
    /// Faster responses
    Low,
    /// More thorough research
    High,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<EffortArg> for EffortLevel {
    fn from(effort: EffortArg) -> Self {
        match effort {
            EffortArg::Low => EffortLevel::Low,
            EffortArg::High => EffortLevel::High,
        }
    }
}
