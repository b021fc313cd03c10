//! Outreach CLI - research a prospect and draft personalized outreach emails.

use clap::Parser;
use outreach_cli::commands;
use outreach_cli::{Cli, Command, Config, Formatter};
use outreach_store::JsonlLog;
use tracing_subscriber::EnvFilter;

fn main() {
    // .env may hold the API key; absence is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only command output.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> outreach_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_or_init(&config_path)?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Generate(args) => commands::execute_generate(args, &config, &formatter)?,
        Command::Feedback(args) => {
            let log = JsonlLog::new(&config.paths.log);
            commands::execute_feedback(args, &log, &formatter)?;
        }
        Command::History(args) => {
            let log = JsonlLog::new(&config.paths.log);
            commands::execute_history(args, &log, config.settings.history_limit, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}
