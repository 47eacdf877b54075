pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pressquote_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "pressquote",
    about = "Pressquote pricing CLI",
    long_about = "Price sticker and name card print orders from extracted enquiry fields.",
    after_help = "Examples:\n  pressquote sticker --input enquiry.json --pretty\n  pressquote cards --text \"2 names x 100pcs double sided\"\n  pressquote doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Price a sticker enquiry from an extracted-fields JSON document")]
    Sticker {
        #[arg(long, help = "Fields JSON path, or `-` to read stdin")]
        input: String,
        #[arg(long, help = "Pretty-print the quote JSON")]
        pretty: bool,
    },
    #[command(about = "Price a name card order from order JSON or free text")]
    Cards {
        #[arg(long, help = "Order JSON path, or `-` to read stdin", conflicts_with = "text")]
        input: Option<String>,
        #[arg(long, help = "Free-text order description to parse")]
        text: Option<String>,
        #[arg(long, help = "Pretty-print the quote JSON")]
        pretty: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and run deterministic pricing self-checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Sticker { input, pretty } => commands::sticker::run(&input, pretty),
        Command::Cards { input, text, pretty } => {
            commands::cards::run(input.as_deref(), text.as_deref(), pretty)
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging() {
    use pressquote_core::config::LogFormat::*;
    use tracing::Level;

    // Logging must come up even when the config is broken; the command
    // itself reports the config error through its envelope.
    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // Quote documents own stdout, diagnostics go to stderr.
    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}
