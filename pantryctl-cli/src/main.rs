//! pantryctl CLI - grocery purchase ledger with a delayed shopping assistant
//!
//! Entry point for the `pantryctl` binary:
//! - Interactive terminal UI (`tui`, the default)
//! - Scripted walkthrough over sample purchases (`demo`)
//! - Config file management (`config`)
//! - Shell completions (`completions`)

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pantryctl_core::PantryConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "pantryctl",
    author,
    version,
    about = "Track grocery purchases and get shopping suggestions",
    long_about = "Log what you buy, watch what is about to expire, and ask the assistant for \
                  restock predictions, healthier swaps, organized shopping lists, meal ideas \
                  and a spending summary."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,
    /// Seed sample purchases and print every assistant suggestion
    Demo(commands::demo::DemoArgs),
    /// Manage pantryctl configuration (path, show, init)
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Where log output goes for this invocation
enum LogTarget<'a> {
    Stderr,
    /// The TUI owns the terminal, so logs go to a file
    File(&'a Path),
}

/// RUST_LOG wins; otherwise the configured level (already PANTRYCTL_LOG-aware)
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn init_tracing(target: LogTarget<'_>, default_level: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .compact();

    match target {
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err)),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))
        }
    }
}

fn load_config() -> Result<PantryConfig> {
    PantryConfig::load().with_context(|| {
        format!(
            "Failed to load config from {}",
            PantryConfig::config_path().display()
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let config = load_config()?;
            init_tracing(LogTarget::File(&config.log_file()), &config.logging.level).ok();
            tui::run(config).await?
        }
        Commands::Demo(args) => {
            let config = load_config()?;
            init_tracing(LogTarget::Stderr, &config.logging.level).ok();
            commands::demo::run_demo(args, config).await?
        }
        Commands::Config(args) => {
            // Must work even when the existing file is broken
            init_tracing(LogTarget::Stderr, "info").ok();
            commands::config::run_config(args)?
        }
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
