use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use pantryctl_core::PantryConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective config (file, then env overrides) as TOML
    Show,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn run_path() -> Result<()> {
    let path = PantryConfig::config_path();
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(not created yet; run `pantryctl config init`)");
    }
    Ok(())
}

fn run_show() -> Result<()> {
    let path = PantryConfig::config_path();
    let config = PantryConfig::load()
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let toml_str = config
        .to_toml()
        .context("Failed to serialize config to TOML")?;

    println!("{}", toml_str);
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = PantryConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        ));
    }

    PantryConfig::default()
        .save_to(&config_path)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!("✅ Created config at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", config_path.display());
    println!("  2. Run: pantryctl config show");

    Ok(())
}
