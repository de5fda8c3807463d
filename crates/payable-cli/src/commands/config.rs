//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use payable_core::PayableConfig;
use payable_core::models::config::PLACEHOLDER_AUTH_TOKEN;

use super::{default_config_path, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration (file plus environment)
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Path => show_path(config_path),
    }
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    if config.rossum.auth_token != PLACEHOLDER_AUTH_TOKEN {
        config.rossum.auth_token = "********".to_string();
    }

    println!("{}", serde_json::to_string_pretty(&config)?);

    for issue in config.placeholder_issues() {
        eprintln!("{} {}", style("⚠").yellow(), issue);
    }

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    PayableConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let config_path = config_path.map_or_else(default_config_path, PathBuf::from);

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'payable config init' to create a configuration file.");
    }

    Ok(())
}
