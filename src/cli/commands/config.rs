//! `bmv config` - client configuration

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::{ClientStore, Config};

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

pub fn run(cmd: ConfigCommands, config: &Config, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config, global),
    }
}

fn show(config: &Config, global: &GlobalOpts) -> Result<()> {
    let config_path = Config::global_config_path();
    let state_path = ClientStore::open().ok().map(|s| s.path().to_path_buf());

    if global.format.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "api_url": config.api_url(),
                "timeout_secs": config.timeout().as_secs(),
                "config_file": config_path,
                "state_file": state_path,
            }))
            .into_diagnostic()?
        );
        return Ok(());
    }

    println!("{} {}", style("API URL:").bold(), config.api_url());
    println!(
        "{} {}s",
        style("Request timeout:").bold(),
        config.timeout().as_secs()
    );
    if let Some(path) = config_path {
        let note = if path.exists() { "" } else { " (not present)" };
        println!("{} {}{}", style("Config file:").bold(), path.display(), note);
    }
    if let Some(path) = state_path {
        println!("{} {}", style("State file:").bold(), path.display());
    }
    Ok(())
}
