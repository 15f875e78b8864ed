//! `bmv roles` - the backend role catalog

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::api::{roles::fetch_roles, ApiClient};
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Subcommand, Debug)]
pub enum RolesCommands {
    /// List the account roles the backend knows
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {}

pub fn run(cmd: RolesCommands, config: &Config, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RolesCommands::List(_) => list(config, global),
    }
}

fn list(config: &Config, global: &GlobalOpts) -> Result<()> {
    let client = ApiClient::new(config)?;
    let catalog = fetch_roles(&client)?;

    if global.format.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(catalog.entries()).into_diagnostic()?
        );
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name"]);
    for entry in catalog.entries() {
        builder.push_record([entry.id.as_str(), entry.name.as_str()]);
    }
    println!("{}", builder.build().with(Style::markdown()));
    if !global.quiet {
        println!();
        println!("{} role(s)", catalog.entries().len());
    }
    Ok(())
}
