//! `bmv logout` - forget the stored session

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::Session;

#[derive(clap::Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, session: &mut Session, global: &GlobalOpts) -> Result<()> {
    if session.token().is_some() {
        session.logout().into_diagnostic()?;
        if !global.quiet {
            println!("{} Logged out", style("✓").green());
        }
    } else if !global.quiet {
        println!("Not logged in.");
    }
    Ok(())
}
