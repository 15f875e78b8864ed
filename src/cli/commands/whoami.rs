//! `bmv whoami` - show the logged-in account

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::Session;

#[derive(clap::Args, Debug)]
pub struct WhoamiArgs {}

pub fn run(_args: WhoamiArgs, session: &Session, global: &GlobalOpts) -> Result<()> {
    let claims = match session.claims() {
        Some(claims) => claims,
        None => {
            println!("Not logged in.");
            return Ok(());
        }
    };

    if global.format.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(claims).into_diagnostic()?
        );
        return Ok(());
    }

    let username = claims
        .username
        .as_deref()
        .or(session.user().map(|u| u.username.as_str()))
        .unwrap_or("(unknown)");
    println!("{} {}", style("Username:").bold(), username);
    if let Some(email) = claims
        .email
        .as_deref()
        .or_else(|| session.user().and_then(|u| u.email.as_deref()))
    {
        println!("{} {}", style("Email:").bold(), email);
    }
    if let Some(role) = claims.role_name() {
        println!("{} {}", style("Role:").bold(), role);
    }
    if let Some(expires) = claims.expires_at() {
        println!(
            "{} {}",
            style("Token expires:").bold(),
            expires.format("%Y-%m-%d %H:%M UTC")
        );
    }
    Ok(())
}
