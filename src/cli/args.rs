//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs,
    config::ConfigCommands,
    login::LoginArgs,
    logout::LogoutArgs,
    register::RegisterArgs,
    roles::RolesCommands,
    vendors::VendorCommands,
    venues::VenueCommands,
    whoami::WhoamiArgs,
};

#[derive(Parser)]
#[command(name = "bmv")]
#[command(author, version, about = "BookMyVenue client toolkit")]
#[command(
    long_about = "A terminal client for the BookMyVenue marketplace: register and log in to a marketplace account and browse the venue and vendor listings."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides config file and BMV_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table on a terminal
    Auto,
    Table,
    Json,
}

impl OutputFormat {
    /// Whether JSON output was requested
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a marketplace account (interactive wizard)
    Register(RegisterArgs),

    /// Log in with email and password
    Login(LoginArgs),

    /// Log out and forget the stored token
    Logout(LogoutArgs),

    /// Show the logged-in account
    Whoami(WhoamiArgs),

    /// Account role catalog
    #[command(subcommand)]
    Roles(RolesCommands),

    /// Venue listings
    #[command(subcommand)]
    Venues(VenueCommands),

    /// Vendor listings
    #[command(subcommand)]
    Vendors(VendorCommands),

    /// Client configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
