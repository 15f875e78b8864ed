//! `bmv venues` - venue listings

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::catalog::{all_venues, paginate, VenueFilter, VenueSort};
use crate::cli::helpers::{format_price, truncate_str};
use crate::cli::GlobalOpts;

#[derive(clap::Subcommand, Debug)]
pub enum VenueCommands {
    /// List venues with filtering
    List(ListArgs),

    /// Show a venue's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by city (exact location match)
    #[arg(long, short = 'c')]
    pub city: Option<String>,

    /// Filter by venue type slug (e.g. banquet-hall)
    #[arg(long, short = 't')]
    pub r#type: Option<String>,

    /// Minimum per-plate price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum per-plate price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Search locations (case-insensitive substring)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, default_value = "rating")]
    pub sort: VenueSort,

    /// Page to show
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Show every page at once
    #[arg(long)]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Venue id
    pub id: String,
}

pub fn run(cmd: VenueCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        VenueCommands::List(args) => list(args, global),
        VenueCommands::Show(args) => show(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let filter = VenueFilter {
        city: args.city,
        venue_type: args.r#type,
        min_price: args.min_price,
        max_price: args.max_price,
        search: args.search,
        sort: args.sort,
    };
    let filtered = filter.apply(all_venues()?);

    if global.format.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&filtered).into_diagnostic()?
        );
        return Ok(());
    }

    if filtered.is_empty() {
        println!("No venues match your filter.");
        return Ok(());
    }

    let (page_items, total_pages) = if args.all {
        (filtered.as_slice(), 1)
    } else {
        paginate(&filtered, args.page)
    };

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Location", "Type", "Capacity", "Price"]);
    for venue in page_items {
        builder.push_record([
            venue.id.as_str(),
            &truncate_str(&venue.name, 28),
            venue.location.as_str(),
            venue.venue_type.as_str(),
            venue.capacity.as_str(),
            &format_price(&venue.price_per_plate),
        ]);
    }
    println!("{}", builder.build().with(TableStyle::markdown()));

    if !global.quiet {
        println!();
        let pages = if !args.all && total_pages > 1 {
            format!(" — page {} of {}", args.page.max(1), total_pages)
        } else {
            String::new()
        };
        println!("{} venue(s) found{}", filtered.len(), pages);
    }
    Ok(())
}

fn show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let venues = all_venues()?;
    let venue = venues
        .iter()
        .find(|v| v.id == args.id)
        .ok_or_else(|| miette::miette!("no venue with id {}", args.id))?;

    if global.format.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(venue).into_diagnostic()?
        );
        return Ok(());
    }

    println!("{}", style(&venue.name).bold());
    println!("{} {}", style("Location:").bold(), venue.location);
    println!("{} {}", style("Type:").bold(), venue.venue_type);
    println!("{} {}", style("Capacity:").bold(), venue.capacity);
    println!(
        "{} {}",
        style("Price:").bold(),
        format_price(&venue.price_per_plate)
    );
    println!("{} {}", style("Image:").bold(), venue.image);
    Ok(())
}
