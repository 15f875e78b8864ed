//! `bmv vendors` - vendor listings

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::catalog::{all_vendors, VendorFilter, VendorSort};
use crate::cli::GlobalOpts;

#[derive(clap::Subcommand, Debug)]
pub enum VendorCommands {
    /// List vendors with filtering
    List(ListArgs),

    /// Show a vendor's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by city (exact location match)
    #[arg(long, short = 'c')]
    pub city: Option<String>,

    /// Filter by category (e.g. catering, photography)
    #[arg(long)]
    pub category: Option<String>,

    /// Sort order
    #[arg(long, default_value = "rating")]
    pub sort: VendorSort,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Vendor id
    pub id: String,
}

pub fn run(cmd: VendorCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        VendorCommands::List(args) => list(args, global),
        VendorCommands::Show(args) => show(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let filter = VendorFilter {
        city: args.city,
        category: args.category,
        sort: args.sort,
    };
    let filtered = filter.apply(all_vendors()?);

    if global.format.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&filtered).into_diagnostic()?
        );
        return Ok(());
    }

    if filtered.is_empty() {
        println!("No vendors match your filter.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Category", "Rating", "Location"]);
    for vendor in &filtered {
        builder.push_record([
            vendor.id.as_str(),
            vendor.name.as_str(),
            vendor.category.as_str(),
            &format!("★ {:.1}", vendor.rating),
            vendor.location.as_str(),
        ]);
    }
    println!("{}", builder.build().with(TableStyle::markdown()));

    if !global.quiet {
        println!();
        println!("{} vendor(s) found", filtered.len());
    }
    Ok(())
}

fn show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let vendors = all_vendors()?;
    let vendor = vendors
        .iter()
        .find(|v| v.id == args.id)
        .ok_or_else(|| miette::miette!("no vendor with id {}", args.id))?;

    if global.format.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(vendor).into_diagnostic()?
        );
        return Ok(());
    }

    println!("{}", style(&vendor.name).bold());
    println!("{} {}", style("Category:").bold(), vendor.category);
    println!("{} ★ {:.1}", style("Rating:").bold(), vendor.rating);
    println!("{} {}", style("Location:").bold(), vendor.location);
    println!("{} {}", style("Image:").bold(), vendor.image);
    Ok(())
}
