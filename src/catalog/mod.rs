//! Venue and vendor catalogs
//!
//! The marketplace listings ship with the client as embedded JSON fixtures;
//! browsing and filtering happen entirely client-side.

pub mod filter;
pub mod vendor;
pub mod venue;

pub use filter::{paginate, slugify, VenueFilter, VenueSort, ITEMS_PER_PAGE};
pub use vendor::{all_vendors, Vendor, VendorFilter, VendorSort};
pub use venue::{all_venues, Venue};

use miette::Diagnostic;
use rust_embed::Embed;
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/data/"]
struct EmbeddedData;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("embedded catalog fixture {file} is missing")]
    #[diagnostic(code(bmv::catalog::missing))]
    Missing { file: &'static str },

    #[error("embedded catalog fixture {file} is invalid: {message}")]
    #[diagnostic(code(bmv::catalog::invalid))]
    Invalid { file: &'static str, message: String },
}

fn load_fixture<T: serde::de::DeserializeOwned>(file: &'static str) -> Result<Vec<T>, CatalogError> {
    let data = EmbeddedData::get(file).ok_or(CatalogError::Missing { file })?;
    serde_json::from_slice(data.data.as_ref()).map_err(|e| CatalogError::Invalid {
        file,
        message: e.to_string(),
    })
}
