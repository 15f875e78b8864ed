//! Venue filtering, sorting, and pagination

use clap::ValueEnum;

use crate::catalog::venue::Venue;

/// Listing page size
pub const ITEMS_PER_PAGE: usize = 6;

/// URL-style slug: lowercase, alphanumerics kept, runs of anything else
/// collapsed to single dashes
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VenueSort {
    /// Catalog order
    #[default]
    Rating,
    /// Price: low to high
    PriceLowHigh,
    /// Price: high to low
    PriceHighLow,
}

/// Venue list filters, applied in the order the web client applies them
#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    /// Exact location match
    pub city: Option<String>,
    /// Venue type, as a slug (e.g. `banquet-hall`)
    pub venue_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Case-insensitive substring match on location
    pub search: Option<String>,
    pub sort: VenueSort,
}

impl VenueFilter {
    pub fn apply(&self, venues: Vec<Venue>) -> Vec<Venue> {
        let mut venues: Vec<Venue> = venues
            .into_iter()
            .filter(|v| self.keeps(v))
            .collect();
        match self.sort {
            // TODO: sort by rating once venue records carry one; catalog
            // order stands in for it meanwhile
            VenueSort::Rating => {}
            VenueSort::PriceLowHigh => venues.sort_by(|a, b| a.price().total_cmp(&b.price())),
            VenueSort::PriceHighLow => venues.sort_by(|a, b| b.price().total_cmp(&a.price())),
        }
        venues
    }

    fn keeps(&self, venue: &Venue) -> bool {
        if let Some(ref city) = self.city {
            if &venue.location != city {
                return false;
            }
        }
        if let Some(ref slug) = self.venue_type {
            if !venue.types().iter().any(|t| slugify(t) == *slug) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if venue.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if venue.price() > max {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            if !venue
                .location
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// One page of a listing plus the total page count
pub fn paginate<T>(items: &[T], page: usize) -> (&[T], usize) {
    let total_pages = items.len().div_ceil(ITEMS_PER_PAGE);
    let page = page.max(1);
    let start = (page - 1) * ITEMS_PER_PAGE;
    let end = (start + ITEMS_PER_PAGE).min(items.len());
    if start >= items.len() {
        (&[], total_pages)
    } else {
        (&items[start..end], total_pages)
    }
}
