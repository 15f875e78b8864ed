//! Vendor records

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::catalog::{load_fixture, CatalogError};

/// A service vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub rating: f64,
    pub location: String,
}

/// Load the embedded vendor catalog
pub fn all_vendors() -> Result<Vec<Vendor>, CatalogError> {
    load_fixture("vendors.json")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VendorSort {
    /// Highest rated first
    #[default]
    Rating,
    /// Alphabetical by name
    Name,
}

/// Vendor list filters
#[derive(Debug, Clone, Default)]
pub struct VendorFilter {
    /// Exact location match
    pub city: Option<String>,
    /// Case-insensitive category match
    pub category: Option<String>,
    pub sort: VendorSort,
}

impl VendorFilter {
    pub fn apply(&self, vendors: Vec<Vendor>) -> Vec<Vendor> {
        let mut vendors: Vec<Vendor> = vendors
            .into_iter()
            .filter(|v| {
                self.city.as_ref().map_or(true, |city| &v.location == city)
                    && self
                        .category
                        .as_ref()
                        .map_or(true, |category| v.category.eq_ignore_ascii_case(category))
            })
            .collect();
        match self.sort {
            VendorSort::Rating => {
                vendors.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            }
            VendorSort::Name => vendors.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        vendors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(name: &str, category: &str, rating: f64, location: &str) -> Vendor {
        Vendor {
            id: "0".into(),
            name: name.into(),
            category: category.into(),
            image: String::new(),
            rating,
            location: location.into(),
        }
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let vendors = vec![
            vendor("A", "catering", 4.0, "Pune"),
            vendor("B", "photography", 4.5, "Pune"),
        ];
        let filter = VendorFilter {
            category: Some("Catering".into()),
            ..VendorFilter::default()
        };
        let out = filter.apply(vendors);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "A");
    }

    #[test]
    fn test_rating_sort_descends() {
        let vendors = vec![
            vendor("A", "catering", 3.9, "Pune"),
            vendor("B", "catering", 4.8, "Goa"),
        ];
        let out = VendorFilter::default().apply(vendors);
        assert_eq!(out[0].name, "B");
    }

    #[test]
    fn test_city_filter() {
        let vendors = vec![
            vendor("A", "catering", 3.9, "Pune"),
            vendor("B", "catering", 4.8, "Goa"),
        ];
        let filter = VendorFilter {
            city: Some("Goa".into()),
            ..VendorFilter::default()
        };
        assert_eq!(filter.apply(vendors).len(), 1);
    }

    #[test]
    fn test_fixture_loads() {
        let vendors = all_vendors().unwrap();
        assert!(!vendors.is_empty());
    }
}
