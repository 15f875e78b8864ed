//! Venue records

use serde::{Deserialize, Serialize};

use crate::catalog::{load_fixture, CatalogError};

/// Raw fixture shape, keyed the way the data export names its columns
#[derive(Debug, Clone, Deserialize)]
struct VenueRecord {
    #[serde(rename = "Hotel Name")]
    name: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Venue Type")]
    venue_type: String,
    #[serde(rename = "Capacity")]
    capacity: String,
    #[serde(rename = "Price per Plate")]
    price_per_plate: String,
    #[serde(rename = "Image URL")]
    image: String,
}

/// A bookable venue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    /// Position-derived id, 1-based like the web client's
    pub id: String,
    pub name: String,
    pub location: String,
    /// Comma-separated list of venue types
    pub venue_type: String,
    pub capacity: String,
    pub price_per_plate: String,
    pub image: String,
}

impl Venue {
    /// Per-plate price as a number; unparseable prices sort as zero
    pub fn price(&self) -> f64 {
        self.price_per_plate.trim().parse().unwrap_or(0.0)
    }

    /// The venue's types, split and trimmed
    pub fn types(&self) -> Vec<&str> {
        self.venue_type
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Load the embedded venue catalog
pub fn all_venues() -> Result<Vec<Venue>, CatalogError> {
    let records: Vec<VenueRecord> = load_fixture("venues.json")?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| Venue {
            id: (index + 1).to_string(),
            name: record.name,
            location: record.location,
            venue_type: record.venue_type,
            capacity: record.capacity,
            price_per_plate: record.price_per_plate,
            image: record.image,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_loads() {
        let venues = all_venues().unwrap();
        assert!(!venues.is_empty());
        assert_eq!(venues[0].id, "1");
    }

    #[test]
    fn test_price_parses() {
        let venues = all_venues().unwrap();
        assert!(venues.iter().all(|v| v.price() > 0.0));
    }

    #[test]
    fn test_types_split() {
        let venue = Venue {
            id: "1".into(),
            name: "X".into(),
            location: "Goa".into(),
            venue_type: "Beachside, Lawn".into(),
            capacity: "50-150".into(),
            price_per_plate: "1000".into(),
            image: String::new(),
        };
        assert_eq!(venue.types(), vec!["Beachside", "Lawn"]);
    }
}
