use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Categorical listing attributes
// ---------------------------------------------------------------------------

/// Whether a listing accepts animals. The source CSV spells these
/// `acept` / `not acept`; keep the original spelling on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AnimalPolicy {
    #[serde(rename = "acept")]
    Accept,
    #[serde(rename = "not acept")]
    NotAccept,
}

impl AnimalPolicy {
    pub const ALL: [AnimalPolicy; 2] = [AnimalPolicy::Accept, AnimalPolicy::NotAccept];
}

impl fmt::Display for AnimalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimalPolicy::Accept => write!(f, "Accepts animals"),
            AnimalPolicy::NotAccept => write!(f, "No animals"),
        }
    }
}

/// Whether a listing comes furnished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Furniture {
    #[serde(rename = "furnished")]
    Furnished,
    #[serde(rename = "not furnished")]
    NotFurnished,
}

impl Furniture {
    pub const ALL: [Furniture; 2] = [Furniture::Furnished, Furniture::NotFurnished];
}

impl fmt::Display for Furniture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Furniture::Furnished => write!(f, "Furnished"),
            Furniture::NotFurnished => write!(f, "Not furnished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single rental listing. Field names follow the source CSV headers,
/// currency annotations included; columns not listed here (e.g. `floor`,
/// `property tax (R$)`) are ignored by the deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub city: String,
    pub area: f64,
    pub rooms: i64,
    pub bathroom: i64,
    #[serde(rename = "parking spaces")]
    pub parking_spaces: i64,
    #[serde(rename = "hoa (R$)")]
    pub hoa: f64,
    #[serde(rename = "rent amount (R$)")]
    pub rent: f64,
    #[serde(rename = "total (R$)")]
    pub total: f64,
    pub animal: AnimalPolicy,
    pub furniture: Furniture,
}

// ---------------------------------------------------------------------------
// NumericField – the six columns entering the correlation matrix
// ---------------------------------------------------------------------------

/// The numeric listing attributes used for correlation analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Area,
    Rooms,
    Bathroom,
    ParkingSpaces,
    Hoa,
    Rent,
}

impl NumericField {
    pub const ALL: [NumericField; 6] = [
        NumericField::Area,
        NumericField::Rooms,
        NumericField::Bathroom,
        NumericField::ParkingSpaces,
        NumericField::Hoa,
        NumericField::Rent,
    ];

    /// Short label for axis ticks and heatmap headers.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::Area => "area",
            NumericField::Rooms => "rooms",
            NumericField::Bathroom => "bathroom",
            NumericField::ParkingSpaces => "parking spaces",
            NumericField::Hoa => "hoa (R$)",
            NumericField::Rent => "rent amount (R$)",
        }
    }

    /// Extract this field's value from a listing.
    pub fn value(self, listing: &Listing) -> f64 {
        match self {
            NumericField::Area => listing.area,
            NumericField::Rooms => listing.rooms as f64,
            NumericField::Bathroom => listing.bathroom as f64,
            NumericField::ParkingSpaces => listing.parking_spaces as f64,
            NumericField::Hoa => listing.hoa,
            NumericField::Rent => listing.rent,
        }
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table with precomputed indexes used by the UI:
/// the sorted unique city list and the slider bounds for the three
/// integer attributes.
#[derive(Debug, Clone)]
pub struct ListingTable {
    /// All listings (rows), in source order.
    pub listings: Vec<Listing>,
    /// Sorted unique city names.
    pub cities: Vec<String>,
    /// Inclusive (min, max) bounds observed in the data.
    pub rooms_range: (i64, i64),
    pub bathroom_range: (i64, i64),
    pub parking_range: (i64, i64),
}

impl ListingTable {
    /// Build the table indexes from the loaded rows.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let mut cities: Vec<String> = listings.iter().map(|l| l.city.clone()).collect();
        cities.sort();
        cities.dedup();

        let rooms_range = int_range(&listings, |l| l.rooms);
        let bathroom_range = int_range(&listings, |l| l.bathroom);
        let parking_range = int_range(&listings, |l| l.parking_spaces);

        ListingTable {
            listings,
            cities,
            rooms_range,
            bathroom_range,
            parking_range,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Group a derived value by city over the given row indices, in the
    /// table's city order. Cities with no matching rows are omitted.
    pub fn values_by_city(
        &self,
        indices: &[usize],
        value: impl Fn(&Listing) -> f64,
    ) -> Vec<(String, Vec<f64>)> {
        self.cities
            .iter()
            .filter_map(|city| {
                let values: Vec<f64> = indices
                    .iter()
                    .map(|&i| &self.listings[i])
                    .filter(|l| &l.city == city)
                    .map(&value)
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some((city.clone(), values))
                }
            })
            .collect()
    }
}

fn int_range(listings: &[Listing], field: impl Fn(&Listing) -> i64) -> (i64, i64) {
    let min = listings.iter().map(&field).min().unwrap_or(0);
    let max = listings.iter().map(&field).max().unwrap_or(0);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(city: &str, rooms: i64) -> Listing {
        Listing {
            city: city.to_string(),
            area: 50.0,
            rooms,
            bathroom: 1,
            parking_spaces: 0,
            hoa: 100.0,
            rent: 900.0,
            total: 1000.0,
            animal: AnimalPolicy::Accept,
            furniture: Furniture::Furnished,
        }
    }

    #[test]
    fn cities_are_sorted_and_deduped() {
        let table = ListingTable::from_listings(vec![
            listing("São Paulo", 2),
            listing("Campinas", 1),
            listing("São Paulo", 4),
        ]);
        assert_eq!(table.cities, vec!["Campinas", "São Paulo"]);
        assert_eq!(table.rooms_range, (1, 4));
    }

    #[test]
    fn values_by_city_follows_city_order_and_skips_empty_groups() {
        let table = ListingTable::from_listings(vec![
            listing("B", 3),
            listing("A", 1),
            listing("B", 2),
        ]);
        // Row 2 hidden: city B keeps a single value.
        let groups = table.values_by_city(&[0, 1], |l| l.rooms as f64);
        assert_eq!(
            groups,
            vec![("A".to_string(), vec![1.0]), ("B".to_string(), vec![3.0])]
        );
    }
}
