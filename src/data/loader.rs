use std::io::Read;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use thiserror::Error;

use super::model::{Listing, ListingTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fixed location of the rental-listings CSV.
pub const DATA_URL: &str =
    "https://raw.githubusercontent.com/wagnerelvio/projetorosi2/refs/heads/main/houses_to_rent_v2.csv";

/// Columns the parser requires; everything else in the CSV is ignored.
const REQUIRED_COLUMNS: [&str; 10] = [
    "city",
    "area",
    "rooms",
    "bathroom",
    "parking spaces",
    "hoa (R$)",
    "rent amount (R$)",
    "total (R$)",
    "animal",
    "furniture",
];

/// Why a load failed. Both variants are fatal to session start.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("listing data source unavailable: {0}")]
    SourceUnavailable(#[from] reqwest::Error),
    #[error("malformed listing data: {0:#}")]
    MalformedData(anyhow::Error),
}

static TABLE: OnceLock<ListingTable> = OnceLock::new();

/// Fetch and parse the listings table from [`DATA_URL`].
///
/// The first successful call caches the table for the life of the process;
/// later calls return the cached table without touching the network. There
/// is no invalidation: the table is read-only once loaded.
pub fn load() -> Result<&'static ListingTable, LoadError> {
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }

    let body = fetch(DATA_URL)?;
    let table = parse_csv(body.as_bytes()).map_err(LoadError::MalformedData)?;

    log::info!(
        "Loaded {} listings across {} cities",
        table.len(),
        table.cities.len()
    );
    Ok(TABLE.get_or_init(|| table))
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

fn fetch(url: &str) -> Result<String, reqwest::Error> {
    reqwest::blocking::get(url)?.error_for_status()?.text()
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse listings from CSV bytes with a header row.
pub fn parse_csv(input: impl Read) -> Result<ListingTable> {
    let mut reader = csv::Reader::from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!("CSV missing required columns: {}", missing.join(", "));
    }

    let mut listings = Vec::new();
    for (row_no, result) in reader.deserialize::<Listing>().enumerate() {
        let listing = result.with_context(|| format!("CSV row {row_no}"))?;
        listings.push(listing);
    }

    if listings.is_empty() {
        bail!("CSV contains no data rows");
    }

    Ok(ListingTable::from_listings(listings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AnimalPolicy, Furniture};

    // Header layout of the real houses_to_rent_v2 file, extra columns included.
    const FIXTURE: &str = "\
city,area,rooms,bathroom,parking spaces,floor,animal,furniture,hoa (R$),rent amount (R$),property tax (R$),fire insurance (R$),total (R$)
São Paulo,70,2,1,1,7,acept,furnished,2065,3300,211,42,5618
Porto Alegre,80,1,1,1,10,not acept,not furnished,1000,2800,0,36,3836
";

    #[test]
    fn parses_real_header_layout_and_ignores_extra_columns() {
        let table = parse_csv(FIXTURE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.listings[0];
        assert_eq!(first.city, "São Paulo");
        assert_eq!(first.parking_spaces, 1);
        assert_eq!(first.hoa, 2065.0);
        assert_eq!(first.rent, 3300.0);
        assert_eq!(first.total, 5618.0);
        assert_eq!(first.animal, AnimalPolicy::Accept);
        assert_eq!(first.furniture, Furniture::Furnished);

        assert_eq!(table.listings[1].animal, AnimalPolicy::NotAccept);
        assert_eq!(table.listings[1].furniture, Furniture::NotFurnished);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let input = "city,area,rooms\nSão Paulo,70,2\n";
        let err = parse_csv(input.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("bathroom"), "unexpected error: {msg}");
    }

    #[test]
    fn unknown_categorical_value_fails_with_row_number() {
        let input = FIXTURE.replace("not acept", "maybe");
        let err = parse_csv(input.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("row 1"));
    }

    #[test]
    fn empty_body_is_rejected() {
        let input = FIXTURE.lines().next().unwrap().to_string();
        assert!(parse_csv(input.as_bytes()).is_err());
    }
}
