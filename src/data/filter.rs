use std::collections::BTreeSet;

use super::model::{AnimalPolicy, Furniture, Listing, ListingTable};

// ---------------------------------------------------------------------------
// FilterCriteria – current control selections
// ---------------------------------------------------------------------------

/// The active filter selections, rebuilt by the UI controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected cities. Membership in an empty set never holds, so an
    /// empty selection yields an empty view. Deliberate: None means none.
    pub cities: BTreeSet<String>,
    /// Inclusive bounds.
    pub rooms: (i64, i64),
    pub bathroom: (i64, i64),
    pub parking: (i64, i64),
    pub animal: AnimalPolicy,
    pub furniture: Furniture,
}

impl FilterCriteria {
    /// Initial criteria for a loaded table: no cities selected, sliders at
    /// the full observed ranges, first option of each selector.
    pub fn for_table(table: &ListingTable) -> Self {
        FilterCriteria {
            cities: BTreeSet::new(),
            rooms: table.rooms_range,
            bathroom: table.bathroom_range,
            parking: table.parking_range,
            animal: AnimalPolicy::Accept,
            furniture: Furniture::Furnished,
        }
    }

    /// Whether a single listing satisfies every predicate.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.cities.contains(&listing.city)
            && in_range(listing.rooms, self.rooms)
            && in_range(listing.bathroom, self.bathroom)
            && in_range(listing.parking_spaces, self.parking)
            && listing.animal == self.animal
            && listing.furniture == self.furniture
    }
}

fn in_range(value: i64, (lo, hi): (i64, i64)) -> bool {
    value >= lo && value <= hi
}

/// Return indices of listings passing all active filters.
pub fn filtered_indices(table: &ListingTable, criteria: &FilterCriteria) -> Vec<usize> {
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| criteria.matches(listing))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of listings whose total price is at or below `cap`.
/// Used by the outlier-free tab with a fixed cap of 10 000.
pub fn below_total(table: &ListingTable, cap: f64) -> Vec<usize> {
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| listing.total <= cap)
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Price summary over a filtered view
// ---------------------------------------------------------------------------

/// Min/max total price over a view. Zero for the empty view: that is a
/// degenerate case, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub min_total: f64,
    pub max_total: f64,
}

/// Summarize the total price of the rows at `indices`.
pub fn summarize(table: &ListingTable, indices: &[usize]) -> PriceSummary {
    if indices.is_empty() {
        return PriceSummary {
            min_total: 0.0,
            max_total: 0.0,
        };
    }
    let mut min_total = f64::INFINITY;
    let mut max_total = f64::NEG_INFINITY;
    for &i in indices {
        let total = table.listings[i].total;
        min_total = min_total.min(total);
        max_total = max_total.max(total);
    }
    PriceSummary {
        min_total,
        max_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(
        city: &str,
        rooms: i64,
        bathroom: i64,
        parking: i64,
        animal: AnimalPolicy,
        furniture: Furniture,
        total: f64,
    ) -> Listing {
        Listing {
            city: city.to_string(),
            area: 60.0,
            rooms,
            bathroom,
            parking_spaces: parking,
            hoa: 200.0,
            rent: total * 0.8,
            total,
            animal,
            furniture,
        }
    }

    fn sample_table() -> ListingTable {
        ListingTable::from_listings(vec![
            listing("A", 2, 1, 0, AnimalPolicy::Accept, Furniture::Furnished, 1000.0),
            listing("B", 3, 2, 1, AnimalPolicy::NotAccept, Furniture::NotFurnished, 2000.0),
            listing("A", 2, 1, 0, AnimalPolicy::Accept, Furniture::Furnished, 15000.0),
        ])
    }

    fn criteria_for_city_a() -> FilterCriteria {
        FilterCriteria {
            cities: BTreeSet::from(["A".to_string()]),
            rooms: (2, 2),
            bathroom: (1, 1),
            parking: (0, 0),
            animal: AnimalPolicy::Accept,
            furniture: Furniture::Furnished,
        }
    }

    #[test]
    fn conjunction_of_all_predicates() {
        let table = sample_table();
        let view = filtered_indices(&table, &criteria_for_city_a());
        assert_eq!(view, vec![0, 2]);

        // Every retained row satisfies the stored criteria.
        let criteria = criteria_for_city_a();
        for &i in &view {
            assert!(criteria.matches(&table.listings[i]));
        }

        let summary = summarize(&table, &view);
        assert_eq!(summary.min_total, 1000.0);
        assert_eq!(summary.max_total, 15000.0);
    }

    #[test]
    fn empty_city_selection_yields_empty_view() {
        let table = sample_table();
        let mut criteria = criteria_for_city_a();
        criteria.cities.clear();
        // Loosen everything else: the empty city set alone must empty the view.
        criteria.rooms = (0, 100);
        criteria.bathroom = (0, 100);
        criteria.parking = (0, 100);

        let view = filtered_indices(&table, &criteria);
        assert!(view.is_empty());
        assert_eq!(
            summarize(&table, &view),
            PriceSummary {
                min_total: 0.0,
                max_total: 0.0
            }
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let table = sample_table();
        let mut criteria = criteria_for_city_a();
        criteria.cities.insert("B".to_string());
        criteria.rooms = (2, 3);
        criteria.bathroom = (1, 2);
        criteria.parking = (0, 1);
        criteria.animal = AnimalPolicy::NotAccept;
        criteria.furniture = Furniture::NotFurnished;

        assert_eq!(filtered_indices(&table, &criteria), vec![1]);
    }

    #[test]
    fn total_price_cap_retains_rows_at_or_below() {
        let table = sample_table();
        assert_eq!(below_total(&table, 10_000.0), vec![0, 1]);
        assert_eq!(below_total(&table, 2000.0), vec![0, 1]);
        assert_eq!(below_total(&table, 999.0), Vec::<usize>::new());
    }
}
