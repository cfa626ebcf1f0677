use crate::color::CityColors;
use crate::data::filter::{below_total, filtered_indices, summarize, FilterCriteria, PriceSummary};
use crate::data::model::{ListingTable, NumericField};
use crate::stats::CorrelationMatrix;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Total price cap for the outlier-free tab.
pub const OUTLIER_CAP: f64 = 10_000.0;

/// The dashboard's four panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    General,
    Filtered,
    Correlation,
    Filters,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::General, Tab::Filtered, Tab::Correlation, Tab::Filters];

    pub fn title(self) -> &'static str {
        match self {
            Tab::General => "General Data",
            Tab::Filtered => "Filtered Data",
            Tab::Correlation => "Correlation Chart",
            Tab::Filters => "Filters",
        }
    }
}

/// The full UI state, independent of rendering.
///
/// The table and correlation matrix never change after startup; only the
/// criteria and their derived view do, and those are recomputed exclusively
/// through [`AppState::refilter`] when a control reports a change.
pub struct AppState {
    /// The loaded table, owned by the process for its lifetime.
    pub table: &'static ListingTable,

    /// Pairwise correlation over the six numeric columns.
    pub correlation: CorrelationMatrix,

    /// Rows with total price at or under [`OUTLIER_CAP`] (static).
    pub outlier_free: Vec<usize>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of listings passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Min/max total price over the visible rows.
    pub summary: PriceSummary,

    /// Currently displayed panel.
    pub active_tab: Tab,

    /// Shared per-city chart colours.
    pub city_colors: CityColors,
}

impl AppState {
    /// Build the state for a freshly loaded table: correlation and the
    /// outlier-free view are computed once here, the interactive view
    /// starts from the default criteria.
    pub fn new(table: &'static ListingTable) -> Self {
        let correlation = CorrelationMatrix::compute(table, &NumericField::ALL);
        let outlier_free = below_total(table, OUTLIER_CAP);
        let criteria = FilterCriteria::for_table(table);
        let visible_indices = filtered_indices(table, &criteria);
        let summary = summarize(table, &visible_indices);
        let city_colors = CityColors::new(&table.cities);

        AppState {
            table,
            correlation,
            outlier_free,
            criteria,
            visible_indices,
            summary,
            active_tab: Tab::General,
            city_colors,
        }
    }

    /// Recompute the cached view and summary after a criteria change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.table, &self.criteria);
        self.summary = summarize(self.table, &self.visible_indices);
        log::debug!(
            "refiltered: {} of {} listings visible",
            self.visible_indices.len(),
            self.table.len()
        );
    }

    /// Toggle one city in the selection.
    pub fn toggle_city(&mut self, city: &str) {
        if !self.criteria.cities.remove(city) {
            self.criteria.cities.insert(city.to_string());
        }
        self.refilter();
    }

    /// Select every city.
    pub fn select_all_cities(&mut self) {
        self.criteria.cities = self.table.cities.iter().cloned().collect();
        self.refilter();
    }

    /// Clear the city selection. The resulting view is empty: membership
    /// in an empty set never holds.
    pub fn select_no_cities(&mut self) {
        self.criteria.cities.clear();
        self.refilter();
    }
}
