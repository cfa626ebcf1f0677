use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::data::model::{AnimalPolicy, Furniture};
use crate::state::{AppState, Tab, OUTLIER_CAP};
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Top bar – title, tab selector, row counts
// ---------------------------------------------------------------------------

/// Render the top menu / tab bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Rent Radar");
        ui.separator();

        for tab in Tab::ALL {
            ui.selectable_value(&mut state.active_tab, tab, tab.title());
        }

        ui.separator();
        ui.label(format!(
            "{} listings, {} matching filters",
            state.table.len(),
            state.visible_indices.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets (Filters tab only)
// ---------------------------------------------------------------------------

/// Render the filter controls. The cached view is recomputed only when a
/// control actually changes.
pub fn filter_controls(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            city_selector(ui, state);
            ui.separator();

            let mut changed = false;
            let rooms_bounds = state.table.rooms_range;
            let bathroom_bounds = state.table.bathroom_range;
            let parking_bounds = state.table.parking_range;

            changed |= range_slider(ui, "Rooms", rooms_bounds, &mut state.criteria.rooms);
            changed |= range_slider(
                ui,
                "Bathrooms",
                bathroom_bounds,
                &mut state.criteria.bathroom,
            );
            changed |= range_slider(
                ui,
                "Parking spaces",
                parking_bounds,
                &mut state.criteria.parking,
            );
            ui.separator();

            changed |= choice_selector(
                ui,
                "animal_policy",
                "Accepts animals?",
                &AnimalPolicy::ALL,
                &mut state.criteria.animal,
            );
            changed |= choice_selector(
                ui,
                "furniture",
                "Furnished?",
                &Furniture::ALL,
                &mut state.criteria.furniture,
            );

            if changed {
                state.refilter();
            }
        });
}

fn city_selector(ui: &mut Ui, state: &mut AppState) {
    let cities = state.table.cities.clone();
    let n_selected = state.criteria.cities.len();

    ui.strong(format!("City  ({n_selected}/{})", cities.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_cities();
        }
        if ui.small_button("None").clicked() {
            state.select_no_cities();
        }
    });

    for city in &cities {
        let mut checked = state.criteria.cities.contains(city);
        let text = RichText::new(city).color(state.city_colors.color_for(city));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_city(city);
        }
    }
}

/// Two coupled sliders forming an inclusive [min, max] range.
fn range_slider(ui: &mut Ui, label: &str, bounds: (i64, i64), range: &mut (i64, i64)) -> bool {
    let mut changed = false;
    ui.strong(label);
    ui.horizontal(|ui: &mut Ui| {
        ui.label("min");
        changed |= ui
            .add(Slider::new(&mut range.0, bounds.0..=bounds.1))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("max");
        changed |= ui
            .add(Slider::new(&mut range.1, bounds.0..=bounds.1))
            .changed();
    });
    if changed {
        // Keep the pair ordered.
        if range.1 < range.0 {
            range.1 = range.0;
        }
    }
    changed
}

/// Exclusive choice between a handful of values.
fn choice_selector<T: Copy + PartialEq + std::fmt::Display>(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[T],
    current: &mut T,
) -> bool {
    let before = *current;
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &option in options {
                ui.selectable_value(current, option, option.to_string());
            }
        });
    *current != before
}

// ---------------------------------------------------------------------------
// Tab bodies
// ---------------------------------------------------------------------------

/// "General Data": unfiltered distributions across every listing.
pub fn general_tab(ui: &mut Ui, state: &AppState) {
    ui.heading("Overall distribution of total price by city");
    let all: Vec<usize> = (0..state.table.len()).collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts::box_by_city(ui, state, &all, "general_total", "total (R$)", |l| l.total);

            ui.label("Rooms by city");
            charts::box_by_city(ui, state, &all, "general_rooms", "rooms", |l| {
                l.rooms as f64
            });

            ui.label("Parking spaces by city");
            charts::box_by_city(ui, state, &all, "general_parking", "parking spaces", |l| {
                l.parking_spaces as f64
            });

            ui.label("Animal acceptance");
            charts::animal_pie(ui, state);
        });
}

/// "Filtered Data": the same price distribution with outliers removed.
pub fn filtered_tab(ui: &mut Ui, state: &AppState) {
    ui.heading(format!(
        "Total price by city (≤ {} R$, {} listings)",
        OUTLIER_CAP,
        state.outlier_free.len()
    ));
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts::box_by_city(
                ui,
                state,
                &state.outlier_free,
                "filtered_total",
                "total (R$)",
                |l| l.total,
            );
        });
}

/// "Correlation Chart": annotated heatmap over the six numeric columns.
pub fn correlation_tab(ui: &mut Ui, state: &AppState) {
    ui.heading("Correlation between numeric attributes");
    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts::correlation_heatmap(ui, state);
        });
}

/// "Filters": summary lines plus charts over the interactive view, or a
/// placeholder when nothing matches.
pub fn filters_tab(ui: &mut Ui, state: &AppState) {
    ui.heading("Filtered statistics");
    ui.label(format!("Minimum price: R${}", state.summary.min_total));
    ui.label(format!("Maximum price: R${}", state.summary.max_total));
    ui.separator();

    if state.visible_indices.is_empty() {
        ui.label("No listings match the selected filters.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts::box_by_city(
                ui,
                state,
                &state.visible_indices,
                "filters_total",
                "total (R$)",
                |l| l.total,
            );

            ui.label("Area vs. total price");
            charts::scatter_vs_total(
                ui,
                state,
                &state.visible_indices,
                "filters_area_scatter",
                crate::data::model::NumericField::Area,
            );

            ui.label("Parking spaces vs. total price");
            charts::scatter_vs_total(
                ui,
                state,
                &state.visible_indices,
                "filters_parking_scatter",
                crate::data::model::NumericField::ParkingSpaces,
            );
        });
}
