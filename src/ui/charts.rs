use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread, Legend, MarkerShape, Plot, PlotPoints, Points, Polygon,
};

use crate::color::{annotation_color, diverging_color, generate_palette};
use crate::data::model::{Listing, NumericField};
use crate::state::AppState;
use crate::stats::BoxStats;

const PLOT_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

/// One box per city for a derived listing value, over the given rows.
pub fn box_by_city(
    ui: &mut Ui,
    state: &AppState,
    indices: &[usize],
    id: &str,
    y_label: &str,
    value: impl Fn(&Listing) -> f64,
) {
    let groups = state.table.values_by_city(indices, value);

    let mut boxes = Vec::with_capacity(groups.len());
    for (i, (city, values)) in groups.iter().enumerate() {
        let Some(stats) = BoxStats::of(values) else {
            continue;
        };
        let color = state.city_colors.color_for(city);
        let spread = BoxSpread::new(
            stats.lower_whisker,
            stats.quartile1,
            stats.median,
            stats.quartile3,
            stats.upper_whisker,
        );
        boxes.push(
            BoxElem::new(i as f64, spread)
                .name(city)
                .box_width(0.5)
                .whisker_width(0.3)
                .fill(color.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, color)),
        );
    }

    let names: Vec<String> = groups.iter().map(|(city, _)| city.clone()).collect();

    Plot::new(id.to_string())
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Share of listings accepting animals, drawn as polygon sectors.
pub fn animal_pie(ui: &mut Ui, state: &AppState) {
    let slices: Vec<(String, usize)> = crate::data::model::AnimalPolicy::ALL
        .iter()
        .map(|&policy| {
            let count = state
                .table
                .listings
                .iter()
                .filter(|l| l.animal == policy)
                .count();
            (policy.to_string(), count)
        })
        .collect();

    let total: usize = slices.iter().map(|(_, c)| c).sum();
    if total == 0 {
        ui.label("No listings to chart.");
        return;
    }

    let colors = generate_palette(slices.len());
    let mut start_angle = std::f64::consts::FRAC_PI_2; // 12 o'clock, clockwise

    Plot::new("animal_pie")
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for ((label, count), color) in slices.iter().zip(colors) {
                let fraction = *count as f64 / total as f64;
                if fraction == 0.0 {
                    continue;
                }
                let sweep = fraction * std::f64::consts::TAU;
                let polygon = pie_sector(start_angle, sweep)
                    .fill_color(color.gamma_multiply(0.85))
                    .stroke(Stroke::new(1.0, Color32::WHITE))
                    .name(format!("{label} – {:.1}%", fraction * 100.0));
                plot_ui.polygon(polygon);
                start_angle -= sweep;
            }
        });
}

fn pie_sector(start_angle: f64, sweep: f64) -> Polygon<'static> {
    // Enough arc segments to look round even for thin slices.
    let steps = ((sweep / std::f64::consts::TAU) * 96.0).ceil().max(2.0) as usize;

    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start_angle - sweep * (i as f64 / steps as f64);
        points.push([angle.cos(), angle.sin()]);
    }
    Polygon::new(PlotPoints::from(points))
}

// ---------------------------------------------------------------------------
// Scatter plots
// ---------------------------------------------------------------------------

/// Scatter of a numeric field against total price, coloured by city with
/// point size following the room count.
pub fn scatter_vs_total(
    ui: &mut Ui,
    state: &AppState,
    indices: &[usize],
    id: &str,
    x_field: NumericField,
) {
    // Group by (city, rooms) so each group gets one radius; the legend
    // merges entries sharing a city name.
    let mut groups: Vec<(String, i64, Vec<[f64; 2]>)> = Vec::new();
    for &i in indices {
        let listing = &state.table.listings[i];
        let point = [x_field.value(listing), listing.total];
        match groups
            .iter_mut()
            .find(|(city, rooms, _)| *city == listing.city && *rooms == listing.rooms)
        {
            Some((_, _, points)) => points.push(point),
            None => groups.push((listing.city.clone(), listing.rooms, vec![point])),
        }
    }

    Plot::new(id.to_string())
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_field.label())
        .y_axis_label("total (R$)")
        .show(ui, |plot_ui| {
            for (city, rooms, points) in groups {
                let color = state.city_colors.color_for(&city);
                let radius = 1.5 + (rooms as f32).min(8.0) * 0.6;
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(city)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(radius),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated heatmap of the correlation matrix, one coloured cell per
/// field pair.
pub fn correlation_heatmap(ui: &mut Ui, state: &AppState) {
    let fields = state.correlation.fields();

    egui::Grid::new("correlation_grid")
        .spacing([2.0, 2.0])
        .show(ui, |ui| {
            // Header row: blank corner, then column labels.
            ui.label("");
            for field in fields {
                ui.add_sized(
                    [86.0, 30.0],
                    egui::Label::new(RichText::new(field.label()).strong()),
                );
            }
            ui.end_row();

            for (row, field) in fields.iter().enumerate() {
                ui.add_sized(
                    [110.0, 38.0],
                    egui::Label::new(RichText::new(field.label()).strong()),
                );
                for col in 0..fields.len() {
                    let r = state.correlation.get(row, col);
                    egui::Frame::new()
                        .fill(diverging_color(r))
                        .inner_margin(egui::Margin::symmetric(4, 4))
                        .show(ui, |ui| {
                            ui.add_sized(
                                [78.0, 30.0],
                                egui::Label::new(
                                    RichText::new(format!("{r:.2}"))
                                        .monospace()
                                        .color(annotation_color(r)),
                                ),
                            );
                        });
                }
                ui.end_row();
            }
        });
}
