use eframe::egui;

use crate::data::loader;
use crate::state::{AppState, Tab};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RentRadarApp {
    /// Fully initialised state, or the message of a fatal load failure.
    state: Result<AppState, String>,
}

impl RentRadarApp {
    /// Load the listings table and build the initial state. The fetch is
    /// blocking: it either completes before the first frame or the session
    /// starts in the error screen.
    pub fn new() -> Self {
        let state = match loader::load() {
            Ok(table) => Ok(AppState::new(table)),
            Err(e) => {
                log::error!("Failed to load listings: {e}");
                Err(e.to_string())
            }
        };
        RentRadarApp { state }
    }
}

impl eframe::App for RentRadarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match &mut self.state {
            Ok(state) => state,
            Err(message) => {
                let message = message.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui: &mut egui::Ui| {
                        ui.heading(format!("Could not start dashboard\n\n{message}"));
                    });
                });
                return;
            }
        };

        // ---- Top panel: title and tab bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Left side panel: filter controls, on the Filters tab ----
        if state.active_tab == Tab::Filters {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::filter_controls(ui, state);
                });
        }

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| match state.active_tab {
            Tab::General => panels::general_tab(ui, state),
            Tab::Filtered => panels::filtered_tab(ui, state),
            Tab::Correlation => panels::correlation_tab(ui, state),
            Tab::Filters => panels::filters_tab(ui, state),
        });
    }
}
