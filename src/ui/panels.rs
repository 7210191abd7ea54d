use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::YearFilter;
use crate::data::loader;
use crate::data::model::{Department, Term};
use crate::state::{AppState, YearMode};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year selection (range or pick-years variant) ----
            ui.strong("Years");
            let mut mode = state.year_mode;
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut mode, YearMode::Range, "Range");
                ui.radio_value(&mut mode, YearMode::Pick, "Pick years");
            });
            state.set_year_mode(mode);

            let (min_year, max_year) = state.dataset.year_span().unwrap_or((0, 0));
            match state.filters.years.clone() {
                YearFilter::Range { from, to } => {
                    let (mut from, mut to) = (from, to);
                    ui.add(egui::Slider::new(&mut from, min_year..=max_year).text("From"));
                    ui.add(egui::Slider::new(&mut to, min_year..=max_year).text("To"));
                    // Keep the bounds ordered while dragging.
                    if to < from {
                        to = from;
                    }
                    if state.filters.years != (YearFilter::Range { from, to }) {
                        state.set_year_range(from, to);
                    }
                }
                YearFilter::Years(selected) => {
                    let years = state.dataset.years.clone();
                    for year in years {
                        let mut checked = selected.contains(&year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                }
            }
            ui.separator();

            // ---- Term membership ----
            ui.strong("Terms");
            for term in Term::ALL {
                let mut checked = state.filters.terms.contains(&term);
                if ui.checkbox(&mut checked, term.label()).changed() {
                    state.toggle_term(term);
                }
            }
            ui.separator();

            // ---- Department selector ----
            ui.strong("Department");
            let current = state.filters.department;
            let current_label = current.map(|d| d.label()).unwrap_or("All departments");
            egui::ComboBox::from_id_salt("department_filter")
                .selected_text(current_label)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(current.is_none(), "All departments")
                        .clicked()
                    {
                        state.set_department(None);
                    }
                    for dept in Department::ALL {
                        if ui
                            .selectable_label(current == Some(dept), dept.label())
                            .clicked()
                        {
                            state.set_department(Some(dept));
                        }
                    }
                });
            ui.separator();

            ui.label(format!(
                "{} of {} records selected",
                state.visible_indices.len(),
                state.dataset.len()
            ));
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered CSV…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let text = RichText::new(&msg.text);
            if msg.is_error {
                ui.label(text.color(Color32::RED));
            } else {
                ui.label(text.weak());
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

/// Ask for a target path and write the currently filtered view as CSV
/// (identical schema to the input).
pub fn export_dialog(state: &mut AppState) {
    let suggested = match &state.filters.years {
        YearFilter::Range { from, to } => format!("filtered_data_{from}_{to}.csv"),
        YearFilter::Years(_) => "filtered_data.csv".to_string(),
    };
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(suggested)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match loader::export_csv(&state.dataset, &state.visible_indices, &path) {
            Ok(()) => {
                let rows = state.visible_indices.len();
                log::info!("Exported {rows} rows to {}", path.display());
                state.info(format!("Exported {rows} rows to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                state.error(format!("Export failed: {e}"));
            }
        }
    }
}
