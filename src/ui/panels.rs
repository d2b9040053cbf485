use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Axis, Category};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter and axis dropdowns
// ---------------------------------------------------------------------------

/// A dropdown choice, applied after the widgets stop borrowing the state.
enum Change {
    Filter(Category, String),
    XAxis(Axis),
    YAxis(Axis),
    Reset,
}

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(engine) = &state.engine else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut change = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Categorical filters ----
            for category in Category::ALL {
                let current = engine.filters().value(category);
                ui.strong(category.label());
                egui::ComboBox::from_id_salt(category.header())
                    .selected_text(current)
                    .width(ui.available_width())
                    .show_ui(ui, |ui: &mut Ui| {
                        for option in engine.options(category) {
                            if ui
                                .selectable_label(current == option.as_str(), option.as_str())
                                .clicked()
                            {
                                change = Some(Change::Filter(category, option.clone()));
                            }
                        }
                    });
                ui.add_space(4.0);
            }

            if ui.button("Reset filters").clicked() {
                change = Some(Change::Reset);
            }
            ui.separator();

            // ---- Axis selectors ----
            let filters = engine.filters();
            if let Some(axis) = axis_combo(ui, "X-Axis", filters.x_axis) {
                change = Some(Change::XAxis(axis));
            }
            if let Some(axis) = axis_combo(ui, "Y-Axis", filters.y_axis) {
                change = Some(Change::YAxis(axis));
            }
        });

    match change {
        Some(Change::Filter(category, value)) => state.set_filter(category, value),
        Some(Change::XAxis(axis)) => state.set_x_axis(axis),
        Some(Change::YAxis(axis)) => state.set_y_axis(axis),
        Some(Change::Reset) => state.clear_filters(),
        None => {}
    }
}

/// Dropdown over the axis mapping; returns the newly clicked axis.
fn axis_combo(ui: &mut Ui, title: &str, current: Axis) -> Option<Axis> {
    let mut picked = None;
    ui.strong(title);
    egui::ComboBox::from_id_salt(title)
        .selected_text(current.display_name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for axis in Axis::ALL {
                if ui
                    .selectable_label(current == axis, axis.display_name())
                    .clicked()
                {
                    picked = Some(axis);
                }
            }
        });
    ui.add_space(4.0);
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(engine), Some(view)) = (&state.engine, state.view()) {
            ui.label(format!(
                "{} of {} movies selected",
                view.count(),
                engine.dataset().len()
            ));
        }
        if let Some(source) = &state.source {
            ui.label(RichText::new(source.display().to_string()).weak());
        }

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Movie table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movie metadata")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
