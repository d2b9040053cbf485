use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::engine::SelectionView;

/// Table of the selected movies with the two plotted values.
pub fn selection_table(ui: &mut Ui, view: &SelectionView) {
    let p = &view.projection;
    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 4.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(280.0).at_least(120.0).clip(true))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Title");
            });
            header.col(|ui| {
                ui.strong("Year");
            });
            header.col(|ui| {
                ui.strong(view.x_axis.display_name());
            });
            header.col(|ui| {
                ui.strong(view.y_axis.display_name());
            });
        })
        .body(|body| {
            body.rows(row_height, p.count(), |mut row| {
                let i = row.index();
                row.col(|ui| {
                    ui.label(p.titles[i].trim());
                });
                row.col(|ui| {
                    ui.label(p.years[i].to_string());
                });
                row.col(|ui| {
                    ui.label(p.xs[i].to_string());
                });
                row.col(|ui| {
                    ui.label(p.ys[i].to_string());
                });
            });
        });
}
