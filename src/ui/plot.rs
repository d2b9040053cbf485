use eframe::egui::{Color32, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::data::projection::Projection;
use crate::state::AppState;

const POINT_COLOR: Color32 = Color32::from_rgb(50, 136, 189);

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the movie scatter plot in the central panel.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.view() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore movies  (File → Open…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(view.title());
    });

    let projection = &view.projection;
    if projection.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.weak("No movies match the current filters");
        });
    }
    let points: PlotPoints = projection.points().into_iter().collect();

    let markers = Points::new(points)
        .name("movies")
        .color(POINT_COLOR)
        .shape(MarkerShape::Circle)
        .filled(true)
        .radius(3.0);

    Plot::new("movie_scatter")
        .x_axis_label(view.x_axis.display_name())
        .y_axis_label(view.y_axis.display_name())
        .label_formatter(move |_name: &str, value: &PlotPoint| hover_label(projection, value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(markers);
        });
}

/// Title and year of the movie nearest to the cursor.
fn hover_label(projection: &Projection, at: &PlotPoint) -> String {
    match nearest(projection, at.x, at.y) {
        Some(i) => format!("{}\nYear: {}", projection.titles[i].trim(), projection.years[i]),
        None => String::new(),
    }
}

/// Index of the point closest to `(x, y)`, with both axes scaled to their
/// data range so that budgets in the millions don't swamp scores.
fn nearest(projection: &Projection, x: f64, y: f64) -> Option<usize> {
    fn span(values: &[f64]) -> f64 {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let range = max - min;
        if range.abs() < f64::EPSILON {
            1.0
        } else {
            range
        }
    }

    let (sx, sy) = (span(&projection.xs), span(&projection.ys));
    projection
        .xs
        .iter()
        .zip(&projection.ys)
        .map(|(&px, &py)| ((px - x) / sx).powi(2) + ((py - y) / sy).powi(2))
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}
