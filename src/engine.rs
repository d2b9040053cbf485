use std::collections::BTreeMap;

use crate::data::filter::{select, FilterState};
use crate::data::model::{Axis, Category, MovieDataset};
use crate::data::options::all_options;
use crate::data::projection::{project, Projection};

// ---------------------------------------------------------------------------
// Selection view and render sinks
// ---------------------------------------------------------------------------

/// A freshly computed selection, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionView {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub projection: Projection,
}

impl SelectionView {
    pub fn count(&self) -> usize {
        self.projection.count()
    }

    pub fn title(&self) -> String {
        self.projection.title()
    }
}

/// Consumer of selection results: the plot, a CSV writer, a test recorder.
pub trait RenderSink {
    fn render(&mut self, view: &SelectionView);
}

/// Sink that keeps only the most recent view, for immediate-mode UIs that
/// redraw from state every frame.
#[derive(Debug, Default)]
pub struct LatestView {
    view: Option<SelectionView>,
}

impl LatestView {
    pub fn get(&self) -> Option<&SelectionView> {
        self.view.as_ref()
    }
}

impl RenderSink for LatestView {
    fn render(&mut self, view: &SelectionView) {
        self.view = Some(view.clone());
    }
}

// ---------------------------------------------------------------------------
// Engine: dataset + filter state + sink
// ---------------------------------------------------------------------------

/// Application state for one loaded dataset.
///
/// The dataset is read-only for the engine's lifetime. Every mutation of the
/// filter state synchronously recomputes the selection and hands it to the
/// sink; nothing is cached between mutations.
pub struct SelectionEngine<S> {
    dataset: MovieDataset,
    options: BTreeMap<Category, Vec<String>>,
    filters: FilterState,
    sink: S,
}

impl<S: RenderSink> SelectionEngine<S> {
    /// Build the engine and render the initial selection.
    pub fn new(dataset: MovieDataset, filters: FilterState, sink: S) -> Self {
        let options = all_options(&dataset);
        let mut engine = Self {
            dataset,
            options,
            filters,
            sink,
        };
        engine.refresh();
        engine
    }

    pub fn dataset(&self) -> &MovieDataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Dropdown options for `category`, `"All"` first.
    pub fn options(&self, category: Category) -> &[String] {
        self.options
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn set_filter(&mut self, category: Category, value: impl Into<String>) {
        self.filters.set(category, value);
        self.refresh();
    }

    pub fn set_x_axis(&mut self, axis: Axis) {
        self.filters.x_axis = axis;
        self.refresh();
    }

    pub fn set_y_axis(&mut self, axis: Axis) {
        self.filters.y_axis = axis;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_filters();
        self.refresh();
    }

    /// Compute the selection for the current filter state.
    pub fn view(&self) -> SelectionView {
        let subset = select(&self.dataset, &self.filters);
        SelectionView {
            x_axis: self.filters.x_axis,
            y_axis: self.filters.y_axis,
            projection: project(&subset, self.filters.x_axis, self.filters.y_axis),
        }
    }

    /// Recompute and push the selection to the sink.
    pub fn refresh(&mut self) {
        let view = self.view();
        log::debug!(
            "{} of {} movies selected ({} vs {})",
            view.count(),
            self.dataset.len(),
            view.y_axis,
            view.x_axis
        );
        self.sink.render(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::movie;

    impl RenderSink for Vec<SelectionView> {
        fn render(&mut self, view: &SelectionView) {
            self.push(view.clone());
        }
    }

    fn dataset() -> MovieDataset {
        let mut heat = movie("Heat");
        heat.genres = "Crime|Drama".to_string();
        let mut up = movie("Up");
        up.genres = "Animation|Comedy".to_string();
        up.title_year = 2009.0;
        MovieDataset::from_movies(vec![heat, up])
    }

    #[test]
    fn renders_initial_selection_on_creation() {
        let engine =
            SelectionEngine::new(dataset(), FilterState::default(), Vec::<SelectionView>::new());
        let renders = engine.sink();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].count(), 2);
        assert_eq!(renders[0].x_axis, Axis::Year);
        assert_eq!(renders[0].y_axis, Axis::ImdbScore);
    }

    #[test]
    fn every_mutation_renders_a_fresh_view() {
        let mut engine =
            SelectionEngine::new(dataset(), FilterState::default(), Vec::<SelectionView>::new());
        engine.set_filter(Category::Genres, "Comedy");
        engine.set_x_axis(Axis::Budget);
        engine.set_y_axis(Axis::Gross);
        engine.clear_filters();

        let renders = engine.into_sink();
        let counts: Vec<usize> = renders.iter().map(SelectionView::count).collect();
        assert_eq!(counts, vec![2, 1, 1, 1, 2]);
        assert_eq!(renders[1].projection.titles, vec!["Up"]);
        assert_eq!(renders[2].x_axis, Axis::Budget);
        assert_eq!(renders[3].y_axis, Axis::Gross);
        assert_eq!(renders[3].projection.ys, vec![2_000_000.0]);
    }

    #[test]
    fn view_depends_only_on_filter_state() {
        let mut engine =
            SelectionEngine::new(dataset(), FilterState::default(), LatestView::default());
        engine.set_filter(Category::Genres, "Drama");
        let first = engine.view();
        engine.refresh();
        assert_eq!(engine.view(), first);
        assert_eq!(engine.sink().get(), Some(&first));
        assert_eq!(first.title(), "1 movies selected");
    }

    #[test]
    fn options_are_computed_per_column() {
        let engine =
            SelectionEngine::new(dataset(), FilterState::default(), LatestView::default());
        assert_eq!(
            engine.options(Category::Genres),
            ["All", "Animation", "Comedy", "Crime", "Drama"]
        );
        assert_eq!(engine.options(Category::Country), ["All", "USA"]);
    }
}
