use std::path::{Path, PathBuf};

use crate::data::filter::FilterState;
use crate::data::loader::load_file;
use crate::data::model::{Axis, Category, MovieDataset};
use crate::engine::{LatestView, SelectionEngine, SelectionView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset with its filter state; `None` only if a load never succeeded.
    pub engine: Option<SelectionEngine<LatestView>>,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Whether the selected-movies table is shown under the plot.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            engine: None,
            source: None,
            show_table: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// State for a dataset loaded at startup.
    pub fn new(dataset: MovieDataset, filters: FilterState, source: PathBuf) -> Self {
        let mut state = Self::default();
        state.install(dataset, filters, source);
        state
    }

    fn install(&mut self, dataset: MovieDataset, filters: FilterState, source: PathBuf) {
        self.engine = Some(SelectionEngine::new(dataset, filters, LatestView::default()));
        self.source = Some(source);
        self.status_message = None;
    }

    /// Replace the dataset with the contents of `path`.
    ///
    /// Filters go back to "All" since the old values may not exist in the
    /// new file; the axis choices carry over. On failure the current
    /// dataset stays and the error is shown in the status line.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                let mut filters = FilterState::default();
                if let Some(engine) = &self.engine {
                    filters.x_axis = engine.filters().x_axis;
                    filters.y_axis = engine.filters().y_axis;
                }
                self.install(dataset, filters, path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Most recently rendered selection.
    pub fn view(&self) -> Option<&SelectionView> {
        self.engine.as_ref().and_then(|e| e.sink().get())
    }

    pub fn set_filter(&mut self, category: Category, value: String) {
        if let Some(engine) = &mut self.engine {
            engine.set_filter(category, value);
        }
    }

    pub fn set_x_axis(&mut self, axis: Axis) {
        if let Some(engine) = &mut self.engine {
            engine.set_x_axis(axis);
        }
    }

    pub fn set_y_axis(&mut self, axis: Axis) {
        if let Some(engine) = &mut self.engine {
            engine.set_y_axis(axis);
        }
    }

    pub fn clear_filters(&mut self) {
        if let Some(engine) = &mut self.engine {
            engine.clear_filters();
        }
    }
}
