use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::data::filter::FilterState;
use crate::data::model::MovieDataset;
use crate::engine::{RenderSink, SelectionEngine, SelectionView};

/// Sink writing each rendered selection as CSV:
/// `movie_title,title_year,<x field>,<y field>`.
///
/// Write errors are kept until [`CsvSink::finish`] since rendering can't fail.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
    error: Option<csv::Error>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            rows: 0,
            error: None,
        }
    }

    /// Rows written by the last render.
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn write_view(&mut self, view: &SelectionView) -> Result<(), csv::Error> {
        self.writer.write_record([
            "movie_title",
            "title_year",
            view.x_axis.field_name(),
            view.y_axis.field_name(),
        ])?;
        let p = &view.projection;
        for i in 0..p.count() {
            self.writer.write_record([
                p.titles[i].trim().to_string(),
                p.years[i].to_string(),
                p.xs[i].to_string(),
                p.ys[i].to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Surface any deferred write error and hand back the output.
    pub fn finish(self) -> Result<W> {
        if let Some(e) = self.error {
            return Err(e).context("writing CSV");
        }
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("flushing CSV: {}", e.error()))
    }
}

impl<W: Write> RenderSink for CsvSink<W> {
    fn render(&mut self, view: &SelectionView) {
        if self.error.is_some() {
            return;
        }
        self.rows = view.count();
        if let Err(e) = self.write_view(view) {
            self.error = Some(e);
        }
    }
}

/// Headless mode: compute one selection and write it to `out`.
pub fn write_selection<W: Write>(dataset: MovieDataset, filters: FilterState, out: W) -> Result<()> {
    let total = dataset.len();
    let engine = SelectionEngine::new(dataset, filters, CsvSink::new(out));
    let sink = engine.into_sink();
    log::info!("{} of {total} movies selected", sink.rows());
    sink.finish().map(drop)
}
