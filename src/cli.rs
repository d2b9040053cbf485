use std::path::PathBuf;

use clap::Parser;

use crate::data::error::SelectionError;
use crate::data::filter::FilterState;
use crate::data::model::{Axis, Category};
use crate::data::options::WILDCARD;

#[derive(Parser, Debug)]
#[command(name = "movie-explorer")]
#[command(
    about = "Filter IMDb movie metadata and plot two numeric fields against each other",
    long_about = None
)]
pub struct Args {
    /// Movie table to load (.csv, .json or .parquet)
    #[arg(default_value = "imdb_movie_metadata.csv")]
    pub data: PathBuf,

    /// X axis: "IMDb score", "Year", "Duration (minutes)", "Budget (USD)" or "Gross earning (USD)"
    #[arg(long, default_value = "Year")]
    pub x_axis: Axis,

    /// Y axis, same choices as --x-axis
    #[arg(long, default_value = "IMDb score")]
    pub y_axis: Axis,

    #[arg(long, default_value = WILDCARD)]
    pub language: String,

    #[arg(long, default_value = WILDCARD)]
    pub country: String,

    /// A single genre, e.g. "Comedy"
    #[arg(long, default_value = WILDCARD)]
    pub genre: String,

    /// "Color" or "Black and White"
    #[arg(long, default_value = WILDCARD)]
    pub color: String,

    #[arg(long, default_value = WILDCARD)]
    pub content_rating: String,

    /// Filter by source column name, e.g. --filter country=USA (repeatable,
    /// applied after the dedicated flags)
    #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_column_value)]
    pub filters: Vec<(String, String)>,

    /// Write the selection as CSV to stdout instead of opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    /// Initial filter state from the command-line flags.
    ///
    /// Fails on a `--filter` column that has no dropdown.
    pub fn filter_state(&self) -> Result<FilterState, SelectionError> {
        let mut filters = FilterState::default();
        filters.set(Category::Language, self.language.as_str());
        filters.set(Category::Country, self.country.as_str());
        filters.set(Category::Genres, self.genre.as_str());
        filters.set(Category::Color, self.color.as_str());
        filters.set(Category::ContentRating, self.content_rating.as_str());
        filters.x_axis = self.x_axis;
        filters.y_axis = self.y_axis;
        for (column, value) in &self.filters {
            filters.set_by_name(column, value)?;
        }
        Ok(filters)
    }
}

fn parse_column_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(column, value)| (column.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{arg}'"))
}
