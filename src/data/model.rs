use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::error::SelectionError;

/// Separator between the individual tokens of the `genres` field.
pub const GENRE_DELIMITER: char = '|';

/// Columns a source file must provide. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "language",
    "country",
    "color",
    "content_rating",
    "genres",
    "movie_title",
    "title_year",
    "imdb_score",
    "duration",
    "budget",
    "gross",
];

// ---------------------------------------------------------------------------
// Movie – one row of the source table
// ---------------------------------------------------------------------------

/// A single film with every required attribute present.
#[derive(Debug, Clone)]
pub struct Movie {
    pub movie_title: String,
    pub title_year: f64,
    pub imdb_score: f64,
    pub duration: f64,
    pub budget: f64,
    pub gross: f64,
    pub language: String,
    pub country: String,
    pub color: String,
    pub content_rating: String,
    /// `|`-delimited, e.g. `"Action|Adventure|Sci-Fi"`.
    pub genres: String,
}

// -- Manual Eq/Hash so duplicates can be detected with a HashSet --

impl Movie {
    fn numeric_bits(&self) -> [u64; 5] {
        [
            self.title_year.to_bits(),
            self.imdb_score.to_bits(),
            self.duration.to_bits(),
            self.budget.to_bits(),
            self.gross.to_bits(),
        ]
    }

    fn text_fields(&self) -> [&str; 6] {
        [
            &self.movie_title,
            &self.language,
            &self.country,
            &self.color,
            &self.content_rating,
            &self.genres,
        ]
    }

    /// Iterate over the individual genre tokens.
    pub fn genre_tokens(&self) -> impl Iterator<Item = &str> {
        self.genres
            .split(GENRE_DELIMITER)
            .filter(|g| !g.is_empty())
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.numeric_bits() == other.numeric_bits() && self.text_fields() == other.text_fields()
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numeric_bits().hash(state);
        self.text_fields().hash(state);
    }
}

// ---------------------------------------------------------------------------
// MovieDataset – the cleaned, immutable table
// ---------------------------------------------------------------------------

/// Deduplicated movies in file order. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    movies: Vec<Movie>,
}

impl MovieDataset {
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        MovieDataset { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Category – the filterable text columns
// ---------------------------------------------------------------------------

/// A categorical column that can be filtered from a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Language,
    Country,
    Genres,
    Color,
    ContentRating,
}

impl Category {
    /// All filter columns in the order the controls are shown.
    pub const ALL: [Category; 5] = [
        Category::Language,
        Category::Country,
        Category::Genres,
        Category::Color,
        Category::ContentRating,
    ];

    /// Column name in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Category::Language => "language",
            Category::Country => "country",
            Category::Genres => "genres",
            Category::Color => "color",
            Category::ContentRating => "content_rating",
        }
    }

    /// Title of the dropdown control.
    pub fn label(self) -> &'static str {
        match self {
            Category::Language => "Languages",
            Category::Country => "Countries",
            Category::Genres => "Genre",
            Category::Color => "Color",
            Category::ContentRating => "Content rating",
        }
    }

    /// Whether the field holds several `|`-delimited tokens.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Category::Genres)
    }

    pub fn value(self, movie: &Movie) -> &str {
        match self {
            Category::Language => &movie.language,
            Category::Country => &movie.country,
            Category::Genres => &movie.genres,
            Category::Color => &movie.color,
            Category::ContentRating => &movie.content_rating,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Category {
    type Err = SelectionError;

    /// Parse a source column name (`"content_rating"`, `"genres"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.header() == s)
            .ok_or_else(|| SelectionError::UnknownColumn(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Axis – the numeric fields selectable for x / y
// ---------------------------------------------------------------------------

/// A numeric field that can be plotted on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    ImdbScore,
    Year,
    Duration,
    Budget,
    Gross,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::ImdbScore,
        Axis::Year,
        Axis::Duration,
        Axis::Budget,
        Axis::Gross,
    ];

    /// Name shown in the axis dropdown and on the plot.
    pub fn display_name(self) -> &'static str {
        match self {
            Axis::ImdbScore => "IMDb score",
            Axis::Year => "Year",
            Axis::Duration => "Duration (minutes)",
            Axis::Budget => "Budget (USD)",
            Axis::Gross => "Gross earning (USD)",
        }
    }

    /// Underlying column name in the source file.
    pub fn field_name(self) -> &'static str {
        match self {
            Axis::ImdbScore => "imdb_score",
            Axis::Year => "title_year",
            Axis::Duration => "duration",
            Axis::Budget => "budget",
            Axis::Gross => "gross",
        }
    }

    pub fn value(self, movie: &Movie) -> f64 {
        match self {
            Axis::ImdbScore => movie.imdb_score,
            Axis::Year => movie.title_year,
            Axis::Duration => movie.duration,
            Axis::Budget => movie.budget,
            Axis::Gross => movie.gross,
        }
    }

    /// Look up an axis by its display name.
    pub fn from_display_name(name: &str) -> Result<Self, SelectionError> {
        Axis::ALL
            .into_iter()
            .find(|a| a.display_name() == name)
            .ok_or_else(|| SelectionError::UnknownAxis(name.to_string()))
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Axis {
    type Err = SelectionError;

    /// Accepts the display name (`"Gross earning (USD)"`) or the field name (`"gross"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::from_display_name(s).or_else(|err| {
            Axis::ALL
                .into_iter()
                .find(|a| a.field_name() == s)
                .ok_or(err)
        })
    }
}
