use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::error::LoadError;
use super::model::{Movie, MovieDataset, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a movie dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one movie per line (the IMDb metadata export)
/// * `.json`    – `[{ "movie_title": "...", "imdb_score": 7.9, ... }, ...]`
/// * `.parquet` – flat columns named like the CSV header
///
/// Rows missing any required field are dropped, then exact duplicates.
/// A file that leaves no rows behind is an error.
pub fn load_file(path: &Path) -> Result<MovieDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let dataset = match ext.as_str() {
        "csv" => load_csv(open()?),
        "json" => load_json(BufReader::new(open()?)),
        "parquet" | "pq" => load_parquet(open()?),
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    }?;

    log::info!("Loaded {} movies from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Raw rows and cleaning
// ---------------------------------------------------------------------------

/// Cell texts read as missing, on top of absent cells. Matches the default
/// `na_values` of the pandas CSV reader that produced the IMDb exports.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

/// One source row before cleaning; any field may be absent.
#[derive(Debug, Default, Deserialize)]
struct RawMovie {
    movie_title: Option<String>,
    title_year: Option<f64>,
    imdb_score: Option<f64>,
    duration: Option<f64>,
    budget: Option<f64>,
    gross: Option<f64>,
    language: Option<String>,
    country: Option<String>,
    color: Option<String>,
    content_rating: Option<String>,
    genres: Option<String>,
}

impl RawMovie {
    /// `None` if any required field is missing.
    fn into_movie(self) -> Option<Movie> {
        fn text(v: Option<String>) -> Option<String> {
            v.filter(|s| !is_missing(s))
        }
        fn number(v: Option<f64>) -> Option<f64> {
            v.filter(|n| !n.is_nan())
        }

        Some(Movie {
            movie_title: text(self.movie_title)?,
            title_year: number(self.title_year)?,
            imdb_score: number(self.imdb_score)?,
            duration: number(self.duration)?,
            budget: number(self.budget)?,
            gross: number(self.gross)?,
            language: text(self.language)?,
            country: text(self.country)?,
            color: text(self.color)?,
            content_rating: text(self.content_rating)?,
            genres: text(self.genres)?,
        })
    }
}

/// Drop incomplete rows, then duplicates (first occurrence wins), keeping order.
fn clean<I>(rows: I) -> Result<MovieDataset, LoadError>
where
    I: IntoIterator<Item = Result<RawMovie, LoadError>>,
{
    let mut seen: HashSet<Movie> = HashSet::new();
    let mut movies = Vec::new();
    let mut incomplete = 0usize;
    let mut duplicates = 0usize;

    for raw in rows {
        let Some(movie) = raw?.into_movie() else {
            incomplete += 1;
            continue;
        };
        if !seen.insert(movie.clone()) {
            duplicates += 1;
            continue;
        }
        movies.push(movie);
    }

    if incomplete > 0 || duplicates > 0 {
        log::warn!("Dropped {incomplete} incomplete and {duplicates} duplicate rows");
    }
    let dataset = MovieDataset::from_movies(movies);
    if dataset.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// A CSV record as text. Numeric cells are parsed only after the missing
/// markers have been ruled out, so `NA` in `gross` is a gap, not a parse error.
#[derive(Debug, Deserialize)]
struct CsvRow {
    movie_title: Option<String>,
    title_year: Option<String>,
    imdb_score: Option<String>,
    duration: Option<String>,
    budget: Option<String>,
    gross: Option<String>,
    language: Option<String>,
    country: Option<String>,
    color: Option<String>,
    content_rating: Option<String>,
    genres: Option<String>,
}

impl CsvRow {
    /// `row` is the 1-based data row, for error messages.
    fn into_raw(self, row: usize) -> Result<RawMovie, LoadError> {
        let number = |column: &'static str, cell: Option<String>| match cell {
            Some(value) if !is_missing(&value) => value
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| LoadError::InvalidNumber { row, column, value }),
            _ => Ok(None),
        };

        Ok(RawMovie {
            title_year: number("title_year", self.title_year)?,
            imdb_score: number("imdb_score", self.imdb_score)?,
            duration: number("duration", self.duration)?,
            budget: number("budget", self.budget)?,
            gross: number("gross", self.gross)?,
            movie_title: self.movie_title,
            language: self.language,
            country: self.country,
            color: self.color,
            content_rating: self.content_rating,
            genres: self.genres,
        })
    }
}

/// CSV layout: header row naming at least the required columns.
/// Empty cells and the usual NA spellings count as missing; `genres` is
/// `|`-delimited.
pub fn load_csv<R: Read>(reader: R) -> Result<MovieDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        return Err(LoadError::MissingColumn(missing));
    }

    clean(
        reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(i, row)| row.map_err(LoadError::from)?.into_raw(i + 1)),
    )
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "movie_title": "Avatar", "title_year": 2009, "genres": "Action|Sci-Fi", ... },
///   ...
/// ]
/// ```
///
/// Absent keys and `null` count as missing.
pub fn load_json<R: Read>(reader: R) -> Result<MovieDataset, LoadError> {
    let rows: Vec<RawMovie> = serde_json::from_reader(reader)?;
    clean(rows.into_iter().map(Ok))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per required field.
///
/// Text columns must be Utf8 / LargeUtf8, numeric columns any of
/// Int32 / Int64 / Float32 / Float64.  Nulls count as missing.
fn load_parquet(file: File) -> Result<MovieDataset, LoadError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    let mut offset = 0;
    for batch in reader {
        let batch = batch?;
        rows.extend(batch_rows(&batch, offset)?);
        offset += batch.num_rows();
    }
    clean(rows.into_iter().map(Ok))
}

fn batch_rows(batch: &RecordBatch, offset: usize) -> Result<Vec<RawMovie>, LoadError> {
    let column = |name: &'static str| {
        batch
            .schema()
            .index_of(name)
            .map(|i| batch.column(i))
            .map_err(|_| LoadError::MissingColumn(name))
    };

    let title = column("movie_title")?;
    let year = column("title_year")?;
    let score = column("imdb_score")?;
    let duration = column("duration")?;
    let budget = column("budget")?;
    let gross = column("gross")?;
    let language = column("language")?;
    let country = column("country")?;
    let color = column("color")?;
    let rating = column("content_rating")?;
    let genres = column("genres")?;

    (0..batch.num_rows())
        .map(|row| {
            let at = offset + row;
            Ok(RawMovie {
                movie_title: text_at(title, row, at, "movie_title")?,
                title_year: number_at(year, row, at, "title_year")?,
                imdb_score: number_at(score, row, at, "imdb_score")?,
                duration: number_at(duration, row, at, "duration")?,
                budget: number_at(budget, row, at, "budget")?,
                gross: number_at(gross, row, at, "gross")?,
                language: text_at(language, row, at, "language")?,
                country: text_at(country, row, at, "country")?,
                color: text_at(color, row, at, "color")?,
                content_rating: text_at(rating, row, at, "content_rating")?,
                genres: text_at(genres, row, at, "genres")?,
            })
        })
        .collect()
}

// -- Parquet / Arrow helpers --

fn unsupported(col: &ArrayRef, row: usize, column: &'static str) -> LoadError {
    LoadError::UnsupportedType {
        row,
        column,
        data_type: format!("{:?}", col.data_type()),
    }
}

/// Extract a string cell; `row` indexes the batch, `at` the whole file.
fn text_at(
    col: &ArrayRef,
    row: usize,
    at: usize,
    column: &'static str,
) -> Result<Option<String>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        _ => return Err(unsupported(col, at, column)),
    };
    Ok(Some(value.to_string()))
}

/// Extract a numeric cell as `f64`.
fn number_at(
    col: &ArrayRef,
    row: usize,
    at: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        _ => return Err(unsupported(col, at, column)),
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "color,movie_title,title_year,imdb_score,duration,budget,gross,\
                          language,country,content_rating,genres,director_name";

    fn csv_of(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn csv_drops_incomplete_and_duplicate_rows() {
        let text = csv_of(&[
            "Color,Avatar,2009,7.9,178,237000000,760505847,English,USA,PG-13,Action|Adventure,James Cameron",
            ",,,,,,,,,,,",
            "Color,Avatar,2009,7.9,178,237000000,760505847,English,USA,PG-13,Action|Adventure,James Cameron",
        ]);
        let dataset = load_csv(text.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        let avatar = &dataset.movies()[0];
        assert_eq!(avatar.movie_title, "Avatar");
        assert_eq!(avatar.title_year, 2009.0);
        assert_eq!(avatar.gross, 760_505_847.0);
    }

    #[test]
    fn csv_drops_row_missing_a_single_field() {
        let text = csv_of(&[
            "Color,Heat,1995,8.2,170,60000000,67436818,English,USA,R,Crime|Drama,Michael Mann",
            "Color,Ronin,1998,7.3,122,55000000,,English,USA,R,Action|Crime,John Frankenheimer",
        ]);
        let dataset = load_csv(text.as_bytes()).unwrap();
        let titles: Vec<&str> = dataset.movies().iter().map(|m| m.movie_title.as_str()).collect();
        assert_eq!(titles, vec!["Heat"]);
    }

    #[test]
    fn csv_ignores_missing_values_in_unrequired_columns() {
        let text = csv_of(&[
            "Color,Heat,1995,8.2,170,60000000,67436818,English,USA,R,Crime|Drama,",
        ]);
        assert_eq!(load_csv(text.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn csv_keeps_file_order() {
        let text = csv_of(&[
            "Color,B,2001,6.0,100,10,20,English,USA,R,Drama,x",
            "Color,A,2000,6.0,100,10,20,English,USA,R,Drama,x",
            "Color,C,1999,6.0,100,10,20,English,USA,R,Drama,x",
        ]);
        let dataset = load_csv(text.as_bytes()).unwrap();
        let titles: Vec<&str> = dataset.movies().iter().map(|m| m.movie_title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn csv_without_required_header_fails() {
        let text = "movie_title,imdb_score\nHeat,8.2\n";
        assert!(matches!(
            load_csv(text.as_bytes()),
            Err(LoadError::MissingColumn("language"))
        ));
    }

    #[test]
    fn csv_treats_na_markers_as_missing() {
        let text = csv_of(&[
            "Color,Heat,1995,8.2,170,60000000,67436818,English,USA,R,Crime|Drama,Michael Mann",
            "Color,Ronin,1998,7.3,122,55000000,NA,English,USA,R,Action|Crime,John Frankenheimer",
            "Color,Alien,1979,8.5,117,11000000,78900000,English,USA,NaN,Horror|Sci-Fi,Ridley Scott",
            "N/A,Brazil,1985,8.0,132,15000000,9929135,English,UK,R,Comedy,Terry Gilliam",
        ]);
        let dataset = load_csv(text.as_bytes()).unwrap();
        let titles: Vec<&str> = dataset.movies().iter().map(|m| m.movie_title.as_str()).collect();
        assert_eq!(titles, vec!["Heat"]);
    }

    #[test]
    fn csv_with_non_numeric_score_fails() {
        let text = csv_of(&[
            "Color,Heat,1995,8.2,170,60000000,67436818,English,USA,R,Crime,x",
            "Color,Ronin,1998,great,122,55000000,41610884,English,USA,R,Crime,x",
        ]);
        let err = load_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidNumber { row: 2, column: "imdb_score", ref value } if value == "great"
        ));
    }

    #[test]
    fn csv_with_only_incomplete_rows_is_empty() {
        let text = csv_of(&["Color,Heat,,8.2,170,60000000,67436818,English,USA,R,Crime,x"]);
        assert!(matches!(load_csv(text.as_bytes()), Err(LoadError::Empty)));
        assert!(matches!(load_csv(HEADER.as_bytes()), Err(LoadError::Empty)));
    }

    #[test]
    fn json_records_load_like_csv() {
        let text = r#"[
            {"movie_title": "Heat", "title_year": 1995, "imdb_score": 8.2, "duration": 170,
             "budget": 60000000, "gross": 67436818, "language": "English", "country": "USA",
             "color": "Color", "content_rating": "R", "genres": "Crime|Drama", "plot": "..."},
            {"movie_title": "Heat", "title_year": 1995, "imdb_score": 8.2, "duration": 170,
             "budget": 60000000, "gross": 67436818, "language": "English", "country": "USA",
             "color": "Color", "content_rating": "R", "genres": "Crime|Drama"},
            {"movie_title": "Ronin", "title_year": 1998, "imdb_score": 7.3, "duration": 122,
             "budget": 55000000, "gross": null, "language": "English", "country": "USA",
             "color": "Color", "content_rating": "R", "genres": "Action"},
            {"movie_title": "Alien", "imdb_score": 8.5}
        ]"#;
        let dataset = load_json(text.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.movies()[0].duration, 170.0);
    }

    #[test]
    fn json_that_is_not_an_array_fails() {
        assert!(matches!(
            load_json(r#"{"movie_title": "Heat"}"#.as_bytes()),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/movies.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("movies.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("movie-explorer-{}-{name}", std::process::id()))
    }

    #[test]
    fn parquet_columns_load_with_mixed_numeric_types() {
        let text = |v: Vec<Option<&str>>| Arc::new(StringArray::from(v)) as ArrayRef;
        let batch = RecordBatch::try_from_iter(vec![
            ("movie_title", text(vec![Some("Heat"), Some("Ronin")])),
            ("title_year", Arc::new(Int64Array::from(vec![1995, 1998])) as ArrayRef),
            ("imdb_score", Arc::new(Float64Array::from(vec![8.2, 7.3])) as ArrayRef),
            ("duration", Arc::new(Int64Array::from(vec![170, 122])) as ArrayRef),
            ("budget", Arc::new(Float64Array::from(vec![6.0e7, 5.5e7])) as ArrayRef),
            (
                "gross",
                Arc::new(Float64Array::from(vec![Some(67436818.0), None])) as ArrayRef,
            ),
            ("language", text(vec![Some("English"), Some("English")])),
            ("country", text(vec![Some("USA"), Some("USA")])),
            ("color", text(vec![Some("Color"), Some("Color")])),
            ("content_rating", text(vec![Some("R"), Some("R")])),
            ("genres", text(vec![Some("Crime|Drama"), Some("Action")])),
        ])
        .unwrap();

        let path = temp_path("movies.parquet");
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let dataset = load_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(dataset.len(), 1);
        let heat = &dataset.movies()[0];
        assert_eq!(heat.movie_title, "Heat");
        assert_eq!(heat.title_year, 1995.0);
        assert_eq!(heat.duration, 170.0);
    }
}
