use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One generated row, laid out like the IMDb metadata export.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct SampleMovie {
    color: Option<String>,
    director_name: String,
    duration: Option<i64>,
    gross: Option<i64>,
    genres: String,
    movie_title: String,
    language: String,
    country: String,
    content_rating: String,
    budget: Option<i64>,
    title_year: i64,
    imdb_score: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const GENRES: [&str; 10] = [
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Drama", "Horror", "Romance",
    "Sci-Fi", "Thriller",
];
const ORIGINS: [(&str, &str); 6] = [
    ("English", "USA"),
    ("English", "UK"),
    ("English", "Canada"),
    ("French", "France"),
    ("Spanish", "Spain"),
    ("Japanese", "Japan"),
];
const RATINGS: [&str; 5] = ["G", "PG", "PG-13", "R", "Not Rated"];
const DIRECTORS: [&str; 4] = ["A. Smithee", "J. Doe", "M. Rossi", "K. Tanaka"];

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<SampleMovie> {
    (0..n)
        .map(|i| {
            let mut genres: Vec<&str> = (0..1 + rng.next_u64() % 3)
                .map(|_| *rng.pick(&GENRES))
                .collect();
            genres.sort_unstable();
            genres.dedup();

            let (language, country) = *rng.pick(&ORIGINS);
            let color = if rng.next_f64() < 0.9 {
                "Color"
            } else {
                "Black and White"
            };
            let budget = rng.range(1.0e6, 2.0e8);
            let score = (rng.range(3.0, 9.5) * 10.0).round() / 10.0;
            // Better-rated films earn more on average.
            let gross = budget * rng.range(0.2, 1.0) * score / 4.0;

            SampleMovie {
                color: Some(color.to_string()),
                director_name: rng.pick(&DIRECTORS).to_string(),
                duration: Some(rng.range(80.0, 190.0) as i64),
                gross: Some(gross as i64),
                genres: genres.join("|"),
                movie_title: format!("Sample Movie {}\u{a0}", i + 1),
                language: language.to_string(),
                country: country.to_string(),
                content_rating: rng.pick(&RATINGS).to_string(),
                budget: Some(budget as i64),
                title_year: 1960 + (rng.next_u64() % 60) as i64,
                imdb_score: score,
            }
        })
        .collect()
}

fn write_csv(path: &str, movies: &[SampleMovie]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for movie in movies {
        writer.serialize(movie)?;
    }
    writer.flush()?;
    Ok(())
}

fn text_column(movies: &[SampleMovie], f: impl Fn(&SampleMovie) -> Option<&str>) -> ArrayRef {
    Arc::new(movies.iter().map(f).collect::<StringArray>())
}

fn int_column(movies: &[SampleMovie], f: impl Fn(&SampleMovie) -> Option<i64>) -> ArrayRef {
    Arc::new(movies.iter().map(f).collect::<Int64Array>())
}

fn write_parquet(path: &str, movies: &[SampleMovie]) -> Result<()> {
    let batch = RecordBatch::try_from_iter(vec![
        ("color", text_column(movies, |m| m.color.as_deref())),
        ("director_name", text_column(movies, |m| Some(m.director_name.as_str()))),
        ("duration", int_column(movies, |m| m.duration)),
        ("gross", int_column(movies, |m| m.gross)),
        ("genres", text_column(movies, |m| Some(m.genres.as_str()))),
        ("movie_title", text_column(movies, |m| Some(m.movie_title.as_str()))),
        ("language", text_column(movies, |m| Some(m.language.as_str()))),
        ("country", text_column(movies, |m| Some(m.country.as_str()))),
        ("content_rating", text_column(movies, |m| Some(m.content_rating.as_str()))),
        ("budget", int_column(movies, |m| m.budget)),
        ("title_year", int_column(movies, |m| Some(m.title_year))),
        (
            "imdb_score",
            Arc::new(
                movies
                    .iter()
                    .map(|m| Some(m.imdb_score))
                    .collect::<Float64Array>(),
            ) as ArrayRef,
        ),
    ])?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let mut movies = generate(&mut rng, 200);

    // Rows the loader must clean up: one incomplete, one exact duplicate.
    let mut incomplete = movies[0].clone();
    incomplete.movie_title = "Unfinished Sample\u{a0}".to_string();
    incomplete.gross = None;
    movies.push(incomplete);
    movies.push(movies[1].clone());

    write_csv("sample_movies.csv", &movies)?;
    write_parquet("sample_movies.parquet", &movies)?;

    log::info!("Wrote {} rows to sample_movies.csv and sample_movies.parquet", movies.len());
    println!(
        "Wrote {} movies (plus 1 incomplete and 1 duplicate row) to sample_movies.csv and sample_movies.parquet",
        movies.len() - 2
    );
    Ok(())
}
