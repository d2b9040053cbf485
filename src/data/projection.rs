use super::filter::Subset;
use super::model::Axis;

/// Columnar arrays handed to a renderer: one entry per selected movie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub titles: Vec<String>,
    pub years: Vec<f64>,
}

impl Projection {
    /// Number of plotted points.
    pub fn count(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// `[x, y]` pairs in row order.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    /// `"<n> movies selected"`, the plot title.
    pub fn title(&self) -> String {
        format!("{} movies selected", self.count())
    }
}

/// Extract the two axis columns plus title and year for every row of `subset`.
pub fn project(subset: &Subset<'_>, x_axis: Axis, y_axis: Axis) -> Projection {
    if subset.is_empty() {
        return Projection::default();
    }
    let mut projection = Projection {
        xs: Vec::with_capacity(subset.len()),
        ys: Vec::with_capacity(subset.len()),
        titles: Vec::with_capacity(subset.len()),
        years: Vec::with_capacity(subset.len()),
    };
    for movie in subset.iter() {
        projection.xs.push(x_axis.value(movie));
        projection.ys.push(y_axis.value(movie));
        projection.titles.push(movie.movie_title.clone());
        projection.years.push(movie.title_year);
    }
    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{select, FilterState};
    use crate::data::model::tests::movie;
    use crate::data::model::{Category, MovieDataset};

    fn dataset() -> MovieDataset {
        let mut heat = movie("Heat");
        heat.title_year = 1995.0;
        heat.imdb_score = 8.2;
        heat.budget = 60_000_000.0;
        let mut up = movie("Up");
        up.title_year = 2009.0;
        up.imdb_score = 8.3;
        up.budget = 175_000_000.0;
        MovieDataset::from_movies(vec![heat, up])
    }

    #[test]
    fn projects_selected_axes_with_labels() {
        let ds = dataset();
        let subset = select(&ds, &FilterState::default());
        let p = project(&subset, Axis::Budget, Axis::ImdbScore);
        assert_eq!(p.xs, vec![60_000_000.0, 175_000_000.0]);
        assert_eq!(p.ys, vec![8.2, 8.3]);
        assert_eq!(p.titles, vec!["Heat", "Up"]);
        assert_eq!(p.years, vec![1995.0, 2009.0]);
        assert_eq!(p.count(), 2);
        assert_eq!(p.points()[1], [175_000_000.0, 8.3]);
    }

    #[test]
    fn empty_subset_projects_to_empty_columns() {
        let ds = dataset();
        let mut filters = FilterState::default();
        filters.set(Category::Country, "Nowhere");
        let p = project(&select(&ds, &filters), Axis::Year, Axis::ImdbScore);
        assert!(p.is_empty());
        assert!(p.xs.is_empty() && p.ys.is_empty());
        assert!(p.titles.is_empty() && p.years.is_empty());
        assert_eq!(p.count(), 0);
        assert_eq!(p.title(), "0 movies selected");
    }
}
