use std::collections::{BTreeMap, BTreeSet};

use super::model::{Category, MovieDataset};

/// Dropdown value meaning "do not filter on this column".
pub const WILDCARD: &str = "All";

/// Sorted distinct values of `category`, prefixed with [`WILDCARD`].
///
/// Genres are split on `|` first, so the options are individual genres
/// rather than the raw combined strings.
pub fn options(dataset: &MovieDataset, category: Category) -> Vec<String> {
    let mut distinct: BTreeSet<&str> = BTreeSet::new();
    for movie in dataset.movies() {
        if category.is_multi_valued() {
            distinct.extend(movie.genre_tokens());
        } else {
            distinct.insert(category.value(movie));
        }
    }
    distinct.remove(WILDCARD);

    std::iter::once(WILDCARD)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

/// Options for every filter column, keyed by column.
pub fn all_options(dataset: &MovieDataset) -> BTreeMap<Category, Vec<String>> {
    Category::ALL
        .into_iter()
        .map(|c| (c, options(dataset, c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::movie;
    use crate::data::model::Movie;

    fn dataset_with(edit: impl Fn(&mut Movie, &str), values: &[&str]) -> MovieDataset {
        MovieDataset::from_movies(
            values
                .iter()
                .map(|&v| {
                    let mut m = movie(v);
                    edit(&mut m, v);
                    m
                })
                .collect(),
        )
    }

    #[test]
    fn genre_options_are_split_tokens() {
        let ds = dataset_with(|m, v| m.genres = v.to_string(), &["Action|Comedy", "Drama"]);
        assert_eq!(
            options(&ds, Category::Genres),
            vec!["All", "Action", "Comedy", "Drama"]
        );
    }

    #[test]
    fn options_are_sorted_unique_and_start_with_wildcard() {
        let ds = dataset_with(
            |m, v| m.country = v.to_string(),
            &["USA", "France", "USA", "Canada", "France"],
        );
        let opts = options(&ds, Category::Country);
        assert_eq!(opts, vec!["All", "Canada", "France", "USA"]);
    }

    #[test]
    fn a_literal_all_value_is_not_repeated() {
        let ds = dataset_with(|m, v| m.content_rating = v.to_string(), &["R", "All", "G"]);
        assert_eq!(options(&ds, Category::ContentRating), vec!["All", "G", "R"]);
    }

    #[test]
    fn every_column_gets_options() {
        let ds = MovieDataset::from_movies(vec![movie("Heat")]);
        let all = all_options(&ds);
        assert_eq!(all.len(), Category::ALL.len());
        assert_eq!(all[&Category::Language], vec!["All", "English"]);
        assert_eq!(all[&Category::Color], vec!["All", "Color"]);
    }
}
