use std::collections::BTreeMap;

use super::error::SelectionError;
use super::model::{Axis, Category, Movie, MovieDataset};
use super::options::WILDCARD;

// ---------------------------------------------------------------------------
// Filter state: one dropdown value per column plus the two axes
// ---------------------------------------------------------------------------

/// Current value of every filter control and both axis controls.
///
/// A column set to [`WILDCARD`] places no constraint on the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    values: BTreeMap<Category, String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            values: Category::ALL
                .into_iter()
                .map(|c| (c, WILDCARD.to_string()))
                .collect(),
            x_axis: Axis::Year,
            y_axis: Axis::ImdbScore,
        }
    }
}

impl FilterState {
    pub fn value(&self, category: Category) -> &str {
        self.values
            .get(&category)
            .map(String::as_str)
            .unwrap_or(WILDCARD)
    }

    pub fn set(&mut self, category: Category, value: impl Into<String>) {
        self.values.insert(category, value.into());
    }

    /// Set a filter by source column name, e.g. `("country", "USA")`.
    pub fn set_by_name(&mut self, column: &str, value: &str) -> Result<(), SelectionError> {
        let category: Category = column.parse()?;
        self.set(category, value);
        Ok(())
    }

    /// Put every filter back to the wildcard; axes are left alone.
    pub fn clear_filters(&mut self) {
        for value in self.values.values_mut() {
            *value = WILDCARD.to_string();
        }
    }

    /// Filters that actually constrain the rows.
    pub fn active(&self) -> impl Iterator<Item = (Category, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| v.as_str() != WILDCARD)
            .map(|(c, v)| (*c, v.as_str()))
    }

    /// A movie passes when every active filter value occurs somewhere in its
    /// field. This is substring matching: `"US"` also matches `"USA"`.
    pub fn matches(&self, movie: &Movie) -> bool {
        self.active()
            .all(|(category, value)| category.value(movie).contains(value))
    }
}

// ---------------------------------------------------------------------------
// Subset: the rows that survived filtering
// ---------------------------------------------------------------------------

/// Rows of a dataset that pass a [`FilterState`], in dataset order.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a MovieDataset,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Movie> + '_ {
        let dataset = self.dataset;
        self.indices.iter().filter_map(move |&i| dataset.get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows of `dataset` that pass all active filters.
///
/// Filters combine with AND; with no active filter the whole dataset is
/// returned in its original order.
pub fn select<'a>(dataset: &'a MovieDataset, filters: &FilterState) -> Subset<'a> {
    let indices = dataset
        .movies()
        .iter()
        .enumerate()
        .filter(|(_, movie)| filters.matches(movie))
        .map(|(i, _)| i)
        .collect();
    Subset { dataset, indices }
}
