use crate::table::{Table, TableError};
use itertools::Itertools as _;
use ordered_float::OrderedFloat;
use thiserror::Error;

/// Empirical distribution of the values in `column`, ordered by ascending value.
pub fn frequencies(table: &Table, column: usize) -> Result<Vec<f64>, TableError> {
    let mut values = table.column(column)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }
    values.sort_by_key(|&v| OrderedFloat(v));

    let n = values.len() as f64;
    let counts = values
        .into_iter()
        .group_by(|&v| OrderedFloat(v))
        .into_iter()
        .map(|(_, group)| group.count() as f64 / n)
        .collect();
    Ok(counts)
}

/// Shannon entropy in bits.
pub fn entropy(probabilities: &[f64]) -> Result<f64, EntropyError> {
    probabilities
        .iter()
        .enumerate()
        .try_fold(0.0, |acc, (index, &p)| {
            if !(p > 0.0 && p.is_finite()) {
                return Err(EntropyError::InvalidProbability { index, value: p });
            }
            Ok(acc - p * p.log2())
        })
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EntropyError {
    #[error("probability #{index} must be positive and finite, got {value}")]
    InvalidProbability { index: usize, value: f64 },
}
