use crate::table::{Table, TableError};
use thiserror::Error;

/// Sorts `table` by `column` and cuts it into `(left, right)` at the first
/// boundary that does not separate two rows with equal `column` values.
///
/// The boundary is found by scanning forward from row 1 of the sorted table,
/// so it is not necessarily close to the median. Both halves are returned
/// sorted by their identifier (column 0).
pub fn split_at_boundary(table: &Table, column: usize) -> Result<(Table, Table), SplitError> {
    table.check_column(column)?;
    if table.rows_len() < 2 {
        return Err(SplitError::TooFewRows {
            rows: table.rows_len(),
        });
    }

    let mut sorted = table.clone();
    sorted.sort_rows_by_column(column);

    let boundary =
        find_boundary(&sorted.column(column)?).ok_or(SplitError::UniformColumn { column })?;
    log::trace!(
        "split on column {}: boundary at row {} of {}",
        column,
        boundary,
        sorted.rows_len()
    );

    let (mut left, mut right) = sorted.split_off(boundary);
    left.sort_rows_by_column(0);
    right.sort_rows_by_column(0);
    Ok((left, right))
}

/// Returns the first index `i >= 1` with `values[i] != values[i - 1]`.
fn find_boundary(values: &[f64]) -> Option<usize> {
    let mut boundary = 1;
    while boundary < values.len() && values[boundary] == values[boundary - 1] {
        boundary += 1;
    }
    if boundary < values.len() {
        Some(boundary)
    } else {
        None
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    #[error("a split needs at least two rows, got {rows}")]
    TooFewRows { rows: usize },

    #[error("every row has the same value in column {column}")]
    UniformColumn { column: usize },

    #[error(transparent)]
    Table(#[from] TableError),
}
