use ordered_float::OrderedFloat;
use std::fmt;
use thiserror::Error;

/// Row-oriented, rectangular table of numbers.
///
/// Column 0 is conventionally the row identifier used to join a feature table
/// with its label table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Vec<f64>>,
    columns_len: usize,
}

impl Table {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, TableError> {
        let columns_len = rows.first().map_or(0, |r| r.len());
        if rows.iter().skip(1).any(|r| r.len() != columns_len) {
            return Err(TableError::RowSizeMismatch);
        }
        if rows.iter().flatten().any(|v| v.is_nan()) {
            return Err(TableError::NanValue);
        }
        Ok(Self { rows, columns_len })
    }

    pub fn empty(columns_len: usize) -> Self {
        Self {
            rows: Vec::new(),
            columns_len,
        }
    }

    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<f64>>, columns_len: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns_len));
        Self { rows, columns_len }
    }

    pub fn rows_len(&self) -> usize {
        self.rows.len()
    }

    pub fn columns_len(&self) -> usize {
        self.columns_len
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl '_ + Iterator<Item = &[f64]> + Clone {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    pub fn row(&self, index: usize) -> Result<&[f64], TableError> {
        self.rows
            .get(index)
            .map(|r| r.as_slice())
            .ok_or(TableError::RowOutOfRange {
                index,
                rows: self.rows.len(),
            })
    }

    /// Returns the values of `column_index` from every row, in row order.
    pub fn column(&self, column_index: usize) -> Result<Vec<f64>, TableError> {
        self.check_column(column_index)?;
        Ok(self.rows.iter().map(|r| r[column_index]).collect())
    }

    /// Copies the rows `start..=end` into a new table.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self, TableError> {
        if start > end || end >= self.rows.len() {
            return Err(TableError::InvalidSlice {
                start,
                end,
                rows: self.rows.len(),
            });
        }
        Ok(Self::from_rows_unchecked(
            self.rows[start..=end].to_vec(),
            self.columns_len,
        ))
    }

    /// Applies `f` to every cell.
    pub fn map<F>(&self, mut f: F) -> Result<Self, TableError>
    where
        F: FnMut(f64) -> f64,
    {
        let rows = self
            .rows
            .iter()
            .map(|r| r.iter().map(|&v| f(v)).collect())
            .collect();
        Self::new(rows).map(|mut t| {
            t.columns_len = self.columns_len;
            t
        })
    }

    pub fn push_row(&mut self, row: Vec<f64>) -> Result<(), TableError> {
        // A table built from no rows has no width yet and adopts the first row's.
        let unsized_table = self.rows.is_empty() && self.columns_len == 0;
        if !unsized_table && row.len() != self.columns_len {
            return Err(TableError::RowSizeMismatch);
        }
        if row.iter().any(|v| v.is_nan()) {
            return Err(TableError::NanValue);
        }
        self.columns_len = row.len();
        self.rows.push(row);
        Ok(())
    }

    /// Returns a copy whose rows are sorted ascending by `column`.
    pub fn sorted_by_column(&self, column: usize) -> Result<Self, TableError> {
        self.check_column(column)?;
        let mut sorted = self.clone();
        sorted.sort_rows_by_column(column);
        Ok(sorted)
    }

    pub(crate) fn sort_rows_by_column(&mut self, column: usize) {
        self.rows.sort_by_key(|r| OrderedFloat(r[column]));
    }

    pub(crate) fn split_off(mut self, row: usize) -> (Self, Self) {
        let right = self.rows.split_off(row);
        let columns_len = self.columns_len;
        (self, Self::from_rows_unchecked(right, columns_len))
    }

    pub(crate) fn check_column(&self, column: usize) -> Result<(), TableError> {
        // An empty table has no rows that could be indexed out of bounds.
        if !self.rows.is_empty() && column >= self.columns_len {
            return Err(TableError::ColumnOutOfRange {
                column,
                columns: self.columns_len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RowIndex")?;
        for i in 0..self.columns_len {
            write!(f, "\tCol{}", i)?;
        }
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{}", i)?;
            for v in row {
                write!(f, "\t{:.2}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    #[error("some of rows have a different column count from others")]
    RowSizeMismatch,

    #[error("table contains NaN values")]
    NanValue,

    #[error("row index {index} is out of range for a table with {rows} rows")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("column index {column} is out of range for a table with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("invalid slice {start}..={end} for a table with {rows} rows")]
    InvalidSlice {
        start: usize,
        end: usize,
        rows: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            vec![1.1, 2.2, 3.3],
            vec![4.4, 5.5, 6.6],
            vec![7.7, 8.8, 9.9],
        ])
        .expect("rectangular")
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Table::new(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(err, TableError::RowSizeMismatch);
    }

    #[test]
    fn new_rejects_nan() {
        let err = Table::new(vec![vec![0.0, f64::NAN]]).unwrap_err();
        assert_eq!(err, TableError::NanValue);
    }

    #[test]
    fn column_works() -> anyhow::Result<()> {
        let table = sample();
        assert_eq!(table.column(0)?, vec![1.1, 4.4, 7.7]);
        assert_eq!(table.column(2)?, vec![3.3, 6.6, 9.9]);
        assert_eq!(
            table.column(3),
            Err(TableError::ColumnOutOfRange {
                column: 3,
                columns: 3
            })
        );
        assert_eq!(Table::empty(2).column(5)?, Vec::<f64>::new());
        Ok(())
    }

    #[test]
    fn row_and_slice_are_bounds_checked() -> anyhow::Result<()> {
        let table = sample();
        assert_eq!(table.row(1)?, &[4.4, 5.5, 6.6]);
        assert!(table.row(3).is_err());

        let sliced = table.slice(0, 1)?;
        assert_eq!(sliced.rows_len(), 2);
        assert_eq!(sliced.row(1)?, &[4.4, 5.5, 6.6]);
        assert!(table.slice(2, 1).is_err());
        assert!(table.slice(0, 3).is_err());
        Ok(())
    }

    #[test]
    fn map_and_push_row_work() -> anyhow::Result<()> {
        let mut table = sample().map(|v| v * 2.0)?;
        assert_eq!(table.row(0)?, &[2.2, 4.4, 6.6]);

        table.push_row(vec![10.0, 11.1, 12.2])?;
        assert_eq!(table.rows_len(), 4);
        assert_eq!(
            table.push_row(vec![1.0]),
            Err(TableError::RowSizeMismatch)
        );
        assert!(sample().map(|_| f64::NAN).is_err());
        Ok(())
    }

    #[test]
    fn push_row_keeps_declared_width() -> anyhow::Result<()> {
        let mut table = Table::empty(3);
        assert_eq!(table.push_row(vec![1.0]), Err(TableError::RowSizeMismatch));
        assert_eq!(table.columns_len(), 3);
        assert!(table.is_empty());

        table.push_row(vec![0.0, 1.0, 2.0])?;
        assert_eq!(table.rows_len(), 1);

        let mut unsized_table = Table::new(Vec::new())?;
        unsized_table.push_row(vec![0.0, 1.0])?;
        assert_eq!(unsized_table.columns_len(), 2);
        Ok(())
    }

    #[test]
    fn sorted_by_column_leaves_original_untouched() -> anyhow::Result<()> {
        let table = Table::new(vec![vec![0.0, 3.0], vec![1.0, 1.0], vec![2.0, 2.0]])?;
        let sorted = table.sorted_by_column(1)?;
        assert_eq!(sorted.column(0)?, vec![1.0, 2.0, 0.0]);
        assert_eq!(table.column(0)?, vec![0.0, 1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn display_renders_header_and_rows() -> anyhow::Result<()> {
        let table = Table::new(vec![vec![0.0, 7.2], vec![1.0, 5.4]])?;
        assert_eq!(
            table.to_string(),
            "RowIndex\tCol0\tCol1\n0\t0.00\t7.20\n1\t1.00\t5.40\n"
        );
        Ok(())
    }
}
