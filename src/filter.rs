use crate::table::Table;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

/// Set of row identifiers, matched against column 0 of a table.
#[derive(Debug, Clone, Default)]
pub struct IdentifierSet(HashSet<OrderedFloat<f64>>);

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: f64) -> bool {
        self.0.insert(OrderedFloat(id))
    }

    pub fn contains(&self, id: f64) -> bool {
        self.0.contains(&OrderedFloat(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<f64> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().map(OrderedFloat).collect())
    }
}

impl<'a> FromIterator<&'a f64> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = &'a f64>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

/// Keeps the rows of `table` whose identifier (column 0) is in `ids`.
///
/// Rows keep their order in `table`. Rows narrower than two columns carry no
/// value and are never selected. If `table` has duplicate identifiers, every
/// duplicate matching `ids` is returned.
pub fn filter_by_identifier(ids: &IdentifierSet, table: &Table) -> Table {
    let rows = table
        .rows()
        .filter(|row| row.len() >= 2 && ids.contains(row[0]))
        .map(|row| row.to_vec())
        .collect();
    Table::from_rows_unchecked(rows, table.columns_len())
}

/// Returns column 1 of the rows selected by [`filter_by_identifier`].
pub fn select_values_by_identifier(ids: &IdentifierSet, table: &Table) -> Vec<f64> {
    table
        .rows()
        .filter(|row| row.len() >= 2 && ids.contains(row[0]))
        .map(|row| row[1])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Table {
        Table::new(vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
            vec![4.0, 40.0],
        ])
        .expect("rectangular")
    }

    #[test]
    fn keeps_table_order() {
        let ids = [3.0, 1.0, 5.0].iter().collect::<IdentifierSet>();
        let selected = filter_by_identifier(&ids, &values());
        assert_eq!(
            selected.into_rows(),
            vec![vec![1.0, 10.0], vec![3.0, 30.0]]
        );
        assert_eq!(select_values_by_identifier(&ids, &values()), vec![10.0, 30.0]);
    }

    #[test]
    fn no_match_is_empty() {
        let selected = filter_by_identifier(&IdentifierSet::new(), &values());
        assert!(selected.is_empty());
        assert_eq!(selected.columns_len(), 2);

        let mut selected = selected;
        assert_eq!(
            selected.push_row(vec![1.0]),
            Err(crate::table::TableError::RowSizeMismatch)
        );

        let ids = vec![7.0, 8.0].into_iter().collect::<IdentifierSet>();
        assert!(filter_by_identifier(&ids, &values()).is_empty());
    }

    #[test]
    fn narrow_rows_are_excluded() -> anyhow::Result<()> {
        let table = Table::new(vec![vec![1.0], vec![2.0]])?;
        let ids = [1.0, 2.0].iter().collect::<IdentifierSet>();
        assert!(filter_by_identifier(&ids, &table).is_empty());
        Ok(())
    }

    #[test]
    fn matches_exactly_the_member_rows() -> anyhow::Result<()> {
        let labels = Table::new(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 1.0],
            vec![3.0, 1.0],
        ])?;
        let ids = [2.0].iter().collect::<IdentifierSet>();
        assert_eq!(
            filter_by_identifier(&ids, &labels).into_rows(),
            vec![vec![2.0, 1.0]]
        );

        let ids = [0.0, 3.0, 2.0].iter().collect::<IdentifierSet>();
        let selected = filter_by_identifier(&ids, &labels);
        for row in selected.rows() {
            assert!(ids.contains(row[0]));
        }
        assert_eq!(selected.column(0)?, vec![0.0, 2.0, 3.0]);
        Ok(())
    }
}
