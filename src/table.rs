//! Gherkin data tables passed to table-driven steps.

/// A data table attached to a step, stored row by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTable {
    rows: Vec<Vec<String>>,
}

impl StepTable {
    /// Build a table from its rows, header row first where one applies.
    #[must_use]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a table from string slices.
    #[must_use]
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| String::from(*cell)).collect())
                .collect(),
        )
    }

    /// The raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Rows after the first, each paired cell-wise with the header row.
    ///
    /// Cells beyond the header's width are dropped; missing cells are absent
    /// from the row's pairs.
    #[must_use]
    pub fn hashes(&self) -> Vec<Vec<(String, String)>> {
        let Some((header, body)) = self.rows.split_first() else {
            return Vec::new();
        };
        body.iter()
            .map(|row| header.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }

    /// Interpret each row as a `key | value` pair, preserving row order.
    ///
    /// Rows without a second cell map to an empty value.
    #[must_use]
    pub fn rows_hash(&self) -> Vec<(String, String)> {
        self.rows
            .iter()
            .filter_map(|row| {
                let mut cells = row.iter();
                let key = cells.next()?.clone();
                let value = cells.next().cloned().unwrap_or_default();
                Some((key, value))
            })
            .collect()
    }
}

impl From<Vec<Vec<String>>> for StepTable {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
