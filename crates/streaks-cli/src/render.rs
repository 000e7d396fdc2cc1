//! Columnar text tables.

use std::fmt;

/// A table with a fixed number of columns.
///
/// Every column is padded to its widest value and columns are separated by
/// two spaces. Trailing whitespace is trimmed from each line.
#[derive(Debug, Clone)]
pub struct Table<const N: usize> {
    header: [String; N],
    rows: Vec<[String; N]>,
}

impl<const N: usize> Table<N> {
    pub fn new(header: [&str; N]) -> Self {
        Self {
            header: header.map(String::from),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: [String; N]) {
        self.rows.push(row);
    }

    /// Adds a blank separator line.
    pub fn add_empty_row(&mut self) {
        self.rows.push(std::array::from_fn(|_| String::new()));
    }

    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> [usize; N] {
        let mut widths = [0; N];
        for row in std::iter::once(&self.header).chain(&self.rows) {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.chars().count());
            }
        }
        widths
    }
}

impl<const N: usize> fmt::Display for Table<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        for row in std::iter::once(&self.header).chain(&self.rows) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(value, width)| format!("{value:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn pads_columns_to_widest_value() {
        let mut table = Table::new(["Activity", "Desired", "Description"]);
        table.add_row(["english".into(), "5".into(), "pages".into()]);
        table.add_row(["pushups".into(), "50".into(), String::new()]);

        assert_snapshot!(table.to_string(), @r"
        Activity  Desired  Description
        english   5        pages
        pushups   50
        ");
    }

    #[test]
    fn empty_row_renders_blank_line() {
        let mut table = Table::new(["A", "B"]);
        table.add_row(["1".into(), "2".into()]);
        table.add_empty_row();
        table.add_row(["3".into(), "4".into()]);

        assert_eq!(table.to_string(), "A  B\n1  2\n\n3  4\n");
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let mut table = Table::new(["Name", "X"]);
        table.add_row(["żółw".into(), "1".into()]);

        assert_eq!(table.to_string(), "Name  X\nżółw  1\n");
    }

    #[test]
    fn new_table_is_empty() {
        let table = Table::new(["A"]);
        assert!(table.is_empty());
        assert_eq!(table.to_string(), "A\n");
    }
}
