//! Transient data passed between the discovery, statement and report stages.

/// A table and its NOT NULL timestamp columns in ordinal position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumnSet {
    /// Table name as reported by `information_schema`
    pub table: String,
    /// Column names, first to last
    pub columns: Vec<String>,
}

impl TableColumnSet {
    /// Pairs a table with its columns, which must already be in ordinal order.
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// `true` if the table has no qualifying columns left.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Counters reported in the final summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of tables found by discovery
    pub tables: usize,
    /// Number of columns altered across all tables
    pub columns: usize,
}

impl RunStats {
    /// Adds the columns of one altered table.
    pub fn record(&mut self, set: &TableColumnSet) {
        self.columns = self.columns.saturating_add(set.columns.len());
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Updated {} columns in {} tables.",
            self.columns, self.tables
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let mut stats = RunStats {
            tables: 2,
            ..RunStats::default()
        };
        stats.record(&TableColumnSet::new("orders", vec!["created_at".into()]));
        stats.record(&TableColumnSet::new("users", vec!["deleted_at".into()]));

        assert_eq!(stats.to_string(), "Updated 2 columns in 2 tables.");
    }

    #[test]
    fn test_empty_summary_line() {
        assert_eq!(
            RunStats::default().to_string(),
            "Updated 0 columns in 0 tables."
        );
    }
}
