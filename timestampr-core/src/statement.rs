//! ALTER TABLE statement generation.

use crate::Result;
use crate::error::TimestamprError;
use crate::models::TableColumnSet;

/// Builds one `ALTER TABLE` statement that makes every column in `set`
/// nullable.
///
/// Identifiers are written as-is, without backtick quoting.
///
/// # Example
/// ```rust
/// use timestampr_core::models::TableColumnSet;
/// use timestampr_core::statement::build_alter_statement;
///
/// let set = TableColumnSet::new("orders", vec!["created_at".into(), "updated_at".into()]);
/// assert_eq!(
///     build_alter_statement(&set).unwrap(),
///     "ALTER TABLE orders MODIFY COLUMN created_at TIMESTAMP NULL, \
///      MODIFY COLUMN updated_at TIMESTAMP NULL;"
/// );
/// ```
///
/// # Errors
/// Returns [`TimestamprError::Statement`] if `set` has no columns.
pub fn build_alter_statement(set: &TableColumnSet) -> Result<String> {
    if set.is_empty() {
        return Err(TimestamprError::Statement {
            table: set.table.clone(),
        });
    }

    let modifications = set
        .columns
        .iter()
        .map(|column| format!("MODIFY COLUMN {} TIMESTAMP NULL", column))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("ALTER TABLE {} {};", set.table, modifications))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_columns_in_ordinal_order() {
        let set = TableColumnSet::new(
            "orders",
            vec!["created_at".to_string(), "updated_at".to_string()],
        );
        assert_eq!(
            build_alter_statement(&set).unwrap(),
            "ALTER TABLE orders MODIFY COLUMN created_at TIMESTAMP NULL, MODIFY COLUMN updated_at TIMESTAMP NULL;"
        );
    }

    #[test]
    fn test_single_column_has_no_separator() {
        let set = TableColumnSet::new("users", vec!["email_verified_at".to_string()]);
        assert_eq!(
            build_alter_statement(&set).unwrap(),
            "ALTER TABLE users MODIFY COLUMN email_verified_at TIMESTAMP NULL;"
        );
    }

    #[test]
    fn test_column_order_is_preserved() {
        let set = TableColumnSet::new(
            "audit",
            vec!["z_at".to_string(), "a_at".to_string(), "m_at".to_string()],
        );
        let statement = build_alter_statement(&set).unwrap();
        let z = statement.find("z_at").unwrap();
        let a = statement.find("a_at").unwrap();
        let m = statement.find("m_at").unwrap();
        assert!(z < a && a < m);
        assert!(!statement.contains(", ;"));
    }

    #[test]
    fn test_empty_column_set_is_rejected() {
        let set = TableColumnSet::new("orders", Vec::new());
        assert!(matches!(
            build_alter_statement(&set),
            Err(TimestamprError::Statement { table }) if table == "orders"
        ));
    }
}
