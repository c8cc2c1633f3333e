//! `SET` clause assembly for partial updates.

use super::{FieldMapper, SqlBuildError, SqlValue};

/// Assignment list for an `UPDATE ... SET` statement.
///
/// `sql` holds `"col"=$1, "col"=$2, ...` and `values` the matching
/// parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClause {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl SetClause {
    /// Index of the first placeholder free for the caller's key predicate.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build a `SET` clause from an ordered list of field changes.
///
/// Assignments keep the order of `changes`; the n-th change is bound to
/// `$n`. Fails with [`SqlBuildError::EmptyUpdate`] when `changes` is empty.
///
/// # Examples
/// ```
/// use jobly::outbound::persistence::sql::{partial_update, CompanyField, SqlValue};
///
/// let clause = partial_update(vec![
///     (CompanyField::NumEmployees, SqlValue::integer(32)),
///     (CompanyField::Name, SqlValue::text("Aliya")),
/// ])
/// .unwrap();
/// assert_eq!(clause.sql, r#""num_employees"=$1, "name"=$2"#);
/// assert_eq!(clause.next_placeholder(), 3);
/// ```
pub fn partial_update<F: FieldMapper>(
    changes: Vec<(F, SqlValue)>,
) -> Result<SetClause, SqlBuildError> {
    if changes.is_empty() {
        return Err(SqlBuildError::EmptyUpdate);
    }

    let (assignments, values): (Vec<String>, Vec<SqlValue>) = changes
        .into_iter()
        .enumerate()
        .map(|(idx, (field, value))| (format!("\"{}\"=${}", field.column(), idx + 1), value))
        .unzip();

    Ok(SetClause {
        sql: assignments.join(", "),
        values,
    })
}
