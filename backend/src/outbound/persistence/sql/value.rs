//! Positional parameter values and their Diesel bindings.

use bigdecimal::BigDecimal;
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Integer, Nullable, Numeric, Text};

/// A value bound to a `$n` placeholder.
///
/// Every variant is nullable so partial updates can clear optional columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Numeric(Option<BigDecimal>),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    pub fn integer(value: i32) -> Self {
        Self::Integer(Some(value))
    }

    pub fn numeric(value: BigDecimal) -> Self {
        Self::Numeric(Some(value))
    }
}

/// Bind `values` to `query` in order, so the i-th value fills `$i`.
pub(crate) fn bind_values<'f>(
    query: BoxedSqlQuery<'f, Pg, SqlQuery>,
    values: Vec<SqlValue>,
) -> BoxedSqlQuery<'f, Pg, SqlQuery> {
    values.into_iter().fold(query, |query, value| match value {
        SqlValue::Text(v) => query.bind::<Nullable<Text>, _>(v),
        SqlValue::Integer(v) => query.bind::<Nullable<Integer>, _>(v),
        SqlValue::Numeric(v) => query.bind::<Nullable<Numeric>, _>(v),
    })
}
