//! Typed bind values for dynamically-built listing queries.

use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;

use catalog_core::types::DbId;

/// A value bound to one `$n` placeholder of a dynamically-built query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BindValue {
    BigInt(i64),
    Text(String),
    IdArray(Vec<DbId>),
    TextArray(Vec<String>),
}

/// Placeholder bookkeeping: hands out `$n` indexes in bind order.
#[derive(Debug, Default)]
pub(crate) struct Binds {
    values: Vec<BindValue>,
}

impl Binds {
    /// Register a value and return its placeholder (`$1`, `$2`, ...).
    pub(crate) fn push(&mut self, value: BindValue) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }

    pub(crate) fn values(&self) -> &[BindValue] {
        &self.values
    }

    pub(crate) fn into_values(self) -> Vec<BindValue> {
        self.values
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub(crate) fn bind_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        q = match value {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::IdArray(v) => q.bind(v.as_slice()),
            BindValue::TextArray(v) => q.bind(v.as_slice()),
        };
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub(crate) fn bind_values_scalar<'q>(
    mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for value in values {
        q = match value {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::IdArray(v) => q.bind(v.as_slice()),
            BindValue::TextArray(v) => q.bind(v.as_slice()),
        };
    }
    q
}
