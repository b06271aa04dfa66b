use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{postgres::PgRow, query_builder::Separated, FromRow, Postgres, QueryBuilder};

/// Table descriptor for a plain CRUD record.
///
/// Every entity has a serial `id` primary key plus the mutable `COLUMNS`.
/// `push_values` must bind exactly one value per entry in `COLUMNS`, in order.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    /// Human-readable name used in log lines and 404 messages
    const LABEL: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Default `ORDER BY` clause body for listings
    const ORDER_BY: &'static str;

    /// Query-string filter accepted by the list endpoint
    type Filter: DeserializeOwned + Send + Sync + 'static;

    fn id(&self) -> i32;

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>);

    /// Append the WHERE / ORDER BY tail of a listing query.
    fn push_list_tail(_filter: &Self::Filter, query: &mut QueryBuilder<'_, Postgres>) {
        query.push(" ORDER BY ").push(Self::ORDER_BY);
    }
}

/// Filter for entities whose listing takes no parameters. Unknown query keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct NoFilter {}
