use std::marker::PhantomData;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::entity::Entity;
use crate::database::manager::DatabaseError;

/// One-statement CRUD over an `Entity` table. No transactions: each call is
/// a single round-trip.
pub struct Repository<E> {
    pool: PgPool,
    _phantom: PhantomData<fn() -> E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    pub async fn list(&self, filter: &E::Filter) -> Result<Vec<E>, DatabaseError> {
        let mut query = select_query::<E>();
        E::push_list_tail(filter, &mut query);
        let rows = query.build_query_as::<E>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Insert and return the stored row, including its generated id
    pub async fn insert(&self, entity: &E) -> Result<E, DatabaseError> {
        let mut query = insert_query(entity);
        let row = query.build_query_as::<E>().fetch_one(&self.pool).await?;
        Ok(row)
    }

    /// Overwrite every mutable column. `None` when no row has this id.
    pub async fn update(&self, id: i32, entity: &E) -> Result<Option<E>, DatabaseError> {
        let mut query = update_query(id, entity);
        let row = query.build_query_as::<E>().fetch_optional(&self.pool).await?;
        Ok(row)
    }

    /// `false` when no row has this id
    pub async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut query = delete_query::<E>(id);
        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

fn returning_columns<E: Entity>() -> String {
    std::iter::once("id")
        .chain(E::COLUMNS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_query<E: Entity>() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!("SELECT {} FROM {}", returning_columns::<E>(), E::TABLE))
}

fn insert_query<E: Entity>(entity: &E) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        E::TABLE,
        E::COLUMNS.join(", ")
    ));
    entity.push_values(&mut query.separated(", "));
    query.push(") RETURNING ").push(returning_columns::<E>());
    query
}

fn update_query<E: Entity>(id: i32, entity: &E) -> QueryBuilder<'static, Postgres> {
    // Row-constructor form keeps the column list and bound values in one order.
    let mut query = QueryBuilder::new(format!(
        "UPDATE {} SET ({}) = ROW(",
        E::TABLE,
        E::COLUMNS.join(", ")
    ));
    entity.push_values(&mut query.separated(", "));
    query
        .push(") WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(returning_columns::<E>());
    query
}

fn delete_query<E: Entity>(id: i32) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("DELETE FROM {} WHERE id = ", E::TABLE));
    query.push_bind(id);
    query
}
