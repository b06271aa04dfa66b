//! Uniform CRUD contract shared by every entity route.
//!
//! | Method | Query         | Success                 |
//! |--------|---------------|-------------------------|
//! | GET    | entity filter | 200, JSON array         |
//! | POST   |               | 201, stored row         |
//! | PUT    | `id`          | 200, stored row         |
//! | DELETE | `id`          | 204, empty body         |
//!
//! Anything else is 405. Writes are only reachable through the admin gate.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{get, MethodRouter},
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::{Database, Entity, Repository};
use crate::error::ApiError;
use crate::handlers::method_not_allowed;
use crate::middleware::AdminSession;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Method router for one entity's collection route
pub fn resource<E: Entity>() -> MethodRouter<AppState> {
    get(list::<E>)
        .post(create::<E>)
        .put(update::<E>)
        .delete(remove::<E>)
        .fallback(method_not_allowed)
}

/// GET - every row, filtered by `E::Filter` and ordered by the entity's fixed key
pub async fn list<E: Entity>(
    State(db): State<Database>,
    filter: Result<Query<E::Filter>, QueryRejection>,
) -> Result<Json<Vec<E>>, ApiError> {
    let Query(filter) = filter?;
    let rows = Repository::<E>::new(db.pool().clone()).list(&filter).await?;
    Ok(Json(rows))
}

/// POST - insert; any `id` in the body is ignored
pub async fn create<E: Entity>(
    State(db): State<Database>,
    admin: AdminSession,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<(StatusCode, Json<E>), ApiError> {
    let Json(entity) = payload?;
    let row = Repository::<E>::new(db.pool().clone()).insert(&entity).await?;

    tracing::info!("{} {} created by '{}'", E::LABEL, row.id(), admin.username);
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT ?id=N - overwrite every mutable field of row N
pub async fn update<E: Entity>(
    State(db): State<Database>,
    admin: AdminSession,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<Json<E>, ApiError> {
    let id = require_id(query)?;
    let Json(entity) = payload?;

    let row = Repository::<E>::new(db.pool().clone())
        .update(id, &entity)
        .await?
        .ok_or_else(not_found::<E>)?;

    tracing::info!("{} {} updated by '{}'", E::LABEL, id, admin.username);
    Ok(Json(row))
}

/// DELETE ?id=N
pub async fn remove<E: Entity>(
    State(db): State<Database>,
    admin: AdminSession,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let id = require_id(query)?;

    if !Repository::<E>::new(db.pool().clone()).delete(id).await? {
        return Err(not_found::<E>());
    }

    tracing::info!("{} {} deleted by '{}'", E::LABEL, id, admin.username);
    Ok(StatusCode::NO_CONTENT)
}

fn require_id(query: Result<Query<IdQuery>, QueryRejection>) -> Result<i32, ApiError> {
    let Query(IdQuery { id }) = query?;
    let raw = id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("ID parameter required"))?;
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid ID format"))
}

fn not_found<E: Entity>() -> ApiError {
    ApiError::not_found(format!("{} not found", E::LABEL))
}
