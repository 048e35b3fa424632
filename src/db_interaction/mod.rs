mod resources;

use std::fmt;

use diesel::{QueryResult, SqliteConnection};
use thiserror::Error;

use crate::{database::DbConnection, models::Collection, telemetry::spawn_blocking_with_tracing, utils::fmt_error_chain};

/// Store-side operations of a collection. Each call is a single SQL
/// statement; create and update read the row back with `RETURNING`.
pub trait Resource: Collection {
    fn load_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Self>>;
    fn find(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Self>>;
    fn insert(conn: &mut SqliteConnection, payload: Self::Payload) -> QueryResult<Self>;
    fn replace(conn: &mut SqliteConnection, id: i32, payload: Self::Payload) -> QueryResult<Option<Self>>;
    /// Number of rows removed, 0 or 1. Dependent rows go with it through
    /// `ON DELETE CASCADE`.
    fn remove(conn: &mut SqliteConnection, id: i32) -> QueryResult<usize>;
}

// The raw diesel/sqlite message is what callers get back, so the query
// variant is transparent.
#[derive(Error)]
pub enum StoreError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error(transparent)]
    QueryError(#[from] diesel::result::Error)
}

impl fmt::Debug for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_error_chain(f, self)
    }
}

#[tracing::instrument(
    "Getting records from db",
    skip_all,
    fields(collection = R::PATH)
)]
pub async fn list_records<R: Resource>(
    mut conn: DbConnection
) -> Result<Vec<R>, StoreError>{
    let res = spawn_blocking_with_tracing(move || {
        R::load_all(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting record by id from db",
    skip(conn),
    fields(collection = R::PATH)
)]
pub async fn find_record<R: Resource>(
    mut conn: DbConnection,
    id: i32
) -> Result<Option<R>, StoreError>{
    let res = spawn_blocking_with_tracing(move || {
        R::find(&mut conn, id)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting record into db",
    skip_all,
    fields(collection = R::PATH)
)]
pub async fn insert_record<R: Resource>(
    mut conn: DbConnection,
    payload: R::Payload
) -> Result<R, StoreError>{
    let res = spawn_blocking_with_tracing(move || {
        R::insert(&mut conn, payload)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Replacing record in db",
    skip(conn, payload),
    fields(collection = R::PATH)
)]
pub async fn replace_record<R: Resource>(
    mut conn: DbConnection,
    id: i32,
    payload: R::Payload
) -> Result<Option<R>, StoreError>{
    let res = spawn_blocking_with_tracing(move || {
        R::replace(&mut conn, id, payload)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Deleting record from db",
    skip(conn),
    fields(collection = R::PATH)
)]
pub async fn delete_record<R: Resource>(
    mut conn: DbConnection,
    id: i32
) -> Result<bool, StoreError>{
    let affected_rows = spawn_blocking_with_tracing(move || {
        R::remove(&mut conn, id)
    })
    .await??;

    Ok(affected_rows > 0)
}
