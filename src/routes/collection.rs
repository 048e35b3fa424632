use std::fmt;

use actix_web::{error::JsonPayloadError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError, Scope};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{database::{checkout, CheckoutError, DbPool}, db_interaction::{delete_record, find_record, insert_record, list_records, replace_record, Resource, StoreError}, utils::fmt_error_chain};

/// Mounts list/get/create/update/delete for `R` under `/{R::PATH}`.
pub fn collection<R: Resource>() -> Scope {
    web::scope(&format!("/{}", R::PATH))
        .route("", web::get().to(get_all::<R>))
        .route("", web::post().to(post::<R>))
        .route("/{id}", web::get().to(get_by_id::<R>))
        .route("/{id}", web::put().to(put::<R>))
        .route("/{id}", web::delete().to(delete::<R>))
}

// Malformed bodies, including ones missing a required field, are store
// failures like any other.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            ResourceError::InvalidBody(err.to_string()).into()
        })
}

#[derive(Error)]
pub enum ResourceError{
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidBody(String),
    #[error(transparent)]
    StoreError(#[from] StoreError),
    #[error(transparent)]
    CheckoutError(#[from] CheckoutError)
}

impl fmt::Debug for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_error_chain(f, self)
    }
}

impl ResponseError for ResourceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ResourceError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .json(json!({ "error": self.to_string() }))
    }
}

#[tracing::instrument(
    "Listing collection",
    skip(pool),
    fields(collection = R::PATH)
)]
pub async fn get_all<R: Resource>(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, ResourceError>{
    let conn = checkout(&pool).await?;
    let records = list_records::<R>(conn).await?;

    Ok(HttpResponse::Ok().json(records))
}

#[tracing::instrument(
    "Getting record by id",
    skip(pool),
    fields(collection = R::PATH)
)]
pub async fn get_by_id<R: Resource>(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ResourceError>{
    let conn = checkout(&pool).await?;
    let record = find_record::<R>(conn, path.into_inner())
        .await?
        .ok_or(ResourceError::NotFound(R::NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    "Creating record",
    skip_all,
    fields(collection = R::PATH)
)]
pub async fn post<R: Resource>(
    pool: web::Data<DbPool>,
    json: web::Json<R::Payload>
) -> Result<HttpResponse, ResourceError>{
    let conn = checkout(&pool).await?;
    let record = insert_record::<R>(conn, json.into_inner()).await?;

    tracing::info!(id = record.id(), "record created");
    Ok(HttpResponse::Created().json(record))
}

#[tracing::instrument(
    "Updating record",
    skip(pool, json),
    fields(collection = R::PATH)
)]
pub async fn put<R: Resource>(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    json: web::Json<Value>
) -> Result<HttpResponse, ResourceError>{
    let id = path.into_inner();
    let conn = checkout(&pool).await?;

    // An unknown id is reported as 404 even when the body is incomplete.
    let payload = match serde_json::from_value::<R::Payload>(json.into_inner()) {
        Ok(payload) => payload,
        Err(e) => {
            return match find_record::<R>(conn, id).await? {
                None => Err(ResourceError::NotFound(R::NOT_FOUND)),
                Some(_) => Err(ResourceError::InvalidBody(e.to_string()))
            };
        }
    };

    let record = replace_record::<R>(conn, id, payload)
        .await?
        .ok_or(ResourceError::NotFound(R::NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    "Deleting record",
    skip(pool),
    fields(collection = R::PATH)
)]
pub async fn delete<R: Resource>(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ResourceError>{
    let conn = checkout(&pool).await?;

    if !delete_record::<R>(conn, path.into_inner()).await? {
        return Err(ResourceError::NotFound(R::NOT_FOUND));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": R::REMOVED })))
}
