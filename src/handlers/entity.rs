//! Entity CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::service::Repository;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid id: {}", id_str)))
}

/// Extractor failures (wrong content type, malformed JSON) are validation errors like any other.
fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::Validation("body must be a JSON object".into())),
    }
}

pub async fn list(State(repo): State<Repository>) -> Result<impl IntoResponse, AppError> {
    let rows = repo.list().await?;
    Ok(Json(rows))
}

/// A missing id answers 200 with `null`.
pub async fn read(
    State(repo): State<Repository>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = repo.get_by_id(id).await?;
    Ok(Json(row))
}

pub async fn create(
    State(repo): State<Repository>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let row = repo.create(&body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update(
    State(repo): State<Repository>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    let row = repo.update(id, &body).await?;
    Ok(Json(row))
}

pub async fn delete(
    State(repo): State<Repository>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
