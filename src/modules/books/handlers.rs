//! Request handlers for the books module.
//!
//! Each handler parses its inputs, invokes one repository operation, and
//! either wraps the outcome in the success envelope or returns an
//! [`ApiError`] carrying the operation name for the error mapper.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use libris_http::error::ApiError;
use libris_http::response::ResponseForm;

use super::models::NewBook;
use super::repository::BookRepository;

/// GET `/` — all live books.
pub async fn list_books(
    State(repo): State<BookRepository>,
) -> Result<Json<ResponseForm>, ApiError> {
    let books = repo
        .list()
        .await
        .map_err(|err| ApiError::storage("list_books", err))?;

    Ok(Json(ResponseForm::success(json!({ "books": books }))))
}

/// GET `/{id}` — one live book by id.
pub async fn get_book(
    State(repo): State<BookRepository>,
    Path(id): Path<String>,
) -> Result<Json<ResponseForm>, ApiError> {
    let id = parse_id("get_book", &id)?;

    let book = repo
        .get(id)
        .await
        .map_err(|err| ApiError::storage("get_book", err))?
        .ok_or_else(|| ApiError::not_found("get_book", format!("book {id} not found")))?;

    Ok(Json(ResponseForm::success(json!({ "book": book }))))
}

/// POST `/` — insert a book from the request body.
pub async fn create_book(
    State(repo): State<BookRepository>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<Json<ResponseForm>, ApiError> {
    let Json(input) =
        payload.map_err(|rejection| ApiError::unprocessable("create_book", rejection.body_text()))?;

    let book = repo
        .create(input)
        .await
        .map_err(|err| ApiError::storage("create_book", err))?;

    Ok(Json(ResponseForm::success(json!({ "book": book }))))
}

/// DELETE `/{id}` — soft-delete one live book by id.
///
/// A missing target maps to the empty-body 404, not the error envelope.
pub async fn delete_book(
    State(repo): State<BookRepository>,
    Path(id): Path<String>,
) -> Result<Json<ResponseForm>, ApiError> {
    let id = parse_id("delete_book", &id)?;

    let book = repo
        .delete(id)
        .await
        .map_err(|err| ApiError::storage("delete_book", err))?
        .ok_or_else(|| ApiError::not_found_empty("delete_book"))?;

    Ok(Json(ResponseForm::success(json!({ "book": book }))))
}

/// Path parameters arrive as strings; coerce to the unsigned id and surface
/// the parse failure text on mismatch.
fn parse_id(source_op: &'static str, raw: &str) -> Result<u32, ApiError> {
    raw.parse::<u32>()
        .map_err(|err| ApiError::bad_request(source_op, err))
}
