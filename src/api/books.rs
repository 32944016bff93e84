//! Book management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{BookRequest, BookResponse},
        envelope::ApiResponse,
    },
};

/// Get all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of all books", body = Vec<BookResponse>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<BookResponse>>>> {
    let books = state.services.books.list_all().await?;
    Ok(Json(ApiResponse::ok(books)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookResponse>>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BookRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookResponse>>)> {
    request.validate()?;

    let book = state.services.books.add(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(book))))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<BookRequest>,
) -> AppResult<Json<ApiResponse<BookResponse>>> {
    request.validate()?;

    let book = state.services.books.update(id, request).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
