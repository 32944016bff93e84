//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Book entity from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub isbn: Option<String>,
    pub copies_available: i32,
}

/// Insert payload; identity is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub isbn: Option<String>,
    pub copies_available: i32,
}

/// Inbound book payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(range(min = 0, message = "Published year must not be negative"))]
    pub published_year: i32,
    pub isbn: Option<String>,
    #[validate(range(min = 0, message = "Copies available must not be negative"))]
    pub copies_available: i32,
}

/// Outbound book shape
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub copies_available: i32,
}

impl From<BookRequest> for NewBook {
    fn from(request: BookRequest) -> Self {
        Self {
            title: request.title,
            author: request.author,
            published_year: request.published_year,
            isbn: request.isbn,
            copies_available: request.copies_available,
        }
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            published_year: book.published_year,
            isbn: book.isbn,
            copies_available: book.copies_available,
        }
    }
}
