//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

use super::BooksRepository;

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn exists_by_id(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, published_year, isbn, copies_available)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_year)
        .bind(&book.isbn)
        .bind(book.copies_available)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, published_year = $3, isbn = $4, copies_available = $5
            WHERE id = $6
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_year)
        .bind(&book.isbn)
        .bind(book.copies_available)
        .bind(book.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
