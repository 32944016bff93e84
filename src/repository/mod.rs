//! Persistence gateway: per-entity contracts and their Postgres backends
//!
//! Services depend on these traits, not on sqlx, so the business rules
//! can be exercised against mocks.

pub mod books;
pub mod loans;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, NewBook},
        loan::{Loan, NewLoan},
        user::{NewUser, User},
    },
};

/// Key-based store for books
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Book>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn exists_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool>;
    /// Persist a new book, assigning its identity
    async fn insert(&self, book: NewBook) -> AppResult<Book>;
    /// Overwrite all mutable fields of an existing row
    async fn update(&self, book: &Book) -> AppResult<()>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// Key-based store for users
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn exists_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;
    async fn insert(&self, user: NewUser) -> AppResult<User>;
    async fn update(&self, user: &User) -> AppResult<()>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// Key-based store for loans
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LoansRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Loan>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Loan>>;
    async fn insert(&self, loan: NewLoan) -> AppResult<Loan>;
    async fn update(&self, loan: &Loan) -> AppResult<()>;
    /// All loans recorded for a user, in the store's natural order
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Loan>>;
}

/// Aggregate over the per-entity gateways, shared by all services
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BooksRepository>,
    pub users: Arc<dyn UsersRepository>,
    pub loans: Arc<dyn LoansRepository>,
}

impl Repository {
    /// Create a repository backed by the given Postgres pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            users: Arc::new(users::PgUsersRepository::new(pool.clone())),
            loans: Arc::new(loans::PgLoansRepository::new(pool)),
        }
    }
}
