//! Book management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookRequest, BookResponse, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books in the store's natural order
    pub async fn list_all(&self) -> AppResult<Vec<BookResponse>> {
        let books = self.repository.books.find_all().await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookResponse> {
        self.repository
            .books
            .find_by_id(id)
            .await?
            .map(BookResponse::from)
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Add a new book; a present-and-colliding ISBN is rejected,
    /// an absent ISBN is accepted without a collision check
    pub async fn add(&self, request: BookRequest) -> AppResult<BookResponse> {
        if let Some(isbn) = request.isbn.as_deref() {
            if self.repository.books.exists_by_isbn(isbn).await? {
                return Err(AppError::AlreadyExists(format!(
                    "Book with this isbn: {} already exists",
                    isbn
                )));
            }
        }

        let book = self.repository.books.insert(NewBook::from(request)).await?;
        Ok(book.into())
    }

    /// Overwrite all five mutable fields in place.
    /// ISBN uniqueness is not re-checked against other rows.
    pub async fn update(&self, id: Uuid, request: BookRequest) -> AppResult<BookResponse> {
        let mut book = self
            .repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        book.title = request.title;
        book.author = request.author;
        book.published_year = request.published_year;
        book.isbn = request.isbn;
        book.copies_available = request.copies_available;

        self.repository.books.update(&book).await?;
        Ok(book.into())
    }

    /// Delete a book. Loans referencing it are left untouched.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.books.exists_by_id(id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        self.repository.books.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::*;
    use crate::{
        models::book::Book,
        repository::{MockBooksRepository, MockLoansRepository, MockUsersRepository},
    };

    fn service(books: MockBooksRepository) -> BooksService {
        BooksService::new(Repository {
            books: Arc::new(books),
            users: Arc::new(MockUsersRepository::new()),
            loans: Arc::new(MockLoansRepository::new()),
        })
    }

    fn sample_book(id: Uuid) -> Book {
        Book {
            id,
            title: "Test Book".to_string(),
            author: "Test Author".to_string(),
            published_year: 2021,
            isbn: Some("1234567890".to_string()),
            copies_available: 5,
        }
    }

    fn sample_request() -> BookRequest {
        BookRequest {
            title: "Test Book".to_string(),
            author: "Test Author".to_string(),
            published_year: 2021,
            isbn: Some("1234567890".to_string()),
            copies_available: 5,
        }
    }

    #[tokio::test]
    async fn list_all_maps_books_to_responses() {
        let id = Uuid::new_v4();
        let mut books = MockBooksRepository::new();
        books
            .expect_find_all()
            .returning(move || Ok(vec![sample_book(id)]));

        let result = service(books).list_all().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, id);
    }

    #[tokio::test]
    async fn get_by_id_returns_book() {
        let id = Uuid::new_v4();
        let mut books = MockBooksRepository::new();
        books
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(sample_book(id))));

        let result = service(books).get_by_id(id).await.unwrap();

        assert_eq!(result.title, "Test Book");
    }

    #[tokio::test]
    async fn get_by_id_fails_when_absent() {
        let mut books = MockBooksRepository::new();
        books.expect_find_by_id().returning(|_| Ok(None));

        let result = service(books).get_by_id(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn add_with_unused_isbn_creates_book() {
        let id = Uuid::new_v4();
        let mut books = MockBooksRepository::new();
        books
            .expect_exists_by_isbn()
            .with(eq("1234567890"))
            .returning(|_| Ok(false));
        books
            .expect_insert()
            .with(eq(NewBook::from(sample_request())))
            .returning(move |_| Ok(sample_book(id)));

        let result = service(books).add(sample_request()).await.unwrap();

        assert_eq!(result.id, id);
        assert_eq!(result.isbn.as_deref(), Some("1234567890"));
    }

    #[tokio::test]
    async fn add_with_colliding_isbn_fails_without_insert() {
        let mut books = MockBooksRepository::new();
        books.expect_exists_by_isbn().returning(|_| Ok(true));
        books.expect_insert().never();

        let result = service(books).add(sample_request()).await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn add_without_isbn_skips_collision_check() {
        let id = Uuid::new_v4();
        let mut books = MockBooksRepository::new();
        books.expect_exists_by_isbn().never();
        books.expect_insert().returning(move |_| {
            Ok(Book {
                isbn: None,
                ..sample_book(id)
            })
        });

        let mut request = sample_request();
        request.isbn = None;

        let result = service(books).add(request).await.unwrap();

        assert!(result.isbn.is_none());
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let id = Uuid::new_v4();
        let mut books = MockBooksRepository::new();
        books
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(sample_book(id))));
        books
            .expect_update()
            .withf(|book| book.title == "Updated" && book.copies_available == 2)
            .returning(|_| Ok(()));

        let request = BookRequest {
            title: "Updated".to_string(),
            author: "New Author".to_string(),
            published_year: 1999,
            isbn: Some("0987654321".to_string()),
            copies_available: 2,
        };

        let result = service(books).update(id, request).await.unwrap();

        assert_eq!(result.title, "Updated");
        assert_eq!(result.published_year, 1999);
    }

    #[tokio::test]
    async fn update_fails_when_absent() {
        let mut books = MockBooksRepository::new();
        books.expect_find_by_id().returning(|_| Ok(None));
        books.expect_update().never();

        let result = service(books).update(Uuid::new_v4(), sample_request()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_existing_book() {
        let id = Uuid::new_v4();
        let mut books = MockBooksRepository::new();
        books.expect_exists_by_id().with(eq(id)).returning(|_| Ok(true));
        books
            .expect_delete_by_id()
            .with(eq(id))
            .returning(|_| Ok(()));

        assert!(service(books).delete(id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_fails_when_absent() {
        let mut books = MockBooksRepository::new();
        books.expect_exists_by_id().returning(|_| Ok(false));
        books.expect_delete_by_id().never();

        let result = service(books).delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
