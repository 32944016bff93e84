//! Loan management service

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookResponse,
        loan::{LoanRequest, LoanResponse, NewLoan},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all loans in the store's natural order
    pub async fn list_all(&self) -> AppResult<Vec<LoanResponse>> {
        let loans = self.repository.loans.find_all().await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<LoanResponse> {
        self.repository
            .loans
            .find_by_id(id)
            .await?
            .map(LoanResponse::from)
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))
    }

    /// Record a new loan after verifying both referenced entities exist.
    /// The user check runs first: with two dangling references, the
    /// user failure is the one reported.
    pub async fn record(&self, request: LoanRequest) -> AppResult<LoanResponse> {
        if !self.repository.users.exists_by_id(request.user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        if !self.repository.books.exists_by_id(request.book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        let loan = self.repository.loans.insert(NewLoan::from(request)).await?;
        Ok(loan.into())
    }

    /// Set the return date on a loan. A second call overwrites the
    /// previous date; there is no "already returned" guard.
    pub async fn return_loan(&self, id: Uuid, return_date: NaiveDate) -> AppResult<LoanResponse> {
        let mut loan = self
            .repository
            .loans
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))?;

        if return_date < loan.loan_date {
            return Err(AppError::BadRequest(
                "Return date cannot be before loan date".to_string(),
            ));
        }

        loan.return_date = Some(return_date);
        self.repository.loans.update(&loan).await?;
        Ok(loan.into())
    }

    /// Books a user has loaned, most recent loan first. A dangling
    /// book reference aborts the whole listing with NotFound.
    pub async fn books_loaned_by_user(&self, user_id: Uuid) -> AppResult<Vec<BookResponse>> {
        let mut loans = self.repository.loans.find_by_user_id(user_id).await?;
        // Stable sort keeps the store's order for equal loan dates
        loans.sort_by(|a, b| b.loan_date.cmp(&a.loan_date));

        let mut books = Vec::with_capacity(loans.len());
        for loan in loans {
            let book = self
                .repository
                .books
                .find_by_id(loan.book_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
            books.push(book.into());
        }
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        models::{book::Book, loan::Loan},
        repository::{MockBooksRepository, MockLoansRepository, MockUsersRepository},
    };

    fn service(
        loans: MockLoansRepository,
        books: MockBooksRepository,
        users: MockUsersRepository,
    ) -> LoansService {
        LoansService::new(Repository {
            books: Arc::new(books),
            users: Arc::new(users),
            loans: Arc::new(loans),
        })
    }

    fn sample_loan(id: Uuid, book_id: Uuid, user_id: Uuid) -> Loan {
        Loan {
            id,
            book_id,
            user_id,
            loan_date: Utc::now().date_naive(),
            return_date: None,
        }
    }

    fn sample_book(id: Uuid, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Test Author".to_string(),
            published_year: 2021,
            isbn: Some("1234567890".to_string()),
            copies_available: 5,
        }
    }

    #[tokio::test]
    async fn get_by_id_fails_when_absent() {
        let mut loans = MockLoansRepository::new();
        loans.expect_find_by_id().returning(|_| Ok(None));

        let result = service(loans, MockBooksRepository::new(), MockUsersRepository::new())
            .get_by_id(Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn record_creates_loan_with_null_return_date() {
        let (loan_id, book_id, user_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let mut users = MockUsersRepository::new();
        users
            .expect_exists_by_id()
            .with(eq(user_id))
            .returning(|_| Ok(true));
        let mut books = MockBooksRepository::new();
        books
            .expect_exists_by_id()
            .with(eq(book_id))
            .returning(|_| Ok(true));
        let mut loans = MockLoansRepository::new();
        loans
            .expect_insert()
            .returning(move |_| Ok(sample_loan(loan_id, book_id, user_id)));

        let request = LoanRequest {
            book_id,
            user_id,
            loan_date: Utc::now().date_naive(),
        };

        let result = service(loans, books, users).record(request).await.unwrap();

        assert_eq!(result.id, loan_id);
        assert!(result.return_date.is_none());
    }

    #[tokio::test]
    async fn record_fails_when_user_is_missing() {
        let mut users = MockUsersRepository::new();
        users.expect_exists_by_id().returning(|_| Ok(false));
        let mut loans = MockLoansRepository::new();
        loans.expect_insert().never();
        // The book check never runs when the user check fails
        let mut books = MockBooksRepository::new();
        books.expect_exists_by_id().never();

        let request = LoanRequest {
            book_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            loan_date: Utc::now().date_naive(),
        };

        let result = service(loans, books, users).record(request).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "User not found"));
    }

    #[tokio::test]
    async fn record_fails_when_book_is_missing() {
        let mut users = MockUsersRepository::new();
        users.expect_exists_by_id().returning(|_| Ok(true));
        let mut books = MockBooksRepository::new();
        books.expect_exists_by_id().returning(|_| Ok(false));
        let mut loans = MockLoansRepository::new();
        loans.expect_insert().never();

        let request = LoanRequest {
            book_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            loan_date: Utc::now().date_naive(),
        };

        let result = service(loans, books, users).record(request).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Book not found"));
    }

    #[tokio::test]
    async fn return_loan_sets_return_date() {
        let id = Uuid::new_v4();
        let return_date = Utc::now().date_naive().succ_opt().unwrap();

        let mut loans = MockLoansRepository::new();
        loans
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(sample_loan(id, Uuid::new_v4(), Uuid::new_v4()))));
        loans
            .expect_update()
            .withf(move |loan| loan.return_date == Some(return_date))
            .returning(|_| Ok(()));

        let result = service(loans, MockBooksRepository::new(), MockUsersRepository::new())
            .return_loan(id, return_date)
            .await
            .unwrap();

        assert_eq!(result.return_date, Some(return_date));
    }

    #[tokio::test]
    async fn return_loan_rejects_date_before_loan_date() {
        let id = Uuid::new_v4();
        let before = Utc::now().date_naive().pred_opt().unwrap();

        let mut loans = MockLoansRepository::new();
        loans
            .expect_find_by_id()
            .returning(move |_| Ok(Some(sample_loan(id, Uuid::new_v4(), Uuid::new_v4()))));
        loans.expect_update().never();

        let result = service(loans, MockBooksRepository::new(), MockUsersRepository::new())
            .return_loan(id, before)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn return_loan_fails_when_absent() {
        let mut loans = MockLoansRepository::new();
        loans.expect_find_by_id().returning(|_| Ok(None));

        let result = service(loans, MockBooksRepository::new(), MockUsersRepository::new())
            .return_loan(Uuid::new_v4(), Utc::now().date_naive())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn books_loaned_by_user_are_sorted_by_descending_loan_date() {
        let user_id = Uuid::new_v4();
        let (book1, book2) = (Uuid::new_v4(), Uuid::new_v4());

        let older = Loan {
            loan_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            ..sample_loan(Uuid::new_v4(), book1, user_id)
        };
        let newer = Loan {
            loan_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            ..sample_loan(Uuid::new_v4(), book2, user_id)
        };

        let mut loans = MockLoansRepository::new();
        loans
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| Ok(vec![older.clone(), newer.clone()]));

        let mut books = MockBooksRepository::new();
        books
            .expect_find_by_id()
            .with(eq(book1))
            .returning(move |_| Ok(Some(sample_book(book1, "Older"))));
        books
            .expect_find_by_id()
            .with(eq(book2))
            .returning(move |_| Ok(Some(sample_book(book2, "Newer"))));

        let result = service(loans, books, MockUsersRepository::new())
            .books_loaned_by_user(user_id)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Newer");
        assert_eq!(result[1].title, "Older");
    }

    #[tokio::test]
    async fn books_loaned_by_user_with_no_loans_is_empty() {
        let mut loans = MockLoansRepository::new();
        loans.expect_find_by_user_id().returning(|_| Ok(vec![]));

        let result = service(loans, MockBooksRepository::new(), MockUsersRepository::new())
            .books_loaned_by_user(Uuid::new_v4())
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn dangling_book_reference_aborts_the_listing() {
        let user_id = Uuid::new_v4();

        let mut loans = MockLoansRepository::new();
        loans
            .expect_find_by_user_id()
            .returning(move |_| Ok(vec![sample_loan(Uuid::new_v4(), Uuid::new_v4(), user_id)]));
        let mut books = MockBooksRepository::new();
        books.expect_find_by_id().returning(|_| Ok(None));

        let result = service(loans, books, MockUsersRepository::new())
            .books_loaned_by_user(user_id)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
