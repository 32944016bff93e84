//! Loans repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::loan::{Loan, NewLoan},
};

use super::LoansRepository;

#[derive(Clone)]
pub struct PgLoansRepository {
    pool: Pool<Postgres>,
}

impl PgLoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoansRepository for PgLoansRepository {
    async fn find_all(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans")
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(loan)
    }

    async fn insert(&self, loan: NewLoan) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, user_id, loan_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(loan.book_id)
        .bind(loan.user_id)
        .bind(loan.loan_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(loan)
    }

    async fn update(&self, loan: &Loan) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE loans
            SET book_id = $1, user_id = $2, loan_date = $3, return_date = $4
            WHERE id = $5
            "#,
        )
        .bind(loan.book_id)
        .bind(loan.user_id)
        .bind(loan.loan_date)
        .bind(loan.return_date)
        .bind(loan.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }
}
