//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::user::{NewUser, User},
};

use super::UsersRepository;

#[derive(Clone)]
pub struct PgUsersRepository {
    pool: Pool<Postgres>,
}

impl PgUsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn exists_by_id(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, membership_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.membership_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, membership_date = $3
            WHERE id = $4
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.membership_date)
        .bind(user.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
