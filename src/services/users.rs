//! User management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{NewUser, UserRequest, UserResponse},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all users in the store's natural order
    pub async fn list_all(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repository.users.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<UserResponse> {
        self.repository
            .users
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Add a new user; a colliding email is rejected
    pub async fn add(&self, request: UserRequest) -> AppResult<UserResponse> {
        if self
            .repository
            .users
            .exists_by_email(&request.email)
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "User with this email: {} already exists",
                request.email
            )));
        }

        let user = self.repository.users.insert(NewUser::from(request)).await?;
        Ok(user.into())
    }

    /// Overwrite name, email and membership date in place.
    /// Email uniqueness is not re-checked against other rows.
    pub async fn update(&self, id: Uuid, request: UserRequest) -> AppResult<UserResponse> {
        let mut user = self
            .repository
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.name = request.name;
        user.email = request.email;
        user.membership_date = request.membership_date;

        self.repository.users.update(&user).await?;
        Ok(user.into())
    }

    /// Delete a user. Loans referencing them are left untouched.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.users.exists_by_id(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        self.repository.users.delete_by_id(id).await
    }
}
