//! User model and related types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User entity from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub membership_date: NaiveDate,
}

/// Insert payload; identity is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub membership_date: NaiveDate,
}

/// Inbound user payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = membership_date_in_past))]
    pub membership_date: NaiveDate,
}

/// Outbound user shape
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub membership_date: NaiveDate,
}

// Checked at creation and update time only; never re-validated afterwards
fn membership_date_in_past(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < Utc::now().date_naive() {
        Ok(())
    } else {
        let mut error = ValidationError::new("past");
        error.message = Some("Membership date must be in the past".into());
        Err(error)
    }
}

impl From<UserRequest> for NewUser {
    fn from(request: UserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            membership_date: request.membership_date,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            membership_date: user.membership_date,
        }
    }
}
