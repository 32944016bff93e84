//! Loan model and related types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Loan entity from database; a null return_date means "not yet returned"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Insert payload; identity is assigned by the store, return_date starts null
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoan {
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub loan_date: NaiveDate,
}

/// Inbound loan payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub book_id: Uuid,
    pub user_id: Uuid,
    #[validate(custom(function = loan_date_not_in_future))]
    pub loan_date: NaiveDate,
}

/// Outbound loan shape; return_date is omitted until the loan is returned
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub loan_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
}

fn loan_date_not_in_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date <= Utc::now().date_naive() {
        Ok(())
    } else {
        let mut error = ValidationError::new("past_or_present");
        error.message = Some("Loan date must be in the past or present".into());
        Err(error)
    }
}

impl From<LoanRequest> for NewLoan {
    fn from(request: LoanRequest) -> Self {
        Self {
            book_id: request.book_id,
            user_id: request.user_id,
            loan_date: request.loan_date,
        }
    }
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id,
            book_id: loan.book_id,
            user_id: loan.user_id,
            loan_date: loan.loan_date,
            return_date: loan.return_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(loan_date: NaiveDate) -> LoanRequest {
        LoanRequest {
            book_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            loan_date,
        }
    }

    #[test]
    fn today_loan_date_is_accepted() {
        assert!(request(Utc::now().date_naive()).validate().is_ok());
    }

    #[test]
    fn future_loan_date_is_rejected() {
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        let errors = request(tomorrow).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("loan_date"));
    }

    #[test]
    fn return_date_is_omitted_from_json_until_returned() {
        let response = LoanResponse::from(Loan {
            id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            loan_date: Utc::now().date_naive(),
            return_date: None,
        });
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("returnDate").is_none());
    }
}
