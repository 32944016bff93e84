//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::BookResponse,
        envelope::ApiResponse,
        loan::{LoanRequest, LoanResponse},
    },
};

/// Return date supplied when marking a loan as returned
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReturnLoanParams {
    /// Date of return (ISO 8601 date)
    pub return_date: NaiveDate,
}

/// Get all loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "List of all loans", body = Vec<LoanResponse>)
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<LoanResponse>>>> {
    let loans = state.services.loans.list_all().await?;
    Ok(Json(ApiResponse::ok(loans)))
}

/// Get a loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = Uuid, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan details", body = LoanResponse),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<LoanResponse>>> {
    let loan = state.services.loans.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// Record a new loan
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan recorded", body = LoanResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced user or book not found")
    )
)]
pub async fn record_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<LoanResponse>>)> {
    request.validate()?;

    let loan = state.services.loans.record(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(loan))))
}

/// Mark a loan as returned
#[utoipa::path(
    put,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = Uuid, Path, description = "Loan ID"),
        ReturnLoanParams
    ),
    responses(
        (status = 200, description = "Loan returned", body = LoanResponse),
        (status = 400, description = "Return date before loan date"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ReturnLoanParams>,
) -> AppResult<Json<ApiResponse<LoanResponse>>> {
    let loan = state
        .services
        .loans
        .return_loan(id, params.return_date)
        .await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// Get books loaned by a user, most recent loan first
#[utoipa::path(
    get,
    path = "/loans/user/{user_id}",
    tag = "loans",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Books loaned by the user", body = Vec<BookResponse>),
        (status = 404, description = "A loaned book no longer exists")
    )
)]
pub async fn books_loaned_by_user(
    State(state): State<crate::AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<BookResponse>>>> {
    let books = state.services.loans.books_loaned_by_user(user_id).await?;
    Ok(Json(ApiResponse::ok(books)))
}
