//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Record-Keeping Service REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::add_book,
        books::update_book,
        books::delete_book,
        // Users
        users::list_users,
        users::get_user,
        users::add_user,
        users::update_user,
        users::delete_user,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::record_loan,
        loans::return_loan,
        loans::books_loaned_by_user,
    ),
    components(
        schemas(
            crate::models::book::BookRequest,
            crate::models::book::BookResponse,
            crate::models::user::UserRequest,
            crate::models::user::UserResponse,
            crate::models::loan::LoanRequest,
            crate::models::loan::LoanResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book management"),
        (name = "users", description = "User management"),
        (name = "loans", description = "Loan management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
