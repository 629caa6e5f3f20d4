use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::errors::CoreError;

pub mod books;
pub mod profile;
pub mod reviews;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct BookParams {
    pub category: Option<i64>,
    pub search: Option<String>,
    pub viewer: Option<i64>,
}

/// Maps the core error taxonomy to response codes. Store failures are
/// logged here; the expected outcomes (invalid input, conflict) are not.
pub fn error_response(err: CoreError) -> Response {
    let status = match &err {
        CoreError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::AlreadyRated => StatusCode::CONFLICT,
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Store(e) => {
            log::error!("Data store failure: {e:?}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, err.to_string()).into_response()
}

pub fn connection_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response()
}
