use crate::database::StoreError;
use crate::validation::ValidationErrors;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

pub const MALFORMED_URI: &str = "Received malformed URI, please check input and try again";
pub const MALFORMED_BODY: &str = "Request body is not valid JSON for a user.";
pub const COULD_NOT_FIND: &str = "Could not find a user with the given ID.";
pub const ERROR_WHILE_PROCESSING: &str =
    "An error occurred while processing your request, please try again later.";

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
    NotFound(i64),
    MalformedUri(String),
    MalformedBody(String),
    /// Storage failure; the detail is logged, never sent to the client.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errs) => write!(f, "Validation error: {}", errs),
            AppError::NotFound(id) => write!(f, "Not found: user {}", id),
            AppError::MalformedUri(path) => write!(f, "Malformed URI: {}", path),
            AppError::MalformedBody(msg) => write!(f, "Malformed body: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// What the client gets to see.
    fn payload(&self) -> ValidationErrors {
        let message = match self {
            AppError::Validation(errs) => return errs.clone(),
            AppError::NotFound(_) => COULD_NOT_FIND,
            AppError::MalformedUri(_) => MALFORMED_URI,
            AppError::MalformedBody(_) => MALFORMED_BODY,
            AppError::Internal(_) => ERROR_WHILE_PROCESSING,
        };
        ValidationErrors::new(message, Vec::new())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedUri(_) | AppError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.payload())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CreateIncomplete(errs) | StoreError::EditIncomplete(errs) => {
                AppError::Validation(errs)
            }
            StoreError::NotFound(id) => AppError::NotFound(id),
            other => AppError::Internal(other.to_string()),
        }
    }
}
