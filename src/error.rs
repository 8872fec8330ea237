use thiserror::Error;

use crate::db::StoreError;

/// Everything a handler can fail with. The `Display` text is what the client
/// sees in the `error` field of the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Review {0} not found. :(")]
    NotFound(String),

    #[error("Missing required properties")]
    MissingProperties,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Something went wrong. {0}")]
    Storage(#[from] StoreError),
}

#[cfg(feature = "server")]
mod response {
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};
    use serde_json::json;

    use super::ApiError;

    impl ResponseError for ApiError {
        fn status_code(&self) -> StatusCode {
            match self {
                ApiError::NotFound(_) => StatusCode::NOT_FOUND,
                ApiError::MissingProperties | ApiError::MalformedPayload(_) => {
                    StatusCode::BAD_REQUEST
                }
                ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
        }
    }

}
