use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::pages::render_error_page;

/// Failure of the outbound SALE call, after it was attempted.
#[derive(Debug, thiserror::Error)]
pub enum SaleError {
    /// Connect, timeout or body read failure
    #[error("MSU request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("MSU responded with HTTP {0}")]
    UpstreamStatus(u16),

    /// Body was not JSON
    #[error("Invalid MSU response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Errors surfaced by the relay's HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// `/auth3d` query is missing `token` and/or `data` (in that order)
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingQueryParameters(Vec<&'static str>),

    #[error("Missing required parameters")]
    MissingSaleParameters,

    #[error("Invalid saveCard value")]
    InvalidSaveCard,

    #[error("SALE transaction failed")]
    SaleFailed(#[from] SaleError),
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingQueryParameters(_)
            | RelayError::MissingSaleParameters
            | RelayError::InvalidSaveCard => StatusCode::BAD_REQUEST,
            RelayError::SaleFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            RelayError::MissingQueryParameters(_) => HttpResponse::BadRequest()
                .content_type(ContentType::html())
                .body(render_error_page(&self.to_string())),
            RelayError::MissingSaleParameters | RelayError::InvalidSaveCard => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "success": false,
                    "message": self.to_string()
                }))
            }
            RelayError::SaleFailed(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": self.to_string(),
                "error": e.to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_message_order() {
        let err = RelayError::MissingQueryParameters(vec!["token", "data"]);
        assert_eq!(err.to_string(), "Missing required parameters: token, data");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RelayError::MissingQueryParameters(vec!["data"]).status_code(),
            400
        );
        assert_eq!(RelayError::MissingSaleParameters.status_code(), 400);
        let invalid = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = RelayError::from(SaleError::from(invalid));
        assert_eq!(err.error_response().status(), 500);
    }

    #[test]
    fn test_invalid_response_message() {
        let invalid = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(SaleError::from(invalid)
            .to_string()
            .starts_with("Invalid MSU response"));
    }
}
