// Route exports
pub mod execute;

use actix_web::{error, http::StatusCode, web, HttpResponse};

/// JSON error body for requests rejected before reaching a handler
#[derive(Debug, serde::Serialize)]
pub struct QueryRejection {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for QueryRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for QueryRejection {}

impl error::ResponseError for QueryRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle query string errors, e.g. a missing `q` parameter
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    QueryRejection {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .configure(execute::configure);
}
