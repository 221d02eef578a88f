use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::config::DispatchSettings;
use crate::core::Dispatcher;
use crate::models::{ArgumentsFormat, ErrorResponse, ExecuteQuery, ExecuteResponse, HealthResponse, IntentDescriptor, InvokeResponse, NoMatchPolicy};
use crate::services::{invoke, FunctionCall, InvocationError, OutputStyle};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub no_match: NoMatchPolicy,
    pub arguments_format: ArgumentsFormat,
    pub function_output: OutputStyle,
}

impl AppState {
    pub fn from_settings(settings: &DispatchSettings) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::builtin(&settings.matching)),
            no_match: settings.no_match_status,
            arguments_format: settings.arguments_format,
            function_output: settings.function_output,
        }
    }

    fn no_match_response(&self, query: &str) -> HttpResponse {
        tracing::debug!("No template matched query: {:?}", query);
        HttpResponse::build(self.no_match.status()).json(ErrorResponse::new(self.no_match.message()))
    }

    fn dispatch(&self, query: &str) -> Option<IntentDescriptor> {
        self.dispatcher.dispatch(query).into_descriptor()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(&DispatchSettings::default())
    }
}

/// Configure the dispatch routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/execute", web::get().to(execute))
        .route("/invoke", web::get().to(invoke_function));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve a query to a function-call descriptor
///
/// GET /execute?q={query}
///
/// Response body:
/// ```json
/// {
///   "name": "get_ticket_status",
///   "arguments": {"ticket_id": 83742}
/// }
/// ```
async fn execute(
    state: web::Data<AppState>,
    query: web::Query<ExecuteQuery>,
) -> impl Responder {
    let Some(descriptor) = state.dispatch(&query.q) else {
        return state.no_match_response(&query.q);
    };

    tracing::debug!("Query matched {}", descriptor.name);

    match ExecuteResponse::from_descriptor(descriptor, state.arguments_format) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Failed to encode arguments: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to encode arguments"))
        }
    }
}

/// Resolve a query and run the matching mock function
///
/// GET /invoke?q={query}
async fn invoke_function(
    state: web::Data<AppState>,
    query: web::Query<ExecuteQuery>,
) -> impl Responder {
    let Some(descriptor) = state.dispatch(&query.q) else {
        return state.no_match_response(&query.q);
    };

    let call = match FunctionCall::try_from(&descriptor) {
        Ok(call) => call,
        Err(e @ InvocationError::OutOfRange { .. }) => {
            tracing::debug!("Matched descriptor cannot be invoked: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
        Err(e) => {
            tracing::error!("Matched descriptor cannot be invoked: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()));
        }
    };

    HttpResponse::Ok().json(InvokeResponse {
        name: descriptor.name,
        result: invoke(&call, state.function_output),
    })
}
