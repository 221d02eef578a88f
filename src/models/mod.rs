// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ArgumentValue, Arguments, IntentDescriptor};
pub use requests::ExecuteQuery;
pub use responses::{ArgumentsFormat, ArgumentsPayload, ErrorResponse, ExecuteResponse, HealthResponse, InvokeResponse, NoMatchPolicy};
