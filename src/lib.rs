//! Intent Dispatch - maps fixed-template queries onto function-call descriptors
//!
//! This library provides the template matchers, the ordered dispatcher and the
//! mock business functions behind the `/execute` HTTP endpoint.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Dispatcher, Intent, MatchOptions, MatchResult, Matcher, TemplateMatcher};
pub use crate::models::{ArgumentValue, Arguments, IntentDescriptor, ExecuteResponse, ErrorResponse};
