// Service exports
pub mod functions;

pub use functions::{invoke, FunctionCall, FunctionOutput, InvocationError, OutputStyle};
