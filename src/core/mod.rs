// Core dispatch exports
pub mod dispatcher;
pub mod matcher;
pub mod template;

pub use dispatcher::{Dispatcher, MatchResult};
pub use matcher::{Intent, MatchOptions, Matcher, TemplateMatcher};
pub use template::{Anchor, FieldKind, Template};
