use crate::core::matcher::{Intent, MatchOptions, Matcher, TemplateMatcher};
use crate::models::IntentDescriptor;

/// Outcome of dispatching a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched(IntentDescriptor),
    NoMatch,
}

impl MatchResult {
    pub fn into_descriptor(self) -> Option<IntentDescriptor> {
        match self {
            Self::Matched(descriptor) => Some(descriptor),
            Self::NoMatch => None,
        }
    }
}

/// Ordered, first-match-wins list of matchers
///
/// Matchers are tried strictly in registration order and evaluation stops at
/// the first one that claims the query. There is no scoring between
/// candidates and no fallback.
pub struct Dispatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl Dispatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// The five built-in intents: ticket status, schedule meeting, expense
    /// balance, performance bonus, office issue
    pub fn builtin(options: &MatchOptions) -> Self {
        let matchers = Intent::ALL
            .into_iter()
            .map(|intent| Box::new(TemplateMatcher::builtin(intent, options)) as Box<dyn Matcher>)
            .collect();
        Self::new(matchers)
    }

    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|matcher| matcher.intent())
    }

    pub fn dispatch(&self, query: &str) -> MatchResult {
        self.matchers
            .iter()
            .find_map(|matcher| matcher.try_match(query))
            .map_or(MatchResult::NoMatch, MatchResult::Matched)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::builtin(&MatchOptions::default())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("intents", &self.intents().collect::<Vec<_>>())
            .finish()
    }
}
