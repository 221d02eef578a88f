use std::fmt;

use serde::Deserialize;

use crate::core::template::{Anchor, FieldKind, Template};
use crate::models::IntentDescriptor;

/// Recognizes one fixed query shape and extracts its typed fields
pub trait Matcher: Send + Sync {
    /// Name reported in the descriptor on success
    fn intent(&self) -> &str;

    fn try_match(&self, query: &str) -> Option<IntentDescriptor>;
}

/// Matching strictness shared by the built-in matchers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchOptions {
    /// Require the template to consume the whole query
    #[serde(default = "default_strict_anchor")]
    pub strict_anchor: bool,
    /// Accept any text for the department instead of word characters only
    #[serde(default)]
    pub free_text_fields: bool,
}

fn default_strict_anchor() -> bool { true }

impl MatchOptions {
    pub fn anchor(&self) -> Anchor {
        if self.strict_anchor {
            Anchor::Full
        } else {
            Anchor::Prefix
        }
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            strict_anchor: default_strict_anchor(),
            free_text_fields: false,
        }
    }
}

/// The five supported intents, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    GetTicketStatus,
    ScheduleMeeting,
    GetExpenseBalance,
    CalculatePerformanceBonus,
    ReportOfficeIssue,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::GetTicketStatus,
        Intent::ScheduleMeeting,
        Intent::GetExpenseBalance,
        Intent::CalculatePerformanceBonus,
        Intent::ReportOfficeIssue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetTicketStatus => "get_ticket_status",
            Self::ScheduleMeeting => "schedule_meeting",
            Self::GetExpenseBalance => "get_expense_balance",
            Self::CalculatePerformanceBonus => "calculate_performance_bonus",
            Self::ReportOfficeIssue => "report_office_issue",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|intent| intent.as_str() == name)
    }

    /// Query template recognized for this intent
    pub fn template(self, options: &MatchOptions) -> Template {
        match self {
            Self::GetTicketStatus => Template::new()
                .literal("What is the status of ticket ")
                .field("ticket_id", FieldKind::Integer)
                .literal("?"),
            Self::ScheduleMeeting => Template::new()
                .literal("Schedule a meeting on ")
                .field("date", FieldKind::Date)
                .literal(" at ")
                .field("time", FieldKind::Time)
                .literal(" in ")
                .field("meeting_room", FieldKind::Text)
                .literal("."),
            Self::GetExpenseBalance => Template::new()
                .literal("Show my expense balance for employee ")
                .field("employee_id", FieldKind::Integer)
                .literal("."),
            Self::CalculatePerformanceBonus => Template::new()
                .literal("Calculate performance bonus for employee ")
                .field("employee_id", FieldKind::Integer)
                .literal(" for ")
                .field("current_year", FieldKind::Year)
                .literal("."),
            Self::ReportOfficeIssue => {
                let department = if options.free_text_fields {
                    FieldKind::Text
                } else {
                    FieldKind::Word
                };
                Template::new()
                    .literal("Report office issue ")
                    .field("issue_code", FieldKind::Integer)
                    .literal(" for the ")
                    .field("department", department)
                    .literal(" department.")
            }
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matcher backed by a [`Template`]
#[derive(Debug, Clone)]
pub struct TemplateMatcher {
    intent: String,
    template: Template,
    anchor: Anchor,
}

impl TemplateMatcher {
    pub fn new(intent: impl Into<String>, template: Template, anchor: Anchor) -> Self {
        Self {
            intent: intent.into(),
            template,
            anchor,
        }
    }

    pub fn builtin(intent: Intent, options: &MatchOptions) -> Self {
        Self::new(intent.as_str(), intent.template(options), options.anchor())
    }
}

impl Matcher for TemplateMatcher {
    fn intent(&self) -> &str {
        &self.intent
    }

    fn try_match(&self, query: &str) -> Option<IntentDescriptor> {
        self.template
            .match_query(query, self.anchor)
            .map(|arguments| IntentDescriptor::new(self.intent.clone(), arguments))
    }
}
