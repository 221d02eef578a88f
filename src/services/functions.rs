use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Intent;
use crate::models::{ArgumentValue, IntentDescriptor};

/// Errors raised when turning a descriptor into a typed call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Missing argument '{argument}' for {function}")]
    MissingArgument { function: Intent, argument: &'static str },

    #[error("Argument '{argument}' for {function} has the wrong type")]
    WrongType { function: Intent, argument: &'static str },

    #[error("Argument '{argument}' for {function} is out of range")]
    OutOfRange { function: Intent, argument: &'static str },
}

/// A mock business function call with typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionCall {
    GetTicketStatus { ticket_id: u64 },
    ScheduleMeeting { date: String, time: String, meeting_room: String },
    GetExpenseBalance { employee_id: u64 },
    CalculatePerformanceBonus { employee_id: u64, current_year: u64 },
    ReportOfficeIssue { issue_code: u64, department: String },
}

impl FunctionCall {
    pub fn intent(&self) -> Intent {
        match self {
            Self::GetTicketStatus { .. } => Intent::GetTicketStatus,
            Self::ScheduleMeeting { .. } => Intent::ScheduleMeeting,
            Self::GetExpenseBalance { .. } => Intent::GetExpenseBalance,
            Self::CalculatePerformanceBonus { .. } => Intent::CalculatePerformanceBonus,
            Self::ReportOfficeIssue { .. } => Intent::ReportOfficeIssue,
        }
    }
}

struct ArgumentReader<'a> {
    function: Intent,
    descriptor: &'a IntentDescriptor,
}

impl<'a> ArgumentReader<'a> {
    fn value(&self, argument: &'static str) -> Result<&'a ArgumentValue, InvocationError> {
        self.descriptor
            .arguments
            .get(argument)
            .ok_or(InvocationError::MissingArgument {
                function: self.function,
                argument,
            })
    }

    fn int(&self, argument: &'static str) -> Result<u64, InvocationError> {
        match self.value(argument)? {
            ArgumentValue::Int(value) => Ok(*value),
            ArgumentValue::BigInt(_) => Err(InvocationError::OutOfRange {
                function: self.function,
                argument,
            }),
            ArgumentValue::Text(_) => Err(InvocationError::WrongType {
                function: self.function,
                argument,
            }),
        }
    }

    fn text(&self, argument: &'static str) -> Result<String, InvocationError> {
        self.value(argument)?
            .as_text()
            .map(str::to_string)
            .ok_or(InvocationError::WrongType {
                function: self.function,
                argument,
            })
    }
}

impl TryFrom<&IntentDescriptor> for FunctionCall {
    type Error = InvocationError;

    fn try_from(descriptor: &IntentDescriptor) -> Result<Self, Self::Error> {
        let function = Intent::from_name(&descriptor.name)
            .ok_or_else(|| InvocationError::UnknownFunction(descriptor.name.clone()))?;
        let args = ArgumentReader { function, descriptor };

        let call = match function {
            Intent::GetTicketStatus => Self::GetTicketStatus {
                ticket_id: args.int("ticket_id")?,
            },
            Intent::ScheduleMeeting => Self::ScheduleMeeting {
                date: args.text("date")?,
                time: args.text("time")?,
                meeting_room: args.text("meeting_room")?,
            },
            Intent::GetExpenseBalance => Self::GetExpenseBalance {
                employee_id: args.int("employee_id")?,
            },
            Intent::CalculatePerformanceBonus => Self::CalculatePerformanceBonus {
                employee_id: args.int("employee_id")?,
                current_year: args.int("current_year")?,
            },
            Intent::ReportOfficeIssue => Self::ReportOfficeIssue {
                issue_code: args.int("issue_code")?,
                department: args.text("department")?,
            },
        };

        Ok(call)
    }
}

/// Shape of mock function results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Human-readable sentence
    #[default]
    Summary,
    /// Structured record
    Record,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketStatus {
    pub ticket_id: u64,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingConfirmation {
    pub date: String,
    pub time: String,
    pub meeting_room: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseBalance {
    pub employee_id: u64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceBonus {
    pub employee_id: u64,
    pub year: u64,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueReport {
    pub issue_code: u64,
    pub department: String,
    pub status: &'static str,
}

/// Result of a mock function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FunctionOutput {
    Summary(String),
    TicketStatus(TicketStatus),
    Meeting(MeetingConfirmation),
    ExpenseBalance(ExpenseBalance),
    PerformanceBonus(PerformanceBonus),
    IssueReport(IssueReport),
}

// Canned values returned by the stubs
const SUMMARY_EXPENSE_BALANCE: u32 = 500;
const SUMMARY_BONUS: u32 = 2000;
const RECORD_EXPENSE_BALANCE: f64 = 1500.75;
const RECORD_BONUS: f64 = 5000.00;

pub fn get_ticket_status(ticket_id: u64, style: OutputStyle) -> FunctionOutput {
    match style {
        OutputStyle::Summary => FunctionOutput::Summary(format!("Ticket {} status: Open", ticket_id)),
        OutputStyle::Record => FunctionOutput::TicketStatus(TicketStatus {
            ticket_id,
            status: "In Progress",
        }),
    }
}

pub fn schedule_meeting(date: &str, time: &str, meeting_room: &str, style: OutputStyle) -> FunctionOutput {
    match style {
        OutputStyle::Summary => FunctionOutput::Summary(format!(
            "Meeting scheduled on {} at {} in {}",
            date, time, meeting_room
        )),
        OutputStyle::Record => FunctionOutput::Meeting(MeetingConfirmation {
            date: date.to_string(),
            time: time.to_string(),
            meeting_room: meeting_room.to_string(),
            status: "Scheduled",
        }),
    }
}

pub fn get_expense_balance(employee_id: u64, style: OutputStyle) -> FunctionOutput {
    match style {
        OutputStyle::Summary => FunctionOutput::Summary(format!(
            "Employee {} expense balance: ${}",
            employee_id, SUMMARY_EXPENSE_BALANCE
        )),
        OutputStyle::Record => FunctionOutput::ExpenseBalance(ExpenseBalance {
            employee_id,
            balance: RECORD_EXPENSE_BALANCE,
        }),
    }
}

pub fn calculate_performance_bonus(employee_id: u64, current_year: u64, style: OutputStyle) -> FunctionOutput {
    match style {
        OutputStyle::Summary => FunctionOutput::Summary(format!(
            "Employee {} performance bonus for {}: ${}",
            employee_id, current_year, SUMMARY_BONUS
        )),
        OutputStyle::Record => FunctionOutput::PerformanceBonus(PerformanceBonus {
            employee_id,
            year: current_year,
            bonus: RECORD_BONUS,
        }),
    }
}

pub fn report_office_issue(issue_code: u64, department: &str, style: OutputStyle) -> FunctionOutput {
    match style {
        OutputStyle::Summary => FunctionOutput::Summary(format!(
            "Office issue {} reported for {} department",
            issue_code, department
        )),
        OutputStyle::Record => FunctionOutput::IssueReport(IssueReport {
            issue_code,
            department: department.to_string(),
            status: "Reported",
        }),
    }
}

/// Run the mock function for a typed call
pub fn invoke(call: &FunctionCall, style: OutputStyle) -> FunctionOutput {
    match call {
        FunctionCall::GetTicketStatus { ticket_id } => get_ticket_status(*ticket_id, style),
        FunctionCall::ScheduleMeeting { date, time, meeting_room } => {
            schedule_meeting(date, time, meeting_room, style)
        }
        FunctionCall::GetExpenseBalance { employee_id } => get_expense_balance(*employee_id, style),
        FunctionCall::CalculatePerformanceBonus { employee_id, current_year } => {
            calculate_performance_bonus(*employee_id, *current_year, style)
        }
        FunctionCall::ReportOfficeIssue { issue_code, department } => {
            report_office_issue(*issue_code, department, style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Arguments;

    fn descriptor(name: &str, entries: Vec<(&str, ArgumentValue)>) -> IntentDescriptor {
        let mut arguments = Arguments::new();
        for (key, value) in entries {
            arguments.insert(key, value);
        }
        IntentDescriptor::new(name, arguments)
    }

    #[test]
    fn test_function_call_from_descriptor() {
        let call = FunctionCall::try_from(&descriptor(
            "calculate_performance_bonus",
            vec![
                ("employee_id", ArgumentValue::Int(10056)),
                ("current_year", ArgumentValue::Int(2025)),
            ],
        ))
        .unwrap();

        assert_eq!(
            call,
            FunctionCall::CalculatePerformanceBonus {
                employee_id: 10056,
                current_year: 2025
            }
        );
        assert_eq!(call.intent(), Intent::CalculatePerformanceBonus);
    }

    #[test]
    fn test_unknown_function() {
        let err = FunctionCall::try_from(&descriptor("launch_rocket", vec![])).unwrap_err();
        assert_eq!(err, InvocationError::UnknownFunction("launch_rocket".to_string()));
    }

    #[test]
    fn test_missing_argument() {
        let err = FunctionCall::try_from(&descriptor("get_ticket_status", vec![])).unwrap_err();
        assert_eq!(
            err,
            InvocationError::MissingArgument {
                function: Intent::GetTicketStatus,
                argument: "ticket_id"
            }
        );
        assert_eq!(err.to_string(), "Missing argument 'ticket_id' for get_ticket_status");
    }

    #[test]
    fn test_raw_string_rejected_for_numeric_argument() {
        let err = FunctionCall::try_from(&descriptor(
            "get_expense_balance",
            vec![("employee_id", ArgumentValue::Text("10056".to_string()))],
        ))
        .unwrap_err();

        assert!(matches!(err, InvocationError::WrongType { argument: "employee_id", .. }));
    }

    #[test]
    fn test_big_integer_is_out_of_range() {
        let err = FunctionCall::try_from(&descriptor(
            "get_ticket_status",
            vec![("ticket_id", ArgumentValue::BigInt("123456789012345678901234567890".to_string()))],
        ))
        .unwrap_err();

        assert_eq!(
            err,
            InvocationError::OutOfRange {
                function: Intent::GetTicketStatus,
                argument: "ticket_id"
            }
        );
        assert_eq!(err.to_string(), "Argument 'ticket_id' for get_ticket_status is out of range");
    }

    #[test]
    fn test_summary_outputs() {
        let call = FunctionCall::ReportOfficeIssue {
            issue_code: 45321,
            department: "Facilities".to_string(),
        };
        assert_eq!(
            invoke(&call, OutputStyle::Summary),
            FunctionOutput::Summary("Office issue 45321 reported for Facilities department".to_string())
        );

        assert_eq!(
            get_expense_balance(10056, OutputStyle::Summary),
            FunctionOutput::Summary("Employee 10056 expense balance: $500".to_string())
        );
        assert_eq!(
            calculate_performance_bonus(10056, 2025, OutputStyle::Summary),
            FunctionOutput::Summary("Employee 10056 performance bonus for 2025: $2000".to_string())
        );
    }

    #[test]
    fn test_record_outputs_serialize_flat() {
        let json = serde_json::to_value(get_expense_balance(10056, OutputStyle::Record)).unwrap();
        assert_eq!(json, serde_json::json!({"employee_id": 10056, "balance": 1500.75}));

        let json = serde_json::to_value(get_ticket_status(83742, OutputStyle::Record)).unwrap();
        assert_eq!(json, serde_json::json!({"ticket_id": 83742, "status": "In Progress"}));

        let json = serde_json::to_value(calculate_performance_bonus(1, 2025, OutputStyle::Record)).unwrap();
        assert_eq!(json, serde_json::json!({"employee_id": 1, "year": 2025, "bonus": 5000.0}));
    }
}
