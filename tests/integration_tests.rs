// Integration tests for the HTTP surface

use actix_web::{http::StatusCode, test, web, App};
use intent_dispatch::config::DispatchSettings;
use intent_dispatch::core::MatchOptions;
use intent_dispatch::models::{ArgumentsFormat, NoMatchPolicy};
use intent_dispatch::routes::{configure_routes, execute::AppState};
use intent_dispatch::services::OutputStyle;
use serde_json::{json, Value};

async fn get(settings: &DispatchSettings, path: &str, query: &str) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::from_settings(settings)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("{}?q={}", path, urlencoding::encode(query)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_execute_examples() {
    let settings = DispatchSettings::default();

    let cases = [
        (
            "What is the status of ticket 83742?",
            json!({"name": "get_ticket_status", "arguments": {"ticket_id": 83742}}),
        ),
        (
            "Schedule a meeting on 2025-02-15 at 14:00 in Room A.",
            json!({"name": "schedule_meeting", "arguments": {"date": "2025-02-15", "time": "14:00", "meeting_room": "Room A"}}),
        ),
        (
            "Show my expense balance for employee 10056.",
            json!({"name": "get_expense_balance", "arguments": {"employee_id": 10056}}),
        ),
        (
            "Calculate performance bonus for employee 10056 for 2025.",
            json!({"name": "calculate_performance_bonus", "arguments": {"employee_id": 10056, "current_year": 2025}}),
        ),
        (
            "Report office issue 45321 for the Facilities department.",
            json!({"name": "report_office_issue", "arguments": {"issue_code": 45321, "department": "Facilities"}}),
        ),
    ];

    for (query, expected) in cases {
        let (status, body) = get(&settings, "/execute", query).await;
        assert_eq!(status, StatusCode::OK, "query: {}", query);
        assert_eq!(body, expected, "query: {}", query);
    }
}

#[actix_web::test]
async fn test_execute_preserves_argument_order() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;
    let req = test::TestRequest::get()
        .uri(&format!(
            "/execute?q={}",
            urlencoding::encode("Schedule a meeting on 2025-02-15 at 14:00 in Room A.")
        ))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;

    assert_eq!(
        body,
        r#"{"name":"schedule_meeting","arguments":{"date":"2025-02-15","time":"14:00","meeting_room":"Room A"}}"#
            .as_bytes()
    );
}

#[actix_web::test]
async fn test_execute_ticket_id_beyond_u64() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;
    let req = test::TestRequest::get()
        .uri(&format!(
            "/execute?q={}",
            urlencoding::encode("What is the status of ticket 123456789012345678901234567890?")
        ))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;

    assert_eq!(
        body,
        r#"{"name":"get_ticket_status","arguments":{"ticket_id":123456789012345678901234567890}}"#
            .as_bytes()
    );
}

#[actix_web::test]
async fn test_non_conforming_queries_return_400_by_default() {
    let settings = DispatchSettings::default();

    for query in [
        " What is the status of ticket 83742?",
        "What is the status of ticket 83742? ",
        "What is the status of ticket 83742",
        "What is the status of ticket abc?",
        "Show my expense balance for employee -5.",
        "Report office issue 1 for the Human Resources department.",
        "",
    ] {
        let (status, body) = get(&settings, "/execute", query).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query: {:?}", query);
        assert_eq!(body, json!({"error": "Unable to parse query."}), "query: {:?}", query);
    }
}

#[actix_web::test]
async fn test_no_match_with_ok_status() {
    let settings = DispatchSettings {
        no_match_status: NoMatchPolicy::Ok,
        ..DispatchSettings::default()
    };

    let (status, body) = get(&settings, "/execute", "Book me a flight").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Invalid query format"}));
}

#[actix_web::test]
async fn test_string_encoded_arguments() {
    let settings = DispatchSettings {
        arguments_format: ArgumentsFormat::String,
        ..DispatchSettings::default()
    };

    let (status, body) = get(&settings, "/execute", "Calculate performance bonus for employee 10056 for 2025.").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "calculate_performance_bonus");

    let encoded = body["arguments"].as_str().expect("arguments should be a string");
    let decoded: Value = serde_json::from_str(encoded).unwrap();
    assert_eq!(decoded, json!({"employee_id": 10056, "current_year": 2025}));
}

#[actix_web::test]
async fn test_string_encoded_arguments_match_json_dumps_layout() {
    let settings = DispatchSettings {
        arguments_format: ArgumentsFormat::String,
        ..DispatchSettings::default()
    };

    let (status, body) = get(&settings, "/execute", "Schedule a meeting on 2025-02-15 at 14:00 in 会議室.").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["arguments"],
        r#"{"date": "2025-02-15", "time": "14:00", "meeting_room": "\u4f1a\u8b70\u5ba4"}"#
    );
}

#[actix_web::test]
async fn test_lenient_matching_options() {
    let settings = DispatchSettings {
        matching: MatchOptions {
            strict_anchor: false,
            free_text_fields: true,
        },
        ..DispatchSettings::default()
    };

    let (status, body) = get(&settings, "/execute", "What is the status of ticket 83742? Thanks!").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["arguments"]["ticket_id"], 83742);

    let (status, body) = get(&settings, "/execute", "Report office issue 7 for the Human Resources department.").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["arguments"]["department"], "Human Resources");
}

#[actix_web::test]
async fn test_missing_query_parameter_rejected_by_transport() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;
    let req = test::TestRequest::get().uri("/execute").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_query");
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_execute_is_idempotent() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;

    for query in ["Show my expense balance for employee 10056.", "nonsense"] {
        let uri = format!("/execute?q={}", urlencoding::encode(query));
        let first = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let first_status = first.status();
        let first_body = test::read_body(first).await;

        let second = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(second.status(), first_status);
        assert_eq!(test::read_body(second).await, first_body);
    }
}

#[actix_web::test]
async fn test_invoke_summary_style() {
    let settings = DispatchSettings::default();

    let (status, body) = get(&settings, "/invoke", "What is the status of ticket 83742?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": "get_ticket_status", "result": "Ticket 83742 status: Open"}));

    let (_, body) = get(&settings, "/invoke", "Schedule a meeting on 2025-02-15 at 14:00 in Room A.").await;
    assert_eq!(body["result"], "Meeting scheduled on 2025-02-15 at 14:00 in Room A");
}

#[actix_web::test]
async fn test_invoke_record_style() {
    let settings = DispatchSettings {
        function_output: OutputStyle::Record,
        ..DispatchSettings::default()
    };

    let (status, body) = get(&settings, "/invoke", "Report office issue 45321 for the Facilities department.").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "name": "report_office_issue",
            "result": {"issue_code": 45321, "department": "Facilities", "status": "Reported"}
        })
    );
}

#[actix_web::test]
async fn test_invoke_rejects_ticket_id_beyond_u64() {
    let settings = DispatchSettings::default();

    let (status, body) = get(&settings, "/invoke", "What is the status of ticket 123456789012345678901234567890?").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Argument 'ticket_id' for get_ticket_status is out of range"})
    );
}

#[actix_web::test]
async fn test_invoke_no_match_follows_policy() {
    let settings = DispatchSettings::default();

    let (status, body) = get(&settings, "/invoke", "What is the status of ticket?").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Unable to parse query."}));
}
