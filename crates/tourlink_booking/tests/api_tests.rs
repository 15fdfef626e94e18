
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};
use fixtures::{sample_payload, test_app, Call};
use serde_json::{json, Value};
use tourlink_common::services::ServiceError;
use tower::ServiceExt;

fn post(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/send-mail-calendar")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn sample_payload_sends_email_then_creates_event() {
    let (app, log) = test_app(None, None);

    let response = app.oneshot(post(sample_payload().to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Email sent and event added to Google Calendar successfully!" })
    );

    let calls = log.lock().unwrap();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        Call::Email { to, subject, body } => {
            assert_eq!(to, "asha.rao@example.com");
            assert_eq!(subject, "Booking Confirmation: Old Delhi Food Walk on 2025-10-25");
            assert!(body.contains("Participants: 2"));
        }
        other => panic!("expected email first, got {other:?}"),
    }
    assert!(matches!(calls[1], Call::Calendar { .. }));
}

#[tokio::test]
async fn created_event_matches_input() {
    let (app, log) = test_app(None, None);
    let mut payload = sample_payload();
    payload["calendarEvent"]["attendees"] = json!(["ASHA.RAO@example.com", "friend@example.com"]);
    payload["calendarEvent"]["location"] = json!("Jama Masjid, Gate 1");

    let response = app.oneshot(post(payload.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let calls = log.lock().unwrap();
    let Call::Calendar { calendar_id, event } = &calls[1] else {
        panic!("expected calendar call, got {:?}", calls[1]);
    };
    assert_eq!(calendar_id, "primary");
    assert_eq!(
        event.start_time,
        DateTime::parse_from_rfc3339("2025-10-25T19:00:00+05:30")
            .unwrap()
            .with_timezone(&Utc)
    );
    assert_eq!(
        event.end_time,
        DateTime::parse_from_rfc3339("2025-10-25T21:00:00+05:30")
            .unwrap()
            .with_timezone(&Utc)
    );
    assert_eq!(event.summary, "Old Delhi Food Walk - Asha Rao");
    assert_eq!(event.location.as_deref(), Some("Jama Masjid, Gate 1"));
    assert_eq!(event.attendees, vec!["asha.rao@example.com", "friend@example.com"]);
    assert_eq!(event.time_zone, "Asia/Kolkata");
    assert_eq!(event.reminders.len(), 2);
}

#[tokio::test]
async fn missing_required_fields_call_nothing() {
    for key in ["customerEmail", "calendarEvent"] {
        let (app, log) = test_app(None, None);
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove(key);

        let response = app.oneshot(post(payload.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "without {key}");
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], 400);
        assert!(log.lock().unwrap().is_empty(), "collaborator called without {key}");
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, log) = test_app(None, None);

    let response = app.oneshot(post("{\"customerEmail\":".to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reversed_time_range_is_rejected_before_sending() {
    let (app, log) = test_app(None, None);
    let mut payload = sample_payload();
    payload["calendarEvent"]["endDateTime"] = json!("2025-10-25T18:00:00+05:30");

    let response = app.oneshot(post(payload.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("End time must be after start time"), "got {message}");
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_customer_email_is_rejected() {
    let (app, log) = test_app(None, None);
    let mut payload = sample_payload();
    payload["customerEmail"] = json!("asha.rao");

    let response = app.oneshot(post(payload.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn email_failure_skips_calendar() {
    let (app, log) = test_app(
        Some(ServiceError::Rejected("daily quota exceeded".to_string())),
        None,
    );

    let response = app.oneshot(post(sample_payload().to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("confirmation email"), "got {message}");
    assert!(message.contains("daily quota exceeded"), "got {message}");

    let calls = log.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Email { .. }));
}

#[tokio::test]
async fn calendar_failure_after_email_reports_calendar_stage() {
    let (app, log) = test_app(
        None,
        Some(ServiceError::Rejected("Invalid attendee".to_string())),
    );

    let response = app.oneshot(post(sample_payload().to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("Google Calendar"), "got {message}");
    assert!(message.contains("email was sent"), "got {message}");

    let calls = log.lock().unwrap();
    let emails = calls.iter().filter(|c| matches!(c, Call::Email { .. })).count();
    assert_eq!(emails, 1);
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn expired_calendar_credentials_are_auth_failure() {
    let (app, _log) = test_app(
        None,
        Some(ServiceError::Unauthorized("invalid_grant".to_string())),
    );

    let response = app.oneshot(post(sample_payload().to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Authentication with Google Calendar failed"), "got {message}");
}

#[tokio::test]
async fn calendar_rejecting_request_data_is_bad_request() {
    let (app, log) = test_app(
        None,
        Some(ServiceError::InvalidRequest("Invalid attendee email".to_string())),
    );

    let response = app.oneshot(post(sample_payload().to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(log.lock().unwrap().len(), 2);
}
