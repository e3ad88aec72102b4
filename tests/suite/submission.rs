//! End-to-end form flows: keyboard input through the engine to the endpoint.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use reel_engine::{Field, FormPhase, FormState, Notification, NotificationKind};
use reel_tui::apply_event;

use crate::common::{
    app_for, fill_valid, mount_contact_response, settle, start_contact_mock,
};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_into(app: &mut reel_engine::App, text: &str) {
    for c in text.chars() {
        apply_event(app, key(KeyCode::Char(c)));
    }
    apply_event(app, key(KeyCode::Tab));
}

#[tokio::test]
async fn keyboard_submission_posts_exact_payload() {
    let server = start_contact_mock().await;
    mount_contact_response(&server, 201, Duration::ZERO).await;

    let mut app = app_for(&server);
    type_into(&mut app, "Jo");
    type_into(&mut app, "jo@x.com");
    type_into(&mut app, "123");
    type_into(&mut app, "Hi");

    // Focus is on the submit button now.
    apply_event(&mut app, key(KeyCode::Enter));
    assert_eq!(app.phase(), FormPhase::Submitting);
    settle(&mut app).await;

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "name": "Jo",
            "email": "jo@x.com",
            "phone": "123",
            "message": "Hi"
        })
    );
    assert_eq!(
        requests[0]
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );

    assert_eq!(app.notification(), Some(&Notification::submitted()));
    assert_eq!(app.form_state(), FormState::default());
}

#[tokio::test]
async fn invalid_form_never_reaches_endpoint() {
    let server = start_contact_mock().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.set_field(Field::Name, "Jo");
    app.set_field(Field::Email, "jo@x.com");
    app.set_field(Field::Message, "Hi");

    apply_event(
        &mut app,
        Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
    );

    assert!(!app.is_submitting());
    assert_eq!(
        app.error_message(Field::Phone).as_deref(),
        Some("Phone is required")
    );
    assert_eq!(app.errors().len(), 1);
}

#[tokio::test]
async fn server_error_keeps_values_for_retry() {
    let server = start_contact_mock().await;
    mount_contact_response(&server, 502, Duration::ZERO).await;

    let mut app = app_for(&server);
    fill_valid(&mut app);
    app.submit();
    settle(&mut app).await;

    let notification = app.notification().expect("failure is reported");
    assert_eq!(notification.kind(), NotificationKind::Error);
    assert_eq!(notification.text(), "Submission failed. Please try again.");
    assert_eq!(app.value(Field::Email), "jo@x.com");
}

#[tokio::test]
async fn submit_button_is_disabled_while_in_flight() {
    let server = start_contact_mock().await;
    mount_contact_response(&server, 200, Duration::from_millis(150)).await;

    let mut app = app_for(&server);
    fill_valid(&mut app);
    assert!(app.can_submit());
    app.submit();
    assert!(!app.can_submit());

    settle(&mut app).await;
    assert!(app.can_submit());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
