//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reel_engine::{App, Field, FormSettings};

pub const CONTACT_PATH: &str = "/api/contact-us/";

/// Start a mock server standing in for the contact endpoint.
pub async fn start_contact_mock() -> MockServer {
    MockServer::start().await
}

/// Respond to every contact POST with `status` after `delay`.
pub async fn mount_contact_response(server: &MockServer, status: u16, delay: Duration) {
    Mock::given(method("POST"))
        .and(path(CONTACT_PATH))
        .respond_with(ResponseTemplate::new(status).set_delay(delay))
        .mount(server)
        .await;
}

pub fn app_for(server: &MockServer) -> App {
    let settings = FormSettings::for_endpoint(&format!("{}{CONTACT_PATH}", server.uri()))
        .expect("mock endpoint is valid");
    App::new(settings).expect("client builds")
}

pub fn fill_valid(app: &mut App) {
    app.set_field(Field::Name, "Jo");
    app.set_field(Field::Email, "jo@x.com");
    app.set_field(Field::Phone, "123");
    app.set_field(Field::Message, "Hi");
}

/// Tick until the in-flight submission resolves.
pub async fn settle(app: &mut App) {
    for _ in 0..500 {
        app.tick();
        if !app.is_submitting() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("submission did not resolve");
}
