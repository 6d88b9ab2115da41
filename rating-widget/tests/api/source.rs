use crate::helpers::{TestPage, record, unrated};
use claims::{assert_err, assert_ok};
use rating_widget::WidgetState;
use rating_widget::domain::UserName;
use rating_widget::error::FetchError;
use rating_widget::host::ElementKind;
use rating_widget::source::{HistoryClient, HistorySource};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HistoryClient {
    HistoryClient::new(server.uri(), Duration::from_millis(500)).unwrap()
}

fn user(name: &str) -> UserName {
    UserName::parse(name.to_string()).unwrap()
}

#[tokio::test]
async fn history_is_read_from_the_users_json_path() {
    // Arrange
    let server = MockServer::start().await;
    let served = vec![record(0, 0, 400), unrated(1), record(2, 400, 820)];
    Mock::given(method("GET"))
        .and(path("/users/chokudai/history/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&served))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let history = client(&server).fetch_history(&user("chokudai")).await;

    // Assert
    let history = assert_ok!(history);
    assert_eq!(history, served);
}

#[tokio::test]
async fn an_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = client(&server).fetch_history(&user("nobody")).await;

    let err = assert_err!(outcome);
    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn an_undecodable_body_is_reported() {
    let server = MockServer::start().await;
    let test_cases = vec![
        ("", "an empty body"),
        ("<html>Access denied</html>", "an html page"),
        (r#"{"IsRated": true}"#, "a single object"),
    ];

    for (body, description) in test_cases {
        server.reset().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let outcome = client(&server).fetch_history(&user("tourist")).await;

        assert!(
            matches!(outcome, Err(FetchError::Request(_))),
            "The client accepted {}.",
            description
        );
    }
}

#[tokio::test]
async fn a_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(Vec::<u8>::new())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let outcome = client(&server).fetch_history(&user("tourist")).await;

    assert_err!(outcome);
}

#[tokio::test]
async fn a_widget_draws_the_served_history() {
    // Arrange
    let server = MockServer::start().await;
    let served = vec![
        record(0, 0, 600),
        record(7, 600, 1100),
        unrated(9),
        record(14, 1100, 1420),
        record(21, 1420, 1380),
    ];
    Mock::given(method("GET"))
        .and(path("/users/snuke/history/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&served))
        .expect(1)
        .mount(&server)
        .await;
    let mut page = TestPage::open("snuke", 640.0, 360.0);

    // Act
    page.load(&client(&server)).await;

    // Assert
    assert_eq!(page.widget.state(), WidgetState::Available);
    assert_eq!(page.shapes(ElementKind::Circle).len(), 4);
    assert_eq!(page.shapes(ElementKind::Line).len(), 3);
    assert_eq!(page.shapes(ElementKind::Rect).len(), 8);
}

#[tokio::test]
async fn a_widget_stays_empty_when_the_endpoint_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let mut page = TestPage::open("snuke", 640.0, 360.0);

    page.load(&client(&server)).await;

    assert_eq!(page.widget.state(), WidgetState::Invalid);
    assert_eq!(page.shape_count(), 0);
}
