//! Integration tests for `GroupsClient` using wiremock HTTP mocks.

use gogroups_client::{ClientError, GroupsClient};
use gogroups_core::{FilterField, GroupListController, GroupsPayload};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GroupsClient {
    GroupsClient::new(base_url, 5, "gogroups-test/0.1").expect("client construction should not fail")
}

#[tokio::test]
async fn get_groups_decodes_current_shape() {
    let server = MockServer::start().await;

    let body = json!({
        "Groups": [
            {"Name": "GoSV", "URL": "http://www.meetup.com/golangsv", "Members": 194,
             "City": "San Mateo", "Country": "US", "Continent": "North America"}
        ],
        "Errors": []
    });

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(header("user-agent", "gogroups-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let payload = test_client(&server.uri())
        .get_groups()
        .await
        .expect("should decode payload");

    let GroupsPayload::Current { groups, errors } = payload else {
        panic!("expected current payload");
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "GoSV");
    assert_eq!(groups[0].members, 194);
    assert!(errors.is_empty());
}

#[tokio::test]
async fn get_groups_decodes_legacy_shape() {
    let server = MockServer::start().await;

    let body = json!({
        "Groups": [
            {"Name": "GoSV", "Link": "http://www.meetup.com/golangsv", "Members": 194,
             "City": "San Mateo", "Country": "US", "Lat": 12.0, "Lon": 10.0},
            {"Name": "GoSF", "Link": "http://www.meetup.com/golangsf", "Members": 1393,
             "City": "San Francisco", "Country": "US", "Lat": 10.0, "Lon": 15.0}
        ],
        "Error": "something bad happened"
    });

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let payload = test_client(&server.uri()).get_groups().await.unwrap();
    let (groups, errors) = payload.into_parts();

    assert_eq!(groups[1].url, "http://www.meetup.com/golangsf");
    assert_eq!(groups[1].position(), Some((10.0, 15.0)));
    assert_eq!(errors, vec!["something bad happened".to_string()]);
}

#[tokio::test]
async fn server_error_surfaces_trimmed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(500).set_body_string("meetup seems to be down\n"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).get_groups().await.unwrap_err();

    assert!(
        matches!(err, ClientError::Rejected { status: 500, ref body } if body == "meetup seems to be down"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn server_error_without_body_names_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).get_groups().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503");
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).get_groups().await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn controller_loads_and_filters_through_client() {
    let server = MockServer::start().await;

    let body = json!({
        "Groups": [
            {"Name": "a", "URL": "http://example.com/a", "Members": 10, "City": "SF", "Country": "US"},
            {"Name": "b", "URL": "http://example.com/b", "Members": 5, "City": "NY", "Country": "US"}
        ],
        "Errors": ["partial sync failure"]
    });

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut ctrl = GroupListController::new();
    ctrl.load_groups(&client).await;

    assert_eq!(ctrl.errors().entries(), ["partial sync failure"]);
    assert_eq!(ctrl.total_members(), 15);

    ctrl.set_filter(FilterField::City, "S");
    assert_eq!(ctrl.filtered().len(), 1);
    assert_eq!(ctrl.total_members(), 10);
}

#[tokio::test]
async fn controller_logs_rejection_body_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(500).set_body_string("network down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut ctrl = GroupListController::new();
    ctrl.load_groups(&client).await;

    assert_eq!(ctrl.errors().entries(), ["network down"]);
    assert!(ctrl.groups().is_empty());
    assert_eq!(ctrl.total_members(), 0);
}

#[tokio::test]
async fn unreachable_server_is_logged_not_fatal() {
    // Bind then drop a mock server so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = test_client(&uri);
    let mut ctrl = GroupListController::new();
    ctrl.load_groups(&client).await;

    assert_eq!(ctrl.errors().len(), 1);
    assert!(ctrl.groups().is_empty());
}
