mod groups;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use gogroups_core::{AppConfig, ResponseShape};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub groups_path: Arc<PathBuf>,
    pub shape: ResponseShape,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            groups_path: Arc::new(config.groups_path.clone()),
            shape: config.response_shape,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/groups", get(groups::list_groups))
        .route("/api/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    const CATALOG: &str = r"
groups:
  - name: GoSV
    url: http://www.meetup.com/golangsv
    members: 194
    city: San Mateo
    country: US
  - name: Golang Paris
    url: http://www.meetup.com/golang-paris
    members: 800
    city: Paris
    country: FR
    lat: 48.85
    lon: 2.35
  - url: http://example.com/nameless
";

    /// Writes `content` to a fresh file under the temp dir.
    fn temp_catalog(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gogroups-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).expect("write temp catalog");
        path
    }

    fn app_for(path: &Path, shape: ResponseShape) -> Router {
        build_app(AppState {
            groups_path: Arc::new(path.to_path_buf()),
            shape,
        })
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn groups_current_shape_reports_rejected_entries() {
        let path = temp_catalog(CATALOG);
        let (status, _, body) = send_get(app_for(&path, ResponseShape::Current), "/api/groups").await;
        std::fs::remove_file(&path).ok();

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["Groups"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["Groups"][0]["URL"], "http://www.meetup.com/golangsv");
        assert_eq!(json["Groups"][0]["Continent"], "North America");
        assert!(json["Groups"][0].get("Lat").is_none());
        assert_eq!(json["Groups"][1]["Lat"], 48.85);
        assert_eq!(json["Errors"].as_array().map(Vec::len), Some(1));
        assert!(json["Errors"][0].as_str().unwrap().starts_with("entry 3:"));
    }

    #[tokio::test]
    async fn groups_legacy_shape_uses_link_and_single_error() {
        let path = temp_catalog(CATALOG);
        let (status, _, body) = send_get(app_for(&path, ResponseShape::Legacy), "/api/groups").await;
        std::fs::remove_file(&path).ok();

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["Groups"][0]["Link"], "http://www.meetup.com/golangsv");
        assert_eq!(json["Groups"][0]["Lat"], 0.0);
        assert!(json["Error"].is_string());
        assert!(json.get("Errors").is_none());
    }

    #[tokio::test]
    async fn groups_round_trip_through_payload_decoder() {
        let path = temp_catalog(CATALOG);
        let (_, _, body) = send_get(app_for(&path, ResponseShape::Current), "/api/groups").await;
        std::fs::remove_file(&path).ok();

        let payload: gogroups_core::GroupsPayload = serde_json::from_slice(&body).unwrap();
        let (groups, errors) = payload.into_parts();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].position(), Some((48.85, 2.35)));
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn missing_catalog_is_internal_error_with_plain_body() {
        let path = std::env::temp_dir().join("gogroups-does-not-exist.yaml");
        let (status, _, body) = send_get(app_for(&path, ResponseShape::Current), "/api/groups").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, b"groups catalog unavailable");
    }

    #[tokio::test]
    async fn unparseable_catalog_is_internal_error() {
        let path = temp_catalog("groups: {not: a list}\n");
        let (status, _, _) = send_get(app_for(&path, ResponseShape::Current), "/api/groups").await;
        std::fs::remove_file(&path).ok();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_ok_and_request_id() {
        let path = std::env::temp_dir().join("gogroups-unused.yaml");
        let response = app_for(&path, ResponseShape::Current)
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "req-42");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-42");
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let path = std::env::temp_dir().join("gogroups-unused.yaml");
        let (_, headers, _) = send_get(app_for(&path, ResponseShape::Current), "/api/health").await;
        let id = headers["x-request-id"].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
    }
}
