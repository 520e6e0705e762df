//! GET /api/groups: the group catalog in the configured response shape.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use gogroups_core::{parse_catalog, GroupsPayload, ResponseShape};

use crate::middleware::RequestId;

use super::AppState;

const CATALOG_UNAVAILABLE: &str = "groups catalog unavailable";

/// Reads the catalog fresh on every request.
///
/// Rejected catalog entries are reported in the payload; only an unreadable
/// or unparseable catalog fails the request.
pub(super) async fn list_groups(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let content = match tokio::fs::read_to_string(state.groups_path.as_ref()).await {
        Ok(content) => content,
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                path = %state.groups_path.display(),
                error = %e,
                "could not read groups catalog"
            );
            return catalog_unavailable();
        }
    };

    let catalog = match parse_catalog(&content) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "could not parse groups catalog");
            return catalog_unavailable();
        }
    };

    for error in &catalog.errors {
        tracing::warn!(request_id = %req_id.0, error = %error, "catalog entry rejected");
    }

    let payload = match state.shape {
        ResponseShape::Current => catalog.into_payload(),
        ResponseShape::Legacy => GroupsPayload::legacy(catalog.groups, &catalog.errors),
    };

    Json(payload).into_response()
}

fn catalog_unavailable() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, CATALOG_UNAVAILABLE).into_response()
}
