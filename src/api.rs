//! Shared helpers for the JSON endpoints used by the receipt-entry and
//! expense-listing pages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Build a JSON error body `{"success": false, "error": <code>}`.
///
/// `code` is a machine-readable error code such as `"missing_store"` or
/// `"receipt_not_found"`, chosen so the client-side script can branch on it
/// without parsing prose.
pub(crate) fn error_response(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "success": false, "error": code }))).into_response()
}

#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;

    use crate::test_utils::response_json;

    use super::error_response;

    #[tokio::test]
    async fn error_response_carries_code_and_status() {
        let response = error_response(StatusCode::BAD_REQUEST, "missing_store");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "missing_store");
    }
}
