//! JSON endpoint for deleting a receipt and its line-items.

use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, Error, api::error_response, receipt::delete_receipt};

/// The form fields for deleting a receipt.
#[derive(Debug, Deserialize)]
pub struct DeleteReceiptFormData {
    /// The receipt number to delete.
    pub receipt_id: Option<String>,
}

/// Delete a receipt together with every line-item attached to it.
pub async fn delete_receipt_endpoint(
    State(state): State<AppState>,
    Form(form): Form<DeleteReceiptFormData>,
) -> Response {
    let nr_bon = match form.receipt_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return error_response(StatusCode::BAD_REQUEST, "missing_receipt"),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match delete_receipt(nr_bon, &connection) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(error) => error.into_api_response(),
    }
}

#[cfg(test)]
mod delete_receipt_endpoint_tests {
    use axum::{
        extract::{Form, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState,
        receipt::{create_receipt, get_receipt},
        store::find_or_create_store,
        test_utils::response_json,
    };

    use super::{DeleteReceiptFormData, delete_receipt_endpoint};

    fn get_test_state() -> AppState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        AppState::new(connection).expect("Could not initialize database")
    }

    #[tokio::test]
    async fn deletes_receipt() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let store = find_or_create_store("Kaufland", None, &connection).unwrap();
            create_receipt(store.id, "B-123", date!(2025 - 01 - 05), 1000, &connection).unwrap();
        }
        let form = DeleteReceiptFormData {
            receipt_id: Some("B-123".to_owned()),
        };

        let response = delete_receipt_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["success"], true);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_receipt("B-123", &connection).is_err());
    }

    #[tokio::test]
    async fn unknown_receipt_is_a_400() {
        let state = get_test_state();
        let form = DeleteReceiptFormData {
            receipt_id: Some("nope".to_owned()),
        };

        let response = delete_receipt_endpoint(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"], "receipt_not_found");
    }
}
