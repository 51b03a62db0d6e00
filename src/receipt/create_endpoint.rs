//! JSON endpoint for opening a receipt.

use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    api::error_response,
    dates::{parse_iso_date, today},
    receipt::create_receipt,
};

/// The form fields for opening a receipt.
#[derive(Debug, Deserialize)]
pub struct CreateReceiptFormData {
    /// The ID of the store, submitted as text by the form.
    pub store_id: Option<String>,
    /// The receipt number. Blank means "generate one".
    pub nr_bon: Option<String>,
    /// The receipt date. Blank means today.
    pub date: Option<String>,
}

/// The JSON body returned when a receipt is opened.
#[derive(Debug, Serialize)]
struct CreateReceiptResponse {
    success: bool,
    receipt_id: String,
}

/// Open a receipt and return its number for the line-item submissions that
/// follow.
pub async fn create_receipt_endpoint(
    State(state): State<AppState>,
    Form(form): Form<CreateReceiptFormData>,
) -> Response {
    let raw_store_id = match form.store_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return error_response(StatusCode::BAD_REQUEST, "missing_store"),
    };

    let Ok(store_id) = raw_store_id.parse::<i64>() else {
        return error_response(StatusCode::BAD_REQUEST, "invalid_store");
    };

    let date = match form.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match parse_iso_date(raw) {
            Ok(date) => date,
            Err(error) => return error.into_api_response(),
        },
        _ => today(),
    };

    let nr_bon = form.nr_bon.as_deref().unwrap_or_default();
    let timestamp = OffsetDateTime::now_utc().unix_timestamp();

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match create_receipt(store_id, nr_bon, date, timestamp, &connection) {
        Ok(number) => Json(CreateReceiptResponse {
            success: true,
            receipt_id: number.into_string(),
        })
        .into_response(),
        Err(error) => error.into_api_response(),
    }
}
