//! JSON endpoint acknowledging a finished receipt.

use axum::{Json, response::IntoResponse, response::Response};
use serde::Serialize;

use crate::endpoints;

/// The JSON body returned when a receipt is marked complete.
#[derive(Debug, Serialize)]
struct CompleteReceiptResponse {
    success: bool,
    redirect: &'static str,
}

/// Acknowledge that the user finished entering a receipt.
///
/// There is no server-side state change: a receipt stays open-ended and can
/// always accept more lines or be deleted. The client is pointed at the
/// expense listing.
pub async fn complete_receipt_endpoint() -> Response {
    Json(CompleteReceiptResponse {
        success: true,
        redirect: endpoints::EXPENSES_VIEW,
    })
    .into_response()
}
