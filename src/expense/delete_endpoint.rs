//! JSON endpoint for deleting a single line-item.

use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, api::error_response, expense::delete_expense};

/// The form fields for deleting a line-item.
#[derive(Debug, Deserialize)]
pub struct DeleteExpenseFormData {
    /// The ID of the line-item to delete.
    pub expense_id: Option<String>,
}

/// The deleted row's values, echoed back so the client can offer an undo by
/// re-inserting them.
#[derive(Debug, Serialize)]
struct DeletedExpense {
    id: i64,
    product_id: i64,
    store_id: i64,
    price: f64,
    quantity: f64,
    quantity_type: String,
    discount: f64,
    date: String,
    receipt_nr: Option<String>,
}

/// The JSON body returned when a line-item is deleted.
#[derive(Debug, Serialize)]
struct DeleteExpenseResponse {
    success: bool,
    deleted: DeletedExpense,
}

/// Delete a line-item and return its prior values verbatim.
///
/// Nothing is retained server-side; a client-side undo re-inserts the values
/// and is not guaranteed to reuse the same ID.
pub async fn delete_expense_endpoint(
    State(state): State<AppState>,
    Form(form): Form<DeleteExpenseFormData>,
) -> Response {
    let raw_id = match form.expense_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return error_response(StatusCode::BAD_REQUEST, "missing_expense"),
    };

    let Ok(expense_id) = raw_id.parse::<i64>() else {
        return error_response(StatusCode::BAD_REQUEST, "invalid_expense");
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(expense) => Json(DeleteExpenseResponse {
            success: true,
            deleted: DeletedExpense {
                id: expense.id,
                product_id: expense.product_id,
                store_id: expense.store_id,
                price: expense.price,
                quantity: expense.quantity,
                quantity_type: expense.quantity_type,
                discount: expense.discount,
                date: expense.date.to_string(),
                receipt_nr: expense.receipt_nr,
            },
        })
        .into_response(),
        Err(error) => error.into_api_response(),
    }
}
