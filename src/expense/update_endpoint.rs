//! JSON endpoint for the partial update of a line-item.

use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    api::error_response,
    expense::{ExpenseUpdate, core::round_to_cents, form::parse_validated, update_expense},
};

/// The form fields for updating a line-item.
///
/// Only the supplied fields are applied; the rest keep their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseFormData {
    /// The ID of the line-item to update.
    pub expense_id: Option<String>,
    /// The new price per unit, if supplied.
    pub price: Option<String>,
    /// The new quantity, if supplied.
    pub quantity: Option<String>,
    /// The new discount, if supplied.
    pub discount: Option<String>,
}

/// The JSON body returned after a line-item update.
#[derive(Debug, Serialize)]
struct UpdateExpenseResponse {
    success: bool,
    expense_id: i64,
    price: f64,
    quantity: f64,
    discount: f64,
    total: f64,
}

/// Apply a partial update to a line-item and return the recomputed total.
///
/// Unlike the recording flow, a supplied field that does not parse as a
/// number is rejected with a field-specific error code rather than defaulted.
pub async fn update_expense_endpoint(
    State(state): State<AppState>,
    Form(form): Form<UpdateExpenseFormData>,
) -> Response {
    let raw_id = match form.expense_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return error_response(StatusCode::BAD_REQUEST, "missing_expense"),
    };

    let Ok(expense_id) = raw_id.parse::<i64>() else {
        return error_response(StatusCode::BAD_REQUEST, "invalid_expense");
    };

    let update = ExpenseUpdate {
        price: match parse_validated(form.price.as_deref(), "price") {
            Ok(price) => price,
            Err(error) => return error.into_api_response(),
        },
        quantity: match parse_validated(form.quantity.as_deref(), "quantity") {
            Ok(quantity) => quantity,
            Err(error) => return error.into_api_response(),
        },
        discount: match parse_validated(form.discount.as_deref(), "discount") {
            Ok(discount) => discount,
            Err(error) => return error.into_api_response(),
        },
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match update_expense(expense_id, update, &connection) {
        Ok(expense) => Json(UpdateExpenseResponse {
            success: true,
            expense_id: expense.id,
            price: expense.price,
            quantity: expense.quantity,
            discount: expense.discount,
            total: round_to_cents(expense.total()),
        })
        .into_response(),
        Err(error) => error.into_api_response(),
    }
}

#[cfg(test)]
mod update_expense_endpoint_tests {
    use axum::{
        extract::{Form, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState,
        expense::{NewExpense, get_expense, insert_expense},
        product::find_or_create_product,
        store::find_or_create_store,
        test_utils::response_json,
    };

    use super::{UpdateExpenseFormData, update_expense_endpoint};

    fn get_test_state() -> (AppState, i64) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not initialize database");
        let expense_id = {
            let connection = state.db_connection.lock().unwrap();
            let product = find_or_create_product("Lapte", None, &connection).unwrap();
            let store = find_or_create_store("Kaufland", None, &connection).unwrap();
            insert_expense(
                NewExpense {
                    product_id: product.id,
                    store_id: store.id,
                    price: 5.0,
                    quantity: 2.0,
                    quantity_type: "buc".to_owned(),
                    discount: 1.0,
                    date: date!(2025 - 01 - 05),
                    receipt_nr: None,
                },
                &connection,
            )
            .unwrap()
            .id
        };
        (state, expense_id)
    }

    #[tokio::test]
    async fn updates_only_supplied_fields() {
        let (state, expense_id) = get_test_state();
        let form = UpdateExpenseFormData {
            expense_id: Some(expense_id.to_string()),
            discount: Some("2.5".to_owned()),
            ..Default::default()
        };

        let response = update_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["price"], 5.0);
        assert_eq!(body["quantity"], 2.0);
        assert_eq!(body["discount"], 2.5);
        assert_eq!(body["total"], 7.5);

        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(expense_id, &connection).unwrap();
        assert_eq!(expense.price, 5.0);
        assert_eq!(expense.discount, 2.5);
    }

    #[tokio::test]
    async fn total_is_rounded_to_two_decimals() {
        let (state, expense_id) = get_test_state();
        let form = UpdateExpenseFormData {
            expense_id: Some(expense_id.to_string()),
            price: Some("3.333".to_owned()),
            quantity: Some("3".to_owned()),
            discount: Some("0".to_owned()),
            ..Default::default()
        };

        let response = update_expense_endpoint(State(state), Form(form)).await;

        let body = response_json(response).await;
        assert_eq!(body["total"], 10.0);
    }

    #[tokio::test]
    async fn junk_number_is_rejected_with_field_code() {
        let (state, expense_id) = get_test_state();
        let form = UpdateExpenseFormData {
            expense_id: Some(expense_id.to_string()),
            price: Some("abc".to_owned()),
            ..Default::default()
        };

        let response = update_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"], "invalid_price");

        // The row is untouched.
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(expense_id, &connection).unwrap().price, 5.0);
    }

    #[tokio::test]
    async fn unknown_expense_is_a_400() {
        let (state, _) = get_test_state();
        let form = UpdateExpenseFormData {
            expense_id: Some("999".to_owned()),
            price: Some("1".to_owned()),
            ..Default::default()
        };

        let response = update_expense_endpoint(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"], "expense_not_found");
    }

    #[tokio::test]
    async fn missing_expense_id_is_a_400() {
        let (state, _) = get_test_state();

        let response =
            update_expense_endpoint(State(state), Form(UpdateExpenseFormData::default())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"], "missing_expense");
    }
}
