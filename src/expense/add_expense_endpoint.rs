//! The legacy form endpoint for inserting a single ungrouped line-item.

use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dates::{parse_iso_date, today},
    endpoints,
    expense::{
        NewExpense,
        form::{normalize_quantity_type, parse_or_default},
        insert_expense,
    },
    product::find_or_create_product,
    store::get_store,
};

/// The form fields for the legacy single-line insert.
#[derive(Debug, Default, Deserialize)]
pub struct AddExpenseFormData {
    /// A product name to resolve with find-or-create semantics.
    pub product_name: Option<String>,
    /// The category for a newly created product.
    pub category_id: Option<String>,
    /// The ID of the store, submitted as text by the form.
    pub store_id: Option<String>,
    /// The price per unit. Defaults to 0 when blank or unparseable.
    pub price: Option<String>,
    /// The quantity. Defaults to 1 when blank or unparseable.
    pub quantity: Option<String>,
    /// The unit tag. Defaults to "buc".
    pub quantity_type: Option<String>,
    /// The absolute discount. Defaults to 0.
    pub discount: Option<String>,
    /// The purchase date. Defaults to today.
    pub date: Option<String>,
}

/// Insert a single line-item without a receipt, then redirect to the expense
/// listing.
///
/// This is the pre-receipt, non-AJAX flow: every numeric field is coerced
/// with a default rather than rejected, and a submission with no usable
/// product or store is dropped silently.
pub async fn add_expense_endpoint(
    State(state): State<AppState>,
    Form(form): Form<AddExpenseFormData>,
) -> Response {
    let redirect = Redirect::to(endpoints::EXPENSES_VIEW).into_response();

    let name = form.product_name.as_deref().map(str::trim).unwrap_or("");

    let Some(store_id) = form
        .store_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
    else {
        return redirect;
    };

    let category_id = form
        .category_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    if get_store(store_id, &connection).is_err() {
        return redirect;
    }

    let product = match find_or_create_product(name, category_id, &connection) {
        Ok(product) => product,
        Err(Error::EmptyProductName) => return redirect,
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a product: {error}");
            return error.into_response();
        }
    };

    let date = form
        .date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| parse_iso_date(raw).ok())
        .unwrap_or_else(today);

    let new_expense = NewExpense {
        product_id: product.id,
        store_id,
        price: parse_or_default(form.price.as_deref(), 0.0),
        quantity: parse_or_default(form.quantity.as_deref(), 1.0),
        quantity_type: normalize_quantity_type(form.quantity_type.as_deref()),
        discount: parse_or_default(form.discount.as_deref(), 0.0),
        date,
        receipt_nr: None,
    };

    match insert_expense(new_expense, &connection) {
        Ok(_) => redirect,
        Err(error) => {
            tracing::error!("An unexpected error occurred while inserting an expense: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod add_expense_endpoint_tests {
    use axum::{
        extract::{Form, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        AppState, endpoints, expense::get_ungrouped_expenses, store::find_or_create_store,
    };

    use super::{AddExpenseFormData, add_expense_endpoint};

    fn get_test_state() -> (AppState, i64) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not initialize database");
        let store_id = {
            let connection = state.db_connection.lock().unwrap();
            find_or_create_store("Kaufland", None, &connection).unwrap().id
        };
        (state, store_id)
    }

    #[tokio::test]
    async fn inserts_ungrouped_line_and_redirects() {
        let (state, store_id) = get_test_state();
        let form = AddExpenseFormData {
            product_name: Some("Lapte".to_owned()),
            store_id: Some(store_id.to_string()),
            price: Some("5".to_owned()),
            quantity: Some("2".to_owned()),
            date: Some("2025-01-05".to_owned()),
            ..Default::default()
        };

        let response = add_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::EXPENSES_VIEW
        );

        let connection = state.db_connection.lock().unwrap();
        let expenses = get_ungrouped_expenses(&connection).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].line.product_name, "Lapte");
        assert_eq!(expenses[0].line.total(), 10.0);
    }

    #[tokio::test]
    async fn junk_numbers_are_defaulted() {
        let (state, store_id) = get_test_state();
        let form = AddExpenseFormData {
            product_name: Some("Lapte".to_owned()),
            store_id: Some(store_id.to_string()),
            price: Some("abc".to_owned()),
            quantity: None,
            discount: Some("??".to_owned()),
            ..Default::default()
        };

        add_expense_endpoint(State(state.clone()), Form(form)).await;

        let connection = state.db_connection.lock().unwrap();
        let expenses = get_ungrouped_expenses(&connection).unwrap();
        assert_eq!(expenses[0].line.price, 0.0);
        assert_eq!(expenses[0].line.quantity, 1.0);
        assert_eq!(expenses[0].line.discount, 0.0);
    }

    #[tokio::test]
    async fn missing_store_redirects_without_inserting() {
        let (state, _) = get_test_state();
        let form = AddExpenseFormData {
            product_name: Some("Lapte".to_owned()),
            store_id: Some("999".to_owned()),
            ..Default::default()
        };

        let response = add_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_ungrouped_expenses(&connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_product_redirects_without_inserting() {
        let (state, store_id) = get_test_state();
        let form = AddExpenseFormData {
            product_name: Some("  ".to_owned()),
            store_id: Some(store_id.to_string()),
            ..Default::default()
        };

        let response = add_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_ungrouped_expenses(&connection).unwrap().is_empty());
    }
}
