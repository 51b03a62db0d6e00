//! Form endpoint for adding a product from the recording page.

use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{AppState, Error, endpoints, product::find_or_create_product};

/// The form fields for creating a product.
#[derive(Debug, Deserialize)]
pub struct ProductFormData {
    /// The display name of the product.
    pub name: String,
    /// The selected category ID, submitted as text by the form.
    pub category_id: Option<String>,
}

/// Handle the add-product form and send the user back to the recording page.
///
/// The product is resolved with find-or-create semantics, so resubmitting the
/// same name (in any casing) is harmless. A blank name is ignored rather than
/// rejected, matching the permissive style of the rest of the form flow.
pub async fn add_product_endpoint(
    State(state): State<AppState>,
    Form(form): Form<ProductFormData>,
) -> Response {
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

    match find_or_create_product(&form.name, category_id, &connection) {
        Ok(_) | Err(Error::EmptyProductName) => {}
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a product: {error}");
            return error.into_response();
        }
    }

    Redirect::to(endpoints::RECORD_EXPENSE_VIEW).into_response()
}

#[cfg(test)]
mod add_product_endpoint_tests {
    use axum::{
        extract::{Form, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{AppState, endpoints, product::get_all_products};

    use super::{ProductFormData, add_product_endpoint};

    fn get_test_state() -> AppState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        AppState::new(connection).expect("Could not initialize database")
    }

    #[tokio::test]
    async fn creates_product_and_redirects() {
        let state = get_test_state();
        let form = ProductFormData {
            name: "Lapte".to_owned(),
            category_id: Some("".to_owned()),
        };

        let response = add_product_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::RECORD_EXPENSE_VIEW
        );

        let connection = state.db_connection.lock().unwrap();
        let products = get_all_products(&connection).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Lapte");
    }

    #[tokio::test]
    async fn blank_name_redirects_without_inserting() {
        let state = get_test_state();
        let form = ProductFormData {
            name: "   ".to_owned(),
            category_id: None,
        };

        let response = add_product_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_all_products(&connection).unwrap().is_empty());
    }
}
