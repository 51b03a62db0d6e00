//! JSON endpoint for attaching a line-item to an open receipt.

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
    dates::parse_iso_date,
    expense::{
        NewExpense,
        core::round_to_cents,
        form::{normalize_quantity_type, parse_or_default},
        insert_expense, line_total,
    },
    product::{Product, find_or_create_product, get_product},
    receipt::get_receipt,
};

/// The form fields for attaching a line-item to a receipt.
///
/// The product is identified either by `product_id` or by `product_name`
/// (plus an optional category for newly created products).
#[derive(Debug, Default, Deserialize)]
pub struct LineItemFormData {
    /// The receipt number returned by the create-receipt endpoint.
    pub receipt_id: Option<String>,
    /// The ID of an existing product.
    pub product_id: Option<String>,
    /// A product name to resolve with find-or-create semantics.
    pub product_name: Option<String>,
    /// The category for a newly created product.
    pub category_id: Option<String>,
    /// The price per unit. Defaults to 0 when blank or unparseable.
    pub price: Option<String>,
    /// The quantity. Defaults to 1 when blank or unparseable.
    pub quantity: Option<String>,
    /// The unit tag. Defaults to "buc".
    pub quantity_type: Option<String>,
    /// The absolute discount. Defaults to 0.
    pub discount: Option<String>,
    /// The purchase date. Defaults to the receipt's date.
    pub date: Option<String>,
}

/// The JSON body returned when a line-item is attached.
#[derive(Debug, Serialize)]
struct LineItemResponse {
    success: bool,
    expense_id: i64,
    product_name: String,
    price: f64,
    quantity: f64,
    quantity_type: String,
    discount: f64,
    total: f64,
}

/// Attach a line-item to an open receipt.
///
/// Price, quantity and discount are coerced with defaults rather than
/// rejected; the line's store is inherited from the receipt.
pub async fn add_line_item_endpoint(
    State(state): State<AppState>,
    Form(form): Form<LineItemFormData>,
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

    let receipt = match get_receipt(nr_bon, &connection) {
        Ok(receipt) => receipt,
        Err(error) => return error.into_api_response(),
    };

    let product = match resolve_product(&form, &connection) {
        Ok(product) => product,
        Err(response) => return response,
    };

    let price = parse_or_default(form.price.as_deref(), 0.0);
    let quantity = parse_or_default(form.quantity.as_deref(), 1.0);
    let discount = parse_or_default(form.discount.as_deref(), 0.0);
    let quantity_type = normalize_quantity_type(form.quantity_type.as_deref());

    // An unparseable date is treated like an omitted one.
    let date = form
        .date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| parse_iso_date(raw).ok())
        .unwrap_or(receipt.date);

    let new_expense = NewExpense {
        product_id: product.id,
        store_id: receipt.store_id,
        price,
        quantity,
        quantity_type,
        discount,
        date,
        receipt_nr: Some(receipt.nr_bon),
    };

    match insert_expense(new_expense, &connection) {
        Ok(expense) => Json(LineItemResponse {
            success: true,
            expense_id: expense.id,
            product_name: product.name,
            price: expense.price,
            quantity: expense.quantity,
            quantity_type: expense.quantity_type,
            discount: expense.discount,
            total: round_to_cents(line_total(expense.price, expense.quantity, expense.discount)),
        })
        .into_response(),
        Err(error) => error.into_api_response(),
    }
}

fn resolve_product(
    form: &LineItemFormData,
    connection: &rusqlite::Connection,
) -> Result<Product, Response> {
    let raw_id = form.product_id.as_deref().map(str::trim).unwrap_or("");

    if !raw_id.is_empty() {
        let Ok(product_id) = raw_id.parse::<i64>() else {
            return Err(error_response(StatusCode::BAD_REQUEST, "invalid_product"));
        };

        return match get_product(product_id, connection) {
            Ok(product) => Ok(product),
            Err(Error::NotFound) => {
                Err(error_response(StatusCode::BAD_REQUEST, "product_not_found"))
            }
            Err(error) => Err(error.into_api_response()),
        };
    }

    let name = form.product_name.as_deref().map(str::trim).unwrap_or("");

    if name.is_empty() {
        return Err(Error::MissingProduct.into_api_response());
    }

    let category_id = form
        .category_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    find_or_create_product(name, category_id, connection)
        .map_err(|error| error.into_api_response())
}
