//! Cheltuieli is a small web app for keeping track of household grocery
//! spending: products, stores, receipts and their purchase line-items live in
//! a single SQLite file, and a handful of report pages aggregate the totals.
//!
//! This library serves HTML pages directly, plus a small JSON API used by the
//! receipt-entry page.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod api;
mod app_state;
pub mod category;
mod dates;
mod db;
pub mod endpoints;
pub mod expense;
mod home;
mod html;
mod navigation;
mod not_found;
pub mod product;
pub mod receipt;
pub mod report;
mod routing;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use routing::build_router;

use crate::{api::error_response, not_found::get_404_not_found_response};

/// An async task that waits for ctrl+c or the terminate signal, whichever
/// comes first, and then asks the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl+c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received ctrl+c, shutting down."),
        _ = terminate => tracing::debug!("Received terminate signal, shutting down."),
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a product.
    #[error("Product name cannot be empty")]
    EmptyProductName,

    /// An empty string was used to create a store.
    #[error("Store name cannot be empty")]
    EmptyStoreName,

    /// A store rename collided with another store's name.
    ///
    /// Store names are compared after upper-casing, so this fires for any
    /// casing of an existing name.
    #[error("the store \"{0}\" already exists")]
    DuplicateStoreName(String),

    /// The store ID used to create a receipt did not match a valid store.
    #[error("the store ID does not refer to a valid store")]
    InvalidStore,

    /// A line-item was submitted against a receipt number that does not
    /// exist.
    #[error("the receipt number does not refer to a valid receipt")]
    ReceiptNotFound,

    /// A line-item was submitted with neither a product ID nor a product
    /// name.
    #[error("a product ID or a product name is required")]
    MissingProduct,

    /// A field that must be numeric could not be parsed as a number.
    ///
    /// Carries the form field name so API clients get a field-specific
    /// error code.
    #[error("the field \"{0}\" must be a number")]
    InvalidNumber(&'static str),

    /// A date string could not be parsed as an ISO 8601 calendar date.
    #[error("could not parse \"{0}\" as a date")]
    InvalidDate(String),

    /// Tried to update an expense line-item that does not exist.
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense line-item that does not exist.
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// Tried to update a store that does not exist.
    #[error("tried to update a store that is not in the database")]
    UpdateMissingStore,

    /// Tried to delete a store that does not exist.
    #[error("tried to delete a store that is not in the database")]
    DeleteMissingStore,

    /// Tried to delete a receipt that does not exist.
    #[error("tried to delete a receipt that is not in the database")]
    DeleteMissingReceipt,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A CSV export could not be written.
    #[error("could not write the CSV export: {0}")]
    CsvExport(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, check the server logs for more details.",
                )
                    .into_response()
            }
        }
    }
}

impl Error {
    /// Map the error onto a JSON body `{"success": false, "error": <code>}`
    /// with a machine-readable code, for the AJAX endpoints.
    fn into_api_response(self) -> Response {
        match self {
            Error::InvalidStore => error_response(StatusCode::BAD_REQUEST, "store_not_found"),
            Error::ReceiptNotFound => error_response(StatusCode::BAD_REQUEST, "receipt_not_found"),
            Error::MissingProduct => error_response(StatusCode::BAD_REQUEST, "missing_product"),
            Error::InvalidNumber("price") => {
                error_response(StatusCode::BAD_REQUEST, "invalid_price")
            }
            Error::InvalidNumber("quantity") => {
                error_response(StatusCode::BAD_REQUEST, "invalid_quantity")
            }
            Error::InvalidNumber("discount") => {
                error_response(StatusCode::BAD_REQUEST, "invalid_discount")
            }
            Error::InvalidNumber(_) => error_response(StatusCode::BAD_REQUEST, "invalid_number"),
            Error::InvalidDate(_) => error_response(StatusCode::BAD_REQUEST, "invalid_date"),
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                error_response(StatusCode::BAD_REQUEST, "expense_not_found")
            }
            Error::DeleteMissingReceipt => {
                error_response(StatusCode::BAD_REQUEST, "receipt_not_found")
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}
