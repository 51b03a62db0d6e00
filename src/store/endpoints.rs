//! Form endpoints for store management.

use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    store::{
        delete_store, find_or_create_store, get_all_stores, manage_page::stores_page_view,
        update_store,
    },
};

/// The form fields for creating a store.
#[derive(Debug, Deserialize)]
pub struct AddStoreFormData {
    /// The display name of the store.
    pub name: String,
    /// A free-text store type.
    pub store_type: Option<String>,
}

/// The form fields for renaming a store or changing its type.
#[derive(Debug, Deserialize)]
pub struct UpdateStoreFormData {
    /// The ID of the store, submitted as text by the form.
    pub store_id: String,
    /// The new display name.
    pub name: String,
    /// The new store type.
    pub store_type: Option<String>,
}

/// The form fields for deleting a store.
#[derive(Debug, Deserialize)]
pub struct DeleteStoreFormData {
    /// The ID of the store, submitted as text by the form.
    pub store_id: String,
}

/// Handle the add-store form and return to the store management page.
///
/// Stores resolve with find-or-create semantics, so resubmitting an existing
/// name (in any casing) is harmless.
pub async fn add_store_endpoint(
    State(state): State<AppState>,
    Form(form): Form<AddStoreFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match find_or_create_store(&form.name, form.store_type.as_deref(), &connection) {
        Ok(_) | Err(Error::EmptyStoreName) => {}
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a store: {error}");
            return error.into_response();
        }
    }

    Redirect::to(endpoints::STORES_VIEW).into_response()
}

/// Handle the store update form.
///
/// A rename that collides with another store re-renders the management page
/// with a message instead of failing.
pub async fn update_store_endpoint(
    State(state): State<AppState>,
    Form(form): Form<UpdateStoreFormData>,
) -> Response {
    let Ok(store_id) = form.store_id.trim().parse::<i64>() else {
        return Redirect::to(endpoints::STORES_VIEW).into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_store(store_id, &form.name, form.store_type.as_deref(), &connection) {
        Ok(_) | Err(Error::EmptyStoreName) | Err(Error::UpdateMissingStore) => {
            Redirect::to(endpoints::STORES_VIEW).into_response()
        }
        Err(Error::DuplicateStoreName(name)) => {
            let message = format!("Magazinul \"{name}\" exista deja.");

            match get_all_stores(&connection) {
                Ok(stores) => stores_page_view(&stores, Some(&message)).into_response(),
                Err(error) => error.into_response(),
            }
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating a store: {error}");
            error.into_response()
        }
    }
}

/// Handle the store delete form.
///
/// Deletes the store's line-items and receipts first; there is no undo.
pub async fn delete_store_endpoint(
    State(state): State<AppState>,
    Form(form): Form<DeleteStoreFormData>,
) -> Response {
    let Ok(store_id) = form.store_id.trim().parse::<i64>() else {
        return Redirect::to(endpoints::STORES_VIEW).into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_store(store_id, &connection) {
        Ok(()) | Err(Error::DeleteMissingStore) => {
            Redirect::to(endpoints::STORES_VIEW).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting a store: {error}");
            error.into_response()
        }
    }
}
