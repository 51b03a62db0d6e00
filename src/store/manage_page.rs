//! The store management page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::base,
    navigation::NavBar,
    store::{STORE_TYPE_SUGGESTIONS, Store, get_all_stores},
};

/// Render the store management page.
pub async fn get_stores_page(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_stores(&connection) {
        Ok(stores) => stores_page_view(&stores, None).into_response(),
        Err(error) => error.into_response(),
    }
}

/// The store management page, optionally with an error banner.
///
/// Also rendered by the update endpoint when a rename collides with an
/// existing store name.
pub(crate) fn stores_page_view(stores: &[Store], error_message: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::STORES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        h1 { "Magazine" }

        @if let Some(message) = error_message {
            p class="error" { (message) }
        }

        form method="post" action=(endpoints::ADD_STORE)
        {
            label for="name" { "Nume magazin" }
            input id="name" type="text" name="name" required;

            label for="store_type" { "Tip magazin" }
            input id="store_type" type="text" name="store_type" list="store-types";
            datalist id="store-types" {
                @for suggestion in STORE_TYPE_SUGGESTIONS {
                    option value=(suggestion);
                }
            }

            button type="submit" { "Adauga magazin" }
        }

        h2 { "Magazine existente" }

        @if stores.is_empty() {
            p class="muted" { "Niciun magazin adaugat." }
        } @else {
            ul {
                @for store in stores {
                    li {
                        form method="post" action=(endpoints::UPDATE_STORE) class="inline"
                        {
                            input type="hidden" name="store_id" value=(store.id);
                            input type="text" name="name" value=(store.name);
                            input
                                type="text"
                                name="store_type"
                                list="store-types"
                                placeholder="tip"
                                value=[store.store_type.as_deref()];
                            button type="submit" { "Salveaza" }
                        }
                        form method="post" action=(endpoints::DELETE_STORE) class="inline"
                        {
                            input type="hidden" name="store_id" value=(store.id);
                            button type="submit" { "Sterge" }
                        }
                    }
                }
            }
        }
    };

    base("Magazine", &content)
}

#[cfg(test)]
mod stores_page_tests {
    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        AppState,
        store::find_or_create_store,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::get_stores_page;

    #[tokio::test]
    async fn renders_store_names() {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not initialize database");
        {
            let connection = state.db_connection.lock().unwrap();
            find_or_create_store("Kaufland", Some("supermarket"), &connection).unwrap();
        }

        let response = get_stores_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(html.html().contains("KAUFLAND"));
    }
}
