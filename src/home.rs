//! The home page listing products and stores.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::base,
    navigation::NavBar,
    product::{Product, get_all_products},
    store::{Store, get_all_stores},
};

/// Render the home page.
pub async fn get_home_page(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let products = match get_all_products(&connection) {
        Ok(products) => products,
        Err(error) => return error.into_response(),
    };

    match get_all_stores(&connection) {
        Ok(stores) => home_page_view(&products, &stores).into_response(),
        Err(error) => error.into_response(),
    }
}

fn home_page_view(products: &[Product], stores: &[Store]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        h1 { "Cheltuieli casnice" }

        p {
            a href=(endpoints::RECORD_EXPENSE_VIEW) { "Adauga un bon" }
            " sau vezi "
            a href=(endpoints::REPORTS_VIEW) { "rapoartele" }
            "."
        }

        h2 { "Magazine" }

        @if stores.is_empty() {
            p class="muted" { "Niciun magazin adaugat." }
        } @else {
            ul {
                @for store in stores {
                    li {
                        (store.name)
                        @if let Some(store_type) = &store.store_type {
                            " " span class="muted" { "(" (store_type) ")" }
                        }
                    }
                }
            }
        }

        h2 { "Produse" }

        @if products.is_empty() {
            p class="muted" { "Niciun produs adaugat." }
        } @else {
            ul {
                @for product in products {
                    li { (product.name) }
                }
            }
        }
    };

    base("Acasa", &content)
}
