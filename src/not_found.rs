//! The 404 page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{endpoints, html::base};

/// The fallback handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 response directly, for handlers that detect a missing
/// resource themselves.
pub fn get_404_not_found_response() -> Response {
    let content = html! {
        h1 { "Pagina nu a fost gasita" }
        p {
            "The page you are looking for does not exist. "
            a href=(endpoints::ROOT) { "Back to the home page." }
        }
    };

    (StatusCode::NOT_FOUND, base("Not Found", &content)).into_response()
}
