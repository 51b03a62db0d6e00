use axum::{body::Body, response::Response};
use serde_json::Value;

pub(crate) async fn response_text(response: Response<Body>) -> String {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn response_json(response: Response<Body>) -> Value {
    let text = response_text(response).await;

    serde_json::from_str(&text).expect("Response body is not valid JSON")
}
