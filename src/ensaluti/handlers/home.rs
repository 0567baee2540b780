use crate::ensaluti::{
    handlers::page,
    views::{View, ViewData},
};
use axum::{http::StatusCode, response::Response};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page", content_type = "text/html"),
    ),
    tag = "portal"
)]
pub async fn home() -> Response {
    page(StatusCode::OK, View::Home, &ViewData::default())
}
