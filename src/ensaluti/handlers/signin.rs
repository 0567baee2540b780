use crate::{
    ensaluti::{
        handlers::{page, SERVER_ERROR},
        password,
        views::{View, ViewData},
    },
    store::UserStore,
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::Response,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

/// Covers both unknown usernames and wrong passwords so the response does
/// not reveal which accounts exist.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(ToSchema, Deserialize, Debug)]
pub struct SigninForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    #[schema(value_type = String, format = Password)]
    password: SecretString,
}

#[utoipa::path(
    get,
    path = "/signin",
    responses(
        (status = 200, description = "Sign-in form", content_type = "text/html"),
    ),
    tag = "portal"
)]
pub async fn signin_form() -> Response {
    page(StatusCode::OK, View::Signin, &ViewData::default())
}

#[utoipa::path(
    post,
    path = "/signin",
    request_body(content = SigninForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Signed in", content_type = "text/html"),
        (status = 400, description = "Invalid credentials", content_type = "text/html"),
        (status = 500, description = "Store failure", content_type = "text/html"),
    ),
    tag = "portal"
)]
#[instrument]
pub async fn signin(store: Extension<UserStore>, Form(form): Form<SigninForm>) -> Response {
    debug!("signin: {:?}", form);

    // An empty or missing field can never match a stored credential, so
    // answer without a store round trip.
    if form.username.is_empty() || form.password.expose_secret().is_empty() {
        return page(
            StatusCode::BAD_REQUEST,
            View::Signin,
            &ViewData::with_error(INVALID_CREDENTIALS),
        );
    }

    let user = match store.find_by_username(&form.username).await {
        Ok(user) => user,
        Err(err) => {
            error!("Error fetching user: {:?}", err);

            return page(
                StatusCode::INTERNAL_SERVER_ERROR,
                View::Signin,
                &ViewData::with_error(SERVER_ERROR),
            );
        }
    };

    match user {
        Some(user) if password::verify(&form.password, &user.password) => page(
            StatusCode::OK,
            View::SigninSuccess,
            &ViewData::with_username(user.username),
        ),
        _ => page(
            StatusCode::BAD_REQUEST,
            View::Signin,
            &ViewData::with_error(INVALID_CREDENTIALS),
        ),
    }
}
