use crate::{
    ensaluti::{
        handlers::{page, SERVER_ERROR},
        password,
        views::{View, ViewData},
    },
    store::{users::User, CreateOutcome, UserStore},
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

/// Message shown when the username or email is already taken.
pub const DUPLICATE_IDENTITY: &str = "Username or email already exists.";

#[derive(ToSchema, Deserialize, Debug)]
pub struct SignupForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    #[schema(value_type = String, format = Password)]
    password: SecretString,
}

#[utoipa::path(
    get,
    path = "/signup",
    responses(
        (status = 200, description = "Signup form", content_type = "text/html"),
    ),
    tag = "portal"
)]
pub async fn signup_form() -> Response {
    page(StatusCode::OK, View::Signup, &ViewData::default())
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirects to the sign-in form"),
        (status = 400, description = "Username or email already exists", content_type = "text/html"),
        (status = 500, description = "Store or hashing failure", content_type = "text/html"),
    ),
    tag = "portal"
)]
#[instrument]
pub async fn signup(store: Extension<UserStore>, Form(form): Form<SignupForm>) -> Response {
    debug!("signup: {:?}", form);

    let password = match password::hash(&form.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Error hashing password: {:?}", err);

            return page(
                StatusCode::INTERNAL_SERVER_ERROR,
                View::Signup,
                &ViewData::with_error(SERVER_ERROR),
            );
        }
    };

    let user = User::new(form.username, form.email, password);

    // The unique indexes decide the race; no separate existence check.
    match store.create(&user).await {
        Ok(CreateOutcome::Created) => Redirect::to("/signin").into_response(),
        Ok(CreateOutcome::DuplicateIdentity) => page(
            StatusCode::BAD_REQUEST,
            View::Signup,
            &ViewData::with_error(DUPLICATE_IDENTITY),
        ),
        Err(err) => {
            error!("Error inserting user: {:?}", err);

            page(
                StatusCode::INTERNAL_SERVER_ERROR,
                View::Signup,
                &ViewData::with_error(SERVER_ERROR),
            )
        }
    }
}
