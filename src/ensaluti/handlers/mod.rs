pub mod health;
pub use self::health::health;

pub mod home;
pub use self::home::home;

pub mod signin;
pub use self::signin::{signin, signin_form};

pub mod signup;
pub use self::signup::{signup, signup_form};

// common functions for the handlers
use crate::ensaluti::views::{self, View, ViewData};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

/// Message shown when a store or hashing failure is caught at the handler
/// boundary; the underlying error is logged and discarded.
pub const SERVER_ERROR: &str = "Server error. Please try again.";

/// Render a page with the given status, falling back to a plain-text 500
/// when the renderer itself fails.
pub(crate) fn page(status: StatusCode, view: View, data: &ViewData) -> Response {
    match views::render(view, data) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            error!("Error rendering {} view: {:?}", view.name(), err);

            (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string()).into_response()
        }
    }
}
