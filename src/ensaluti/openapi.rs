use crate::ensaluti::handlers::{health, home, signin, signup};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::home,
        signup::signup_form,
        signup::signup,
        signin::signin_form,
        signin::signin,
        health::health,
    ),
    components(schemas(signup::SignupForm, signin::SigninForm)),
    tags(
        (name = "portal", description = "Signup and sign-in pages"),
        (name = "health", description = "Service metadata"),
    )
)]
pub struct ApiDoc;
