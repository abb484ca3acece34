//! Session extractors - cookie-based login state.
//!
//! `Identity` gates a route on being logged in; an anonymous request is
//! answered with a redirect to the login page carrying a `next` parameter
//! pointing back at the original target. `MaybeIdentity` never fails and is
//! used where templates only adapt to login state.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};

use crate::state::AppState;

/// Name of the session cookie holding the signed token.
pub const SESSION_COOKIE: &str = "session";

/// Login route that anonymous users are sent to.
pub const LOGIN_PATH: &str = "/auth/login/";

/// Authenticated user identity extractor.
///
/// Use this in handlers to require a logged-in user:
/// ```ignore
/// async fn create(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

/// Redirect raised when a protected route is visited anonymously.
#[derive(Debug)]
pub struct LoginRequired {
    next: String,
}

impl std::fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "login required to visit {}", self.next)
    }
}

impl actix_web::ResponseError for LoginRequired {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::FOUND
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::Found()
            .insert_header((
                header::LOCATION,
                format!("{}?next={}", LOGIN_PATH, self.next),
            ))
            .finish()
    }
}

fn identity_from_request(req: &HttpRequest) -> Option<Identity> {
    let state = req.app_data::<actix_web::web::Data<AppState>>()?;

    let cookie = req.cookie(SESSION_COOKIE)?;

    match state.sessions.validate_token(cookie.value()) {
        Ok(claims) => Some(Identity {
            user_id: claims.user_id,
            username: claims.username,
        }),
        Err(e) => {
            tracing::debug!("Rejected session cookie: {}", e);
            None
        }
    }
}

impl FromRequest for Identity {
    type Error = LoginRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match identity_from_request(req) {
            Some(identity) => ready(Ok(identity)),
            None => ready(Err(LoginRequired {
                next: req.path().to_string(),
            })),
        }
    }
}

/// Optional identity extractor - never fails, anonymous requests get `None`.
pub struct MaybeIdentity(pub Option<Identity>);

impl FromRequest for MaybeIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeIdentity(identity_from_request(req))))
    }
}
