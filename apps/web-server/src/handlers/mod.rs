//! HTTP handlers and route configuration.

mod about;
mod auth;
mod posts;


use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use tera::Context;

use crate::error::AppResult;
use crate::session::MaybeIdentity;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login/", web::get().to(auth::login_form))
            .route("/login/", web::post().to(auth::login))
            .route("/logout/", web::get().to(auth::logout))
            .route("/signup/", web::get().to(auth::signup_form))
            .route("/signup/", web::post().to(auth::signup)),
    )
    .service(
        web::scope("/about")
            .route("/author/", web::get().to(about::author))
            .route("/tech/", web::get().to(about::tech)),
    )
    .route("/", web::get().to(posts::index))
    .route("/group/{slug}/", web::get().to(posts::group_posts))
    .route("/profile/{username}/", web::get().to(posts::profile))
    .route("/posts/{post_id}/", web::get().to(posts::post_detail))
    .route("/posts/{post_id}/edit/", web::get().to(posts::post_edit_form))
    .route("/posts/{post_id}/edit/", web::post().to(posts::post_edit))
    .route("/create/", web::get().to(posts::post_create_form))
    .route("/create/", web::post().to(posts::post_create));
}

/// Base template context: the logged-in username, if any.
fn base_context(identity: &MaybeIdentity) -> Context {
    let mut ctx = Context::new();
    ctx.insert("user", &identity.0.as_ref().map(|i| i.username.as_str()));
    ctx
}

/// 302 to the given location.
fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Fallback for unmatched paths.
pub async fn not_found(
    state: web::Data<AppState>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    let ctx = base_context(&identity);
    state
        .templates
        .response_with_status(StatusCode::NOT_FOUND, "404.html", &ctx)
}
