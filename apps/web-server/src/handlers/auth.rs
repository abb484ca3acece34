//! Login, logout, and signup handlers.

use actix_web::cookie::{Cookie, time};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use yatube_core::domain::User;
use yatube_core::error::RepoError;

use super::base_context;
use crate::error::{AppError, AppResult};
use crate::session::{MaybeIdentity, SESSION_COOKIE};
use crate::state::AppState;
use yatube_shared::forms::{LoginForm, SignupForm};

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

/// Only same-site paths are valid redirect targets after login.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

fn session_cookie(state: &AppState, user: &User) -> AppResult<Cookie<'static>> {
    let token = state
        .sessions
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(state.sessions.expiration_seconds()))
        .finish())
}

fn render_login(
    state: &AppState,
    identity: &MaybeIdentity,
    next: Option<&str>,
    failed: bool,
) -> AppResult<HttpResponse> {
    let mut ctx = base_context(identity);
    ctx.insert("next", &next);
    ctx.insert("login_failed", &failed);
    state.templates.response("users/login.html", &ctx)
}

/// GET /auth/login/
pub async fn login_form(
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    render_login(&state, &identity, query.next.as_deref(), false)
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    identity: MaybeIdentity,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let user = state.users.find_by_username(&form.username).await?;
    let verified = match &user {
        Some(user) => state
            .passwords
            .verify(&form.password, &user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::debug!(username = %form.username, "Failed login attempt");
        return render_login(&state, &identity, form.next.as_deref(), true);
    };

    let cookie = session_cookie(&state, &user)?;
    tracing::info!(username = %user.username, "User logged in");

    Ok(HttpResponse::Found()
        .cookie(cookie)
        .insert_header((
            actix_web::http::header::LOCATION,
            safe_next(form.next.as_deref()),
        ))
        .finish())
}

/// GET /auth/logout/
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Found()
        .cookie(cookie)
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .finish()
}

fn render_signup(
    state: &AppState,
    identity: &MaybeIdentity,
    error: Option<&str>,
) -> AppResult<HttpResponse> {
    let mut ctx = base_context(identity);
    ctx.insert("signup_error", &error);
    state.templates.response("users/signup.html", &ctx)
}

/// GET /auth/signup/
pub async fn signup_form(
    state: web::Data<AppState>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    render_signup(&state, &identity, None)
}

/// POST /auth/signup/
pub async fn signup(
    state: web::Data<AppState>,
    identity: MaybeIdentity,
    form: web::Form<SignupForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let username = form.username.trim();

    if username.is_empty() || username.len() > 150 {
        return render_signup(&state, &identity, Some("Enter a valid username."));
    }
    if form.password.len() < 8 {
        return render_signup(
            &state,
            &identity,
            Some("Password must be at least 8 characters."),
        );
    }
    if state.users.find_by_username(username).await?.is_some() {
        return render_signup(&state, &identity, Some("This username is already taken."));
    }

    let password_hash = state
        .passwords
        .hash(&form.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = match state
        .users
        .save(User::new(username.to_string(), password_hash))
        .await
    {
        Ok(user) => user,
        // Lost a race on the unique username.
        Err(RepoError::Constraint(_)) => {
            return render_signup(&state, &identity, Some("This username is already taken."));
        }
        Err(e) => return Err(e.into()),
    };

    let cookie = session_cookie(&state, &user)?;
    tracing::info!(username = %user.username, "User signed up");

    Ok(HttpResponse::Found()
        .cookie(cookie)
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::safe_next;

    #[test]
    fn safe_next_accepts_site_paths() {
        assert_eq!(safe_next(Some("/create/")), "/create/");
        assert_eq!(safe_next(Some("/group/cats/")), "/group/cats/");
    }

    #[test]
    fn safe_next_rejects_offsite_targets() {
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
