//! Static info pages.

use actix_web::{HttpResponse, web};

use super::base_context;
use crate::error::AppResult;
use crate::session::MaybeIdentity;
use crate::state::AppState;

/// GET /about/author/
pub async fn author(
    state: web::Data<AppState>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    let ctx = base_context(&identity);
    state.templates.response("about/author.html", &ctx)
}

/// GET /about/tech/
pub async fn tech(state: web::Data<AppState>, identity: MaybeIdentity) -> AppResult<HttpResponse> {
    let ctx = base_context(&identity);
    state.templates.response("about/tech.html", &ctx)
}
