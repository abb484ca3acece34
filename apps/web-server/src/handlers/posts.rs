//! Post listing, detail, and authoring handlers.

use std::collections::HashMap;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use yatube_core::domain::{Group, NewPost, Post};
use yatube_core::error::DomainError;
use yatube_core::pagination::{POSTS_PER_PAGE, Page, page_number, paginate};
use yatube_shared::context::{GroupContext, PageContext, PostContext};
use yatube_shared::forms::PostForm;

use super::{base_context, redirect};
use crate::error::{AppError, AppResult};
use crate::render::html_response;
use crate::session::{Identity, MaybeIdentity};
use crate::state::AppState;

/// How long a rendered index page stays cached.
const INDEX_CACHE_TTL: Duration = Duration::from_secs(20);

/// `?page=` carried as a raw string so malformed values fall back to page 1
/// instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

fn group_context(group: &Group) -> GroupContext {
    GroupContext {
        id: group.id,
        title: group.title.clone(),
        slug: group.slug.clone(),
        description: group.description.clone(),
    }
}

/// Resolve author and group references for display, memoizing lookups
/// across the page.
async fn post_contexts(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostContext>> {
    let mut authors: HashMap<Uuid, String> = HashMap::new();
    let mut groups: HashMap<Uuid, GroupContext> = HashMap::new();
    let mut contexts = Vec::with_capacity(posts.len());

    for post in posts {
        let author_username = match authors.get(&post.author_id) {
            Some(name) => name.clone(),
            None => {
                let author = state.users.find_by_id(post.author_id).await?.ok_or_else(|| {
                    AppError::Internal(format!(
                        "author {} missing for post {}",
                        post.author_id, post.id
                    ))
                })?;
                authors.insert(post.author_id, author.username.clone());
                author.username
            }
        };

        let group = match post.group_id {
            None => None,
            Some(group_id) => match groups.get(&group_id) {
                Some(ctx) => Some(ctx.clone()),
                // A group deleted mid-request reads as a detached post.
                None => match state.groups.find_by_id(group_id).await? {
                    Some(found) => {
                        let ctx = group_context(&found);
                        groups.insert(group_id, ctx.clone());
                        Some(ctx)
                    }
                    None => None,
                },
            },
        };

        contexts.push(PostContext {
            id: post.id,
            text: post.text,
            pub_date: post.pub_date.to_rfc3339(),
            author_username,
            group,
        });
    }

    Ok(contexts)
}

async fn page_context(state: &AppState, page: Page<Post>) -> AppResult<PageContext> {
    let number = page.number;
    let total_pages = page.total_pages;
    let total_items = page.total_items;
    let has_previous = page.has_previous();
    let has_next = page.has_next();
    let previous_number = page.previous_number();
    let next_number = page.next_number();

    Ok(PageContext {
        posts: post_contexts(state, page.items).await?,
        number,
        total_pages,
        total_items,
        has_previous,
        has_next,
        previous_number,
        next_number,
    })
}

/// GET / - all posts, newest first.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    let number = page_number(query.page.as_deref());

    // Rendered pages are cached briefly, but only for anonymous visitors -
    // the chrome differs per logged-in user.
    let cache_key = format!("index:page:{number}");
    let cacheable = identity.0.is_none();
    if cacheable {
        if let Some(body) = state.cache.get(&cache_key).await {
            return Ok(html_response(StatusCode::OK, "posts/index.html", body));
        }
    }

    let posts = state.posts.list_recent().await?;
    let page = paginate(posts, POSTS_PER_PAGE, number);

    let mut ctx = base_context(&identity);
    ctx.insert("page_obj", &page_context(&state, page).await?);

    let body = state.templates.render("posts/index.html", &ctx)?;
    if cacheable {
        if let Err(e) = state
            .cache
            .set(&cache_key, &body, Some(INDEX_CACHE_TTL))
            .await
        {
            tracing::warn!("Failed to cache index page: {}", e);
        }
    }

    Ok(html_response(StatusCode::OK, "posts/index.html", body))
}

/// GET /group/{slug}/ - posts belonging to one group.
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| DomainError::not_found("group", slug.as_str()))?;

    let posts = state.posts.list_by_group(group.id).await?;
    let page = paginate(posts, POSTS_PER_PAGE, page_number(query.page.as_deref()));

    let mut ctx = base_context(&identity);
    ctx.insert("group", &group_context(&group));
    ctx.insert("page_obj", &page_context(&state, page).await?);

    state.templates.response("posts/group_list.html", &ctx)
}

/// GET /profile/{username}/ - posts written by one author.
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::not_found("user", username.as_str()))?;

    let posts = state.posts.list_by_author(author.id).await?;
    let page = paginate(posts, POSTS_PER_PAGE, page_number(query.page.as_deref()));

    let mut ctx = base_context(&identity);
    ctx.insert("author", &author.username);
    ctx.insert("page_obj", &page_context(&state, page).await?);

    state.templates.response("posts/profile.html", &ctx)
}

fn parse_post_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| DomainError::not_found("post", raw).into())
}

async fn load_post(state: &AppState, raw_id: &str) -> AppResult<Post> {
    let id = parse_post_id(raw_id)?;
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", raw_id).into())
}

/// GET /posts/{post_id}/ - a single post.
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: MaybeIdentity,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, &path.into_inner()).await?;
    let is_author = identity
        .0
        .as_ref()
        .is_some_and(|i| i.user_id == post.author_id);

    let contexts = post_contexts(&state, vec![post]).await?;

    let mut ctx = base_context(&identity);
    ctx.insert("post", &contexts[0]);
    ctx.insert("is_author", &is_author);

    state.templates.response("posts/post_detail.html", &ctx)
}

async fn form_groups(state: &AppState) -> AppResult<Vec<GroupContext>> {
    Ok(state
        .groups
        .list_all()
        .await?
        .iter()
        .map(group_context)
        .collect())
}

#[allow(clippy::too_many_arguments)]
fn render_post_form(
    state: &AppState,
    identity: &Identity,
    groups: &[GroupContext],
    text: &str,
    group: Option<Uuid>,
    is_edit: bool,
    post_id: Option<i64>,
    error: Option<&str>,
) -> AppResult<HttpResponse> {
    let mut ctx = base_context(&MaybeIdentity(Some(identity.clone())));
    ctx.insert("groups", groups);
    ctx.insert("form_text", text);
    ctx.insert("form_group", &group);
    ctx.insert("is_edit", &is_edit);
    ctx.insert("post_id", &post_id);
    ctx.insert("form_error", &error);

    state.templates.response("posts/create_post.html", &ctx)
}

/// Check the submitted form; `Ok` carries the cleaned text and group id.
async fn clean_post_form(
    state: &AppState,
    form: &PostForm,
) -> AppResult<Result<(String, Option<Uuid>), &'static str>> {
    let text = form.text.trim();
    if text.is_empty() {
        return Ok(Err("This field is required."));
    }

    if let Some(group_id) = form.group {
        if state.groups.find_by_id(group_id).await?.is_none() {
            return Ok(Err("Select a valid choice."));
        }
    }

    Ok(Ok((text.to_string(), form.group)))
}

/// GET /create/ - the new post form. Login required.
pub async fn post_create_form(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let groups = form_groups(&state).await?;
    render_post_form(&state, &identity, &groups, "", None, false, None, None)
}

/// POST /create/ - publish a new post. Login required.
pub async fn post_create(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let (text, group_id) = match clean_post_form(&state, &form).await? {
        Ok(cleaned) => cleaned,
        Err(message) => {
            let groups = form_groups(&state).await?;
            return render_post_form(
                &state,
                &identity,
                &groups,
                &form.text,
                form.group,
                false,
                None,
                Some(message),
            );
        }
    };

    let post = state
        .posts
        .create(NewPost::new(identity.user_id, text, group_id))
        .await?;

    tracing::info!(
        post_id = post.id,
        author = %identity.username,
        preview = %post.preview(),
        "Post created"
    );

    Ok(redirect(&format!("/profile/{}/", identity.username)))
}

/// GET /posts/{post_id}/edit/ - the edit form. Author only.
pub async fn post_edit_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, &path.into_inner()).await?;
    if post.author_id != identity.user_id {
        return Ok(redirect(&format!("/posts/{}/", post.id)));
    }

    let groups = form_groups(&state).await?;
    render_post_form(
        &state,
        &identity,
        &groups,
        &post.text,
        post.group_id,
        true,
        Some(post.id),
        None,
    )
}

/// POST /posts/{post_id}/edit/ - update text/group. Author only;
/// `pub_date` and authorship never change.
pub async fn post_edit(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let mut post = load_post(&state, &path.into_inner()).await?;
    if post.author_id != identity.user_id {
        return Ok(redirect(&format!("/posts/{}/", post.id)));
    }

    let form = form.into_inner();

    let (text, group_id) = match clean_post_form(&state, &form).await? {
        Ok(cleaned) => cleaned,
        Err(message) => {
            let groups = form_groups(&state).await?;
            return render_post_form(
                &state,
                &identity,
                &groups,
                &form.text,
                form.group,
                true,
                Some(post.id),
                Some(message),
            );
        }
    };

    post.text = text;
    post.group_id = group_id;
    let post = state.posts.save(post).await?;

    tracing::info!(post_id = post.id, author = %identity.username, "Post updated");

    Ok(redirect(&format!("/posts/{}/", post.id)))
}
