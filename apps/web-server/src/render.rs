//! Template engine - Tera with templates embedded at compile time.
//!
//! Every rendered response carries the template name in an `x-template`
//! header, mirroring how request ids are echoed in `x-request-id` headers;
//! route tests assert template selection through it.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use tera::{Context, Tera};

use crate::error::AppError;

/// Response header carrying the name of the rendered template.
pub static TEMPLATE_HEADER: &str = "x-template";

macro_rules! embedded_templates {
    ($($name:literal),+ $(,)?) => {
        vec![$(($name, include_str!(concat!("../templates/", $name)))),+]
    };
}

/// The template engine. Templates are compiled in, so rendering never
/// depends on the working directory.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(embedded_templates![
            "base.html",
            "includes/paginator.html",
            "posts/_post_list.html",
            "posts/index.html",
            "posts/group_list.html",
            "posts/profile.html",
            "posts/post_detail.html",
            "posts/create_post.html",
            "users/login.html",
            "users/signup.html",
            "about/author.html",
            "about/tech.html",
            "404.html",
        ])?;
        Ok(Self { tera })
    }

    /// Render a template to a string.
    pub fn render(&self, name: &str, context: &Context) -> Result<String, AppError> {
        self.tera
            .render(name, context)
            .map_err(|e| AppError::Internal(format!("template '{}' failed: {}", name, e)))
    }

    /// Render a template into a 200 HTML response.
    pub fn response(&self, name: &str, context: &Context) -> Result<HttpResponse, AppError> {
        self.response_with_status(StatusCode::OK, name, context)
    }

    /// Render a template into an HTML response with an explicit status.
    pub fn response_with_status(
        &self,
        status: StatusCode,
        name: &str,
        context: &Context,
    ) -> Result<HttpResponse, AppError> {
        let body = self.render(name, context)?;
        Ok(html_response(status, name, body))
    }
}

/// Build an HTML response around an already-rendered body.
pub fn html_response(status: StatusCode, template_name: &str, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .insert_header((TEMPLATE_HEADER, template_name))
        .body(body)
}
