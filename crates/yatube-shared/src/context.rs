//! Template context DTOs - the shapes the templates see.

use serde::Serialize;
use uuid::Uuid;

/// A group as rendered in listings, selects, and the group page header.
#[derive(Debug, Clone, Serialize)]
pub struct GroupContext {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A post with its references resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct PostContext {
    pub id: i64,
    pub text: String,
    /// RFC 3339, formatted in the template via the `date` filter.
    pub pub_date: String,
    pub author_username: String,
    pub group: Option<GroupContext>,
}

/// One listing page plus the navigation metadata the paginator partial needs.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub posts: Vec<PostContext>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_number: usize,
    pub next_number: usize,
}
