use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a timestamped, authored text entry.
///
/// `pub_date` is set once when the post is created and never updated.
/// `group_id` is cleared (not cascaded) when the referenced group is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
}

/// A post that has not been persisted yet.
///
/// Post ids are assigned by the storage layer, so creation goes through this
/// draft type rather than a `Post` with a placeholder id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
}

impl NewPost {
    /// Draft a post for the given author, stamping the publication time.
    pub fn new(author_id: Uuid, text: String, group_id: Option<Uuid>) -> Self {
        Self {
            text,
            pub_date: Utc::now(),
            author_id,
            group_id,
        }
    }
}

impl Post {
    /// Short preview of the body text, used in listings and logs.
    pub fn preview(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(15)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_stamps_pub_date() {
        let before = Utc::now();
        let draft = NewPost::new(Uuid::new_v4(), "hello".to_string(), None);
        assert!(draft.pub_date >= before);
        assert!(draft.group_id.is_none());
    }

    #[test]
    fn preview_truncates_long_text() {
        let post = Post {
            id: 1,
            text: "a very long body that keeps going".to_string(),
            pub_date: Utc::now(),
            author_id: Uuid::new_v4(),
            group_id: None,
        };
        assert_eq!(post.preview(), "a very long bod");
    }

    #[test]
    fn preview_keeps_short_text_whole() {
        let post = Post {
            id: 1,
            text: "short".to_string(),
            pub_date: Utc::now(),
            author_id: Uuid::new_v4(),
            group_id: None,
        };
        assert_eq!(post.preview(), "short");
    }
}
