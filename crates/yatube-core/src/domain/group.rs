use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group entity - a named community that posts may optionally belong to.
///
/// The slug is the external key: group URLs are `/group/{slug}/` and it is
/// unique across all groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl Group {
    /// Create a new group with a generated ID.
    pub fn new(title: String, slug: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
        }
    }
}
