//! Form payloads - deserialization targets for browser form submissions.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// The post creation/edit form.
///
/// `text` is the required body; `group` is a single-choice select whose blank
/// option submits an empty string, which deserializes to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub text: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub group: Option<Uuid>,
}

/// The login form. `next` round-trips the originally requested path.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// The signup form.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

/// HTML selects submit `""` for the blank choice; treat that as absent
/// instead of failing UUID parsing.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<Uuid>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_group_choice_is_none() {
        let form: PostForm = serde_json::from_str(r#"{"text": "hi", "group": ""}"#).unwrap();
        assert!(form.group.is_none());
    }

    #[test]
    fn missing_group_choice_is_none() {
        let form: PostForm = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert!(form.group.is_none());
    }

    #[test]
    fn group_choice_parses_uuid() {
        let id = Uuid::new_v4();
        let form: PostForm =
            serde_json::from_str(&format!(r#"{{"text": "hi", "group": "{id}"}}"#)).unwrap();
        assert_eq!(form.group, Some(id));
    }

    #[test]
    fn malformed_group_choice_is_an_error() {
        let result = serde_json::from_str::<PostForm>(r#"{"text": "hi", "group": "not-a-uuid"}"#);
        assert!(result.is_err());
    }
}
