use serde::{Deserialize, Serialize};

/// Who can see a posted status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

/// Draft of a status to post via `POST /api/v1/statuses`.
///
/// `content_type` is a Pleroma extension; vanilla Mastodon ignores it.
#[derive(Debug, Clone, Serialize)]
pub struct NewStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoiler_text: Option<String>,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Minimal view of a posted status, as returned by the instance.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_serializes_lowercase() {
        let json = serde_json::to_value(Visibility::Direct).unwrap();
        assert_eq!(json, serde_json::json!("direct"));
    }

    #[test]
    fn new_status_skips_absent_fields() {
        let draft = NewStatus {
            status: "hello".to_string(),
            spoiler_text: None,
            visibility: Visibility::Direct,
            language: Some("en".to_string()),
            content_type: None,
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["status"], "hello");
        assert_eq!(json["visibility"], "direct");
        assert_eq!(json["language"], "en");
        assert!(json.get("spoiler_text").is_none());
        assert!(json.get("content_type").is_none());
    }
}
