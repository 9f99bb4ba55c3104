use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerTarget {
    pub id: u64,
    pub question: Question,
    #[serde(default)]
    pub excerpt: String,
    pub author: Author,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleTarget {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub author: Author,
}

/// Closed union over the content object a feed entry points to. New
/// variants extend this enum plus the classifier's two consumer functions.
#[derive(Debug, Clone)]
pub enum FeedTarget {
    Answer(AnswerTarget),
    Article(ArticleTarget),
    Advertisement,
    Unknown { type_name: String },
}

impl FeedTarget {
    pub fn type_label(&self) -> &str {
        match self {
            FeedTarget::Answer(_) => "Answer",
            FeedTarget::Article(_) => "Article",
            FeedTarget::Advertisement => "Advertisement",
            FeedTarget::Unknown { type_name } => type_name,
        }
    }

    pub fn author(&self) -> Option<&Author> {
        match self {
            FeedTarget::Answer(a) => Some(&a.author),
            FeedTarget::Article(a) => Some(&a.author),
            FeedTarget::Advertisement | FeedTarget::Unknown { .. } => None,
        }
    }
}

/// One entry of the recommendation stream. Immutable once fetched; owned by
/// the feed synchronizer's ordered list.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub id: String,
    pub target: FeedTarget,
    pub cursor: Option<String>,
}

/// Raw wire record before classification. The target stays a raw JSON value
/// until the classifier assigns it a variant.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub target: Value,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Server paging descriptor. The exact shape is underdocumented; an
/// explicit `is_end: true` and a zero-length page are both end signals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub is_end: Option<bool>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Response envelope shared by the feed endpoints.
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope {
    pub data: Vec<FeedRecord>,
    #[serde(default)]
    pub paging: Paging,
}

impl FeedEnvelope {
    pub fn parse(body: &str) -> crate::app::Result<Self> {
        serde_json::from_str(body).map_err(|e| crate::app::FreshetError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses_with_unknown_paging_fields() {
        let body = r#"{
            "data": [{"id": "f1", "target": {"type": "answer"}}],
            "paging": {"is_end": false, "totals": 120, "next": "https://x/next"}
        }"#;
        let envelope: FeedEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].id.as_deref(), Some("f1"));
        assert_eq!(envelope.paging.is_end, Some(false));
    }

    #[test]
    fn test_envelope_parses_without_paging() {
        let body = r#"{"data": []}"#;
        let envelope: FeedEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_empty());
        assert_eq!(envelope.paging.is_end, None);
    }

    #[test]
    fn test_envelope_rejects_missing_data() {
        let body = r#"{"paging": {}}"#;
        assert!(serde_json::from_str::<FeedEnvelope>(body).is_err());
    }
}
