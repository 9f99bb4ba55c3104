use serde::Deserialize;
use serde_json::Value;

use crate::domain::display::{DisplayItem, DisplayMode};
use crate::domain::feed::{AnswerTarget, ArticleTarget, FeedTarget};

/// Display filter rules, loaded from configuration. Filtering is a pure
/// function of an item's content and author.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    pub blocked_authors: Vec<String>,
    pub blocked_keywords: Vec<String>,
}

/// Assign a raw feed record's target its concrete variant.
///
/// Dispatch is on the record's `type` tag. A known tag whose payload fails
/// to parse degrades to `Unknown` rather than failing the page; the display
/// layer renders those with a "not implemented" marker.
pub fn classify(raw: &Value) -> FeedTarget {
    let type_name = raw.get("type").and_then(Value::as_str).unwrap_or("");
    match type_name {
        "answer" => match AnswerTarget::deserialize(raw) {
            Ok(target) => FeedTarget::Answer(target),
            Err(e) => degrade(type_name, e),
        },
        "article" => match ArticleTarget::deserialize(raw) {
            Ok(target) => FeedTarget::Article(target),
            Err(e) => degrade(type_name, e),
        },
        "feed_advert" | "advert" => FeedTarget::Advertisement,
        "" => FeedTarget::Unknown {
            type_name: "untyped".to_string(),
        },
        other => FeedTarget::Unknown {
            type_name: other.to_string(),
        },
    }
}

fn degrade(type_name: &str, e: serde_json::Error) -> FeedTarget {
    tracing::warn!(%type_name, error = %e, "Malformed target payload, treating as unknown");
    FeedTarget::Unknown {
        type_name: type_name.to_string(),
    }
}

/// Secondary descriptive line for a target. Total: unknown variants fall
/// back to their type name plus a "not implemented" marker.
pub fn details_text(target: &FeedTarget) -> String {
    match target {
        FeedTarget::Answer(a) => format!("Answer by {}", a.author.name),
        FeedTarget::Article(a) => format!("Article by {}", a.author.name),
        FeedTarget::Advertisement => "Advertisement".to_string(),
        FeedTarget::Unknown { type_name } => format!("{type_name} (not implemented)"),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: FilterRules,
}

impl Classifier {
    pub fn new(rules: FilterRules) -> Self {
        Self { rules }
    }

    /// Why an item should be withheld from normal display, or `None` to
    /// display it. Pure; no side effects.
    pub fn filter_reason(&self, target: &FeedTarget) -> Option<String> {
        let author = target.author()?;
        if self
            .rules
            .blocked_authors
            .iter()
            .any(|blocked| blocked == &author.name)
        {
            return Some(format!("Blocked author: {}", author.name));
        }

        let text = match target {
            FeedTarget::Answer(a) => format!("{} {}", a.question.title, a.excerpt),
            FeedTarget::Article(a) => format!("{} {}", a.title, a.excerpt),
            FeedTarget::Advertisement | FeedTarget::Unknown { .. } => return None,
        };
        self.rules
            .blocked_keywords
            .iter()
            .find(|kw| !kw.is_empty() && text.contains(kw.as_str()))
            .map(|kw| format!("Blocked keyword: {kw}"))
    }

    /// Project one target into its display item for the given mode.
    pub fn project(&self, target: &FeedTarget, mode: DisplayMode) -> DisplayItem {
        if let Some(reason) = self.filter_reason(target) {
            return DisplayItem {
                title: "Blocked".to_string(),
                summary: reason,
                details: details_text(target),
                filtered: true,
                mode,
            };
        }

        let (title, summary) = match (mode, target) {
            // Question pages show the answer author as the headline.
            (DisplayMode::Question, FeedTarget::Answer(a)) => {
                (a.author.name.clone(), a.excerpt.clone())
            }
            (_, FeedTarget::Answer(a)) => (a.question.title.clone(), a.excerpt.clone()),
            (_, FeedTarget::Article(a)) => (a.title.clone(), a.excerpt.clone()),
            (_, other) => (
                other.type_label().to_string(),
                "Not implemented".to_string(),
            ),
        };

        DisplayItem {
            title,
            summary,
            details: details_text(target),
            filtered: false,
            mode,
        }
    }
}
