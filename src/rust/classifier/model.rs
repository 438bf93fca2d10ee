use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A label returned by the tagging service together with its confidence.
///
/// Tags are deserialized leniently: a missing, `null` or non-string name
/// becomes the empty string (which never matches a keyword) and a missing or
/// non-numeric confidence becomes `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTag")]
pub struct Tag {
    pub name: String,
    pub confidence: f32,
}

#[derive(Deserialize)]
struct RawTag {
    #[serde(default)]
    name: serde_json::Value,
    #[serde(default)]
    confidence: serde_json::Value,
}

impl From<RawTag> for Tag {
    fn from(raw: RawTag) -> Self {
        Self {
            name: raw.name.as_str().unwrap_or_default().to_string(),
            confidence: raw.confidence.as_f64().unwrap_or(0.0) as f32,
        }
    }
}

impl Tag {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TagParseError {
    #[error("Tag name cannot be empty")]
    EmptyName,
    #[error("Invalid confidence '{0}': expected a number between 0.0 and 1.0")]
    InvalidConfidence(String),
}

/// Parses `name` or `name:confidence`. A bare name gets a confidence of `1.0`.
impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, confidence) = match s.rsplit_once(':') {
            Some((name, raw)) => {
                let confidence: f32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| TagParseError::InvalidConfidence(raw.to_string()))?;
                if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
                    return Err(TagParseError::InvalidConfidence(raw.to_string()));
                }
                (name, confidence)
            }
            None => (s, 1.0),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(TagParseError::EmptyName);
        }
        Ok(Tag::new(name, confidence))
    }
}

/// The disposal category an item is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Recyclable,
    Compost,
    GeneralWaste,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recyclable => "Recyclable",
            Self::Compost => "Compost",
            Self::GeneralWaste => "General Waste",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Recyclable => "♻️",
            Self::Compost => "🌱",
            Self::GeneralWaste => "🗑️",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of a classification: a category, a disposal tip and an
/// optional display color used by presenters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub disposal_tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_color: Option<String>,
}

/// A classification together with the keywords of the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub result: CategoryResult,
    pub matched_keywords: Vec<String>,
}
