//! Emoji record model shared by the catalog, matcher and output writers

use serde::{Deserialize, Serialize};

/// One enriched catalog entry.
///
/// Field names on the wire follow the offline metadata generator
/// (`code`, `emoji`, `country_code`); the descriptive names are accepted
/// as aliases when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    #[serde(rename = "code", alias = "codepoints")]
    pub codepoints: Vec<String>,
    #[serde(rename = "emoji", alias = "glyph")]
    pub glyph: String,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub emoticons: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "countryCode")]
    pub country_code: Option<String>,
}

impl EmojiRecord {
    /// Minimal record with a glyph and name; codepoints are derived from the glyph.
    pub fn new(glyph: impl Into<String>, name: impl Into<String>) -> Self {
        let glyph = glyph.into();
        let codepoints = glyph
            .chars()
            .map(|ch| format!("U+{:04X}", ch as u32))
            .collect();
        Self {
            codepoints,
            glyph,
            name: name.into(),
            keywords: Vec::new(),
            emoticons: Vec::new(),
            description: String::new(),
            tags: Vec::new(),
            country_code: None,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_emoticons<I, S>(mut self, emoticons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emoticons = emoticons.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Whether the record satisfies the catalog invariants.
    pub fn is_well_formed(&self) -> bool {
        !self.glyph.is_empty() && !self.codepoints.is_empty()
    }
}
