//! Catalog loading and validation

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::record::EmojiRecord;

/// Immutable, validated collection of emoji records.
///
/// Built once before the first query. Lowercased copies of the matchable
/// fields are kept alongside each record so the query path never folds
/// catalog text.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<EmojiRecord>,
    folded: Vec<FoldedFields>,
}

#[derive(Debug, Clone)]
pub(crate) struct FoldedFields {
    pub(crate) name: String,
    pub(crate) keywords: Vec<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) emoticons: Vec<String>,
    pub(crate) country_code: Option<String>,
}

impl FoldedFields {
    fn from_record(record: &EmojiRecord) -> Self {
        Self {
            name: fold_case(&record.name),
            keywords: record.keywords.iter().map(|s| fold_case(s)).collect(),
            tags: record.tags.iter().map(|s| fold_case(s)).collect(),
            emoticons: record.emoticons.iter().map(|s| fold_case(s)).collect(),
            country_code: record
                .country_code
                .as_deref()
                .filter(|code| is_country_code(code))
                .map(fold_case),
        }
    }
}

impl Catalog {
    /// Catalog with no records; every query against it returns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate an in-memory record sequence.
    ///
    /// Records with an empty glyph or codepoint list are dropped. Country
    /// codes that are not 2-3 ASCII letters stay on the record but never
    /// match a query. Both are reported in a single warning.
    pub fn new(records: Vec<EmojiRecord>) -> Self {
        let total = records.len();

        let records: Vec<EmojiRecord> = records
            .into_iter()
            .filter(EmojiRecord::is_well_formed)
            .collect();

        let unmatchable_codes = records
            .iter()
            .filter(|record| {
                record
                    .country_code
                    .as_deref()
                    .is_some_and(|code| !is_country_code(code))
            })
            .count();

        let dropped = total - records.len();
        if dropped > 0 || unmatchable_codes > 0 {
            tracing::warn!(
                dropped,
                unmatchable_codes,
                kept = records.len(),
                "emoji catalog contained malformed records"
            );
        }

        let folded = records.iter().map(FoldedFields::from_record).collect();
        Self { records, folded }
    }

    /// Parse a catalog from JSON text. The top-level value must be an array.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("parsing emoji catalog JSON")?;
        Self::from_value(value)
    }

    /// Parse a catalog from any reader producing JSON.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let value: Value =
            serde_json::from_reader(reader).context("parsing emoji catalog JSON")?;
        Self::from_value(value)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening emoji catalog {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("loading emoji catalog {}", path.display()))
    }

    /// Load a catalog file, degrading to the empty catalog on any failure.
    ///
    /// The failure is logged once here and never surfaces again; queries
    /// against the result simply return nothing.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(catalog) => {
                tracing::debug!(path = %path.display(), records = catalog.len(), "emoji catalog loaded");
                catalog
            }
            Err(err) => {
                tracing::error!(
                    path = %path.display(),
                    error = ?err,
                    "emoji catalog unavailable; serving empty results"
                );
                Self::empty()
            }
        }
    }

    /// Soft-failing counterpart of [`Catalog::from_json_str`] for embedded data.
    pub fn load_str(raw: &str) -> Self {
        match Self::from_json_str(raw) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(
                    error = ?err,
                    "embedded emoji catalog unusable; serving empty results"
                );
                Self::empty()
            }
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        if !value.is_array() {
            bail!("emoji catalog must be a JSON array");
        }
        let records: Vec<EmojiRecord> =
            serde_json::from_value(value).context("emoji catalog entries are malformed")?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EmojiRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&EmojiRecord> {
        self.records.get(index)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, &EmojiRecord, &FoldedFields)> {
        self.records
            .iter()
            .zip(self.folded.iter())
            .enumerate()
            .map(|(idx, (record, folded))| (idx, record, folded))
    }
}

/// Locale-insensitive case fold used for both catalog fields and queries.
pub(crate) fn fold_case(raw: &str) -> String {
    raw.to_lowercase()
}

fn is_country_code(code: &str) -> bool {
    (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_records_breaking_invariants() {
        let mut no_codepoints = EmojiRecord::new("😀", "grinning face");
        no_codepoints.codepoints.clear();

        let catalog = Catalog::new(vec![
            EmojiRecord::new("😺", "grinning cat"),
            EmojiRecord::new("", "blank"),
            no_codepoints,
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].glyph, "😺");
    }

    #[test]
    fn invalid_country_codes_are_kept_but_not_matchable() {
        let catalog = Catalog::new(vec![
            EmojiRecord::new("🇬🇧", "flag: United Kingdom").with_country_code("GB"),
            EmojiRecord::new("🏴", "black flag").with_country_code("X1"),
        ]);

        assert_eq!(catalog.records()[0].country_code.as_deref(), Some("GB"));
        assert_eq!(catalog.records()[1].country_code.as_deref(), Some("X1"));

        let folded: Vec<Option<&str>> = catalog
            .entries()
            .map(|(_, _, f)| f.country_code.as_deref())
            .collect();
        assert_eq!(folded, vec![Some("gb"), None]);
    }

    #[test]
    fn folds_matchable_fields_once() {
        let catalog = Catalog::new(vec![EmojiRecord::new("🇬🇧", "Flag: United Kingdom")
            .with_keywords(["UK"])
            .with_tags(["Flag"])
            .with_emoticons([":P"])
            .with_country_code("GB")]);

        let (_, _, folded) = catalog.entries().next().expect("one entry");
        assert_eq!(folded.name, "flag: united kingdom");
        assert_eq!(folded.keywords, vec!["uk"]);
        assert_eq!(folded.tags, vec!["flag"]);
        assert_eq!(folded.emoticons, vec![":p"]);
        assert_eq!(folded.country_code.as_deref(), Some("gb"));
    }

    #[test]
    fn rejects_non_array_json() {
        let err = Catalog::from_json_str(r#"{"emoji": "😀"}"#).expect_err("object is not a catalog");
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn load_str_degrades_to_empty() {
        assert!(Catalog::load_str("not json").is_empty());
        assert!(Catalog::load_str("42").is_empty());
        assert!(Catalog::load_str(r#"[{"emoji": "😀"}]"#).is_empty());
    }

    #[test]
    fn country_code_shape() {
        assert!(is_country_code("GB"));
        assert!(is_country_code("gbr"));
        assert!(!is_country_code("G"));
        assert!(!is_country_code("GBRX"));
        assert!(!is_country_code("G1"));
    }
}
