//! Curated emoticon overrides
//!
//! Common emoticons map to a hand-picked, ordered list of glyphs. A hit in
//! this table wins over scored matching unconditionally.

use std::collections::HashMap;

use crate::catalog::{fold_case, Catalog};

/// One authored override: emoticon key and preferred glyphs, best first.
pub type OverrideSpec = (&'static str, &'static [&'static str]);

const SMILE: &[&str] = &["😊", "😄", "🙂", "🥰", "🤗", "😁"];
const GRIN: &[&str] = &["😀", "😃", "😂", "🤣", "😆", "😁", "😄"];
const TONGUE: &[&str] = &["😋", "😛", "😜", "🤪"];
const SAD: &[&str] = &["😞", "😟", "😢", "😥", "🙁", "🥺", "😔"];
const SURPRISE: &[&str] = &["😮", "😯", "😲", "😳", "😱"];
const NEUTRAL: &[&str] = &["😐", "😑", "😶"];
const WINK: &[&str] = &["😉", "😊", "🥰", "😘", "🤗"];
const SKEPTICAL: &[&str] = &["😕", "🤔", "🤨", "🧐", "🫤", "🤷", "🙄"];
const HEARTS: &[&str] = &[
    "❤️", "🧡", "💛", "💚", "💙", "💜", "🤎", "🖤", "🤍", "💖", "💕",
];
const KISS: &[&str] = &["😗", "😙", "😚", "😘"];
const BLUSH: &[&str] = &["😳", "🫣", "😊", "😅"];
const COOL: &[&str] = &["😎"];
const BROKEN_HEART: &[&str] = &["💔"];
const HAPPY: &[&str] = &["😊"];
const ANGRY: &[&str] = &["😠", "😡", "😤"];
const FURIOUS: &[&str] = &["😡", "😤"];
const CRYING: &[&str] = &["😢", "😭", "😥"];

/// The shipped override table. Keys are matched after trimming and lowercasing.
pub static COMMON_EMOTICONS: &[OverrideSpec] = &[
    (":)", SMILE),
    (":-)", SMILE),
    ("=)", SMILE),
    (")", SMILE),
    (":d", GRIN),
    (":-d", GRIN),
    ("=d", GRIN),
    ("d", GRIN),
    (":p", TONGUE),
    (":-p", TONGUE),
    ("=p", TONGUE),
    ("p", TONGUE),
    (":(", SAD),
    (":-(", SAD),
    ("=(", SAD),
    ("(", SAD),
    (":o", SURPRISE),
    (":-o", SURPRISE),
    ("o", SURPRISE),
    (":|", NEUTRAL),
    (":-|", NEUTRAL),
    ("=|", NEUTRAL),
    ("|", NEUTRAL),
    (";)", WINK),
    (";-)", WINK),
    (";", WINK),
    (":/", SKEPTICAL),
    (":-/", SKEPTICAL),
    ("/", SKEPTICAL),
    (":\\", SKEPTICAL),
    (":-\\", SKEPTICAL),
    ("\\", SKEPTICAL),
    ("<3", HEARTS),
    ("</3", BROKEN_HEART),
    (":*", KISS),
    (":-*", KISS),
    (":$", BLUSH),
    (":-$", BLUSH),
    ("B)", COOL),
    ("B-)", COOL),
    ("8)", COOL),
    ("8-)", COOL),
    ("^_^", HAPPY),
    ("^^", HAPPY),
    (">:(", ANGRY),
    (">:-(", FURIOUS),
    (":'(", CRYING),
];

/// Resolved override table: folded emoticon key to catalog positions.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, Vec<usize>>,
}

impl OverrideTable {
    /// Resolve [`COMMON_EMOTICONS`] against the catalog.
    pub fn build(catalog: &Catalog) -> Self {
        Self::from_entries(catalog, COMMON_EMOTICONS.iter().copied())
    }

    /// Resolve an arbitrary authored table against the catalog.
    ///
    /// Glyphs missing from the catalog are skipped; an entry that resolves
    /// to nothing is not registered. Duplicate catalog glyphs resolve to the
    /// last occurrence, and a later entry replaces an earlier one with the
    /// same folded key.
    pub fn from_entries<I, K, G, S>(catalog: &Catalog, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, G)>,
        K: AsRef<str>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let by_glyph: HashMap<&str, usize> = catalog
            .records()
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.glyph.as_str(), idx))
            .collect();

        let mut table = HashMap::new();
        let mut unresolved = 0usize;

        for (key, glyphs) in entries {
            let mut positions = Vec::new();
            for glyph in glyphs {
                match by_glyph.get(glyph.as_ref()) {
                    Some(&idx) => positions.push(idx),
                    None => unresolved += 1,
                }
            }

            let key = fold_case(key.as_ref().trim());
            if positions.is_empty() || key.is_empty() {
                continue;
            }
            table.insert(key, positions);
        }

        tracing::debug!(
            entries = table.len(),
            unresolved_glyphs = unresolved,
            "emoticon override table built"
        );

        Self { entries: table }
    }

    /// Ordered catalog positions for an already-folded key.
    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EmojiRecord;

    fn catalog(glyphs: &[&str]) -> Catalog {
        Catalog::new(
            glyphs
                .iter()
                .map(|g| EmojiRecord::new(*g, format!("emoji {g}")))
                .collect(),
        )
    }

    #[test]
    fn keeps_authored_order_and_skips_missing_glyphs() {
        let catalog = catalog(&["😄", "🙂", "😊"]);
        let table = OverrideTable::from_entries(&catalog, [(":)", ["😊", "🫠", "😄"])]);

        let positions = table.get(":)").expect("entry registered");
        let glyphs: Vec<&str> = positions.iter().map(|&i| catalog.records()[i].glyph.as_str()).collect();
        assert_eq!(glyphs, vec!["😊", "😄"]);
    }

    #[test]
    fn omits_entries_that_resolve_to_nothing() {
        let catalog = catalog(&["😄"]);
        let table = OverrideTable::from_entries(&catalog, [("</3", ["💔"])]);

        assert!(table.is_empty());
        assert!(table.get("</3").is_none());
    }

    #[test]
    fn keys_are_folded() {
        let catalog = catalog(&["😎"]);
        let table = OverrideTable::from_entries(&catalog, [("B-)", ["😎"]), (" XD ", ["😎"])]);

        assert!(table.contains_key("b-)"));
        assert!(table.contains_key("xd"));
        assert!(!table.contains_key("B-)"));
    }

    #[test]
    fn duplicate_glyphs_resolve_to_last_occurrence() {
        let catalog = catalog(&["😊", "😄", "😊"]);
        let table = OverrideTable::from_entries(&catalog, [(":)", ["😊"])]);

        assert_eq!(table.get(":)"), Some(&[2][..]));
    }

    #[test]
    fn shipped_table_keys_are_unique_after_folding() {
        let mut seen = std::collections::HashSet::new();
        for (key, glyphs) in COMMON_EMOTICONS {
            assert!(!glyphs.is_empty(), "{key} has no glyphs");
            assert!(seen.insert(fold_case(key.trim())), "duplicate key {key}");
        }
    }

    #[test]
    fn empty_catalog_builds_empty_table() {
        let table = OverrideTable::build(&Catalog::empty());
        assert!(table.is_empty());
    }
}
