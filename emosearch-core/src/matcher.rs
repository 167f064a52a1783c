//! Query matching: curated overrides first, tiered scoring second

use std::collections::HashSet;

use crate::assemble::{assemble, Candidate, MatchTier};
use crate::catalog::{fold_case, Catalog, FoldedFields};
use crate::overrides::OverrideTable;
use crate::record::EmojiRecord;

/// Result cap used when the caller does not pick one.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Country codes only match queries up to this many characters.
const COUNTRY_CODE_MAX_LEN: usize = 3;

/// Search entry point over an injected, immutable catalog.
///
/// All state is built in the constructor and read-only afterwards, so one
/// `Matcher` can serve concurrent queries from many threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Catalog,
    overrides: OverrideTable,
    known_emoticons: HashSet<String>,
}

impl Matcher {
    /// Build a matcher with the shipped emoticon override table.
    pub fn new(catalog: Catalog) -> Self {
        let overrides = OverrideTable::build(&catalog);
        Self::from_parts(catalog, overrides)
    }

    /// Build a matcher with a caller-authored override table.
    pub fn with_overrides<I, K, G, S>(catalog: Catalog, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, G)>,
        K: AsRef<str>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let overrides = OverrideTable::from_entries(&catalog, entries);
        Self::from_parts(catalog, overrides)
    }

    fn from_parts(catalog: Catalog, overrides: OverrideTable) -> Self {
        let known_emoticons = catalog
            .entries()
            .flat_map(|(_, _, folded)| folded.emoticons.iter().cloned())
            .collect();

        Self {
            catalog,
            overrides,
            known_emoticons,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Whether the query, once normalized, is an emoticon some record carries.
    pub fn is_known_emoticon(&self, query: &str) -> bool {
        self.known_emoticons.contains(&normalize(query))
    }

    /// [`Matcher::search`] with [`DEFAULT_MAX_RESULTS`].
    pub fn search_default(&self, query: &str) -> Vec<&EmojiRecord> {
        self.search(query, DEFAULT_MAX_RESULTS)
    }

    /// Resolve a query to at most `max_results` distinct records.
    ///
    /// Never fails: blank queries, a zero limit and an empty catalog all
    /// yield an empty list.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<&EmojiRecord> {
        let query = normalize(query);
        if query.is_empty() || max_results == 0 || self.catalog.is_empty() {
            return Vec::new();
        }

        if let Some(hits) = self.override_hits(&query, max_results) {
            return hits;
        }

        let candidates = self.score(&query);
        let suppress = self.known_emoticons.contains(&query);
        assemble(&self.catalog, candidates, suppress, max_results)
    }

    /// Curated records for the query, also trying it with a leading colon
    /// so `)` resolves like `:)`.
    fn override_hits(&self, query: &str, max_results: usize) -> Option<Vec<&EmojiRecord>> {
        let positions = self
            .overrides
            .get(query)
            .or_else(|| self.overrides.get(&format!(":{query}")))?;

        Some(
            positions
                .iter()
                .filter_map(|&idx| self.catalog.get(idx))
                .take(max_results)
                .collect(),
        )
    }

    fn score(&self, query: &str) -> Vec<Candidate> {
        self.catalog
            .entries()
            .filter_map(|(index, _, folded)| {
                match_tier(folded, query).map(|tier| Candidate { index, tier })
            })
            .collect()
    }
}

/// Trim and case-fold a raw query.
pub fn normalize(query: &str) -> String {
    fold_case(query.trim())
}

fn match_tier(fields: &FoldedFields, query: &str) -> Option<MatchTier> {
    let country = query.chars().count() <= COUNTRY_CODE_MAX_LEN
        && fields.country_code.as_deref() == Some(query);
    let high = country
        || fields.tags.iter().any(|tag| tag == query)
        || fields.name.contains(query)
        || fields.keywords.iter().any(|kw| kw.contains(query));

    if high {
        Some(MatchTier::High)
    } else if fields.emoticons.iter().any(|emoticon| emoticon == query) {
        Some(MatchTier::Low)
    } else {
        None
    }
}
