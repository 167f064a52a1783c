//! Ranking, de-duplication and glyph suppression for scored candidates

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::record::EmojiRecord;

/// Glyphs dropped from scored results when the query is a known emoticon.
///
/// These are the text-presentation smiley/frowning faces; emoticon queries
/// should surface the full-color faces instead.
pub const SUPPRESSED_GLYPHS: &[&str] = &["\u{263A}\u{FE0F}", "\u{263A}", "\u{2639}\u{FE0F}", "\u{2639}"];

/// Priority of a scored match. Higher sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Exact emoticon match only.
    Low = 1,
    /// Country code, tag, name or keyword match.
    High = 2,
}

/// A catalog position paired with the tier it qualified for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub tier: MatchTier,
}

/// Turn scored candidates (in discovery order) into the final result list.
///
/// A glyph keeps the slot of its first discovery; a later candidate for the
/// same glyph only replaces it with a strictly higher tier. Sorting is
/// stable, suppression runs before truncation.
pub fn assemble<'c, I>(
    catalog: &'c Catalog,
    candidates: I,
    suppress: bool,
    max_results: usize,
) -> Vec<&'c EmojiRecord>
where
    I: IntoIterator<Item = Candidate>,
{
    if max_results == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<Candidate> = Vec::new();
    let mut slots: HashMap<&'c str, usize> = HashMap::new();

    for candidate in candidates {
        let Some(record) = catalog.get(candidate.index) else {
            continue;
        };
        match slots.entry(record.glyph.as_str()) {
            Entry::Occupied(slot) => {
                let existing = &mut ranked[*slot.get()];
                if candidate.tier > existing.tier {
                    *existing = candidate;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(ranked.len());
                ranked.push(candidate);
            }
        }
    }

    ranked.sort_by(|a, b| b.tier.cmp(&a.tier));

    ranked
        .into_iter()
        .filter_map(|candidate| catalog.get(candidate.index))
        .filter(|record| !(suppress && is_suppressed(&record.glyph)))
        .take(max_results)
        .collect()
}

pub fn is_suppressed(glyph: &str) -> bool {
    SUPPRESSED_GLYPHS.contains(&glyph)
}
