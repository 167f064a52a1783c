//! emosearch-core: emoji and emoticon lookup over a small, resident catalog
//!
//! A query goes through two independent stages:
//!
//! **Overrides**: common emoticons (`:)`, `<3`, `:p`, ...) resolve to a
//! curated, ordered list of glyphs. A hit here is returned as-is.
//!
//! **Scored fallback**: every record is checked against the query.
//! Country code, tag, name and keyword matches rank above bare emoticon
//! matches; duplicates are folded, redundant text-style faces are dropped
//! for emoticon queries, and the list is capped.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use emosearch_core::catalog::Catalog;
//! use emosearch_core::matcher::Matcher;
//!
//! // Missing or broken files degrade to an empty catalog.
//! let matcher = Matcher::new(Catalog::load(Path::new("emojis-expanded.json")));
//!
//! for record in matcher.search("cat", 10) {
//!     println!("{}  {}", record.glyph, record.name);
//! }
//! ```
//!
//! The catalog is injected rather than global, and nothing is mutated
//! after construction; share a [`matcher::Matcher`] behind an `Arc` to
//! serve queries from several threads.

pub mod assemble;
pub mod catalog;
pub mod matcher;
pub mod output;
pub mod overrides;
pub mod record;
