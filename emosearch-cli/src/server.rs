//! HTTP front end for emosearch
//!
//! One shared, read-only [`Matcher`] answers every request; lookups are
//! in-memory scans, so handlers call it directly.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use emosearch_core::matcher::{Matcher, DEFAULT_MAX_RESULTS};
use emosearch_core::record::EmojiRecord;

/// Body of `POST /search`.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchRequest {
    /// Free text or emoticon
    pub query: String,
    /// Result cap; non-positive values yield an empty answer
    #[serde(default)]
    pub limit: Option<i64>,
    /// Return bare glyphs instead of full records
    #[serde(default)]
    pub glyphs_only: bool,
}

/// Exactly one of the fields is set, depending on `glyphs_only`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<EmojiRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<Vec<String>>,
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind: &str, matcher: Arc<Matcher>) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    tracing::info!(
        bind,
        records = matcher.catalog().len(),
        overrides = matcher.overrides().len(),
        "emosearch listening"
    );

    axum::serve(listener, router(matcher))
        .await
        .context("serving HTTP")?;
    Ok(())
}

pub fn router(matcher: Arc<Matcher>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", post(search_handler))
        .with_state(matcher)
}

async fn search_handler(
    State(matcher): State<Arc<Matcher>>,
    Json(req): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let limit = effective_limit(req.limit);
    let found = matcher.search(&req.query, limit);

    tracing::debug!(query = %req.query, limit, hits = found.len(), "search");

    if req.glyphs_only {
        Json(SearchResponse {
            results: None,
            glyphs: Some(found.iter().map(|r| r.glyph.clone()).collect()),
        })
    } else {
        Json(SearchResponse {
            results: Some(found.into_iter().cloned().collect()),
            glyphs: None,
        })
    }
}

/// Map a client-supplied limit onto the matcher's unsigned cap.
fn effective_limit(raw: Option<i64>) -> usize {
    match raw {
        None => DEFAULT_MAX_RESULTS,
        Some(n) => usize::try_from(n).unwrap_or(0),
    }
}
