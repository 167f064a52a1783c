//! emosearch CLI

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use emosearch_core::catalog::Catalog;
use emosearch_core::matcher::{Matcher, DEFAULT_MAX_RESULTS};
use emosearch_core::output::{write_json_pretty, write_ndjson};
use emosearch_core::record::EmojiRecord;

pub mod server;

/// Catalog file used when neither `--catalog` nor `EMOSEARCH_CATALOG` is set.
pub const DEFAULT_CATALOG_FILE: &str = "emojis-expanded.json";

/// Widest name shown in `--columns` output; longer names are cut.
const NAME_COLUMN_MAX: usize = 60;

/// Env var holding a `tracing` filter directive for the binary.
pub const LOG_ENV: &str = "EMOSEARCH_LOG";

/// CLI entrypoint for emosearch.
#[derive(Debug, Parser)]
#[command(
    name = "emosearch",
    about = "Emoji and emoticon lookup over an enriched catalog"
)]
pub struct Cli {
    /// Enriched catalog (JSON array of emoji records)
    #[arg(
        long = "catalog",
        global = true,
        env = "EMOSEARCH_CATALOG",
        value_hint = ValueHint::FilePath
    )]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a single query
    Find(FindArgs),
    /// Answer newline-delimited queries from STDIN
    Batch(BatchArgs),
    /// Serve lookups over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct FindArgs {
    /// Free text or emoticon, e.g. `cat`, `gb`, `:)`
    query: String,

    /// Maximum number of results
    #[arg(short = 'n', long = "limit", default_value_t = DEFAULT_MAX_RESULTS)]
    limit: usize,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Maximum number of results per query
    #[arg(short = 'n', long = "limit", default_value_t = DEFAULT_MAX_RESULTS)]
    limit: usize,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Emit one JSON object per query
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long = "bind", default_value = "127.0.0.1:8765")]
    bind: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Install the stderr `tracing` subscriber, filtered by `EMOSEARCH_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let matcher = load_matcher(cli.catalog.as_deref());

    match cli.command {
        Command::Find(args) => run_find(&matcher, args),
        Command::Batch(args) => run_batch(&matcher, args),
        Command::Serve(args) => run_serve(matcher, args),
    }
}

fn resolve_catalog_path(flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE))
}

/// An unreadable catalog is not an error here: the matcher answers every
/// query with no results.
fn load_matcher(flag: Option<&Path>) -> Matcher {
    let path = resolve_catalog_path(flag);
    Matcher::new(Catalog::load(&path))
}

fn run_find(matcher: &Matcher, args: FindArgs) -> Result<()> {
    let results = matcher.search(&args.query, args.limit);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&results, &mut handle)?;
    } else if args.json {
        write_json_pretty(&results, &mut handle)?;
    } else if args.columns {
        write_columns(&results, &mut handle, use_color)?;
    } else {
        write_plain(&results, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_batch(matcher: &Matcher, args: BatchArgs) -> Result<()> {
    let stdin = io::stdin();
    let queries = read_queries_from(&mut stdin.lock())?;
    let answers = answer_all(matcher, &queries, args.limit, args.jobs)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.ndjson {
        write_ndjson(&answers, &mut handle)?;
    } else {
        write_batch_plain(&answers, &mut handle)?;
    }
    Ok(())
}

fn run_serve(matcher: Matcher, args: ServeArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(server::serve(&args.bind, Arc::new(matcher)))
}

/// One query's answer in batch mode.
#[derive(Debug, Serialize)]
struct BatchAnswer<'a> {
    query: &'a str,
    results: Vec<&'a EmojiRecord>,
}

/// Run every query against the shared matcher, preserving input order.
fn answer_all<'a>(
    matcher: &'a Matcher,
    queries: &'a [String],
    limit: usize,
    jobs: Option<usize>,
) -> Result<Vec<BatchAnswer<'a>>> {
    let run = || -> Vec<BatchAnswer<'a>> {
        queries
            .par_iter()
            .map(|query| BatchAnswer {
                query: query.as_str(),
                results: matcher.search(query, limit),
            })
            .collect()
    };

    if let Some(jobs) = jobs {
        let pool = ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("building worker pool")?;
        Ok(pool.install(run))
    } else {
        Ok(run())
    }
}

fn read_queries_from(reader: &mut impl BufRead) -> Result<Vec<String>> {
    let mut buf = String::new();
    let mut queries = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }

        let trimmed = buf.trim_end_matches(['\r', '\n']);
        if !trimmed.trim().is_empty() {
            queries.push(trimmed.to_string());
        }
    }

    Ok(queries)
}

fn write_batch_plain(answers: &[BatchAnswer<'_>], mut w: impl Write) -> Result<()> {
    for answer in answers {
        let glyphs: Vec<&str> = answer.results.iter().map(|r| r.glyph.as_str()).collect();
        writeln!(w, "{}\t{}", answer.query, glyphs.join(" "))?;
    }
    Ok(())
}

fn write_plain(results: &[&EmojiRecord], mut w: impl Write, color: bool) -> Result<()> {
    for record in results {
        let name = apply_color(&record.name, color, AnsiColor::Cyan);
        writeln!(w, "{}  {name}", record.glyph)?;
    }
    Ok(())
}

fn write_columns(results: &[&EmojiRecord], mut w: impl Write, color: bool) -> Result<()> {
    let name_width = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(NAME_COLUMN_MAX);
    let code_width = results
        .iter()
        .map(|r| r.country_code.as_deref().map_or(0, |c| c.chars().count()))
        .max()
        .unwrap_or(0);

    for record in results {
        let padded_name = format!("{:<name_width$}", fit_to_width(&record.name, name_width));
        let code = record.country_code.as_deref().unwrap_or("");
        let padded_code = format!("{:<code_width$}", code);
        let tags = record.tags.join(",");

        let rendered_name = apply_color(&padded_name, color, AnsiColor::Cyan);
        let rendered_code = apply_color(&padded_code, color, AnsiColor::Yellow);
        let rendered_tags = apply_color(&tags, color, AnsiColor::Green);

        if code_width > 0 {
            writeln!(
                w,
                "{}  {rendered_name}  {rendered_code}  {rendered_tags}",
                record.glyph
            )?;
        } else {
            writeln!(w, "{}  {rendered_name}  {rendered_tags}", record.glyph)?;
        }
    }

    Ok(())
}

/// Cut `text` to at most `width` chars, marking the cut with an ellipsis.
fn fit_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
