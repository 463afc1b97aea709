pub mod meta;
pub mod normalize;
pub mod text;

use chrono::NaiveDate;
use scraper::Html;
use tracing::debug;

use crate::config::Options;

/// Whether a candidate claims to be the original publication date or a
/// later revision date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    Published,
    Modified,
}

/// Date inference over a raw HTML document. Pure with respect to its
/// inputs; absence means no date could be determined.
pub trait DateExtractor {
    fn find_date(&self, html: &str, opts: &Options) -> Option<String>;
}

/// Default engine: metadata inspection first, free-text sweep as the
/// extensive-mode fallback, normalized output as YYYY-MM-DD.
pub struct Engine;

impl DateExtractor for Engine {
    fn find_date(&self, html: &str, opts: &Options) -> Option<String> {
        let doc = Html::parse_document(html);

        let mut candidates: Vec<(DateKind, NaiveDate)> = meta::scan(&doc)
            .into_iter()
            .filter_map(|(kind, raw)| normalize::parse_date(&raw).map(|d| (kind, d)))
            .filter(|(_, d)| normalize::in_range(*d, opts))
            .collect();
        debug!("{} metadata candidates in range", candidates.len());

        if candidates.is_empty() && opts.extensive_search {
            candidates = text::scan(html)
                .into_iter()
                .filter(|d| normalize::in_range(*d, opts))
                .map(|d| (DateKind::Published, d))
                .collect();
            debug!("{} free-text candidates in range", candidates.len());
        }

        let chosen = pick(&candidates, opts.original_date)?;
        debug!("selected {}", chosen);
        Some(chosen.format("%Y-%m-%d").to_string())
    }
}

/// Selection policy: original-date runs want the earliest Published
/// candidate, default runs want the latest Modified one; either falls back
/// to the extreme over all candidates.
fn pick(candidates: &[(DateKind, NaiveDate)], original_date: bool) -> Option<NaiveDate> {
    let of = |kind: DateKind| {
        candidates
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, d)| *d)
    };
    let any = || candidates.iter().map(|(_, d)| *d);

    if original_date {
        of(DateKind::Published).min().or_else(|| any().min())
    } else {
        of(DateKind::Modified).max().or_else(|| any().max())
    }
}

// ── Tests ──
