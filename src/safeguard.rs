use crate::config::Options;
use crate::engine::DateExtractor;
use crate::fetcher::RawDocument;

pub const MIN_FILE_SIZE: usize = 10;
pub const MAX_FILE_SIZE: usize = 20_000_000;

/// Gate a document before extraction is attempted. Checks are mutually
/// exclusive and ordered: absence first, then the size bounds, so an
/// absent document never triggers a size diagnostic. Rejections go to
/// stderr only; the result stream stays untouched.
pub fn examine(
    doc: Option<&RawDocument>,
    opts: &Options,
    engine: &dyn DateExtractor,
) -> Option<String> {
    let Some(doc) = doc.filter(|d| !d.html.is_empty()) else {
        eprintln!("# ERROR: empty document");
        return None;
    };
    if doc.html.len() > MAX_FILE_SIZE {
        eprintln!("# ERROR: file too large");
        return None;
    }
    if doc.html.len() < MIN_FILE_SIZE {
        eprintln!("# ERROR: file too small");
        return None;
    }
    engine.find_date(&doc.html, opts)
}

// ── Tests ──
