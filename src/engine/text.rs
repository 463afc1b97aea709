use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::normalize::month_from_name;

static ISO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b((?:19|20)\d{2})-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])\b").unwrap()
});

static URL_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/((?:19|20)\d{2})/(\d{1,2})/(\d{1,2})/").unwrap());

static MDY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+((?:19|20)\d{2})\b",
    )
    .unwrap()
});

static DMY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d{1,2})(?:st|nd|rd|th)?\.?\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?,?\s+((?:19|20)\d{2})\b",
    )
    .unwrap()
});

static DOTTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})\.(\d{1,2})\.((?:19|20)\d{2})\b").unwrap());

/// Sweep the raw document for date-shaped strings. This is the extensive
/// fallback for pages without usable metadata; callers still apply the
/// plausibility window to whatever comes back.
pub fn scan(html: &str) -> Vec<NaiveDate> {
    let mut out = Vec::new();

    for caps in ISO_RE.captures_iter(html) {
        push_ymd(&mut out, &caps[1], &caps[2], &caps[3]);
    }
    for caps in URL_DATE_RE.captures_iter(html) {
        push_ymd(&mut out, &caps[1], &caps[2], &caps[3]);
    }
    for caps in MDY_RE.captures_iter(html) {
        if let Some(month) = month_from_name(&caps[1]) {
            push_date(&mut out, &caps[3], month, &caps[2]);
        }
    }
    for caps in DMY_RE.captures_iter(html) {
        if let Some(month) = month_from_name(&caps[2]) {
            push_date(&mut out, &caps[3], month, &caps[1]);
        }
    }
    for caps in DOTTED_RE.captures_iter(html) {
        // day.month.year
        if let (Ok(day), Ok(month), Ok(year)) = (
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<i32>(),
        ) {
            out.extend(NaiveDate::from_ymd_opt(year, month, day));
        }
    }

    out
}

fn push_ymd(out: &mut Vec<NaiveDate>, year: &str, month: &str, day: &str) {
    if let (Ok(y), Ok(m), Ok(d)) = (year.parse(), month.parse(), day.parse()) {
        out.extend(NaiveDate::from_ymd_opt(y, m, d));
    }
}

fn push_date(out: &mut Vec<NaiveDate>, year: &str, month: u32, day: &str) {
    if let (Ok(y), Ok(d)) = (year.parse(), day.parse()) {
        out.extend(NaiveDate::from_ymd_opt(y, month, d));
    }
}

// ── Tests ──
