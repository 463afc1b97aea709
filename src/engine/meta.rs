use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use super::DateKind;

static META_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());
static TIME_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("time[datetime]").unwrap());
static LD_JSON_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

// Attribute values compared lowercase.
const PUBLISHED_PROPS: &[&str] = &[
    "article:published_time",
    "og:article:published_time",
    "datepublished",
    "dateposted",
    "rnews:datepublished",
];

const MODIFIED_PROPS: &[&str] = &[
    "article:modified_time",
    "og:updated_time",
    "datemodified",
];

const PUBLISHED_NAMES: &[&str] = &[
    "date",
    "dc.date",
    "dc.date.created",
    "dc.date.issued",
    "dcterms.date",
    "article.created",
    "article_date_original",
    "created",
    "date_published",
    "originalpublicationdate",
    "parsely-pub-date",
    "publication_date",
    "publishdate",
    "publish_date",
    "pubdate",
    "sailthru.date",
    "timestamp",
];

const MODIFIED_NAMES: &[&str] = &[
    "lastmod",
    "last-modified",
    "dc.date.modified",
    "revised",
    "updated_time",
];

/// Collect raw date candidates from document metadata: <meta> tags,
/// <time datetime> elements, and JSON-LD blocks.
pub fn scan(doc: &Html) -> Vec<(DateKind, String)> {
    let mut out = Vec::new();

    for el in doc.select(&META_SEL) {
        let Some(content) = el.value().attr("content") else {
            continue;
        };
        let kind = el
            .value()
            .attr("property")
            .and_then(|p| classify(p, PUBLISHED_PROPS, MODIFIED_PROPS))
            .or_else(|| {
                el.value()
                    .attr("name")
                    .and_then(|n| classify(n, PUBLISHED_NAMES, MODIFIED_NAMES))
            })
            .or_else(|| {
                el.value()
                    .attr("itemprop")
                    .and_then(|i| classify(i, &["datepublished", "datecreated"], &["datemodified"]))
            });
        if let Some(kind) = kind {
            out.push((kind, content.to_string()));
        }
    }

    for el in doc.select(&TIME_SEL) {
        if let Some(datetime) = el.value().attr("datetime") {
            out.push((DateKind::Published, datetime.to_string()));
        }
    }

    for el in doc.select(&LD_JSON_SEL) {
        let raw: String = el.text().collect();
        if let Ok(value) = serde_json::from_str::<Value>(&raw) {
            walk_json_ld(&value, &mut out);
        }
    }

    out
}

fn classify(attr: &str, published: &[&str], modified: &[&str]) -> Option<DateKind> {
    let key = attr.trim().to_ascii_lowercase();
    if published.contains(&key.as_str()) {
        Some(DateKind::Published)
    } else if modified.contains(&key.as_str()) {
        Some(DateKind::Modified)
    } else {
        None
    }
}

/// Recurse through a JSON-LD value, including @graph wrappers and arrays,
/// picking up datePublished/dateCreated/dateModified strings.
fn walk_json_ld(value: &Value, out: &mut Vec<(DateKind, String)>) {
    match value {
        Value::Object(map) => {
            for (key, kind) in [
                ("datePublished", DateKind::Published),
                ("dateCreated", DateKind::Published),
                ("dateModified", DateKind::Modified),
            ] {
                if let Some(s) = map.get(key).and_then(Value::as_str) {
                    out.push((kind, s.to_string()));
                }
            }
            for v in map.values() {
                walk_json_ld(v, out);
            }
        }
        Value::Array(items) => {
            for v in items {
                walk_json_ld(v, out);
            }
        }
        _ => {}
    }
}

// ── Tests ──
