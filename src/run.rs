use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::{InputSource, Options};
use crate::engine::DateExtractor;
use crate::fetcher::{DocumentFetcher, RawDocument};
use crate::safeguard;

/// Run one complete invocation against the resolved input source.
///
/// Failure policy differs by mode: single-item acquisition errors are
/// fatal, batch items fail individually and the run carries on.
pub async fn execute<F, E, W>(
    source: &InputSource,
    opts: &Options,
    fetcher: &F,
    engine: &E,
    out: &mut W,
) -> Result<()>
where
    F: DocumentFetcher,
    E: DateExtractor,
    W: Write,
{
    match source {
        InputSource::BatchFile(path) => process_batch(path, opts, fetcher, engine, out).await,
        InputSource::Url(_) | InputSource::Stdin => {
            let doc = acquire(source, fetcher).await?;
            if let Some(date) = safeguard::examine(Some(&doc), opts, engine) {
                writeln!(out, "{date}")?;
            }
            Ok(())
        }
    }
}

/// Resolve the single-item document. A fetcher miss for a configured URL
/// is fatal here; there is no fallback to standard input.
async fn acquire<F: DocumentFetcher>(source: &InputSource, fetcher: &F) -> Result<RawDocument> {
    match source {
        InputSource::Url(url) => match fetcher.fetch(url).await {
            Some(html) => Ok(RawDocument::new(html, url.clone())),
            None => bail!("no valid result for url: {url}"),
        },
        InputSource::Stdin => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("standard input is not valid UTF-8")?;
            Ok(RawDocument::new(html, "stdin"))
        }
        InputSource::BatchFile(_) => unreachable!("batch input is handled by process_batch"),
    }
}

/// Sequential, order-preserving batch loop: one output record per
/// non-empty input line, the literal "None" standing in for any item
/// without a determinable date.
async fn process_batch<F, E, W>(
    path: &Path,
    opts: &Options,
    fetcher: &F,
    engine: &E,
    out: &mut W,
) -> Result<()>
where
    F: DocumentFetcher,
    E: DateExtractor,
    W: Write,
{
    let file =
        File::open(path).with_context(|| format!("could not open input file {}", path.display()))?;

    let mut processed = 0usize;
    let mut dated = 0usize;

    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("could not read {}", path.display()))?;
        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        let doc = fetcher
            .fetch(url)
            .await
            .map(|html| RawDocument::new(html, url));
        let outcome = safeguard::examine(doc.as_ref(), opts, engine);

        processed += 1;
        if outcome.is_some() {
            dated += 1;
        }
        writeln!(out, "{}\t{}", url, outcome.as_deref().unwrap_or("None"))?;
    }

    info!("batch done: {} urls, {} dated", processed, dated);
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write as _;
    use std::path::PathBuf;

    use async_trait::async_trait;

    use super::*;
    use crate::engine::Engine;

    /// Scripted fetcher: known URLs answer with a canned body, everything
    /// else is absent.
    struct Scripted(HashMap<String, String>);

    #[async_trait]
    impl DocumentFetcher for Scripted {
        async fn fetch(&self, url: &str) -> Option<String> {
            self.0.get(url).cloned()
        }
    }

    fn opts() -> Options {
        Options {
            extensive_search: true,
            original_date: false,
            verbose: false,
            min_date: None,
            max_date: None,
        }
    }

    fn dated_page(date: &str) -> String {
        format!(
            r#"<html><head><meta property="article:published_time" content="{date}"/></head><body>article body</body></html>"#
        )
    }

    fn batch_file(lines: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        let mut f = File::create(&path).unwrap();
        f.write_all(lines.as_bytes()).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn batch_mixes_hits_and_misses_in_order() {
        let fetcher = Scripted(HashMap::from([(
            "http://a.example".to_string(),
            dated_page("2021-05-01"),
        )]));
        let (_dir, path) = batch_file("http://a.example\nhttp://b.example\n");
        let mut out = Vec::new();

        execute(
            &InputSource::BatchFile(path),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "http://a.example\t2021-05-01\nhttp://b.example\tNone\n"
        );
    }

    #[tokio::test]
    async fn batch_failure_does_not_stop_later_lines() {
        let fetcher = Scripted(HashMap::from([(
            "http://c.example".to_string(),
            dated_page("2020-02-02"),
        )]));
        let (_dir, path) = batch_file("http://missing.example\nhttp://c.example\n");
        let mut out = Vec::new();

        execute(
            &InputSource::BatchFile(path),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "http://missing.example\tNone\nhttp://c.example\t2020-02-02\n"
        );
    }

    #[tokio::test]
    async fn batch_skips_blank_lines_and_trims() {
        let fetcher = Scripted(HashMap::from([(
            "http://a.example".to_string(),
            dated_page("2021-05-01"),
        )]));
        let (_dir, path) = batch_file("\n  http://a.example  \n\n");
        let mut out = Vec::new();

        execute(
            &InputSource::BatchFile(path),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "http://a.example\t2021-05-01\n"
        );
    }

    #[tokio::test]
    async fn batch_rejected_document_renders_placeholder() {
        // Fetch succeeds but the payload is under the size floor.
        let fetcher = Scripted(HashMap::from([(
            "http://tiny.example".to_string(),
            "<p>".to_string(),
        )]));
        let (_dir, path) = batch_file("http://tiny.example\n");
        let mut out = Vec::new();

        execute(
            &InputSource::BatchFile(path),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "http://tiny.example\tNone\n");
    }

    #[tokio::test]
    async fn missing_batch_file_is_fatal() {
        let fetcher = Scripted(HashMap::new());
        let mut out = Vec::new();
        let result = execute(
            &InputSource::BatchFile(PathBuf::from("/nonexistent/urls.txt")),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await;
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn single_url_success_writes_bare_date() {
        let fetcher = Scripted(HashMap::from([(
            "http://a.example".to_string(),
            dated_page("2021-05-01"),
        )]));
        let mut out = Vec::new();

        execute(
            &InputSource::Url("http://a.example".to_string()),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "2021-05-01\n");
    }

    #[tokio::test]
    async fn single_url_fetch_miss_is_fatal_and_silent_on_stdout() {
        let fetcher = Scripted(HashMap::new());
        let mut out = Vec::new();

        let result = execute(
            &InputSource::Url("http://down.example".to_string()),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("http://down.example"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn single_url_without_date_stays_silent() {
        let fetcher = Scripted(HashMap::from([(
            "http://nodate.example".to_string(),
            "<html><body>nothing dated here</body></html>".to_string(),
        )]));
        let mut out = Vec::new();

        execute(
            &InputSource::Url("http://nodate.example".to_string()),
            &opts(),
            &fetcher,
            &Engine,
            &mut out,
        )
        .await
        .unwrap();

        assert!(out.is_empty());
    }
}
