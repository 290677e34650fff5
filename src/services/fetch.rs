use scraper::{Html, Selector};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub fn is_url(text: &str) -> bool {
    let t = text.trim().to_ascii_lowercase();
    t.starts_with("http://") || t.starts_with("https://") || t.starts_with("www.")
}

/// Resolve an article source to text. Non-URL input is treated as literal
/// article text and returned trimmed. Network failure never raises; it
/// yields an inline error payload downstream nodes treat as ordinary text.
pub fn load_article(source: &str) -> String {
    if !is_url(source) {
        tracing::debug!("article source treated as literal text");
        return source.trim().to_string();
    }

    tracing::info!(url = %source, "fetching article");
    match fetch_remote(source) {
        Ok(text) => {
            if let Ok(cache) = cache_path(source) {
                if let Some(parent) = cache.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                let _ = std::fs::write(cache, &text);
            }
            text
        }
        Err(e) => {
            // Fall back to the last good copy before giving up.
            if let Ok(cache) = cache_path(source) {
                if let Ok(text) = std::fs::read_to_string(cache) {
                    tracing::warn!(url = %source, "fetch failed, using cached article");
                    return text;
                }
            }
            tracing::warn!(url = %source, error = %e, "fetch failed");
            format!("Error: Could not fetch article. {e}")
        }
    }
}

fn fetch_remote(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    Ok(extract_article_text(&body))
}

/// Concatenate paragraph text, falling back to full-page text when the
/// document has no paragraphs, then strip blank lines.
pub fn extract_article_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let paragraphs = Selector::parse("p").expect("static selector");

    let mut text = doc
        .select(&paragraphs)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        text = doc.root_element().text().collect::<Vec<_>>().join("\n");
    }

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn cache_path(url: &str) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let id = hex::encode(hasher.finalize());
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("ascreen")
        .join("articles")
        .join(format!("{}.txt", id)))
}
