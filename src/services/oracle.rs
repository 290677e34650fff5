use crate::domain::models::OracleUsage;
use crate::services::config::AppConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Attempt ceiling for rate-limited calls: 1 initial try + 4 backed-off
/// retries with delays d, 2d, 4d, 8d.
pub const MAX_ATTEMPTS: u32 = 5;

#[derive(thiserror::Error, Debug)]
pub enum OracleError {
    #[error("oracle rate limited: {0}")]
    RateLimited(String),
    #[error("oracle transport failure: {0}")]
    Transport(String),
    #[error("oracle retries exhausted after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
    #[error("oracle answer missing or malformed: {0}")]
    MalformedAnswer(String),
    #[error("no oracle API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
}

#[derive(Debug, Clone)]
pub struct OracleReply {
    pub text: String,
    pub usage: OracleUsage,
}

/// Seam between the state machine and the external text-understanding
/// service. The workflow only ever sees this contract.
pub trait Oracle {
    fn call(&self, prompt: &str) -> Result<OracleReply, OracleError>;
}

/// Client for the Gemini `generateContent` REST endpoint. Each call builds
/// a fresh blocking client so calls carry no shared session state.
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    request_timeout: Duration,
    initial_backoff: Duration,
    intercall_delay: Duration,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            request_timeout: config.request_timeout,
            initial_backoff: config.initial_backoff,
            intercall_delay: config.intercall_delay,
        }
    }

    fn send_once(&self, prompt: &str) -> Result<OracleReply, OracleError> {
        let key = self.api_key.as_deref().ok_or(OracleError::MissingApiKey)?;
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let client = reqwest::blocking::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        let resp = client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .map_err(|e| classify_send_error(&e))?;

        let status = resp.status();
        let raw = resp
            .text()
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        if status.as_u16() == 429 || (!status.is_success() && is_rate_limit_signal(&raw)) {
            return Err(OracleError::RateLimited(truncate(&raw, 200)));
        }
        if !status.is_success() {
            return Err(OracleError::Transport(format!(
                "status {}: {}",
                status,
                truncate(&raw, 200)
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&raw)
            .map_err(|e| OracleError::MalformedAnswer(e.to_string()))?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| OracleError::MalformedAnswer("reply had no candidates".to_string()))?;
        let usage = parsed
            .usage_metadata
            .map(|u| OracleUsage {
                prompt_units: u.prompt_token_count,
                completion_units: u.candidates_token_count,
                total_units: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(OracleReply { text, usage })
    }
}

impl Oracle for GeminiClient {
    fn call(&self, prompt: &str) -> Result<OracleReply, OracleError> {
        let reply = retry_rate_limited(
            MAX_ATTEMPTS,
            self.initial_backoff,
            || self.send_once(prompt),
            std::thread::sleep,
        )?;
        // Throttle the request rate regardless of what the caller does next.
        if !self.intercall_delay.is_zero() {
            std::thread::sleep(self.intercall_delay);
        }
        Ok(reply)
    }
}

/// Retry `op` while it fails with a rate-limit classification, doubling the
/// wait each attempt. Any other failure is returned immediately; running
/// out of attempts is a distinct exhaustion failure.
pub fn retry_rate_limited<T>(
    max_attempts: u32,
    initial_delay: Duration,
    mut op: impl FnMut() -> Result<T, OracleError>,
    mut sleep: impl FnMut(Duration),
) -> Result<T, OracleError> {
    let mut delay = initial_delay;
    let mut last = String::new();
    for attempt in 1..=max_attempts {
        match op() {
            Ok(v) => return Ok(v),
            Err(OracleError::RateLimited(msg)) => {
                tracing::warn!(attempt, "oracle rate limited, backing off");
                last = msg;
                if attempt < max_attempts {
                    sleep(delay);
                    delay *= 2;
                }
            }
            Err(e) => return Err(e),
        }
    }
    Err(OracleError::Exhausted {
        attempts: max_attempts,
        last,
    })
}

fn classify_send_error(e: &reqwest::Error) -> OracleError {
    let msg = e.to_string();
    if is_rate_limit_signal(&msg) {
        OracleError::RateLimited(msg)
    } else {
        OracleError::Transport(msg)
    }
}

pub fn is_rate_limit_signal(text: &str) -> bool {
    let t = text.to_ascii_lowercase();
    t.contains("429")
        || t.contains("rate limit")
        || t.contains("rate-limit")
        || t.contains("ratelimit")
        || t.contains("quota")
        || t.contains("too many requests")
        || t.contains("resource_exhausted")
}

/// Strip known code-fence markers around the oracle's JSON answer.
pub fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    for prefix in ["```json", "```JSON", "```"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest;
            break;
        }
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Decode the structured answer embedded in an oracle reply. A parse
/// failure or missing key is never retried here; callers apply their own
/// node-level default.
pub fn decode_answer<T: DeserializeOwned>(raw: &str) -> Result<T, OracleError> {
    serde_json::from_str(strip_fences(raw)).map_err(|e| OracleError::MalformedAnswer(e.to_string()))
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u64,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u64,
}
