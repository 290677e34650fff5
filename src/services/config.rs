use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 2_000;
const DEFAULT_INTERCALL_DELAY_MS: u64 = 1_000;
const DEFAULT_CASE_DELAY_MS: u64 = 3_000;

/// Resolved runtime configuration: defaults, overlaid by the optional
/// config file, then env vars, then CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Checked lazily at call time so fully short-circuited cases run
    /// without credentials.
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout: Duration,
    pub initial_backoff: Duration,
    pub intercall_delay: Duration,
    pub case_delay: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    model: Option<String>,
    request_timeout_ms: Option<u64>,
    initial_backoff_ms: Option<u64>,
    intercall_delay_ms: Option<u64>,
    case_delay_ms: Option<u64>,
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/ascreen/config.toml"))
}

fn load_file() -> anyhow::Result<ConfigFile> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

pub fn load(model_override: Option<&str>) -> anyhow::Result<AppConfig> {
    let file = load_file()?;

    let api_key = std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("GOOGLE_API_KEY"))
        .ok()
        .filter(|k| !k.trim().is_empty());

    let model = model_override
        .map(str::to_string)
        .or_else(|| std::env::var("ASCREEN_MODEL").ok().filter(|m| !m.is_empty()))
        .or(file.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(AppConfig {
        api_key,
        model,
        request_timeout: Duration::from_millis(
            file.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        ),
        initial_backoff: Duration::from_millis(
            file.initial_backoff_ms.unwrap_or(DEFAULT_INITIAL_BACKOFF_MS),
        ),
        intercall_delay: Duration::from_millis(
            file.intercall_delay_ms.unwrap_or(DEFAULT_INTERCALL_DELAY_MS),
        ),
        case_delay: Duration::from_millis(file.case_delay_ms.unwrap_or(DEFAULT_CASE_DELAY_MS)),
    })
}
