//! Service layer containing the screening logic and side-effect helpers.
//!
//! ## Service map
//! - `config.rs` — env + optional TOML configuration overlay.
//! - `matcher.rs` — deterministic local name pre-filter (Exact/Partial/None).
//! - `oracle.rs` — oracle trait, Gemini client, retry/backoff, answer decode.
//! - `prompts.rs` — the four oracle prompt templates.
//! - `fetch.rs` — article fetch: URL detection, HTML extraction, cache.
//! - `workflow.rs` — the verification state machine (nodes + routing).
//! - `runner.rs` — per-case/batch driver + audit log append.
//! - `cases.rs` — CSV batch-case loading.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod cases;
pub mod config;
pub mod fetch;
pub mod matcher;
pub mod oracle;
pub mod output;
pub mod prompts;
pub mod runner;
pub mod workflow;
