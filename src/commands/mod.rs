//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `runtime.rs` — screen/batch command handlers.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate screening logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod runtime;

pub use runtime::handle_runtime_commands;
