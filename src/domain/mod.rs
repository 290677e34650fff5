//! Shared data model layer (structs/enums only).
//!
//! ## Purpose
//! - Keep case/state/report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — case inputs, workflow state, decision enums, usage ledger,
//!   final report structs.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! The serde renames on `MatchDecision` and `Sentiment` are the wire strings
//! downstream consumers see in `--json` output and the audit log. Keep
//! schema-impacting changes explicit and synchronized with the integration
//! tests.

pub mod models;
