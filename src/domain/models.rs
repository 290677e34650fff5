use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One screening input. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub subject_name: String,
    pub subject_dob: String,
    /// Either a URL or literal article text.
    pub article_source: String,
}

/// Final match verdict for a case. The serde renames are the wire strings
/// the oracle emits and downstream consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchDecision {
    Match,
    #[serde(rename = "Non-Match")]
    NonMatch,
    #[serde(rename = "Review Required")]
    ReviewRequired,
    #[serde(rename = "Age Mismatch - Needs Verification")]
    AgeMismatchNeedsVerification,
}

impl std::fmt::Display for MatchDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchDecision::Match => "Match",
            MatchDecision::NonMatch => "Non-Match",
            MatchDecision::ReviewRequired => "Review Required",
            MatchDecision::AgeMismatchNeedsVerification => "Age Mismatch - Needs Verification",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::NotApplicable => "N/A",
        };
        f.write_str(s)
    }
}

/// Result of the local pre-filter. Transient: consumed immediately by the
/// name-presence node to decide whether the oracle is consulted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatchConfidence {
    Exact,
    Partial,
    None,
}

/// Token counters for a single oracle call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleUsage {
    pub prompt_units: u64,
    pub completion_units: u64,
    pub total_units: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageEntry {
    pub node: String,
    #[serde(flatten)]
    pub usage: OracleUsage,
}

/// Per-node usage counters in call order. A node that skipped its oracle
/// call creates no entry; this is how a skipped call is observable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageLedger(Vec<UsageEntry>);

impl UsageLedger {
    pub fn record(&mut self, node: &str, usage: OracleUsage) {
        self.0.push(UsageEntry {
            node: node.to_string(),
            usage,
        });
    }

    pub fn entries(&self) -> &[UsageEntry] {
        &self.0
    }

    pub fn get(&self, node: &str) -> Option<OracleUsage> {
        self.0.iter().find(|e| e.node == node).map(|e| e.usage)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_units(&self) -> u64 {
        self.0.iter().map(|e| e.usage.total_units).sum()
    }
}

/// Mutable record threaded through the state machine. Each node writes only
/// its own fields; later nodes never regress earlier ones.
#[derive(Debug)]
pub struct VerificationState {
    pub article_text: String,
    pub name_is_present: bool,
    pub name_check_rationale: String,
    pub age_matches: bool,
    pub age_check_rationale: String,
    pub match_decision: MatchDecision,
    pub match_rationale: String,
    pub sentiment: Sentiment,
    pub sentiment_rationale: String,
    pub oracle_usage: UsageLedger,
}

impl Default for VerificationState {
    fn default() -> Self {
        Self {
            article_text: String::new(),
            name_is_present: false,
            name_check_rationale: String::new(),
            age_matches: false,
            age_check_rationale: String::new(),
            // "Don't know" until the detail-check node runs.
            match_decision: MatchDecision::ReviewRequired,
            match_rationale: String::new(),
            sentiment: Sentiment::NotApplicable,
            sentiment_rationale: String::new(),
            oracle_usage: UsageLedger::default(),
        }
    }
}

/// Final bundle extracted from a completed run. This is the surface any
/// logging/metrics collaborator consumes.
#[derive(Debug, Serialize)]
pub struct ScreeningReport {
    pub subject_name: String,
    pub subject_dob: String,
    pub article_source: String,
    pub match_decision: MatchDecision,
    pub match_explanation: String,
    pub sentiment: Sentiment,
    pub sentiment_explanation: String,
    pub name_is_present: bool,
    pub age_matches: bool,
    pub oracle_usage: UsageLedger,
}
