use crate::domain::models::{Case, ScreeningReport};
use crate::services::oracle::Oracle;
use crate::services::workflow::Workflow;
use std::path::PathBuf;
use std::time::Duration;

/// Drive one case through the state machine and extract the final bundle.
/// This never fails: every node converts its own oracle failure into a
/// documented default.
pub fn run_case(oracle: &dyn Oracle, case: &Case) -> ScreeningReport {
    tracing::info!(subject = %case.subject_name, "screening case");
    let state = Workflow::new(oracle).run(case);

    let report = ScreeningReport {
        subject_name: case.subject_name.clone(),
        subject_dob: case.subject_dob.clone(),
        article_source: case.article_source.clone(),
        match_decision: state.match_decision,
        match_explanation: state.match_rationale,
        sentiment: state.sentiment,
        sentiment_explanation: state.sentiment_rationale,
        name_is_present: state.name_is_present,
        age_matches: state.age_matches,
        oracle_usage: state.oracle_usage,
    };
    audit(&report);
    tracing::info!(
        decision = %report.match_decision,
        sentiment = %report.sentiment,
        oracle_units = report.oracle_usage.total_units(),
        "case complete"
    );
    report
}

/// Run cases one at a time with a mandatory inter-case delay to avoid
/// bursting the oracle's rate limits. Cases share no mutable state.
pub fn run_batch(oracle: &dyn Oracle, cases: &[Case], case_delay: Duration) -> Vec<ScreeningReport> {
    let mut reports = Vec::with_capacity(cases.len());
    for (i, case) in cases.iter().enumerate() {
        if i > 0 && !case_delay.is_zero() {
            std::thread::sleep(case_delay);
        }
        reports.push(run_case(oracle, case));
    }
    reports
}

fn audit_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/ascreen/audit.jsonl"))
}

/// Append the outcome bundle to the run audit log. Best-effort: screening
/// results must not be lost to a logging failure.
fn audit(report: &ScreeningReport) {
    let Some(path) = audit_path() else { return };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": unix_now(),
        "subject_name": report.subject_name,
        "subject_dob": report.subject_dob,
        "article_source": report.article_source,
        "match_decision": report.match_decision,
        "sentiment": report.sentiment,
        "name_is_present": report.name_is_present,
        "age_matches": report.age_matches,
        "oracle_units": report.oracle_usage.total_units(),
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
