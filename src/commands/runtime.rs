use crate::cli::{Cli, Commands};
use crate::domain::models::Case;
use crate::services::config::AppConfig;
use crate::services::oracle::GeminiClient;
use crate::services::output::{print_one, print_out};
use crate::services::{cases, runner};

pub fn handle_runtime_commands(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let oracle = GeminiClient::new(config);
    match &cli.command {
        Commands::Screen { name, dob, article } => {
            let case = Case {
                subject_name: name.clone(),
                subject_dob: dob.clone(),
                article_source: article.clone(),
            };
            let report = runner::run_case(&oracle, &case);
            print_one(cli.json, report, |r| {
                format!(
                    "decision: {}\nexplanation: {}\nsentiment: {}\nexplanation: {}\noracle calls: {}",
                    r.match_decision,
                    r.match_explanation,
                    r.sentiment,
                    r.sentiment_explanation,
                    r.oracle_usage.len()
                )
            })
        }
        Commands::Batch { file } => {
            let loaded = cases::load_cases(file)?;
            anyhow::ensure!(!loaded.is_empty(), "no valid cases in {}", file.display());
            let reports = runner::run_batch(&oracle, &loaded, config.case_delay);
            print_out(cli.json, &reports, |r| {
                format!("{}\t{}\t{}", r.subject_name, r.match_decision, r.sentiment)
            })
        }
    }
}
