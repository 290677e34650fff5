use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ascreen", version, about = "Article person screening CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Override the oracle model id")]
    pub model: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Screen a single article against one person.
    Screen {
        #[arg(long, help = "Subject's full name")]
        name: String,
        #[arg(long, help = "Subject's date of birth (e.g. DD/MM/YYYY)")]
        dob: String,
        #[arg(long, help = "Article URL or literal article text")]
        article: String,
    },
    /// Screen a CSV of cases (columns: name, dob, url and optional text).
    Batch { file: PathBuf },
}
