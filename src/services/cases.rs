use crate::domain::models::Case;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CaseRow {
    name: String,
    dob: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    text: String,
}

/// Load batch cases from a CSV file with columns `name, dob, url` and an
/// optional `text` column; a non-empty `text` overrides `url` as the
/// content source for that row. Rows missing name or dob are skipped.
pub fn load_cases(path: &Path) -> anyhow::Result<Vec<Case>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot read case file {}", path.display()))?;

    let mut cases = Vec::new();
    for row in reader.deserialize::<CaseRow>() {
        let row = row.with_context(|| format!("malformed row in {}", path.display()))?;
        if row.name.trim().is_empty() || row.dob.trim().is_empty() {
            tracing::warn!("skipping case row with missing name or dob");
            continue;
        }
        let article_source = if row.text.trim().is_empty() {
            row.url
        } else {
            row.text
        };
        cases.push(Case {
            subject_name: row.name,
            subject_dob: row.dob,
            article_source,
        });
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::load_cases;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(content.as_bytes()).expect("write csv");
        f
    }

    #[test]
    fn loads_url_rows() {
        let f = write_csv("name,dob,url\nJane Doe,01/01/1980,https://example.com/a\n");
        let cases = load_cases(f.path()).expect("loads");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].subject_name, "Jane Doe");
        assert_eq!(cases[0].article_source, "https://example.com/a");
    }

    #[test]
    fn text_column_overrides_url() {
        let f = write_csv(
            "name,dob,url,text\nJane Doe,01/01/1980,https://example.com/a,Literal article body\n",
        );
        let cases = load_cases(f.path()).expect("loads");
        assert_eq!(cases[0].article_source, "Literal article body");
    }

    #[test]
    fn rows_missing_required_fields_are_skipped() {
        let f = write_csv("name,dob,url\n,01/01/1980,https://example.com/a\nJane Doe,,x\n");
        let cases = load_cases(f.path()).expect("loads");
        assert!(cases.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_cases(std::path::Path::new("/nonexistent/cases.csv")).is_err());
    }
}
