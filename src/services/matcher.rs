use crate::domain::models::NameMatchConfidence;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip diacritics (NFD decompose, drop combining marks) so
/// accented and unaccented forms compare equal.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Cheap deterministic pre-filter deciding whether the oracle is needed.
///
/// - `Exact`: the full normalized name is a substring of the article.
/// - `Partial`: enough name parts appear that a variation/nickname is
///   plausible; the oracle should confirm.
/// - `None`: clearly absent; the oracle is skipped.
pub fn classify(name: &str, article_text: &str) -> NameMatchConfidence {
    if name.trim().is_empty() || article_text.trim().is_empty() {
        return NameMatchConfidence::None;
    }

    let article = normalize(article_text);
    let full = normalize(name);
    if article.contains(&full) {
        return NameMatchConfidence::Exact;
    }

    let parts: Vec<String> = name
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | '.'))
        .filter(|p| !p.is_empty())
        .map(normalize)
        .collect();

    // Drop initials and other short fragments, unless the whole name is
    // made of them (e.g. transliterated two-character parts).
    let significant: Vec<&String> = parts.iter().filter(|p| p.chars().count() >= 3).collect();
    let kept: Vec<&String> = if significant.is_empty() {
        parts.iter().collect()
    } else {
        significant
    };
    if kept.is_empty() {
        return NameMatchConfidence::None;
    }

    let found = kept.iter().filter(|p| article.contains(p.as_str())).count();
    // A single-part name needs its one hit; any multi-part name needs at
    // least 2 hits regardless of how many parts it has.
    let required = kept.len().min(2);

    if found >= required {
        NameMatchConfidence::Partial
    } else {
        NameMatchConfidence::None
    }
}
