//! The four oracle prompt templates, centralized for easy editing. Every
//! prompt demands a single JSON object answer so the decode step stays
//! uniform across nodes.

pub fn name_presence(subject_name: &str, article_text: &str) -> String {
    format!(
        "You are a multilingual analyst capable of processing articles in any language. \
Your task is to quickly scan an article to see if a specific name is mentioned.

**IMPORTANT**: The article may be in any language. Process the content in its \
original language and provide your response in English.

Subject Name: {subject_name}

Article Text:
{article_text}

Is the Subject Name, or a very clear variation (e.g., \"Bill\" for \"William\", \
\"Bernie\" for \"Bernard\"), mentioned in the Article Text?

**Instructions:**
- Search for the name regardless of the article's language
- Account for transliterations and language-specific name variations
- Consider that names may be written differently across scripts

Respond in a single, valid JSON object with two keys (response must be in English):
- \"name_is_present\": true or false
- \"explanation\": A brief reason in English."
    )
}

pub fn age_verification(subject_name: &str, subject_dob: &str, article_text: &str) -> String {
    format!(
        "You are a multilingual analyst capable of processing articles in any language. \
We have already confirmed that the name \"{subject_name}\" is mentioned in the article.

Your task is to verify if the age or date of birth mentioned in the article matches \
the subject's age.

Subject Name: {subject_name}
Subject DOB: {subject_dob}

Article Text:
{article_text}

Analyze the article and determine if the age or date of birth mentioned matches the \
subject's DOB.
- Calculate the current age from the DOB if needed (today's date can be estimated from context)
- Look for age/DOB phrases in any language
- Consider a margin of error of +/- 1 year for age matches (articles might be slightly outdated)
- Account for different date formats used across cultures

Respond in a single, valid JSON object with two keys (response must be in English):
- \"age_matches\": true or false (false only for a clear mismatch of more than 1 year)
- \"explanation\": What age information was found and how it compares to the subject's DOB.

If NO age or DOB information is found in the article, respond with:
- \"age_matches\": true (benefit of the doubt - proceed to detailed verification)
- \"explanation\": \"No age or date of birth information found in the article.\""
    )
}

pub fn detail_verification(subject_name: &str, subject_dob: &str, article_text: &str) -> String {
    format!(
        "You are a meticulous multilingual financial analyst. We have already confirmed \
that the name \"{subject_name}\" (or a variation) is in the article.

Your task is to determine if it's the *correct person* by verifying their date of \
birth and other identifiers. You must be extremely careful to avoid false negatives.

Subject Name: {subject_name}
Subject DOB: {subject_dob}

Article Text:
{article_text}

Analyze the text and provide your decision in a single, valid JSON object.
1. Look for the subject's name again in the article (in any language or script).
2. Look for any dates of birth, ages, or other strong identifiers (locations, \
occupations, companies) *associated with that name*.
3. Compare these details to the Subject's DOB.

Your JSON response MUST have exactly two keys: \"decision\" and \"explanation\" \
(both in English).

- \"decision\" must be one of:
  - \"Match\": If you are confident it's the same person.
  - \"Non-Match\": ONLY if you find *explicit contradictory evidence* (e.g., the same \
name with a *different* DOB or age).
  - \"Review Required\": If the name matches but no *other* identifying or \
contradictory details are present. **This is your default if uncertain.**

- \"explanation\": A step-by-step justification for your decision."
    )
}

pub fn sentiment_analysis(subject_name: &str, article_text: &str) -> String {
    format!(
        "You are a multilingual analyst reviewing an article about a specific person. \
The article has already been determined to be about: {subject_name}.

Article Text:
{article_text}

Analyze the article and determine if it portrays this person in a positive, negative, \
or neutral light, specifically in a regulated financial context.

**Sentiment Guidelines:**
- \"Negative\" includes: lawsuits, scandals, fraud, bankruptcies, criminal activity, \
corruption, investigations, penalties, violations, or any other legal, regulatory, \
financial-crime, or reputational adverse signal. Any adverse signal forces \
\"Negative\" even if positive content appears in the same article.
- \"Positive\" includes: philanthropy, achievements, industry awards, successful \
ventures, leadership praise, innovations. Use it ONLY when adverse signals are \
completely absent.
- \"Neutral\" includes: simple news reports, job changes, objective statements. \
Default to \"Neutral\" on a tie, but when torn between \"Negative\" and \"Neutral\", \
prefer \"Negative\".

Provide your response in a single, valid JSON object with two keys (in English):
- \"sentiment\" must be one of: \"Positive\", \"Negative\", \"Neutral\".
- \"explanation\": A brief justification for your sentiment."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_case_fields() {
        let p = name_presence("Jane Doe", "some article");
        assert!(p.contains("Jane Doe"));
        assert!(p.contains("some article"));
        assert!(p.contains("name_is_present"));

        let p = age_verification("Jane Doe", "01/01/1980", "article body");
        assert!(p.contains("01/01/1980"));
        assert!(p.contains("benefit of the doubt"));

        let p = detail_verification("Jane Doe", "01/01/1980", "article body");
        assert!(p.contains("Review Required"));
        assert!(p.contains("explicit contradictory evidence"));

        let p = sentiment_analysis("Jane Doe", "article body");
        assert!(p.contains("prefer \"Negative\""));
    }
}
