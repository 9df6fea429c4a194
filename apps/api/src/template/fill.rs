//! Placeholder substitution: replaces `{{ key }}` markers with values from a
//! substitution map. Markers whose key is absent stay in the output
//! byte-for-byte, so the caller can see which fields were never resolved.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(.*?)\s*\}\}").expect("placeholder regex compiles"));

/// The placeholder name → replacement mapping built from a job record plus
/// computed fields (greeting, date, subject).
pub type SubstitutionMap = HashMap<String, String>;

/// Replaces every recognized `{{ key }}` marker (whitespace around the key is
/// ignored) with its mapped value. Repeated keys are all replaced; unknown
/// markers are left verbatim, including their original internal spacing.
pub fn fill_template(template: &str, data: &SubstitutionMap) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            match data.get(key) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
