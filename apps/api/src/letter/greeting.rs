//! Greeting selection: decide whether a contact string names a person
//! ("Dear Jane Doe,") or an office ("Dear Sir or Madam,").
//!
//! The classifier is a strategy trait so the entity-rule engine can be
//! swapped out (or replaced by a real NER model later) without touching the
//! cover-letter flow. Selection happens once at startup via `GREETING_NER`.

pub const GENERIC_GREETING: &str = "Dear Sir or Madam,";

/// Classifies a contact-name string as a person or not. Never errors; an
/// ambiguous input just resolves to the generic salutation.
pub trait NameClassifier: Send + Sync {
    fn is_probably_person(&self, name: &str) -> bool;
}

/// Builds the salutation line for a contact name.
pub fn greeting_for(classifier: &dyn NameClassifier, name: &str) -> String {
    if classifier.is_probably_person(name) {
        format!("Dear {},", name.trim())
    } else {
        GENERIC_GREETING.to_string()
    }
}

/// Substrings that mark a contact as an organizational unit rather than a
/// person. Matched case-insensitively anywhere in the string.
const ORG_KEYWORDS: &[&str] = &[
    "department",
    "office",
    "agency",
    "bureau",
    "division",
    "unit",
    "team",
    "services",
    "system",
    "resources",
    "support",
    "staff",
    "human resources",
    "advisor",
];

const HONORIFICS: &[&str] = &["mr", "mr.", "mrs", "mrs.", "ms", "ms.", "dr", "dr.", "prof", "prof."];

/// Rule-based entity classifier (the default). An honorific anywhere in the
/// string is taken as a person entity; otherwise organizational keywords
/// reject, and 2–4 alphabetic capitalized tokens accept.
#[derive(Debug, Default)]
pub struct EntityNameClassifier;

impl NameClassifier for EntityNameClassifier {
    fn is_probably_person(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        if name
            .split_whitespace()
            .any(|token| HONORIFICS.contains(&token.to_lowercase().as_str()))
        {
            return true;
        }

        let lower = name.to_lowercase();
        if ORG_KEYWORDS.iter().any(|word| lower.contains(word)) {
            return false;
        }

        let tokens: Vec<&str> = name
            .split_whitespace()
            .filter(|t| t.chars().all(char::is_alphabetic))
            .collect();
        (2..=4).contains(&tokens.len())
            && tokens
                .iter()
                .all(|t| t.chars().next().is_some_and(char::is_uppercase))
    }
}

/// Fallback heuristic used when the entity rules are disabled: a string with
/// a space that splits into at most four tokens is assumed to be a name.
#[derive(Debug, Default)]
pub struct HeuristicNameClassifier;

impl NameClassifier for HeuristicNameClassifier {
    fn is_probably_person(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let tokens = name.split_whitespace().count();
        name.contains(' ') && (1..=4).contains(&tokens)
    }
}
