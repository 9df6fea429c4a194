//! Cover-letter flow: greeting classification, substitution-map assembly,
//! and the upload/download endpoints.

pub mod coverletter;
pub mod greeting;
pub mod handlers;

pub use coverletter::{build_substitutions, fill_coverletter_template, FilledLetter};
pub use greeting::{EntityNameClassifier, HeuristicNameClassifier, NameClassifier};
