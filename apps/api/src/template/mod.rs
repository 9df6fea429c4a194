//! Template handling: upload extraction, placeholder substitution, and the
//! plain-text → structured-HTML reflow used by the cover-letter editor.

pub mod extract;
pub mod fill;
pub mod reflow;

pub use extract::{extract_text_and_html, ExtractError, ExtractedTemplate};
pub use fill::{fill_template, SubstitutionMap};
pub use reflow::text_to_html;
