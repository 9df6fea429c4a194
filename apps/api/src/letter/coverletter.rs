//! Cover-letter assembly: builds the substitution map from a job record and
//! fills the uploaded template's text and HTML forms.

use chrono::Local;

use crate::letter::greeting::{greeting_for, NameClassifier};
use crate::scrape::parser::JobRecord;
use crate::template::extract::{extract_text_and_html, ExtractError};
use crate::template::fill::{fill_template, SubstitutionMap};

/// A filled cover letter: plain text for the editor, structured HTML for the
/// rich view/PDF, and the font size to render it at.
#[derive(Debug, Clone)]
pub struct FilledLetter {
    pub text: String,
    pub html: String,
    pub font_size: String,
}

/// Builds the placeholder → value map for one job. Computed fields: the
/// salutation, today's date, and a `Vacancy ID #…` subject line. The address
/// is re-joined with `<br>` so it survives HTML paragraph reflow.
pub fn build_substitutions(job: &JobRecord, classifier: &dyn NameClassifier) -> SubstitutionMap {
    let contact_name = job.name.as_deref().unwrap_or("");
    let greeting = greeting_for(classifier, contact_name);
    let today = Local::now().format("%B %d, %Y").to_string();
    let subject = format!("Vacancy ID #{}", job.job_id);

    let raw_address = job.full_address.as_deref().unwrap_or("");
    let address_html = raw_address
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("<br>");

    let mut map = SubstitutionMap::new();
    map.insert("greeting".to_string(), greeting);
    map.insert("date".to_string(), today);
    map.insert("subject".to_string(), subject);
    map.insert("job_id".to_string(), job.job_id.clone());
    map.insert(
        "title".to_string(),
        job.title.clone().unwrap_or_default(),
    );
    map.insert(
        "agency".to_string(),
        job.agency.clone().unwrap_or_default(),
    );
    map.insert("full_address".to_string(), address_html);
    map
}

/// Extracts the uploaded template and substitutes the job's fields into both
/// its text and HTML forms.
pub fn fill_coverletter_template(
    job: &JobRecord,
    classifier: &dyn NameClassifier,
    filename: &str,
    bytes: &[u8],
) -> Result<FilledLetter, ExtractError> {
    let substitutions = build_substitutions(job, classifier);
    let extracted = extract_text_and_html(filename, bytes)?;
    Ok(FilledLetter {
        text: fill_template(&extracted.text, &substitutions),
        html: fill_template(&extracted.html, &substitutions),
        font_size: extracted.font_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::greeting::EntityNameClassifier;

    fn job() -> JobRecord {
        JobRecord {
            job_id: "111123".to_string(),
            title: Some("Program Aide".to_string()),
            agency: Some("Office of Children and Family Services".to_string()),
            name: Some("John Smith".to_string()),
            full_address: Some("123 Main St\nSuite 4\nAlbany NY 12207".to_string()),
            date_posted: "N/A".to_string(),
            applications_due: "N/A".to_string(),
            ..JobRecord::default()
        }
    }

    #[test]
    fn test_subject_line_carries_vacancy_id() {
        let map = build_substitutions(&job(), &EntityNameClassifier);
        assert_eq!(map["subject"], "Vacancy ID #111123");
        assert_eq!(map["job_id"], "111123");
    }

    #[test]
    fn test_address_is_br_joined_for_html() {
        let map = build_substitutions(&job(), &EntityNameClassifier);
        assert_eq!(map["full_address"], "123 Main St<br>Suite 4<br>Albany NY 12207");
    }

    #[test]
    fn test_person_contact_is_greeted_by_name() {
        let map = build_substitutions(&job(), &EntityNameClassifier);
        assert_eq!(map["greeting"], "Dear John Smith,");
    }

    #[test]
    fn test_missing_contact_gets_generic_greeting() {
        let mut record = job();
        record.name = None;
        let map = build_substitutions(&record, &EntityNameClassifier);
        assert_eq!(map["greeting"], "Dear Sir or Madam,");
    }

    #[test]
    fn test_fill_coverletter_substitutes_text_and_html() {
        let template = b"{{ greeting }}\n\nI am applying for {{ title }} ({{ subject }}).";
        let letter =
            fill_coverletter_template(&job(), &EntityNameClassifier, "letter.txt", template)
                .unwrap();
        assert!(letter.text.starts_with("Dear John Smith,"));
        assert!(letter.text.contains("Program Aide"));
        assert!(letter.html.contains("<p>Dear John Smith,</p>"));
        assert_eq!(letter.font_size, "12pt");
    }

    #[test]
    fn test_unsupported_template_type_propagates() {
        let err = fill_coverletter_template(&job(), &EntityNameClassifier, "letter.rtf", b"x")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(_)));
    }
}
