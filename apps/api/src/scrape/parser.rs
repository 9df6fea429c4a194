//! Vacancy-page field extraction — turns the raw statejobs HTML into a
//! [`JobRecord`].
//!
//! The page lays its data out as labeled two-column rows (`p.row` holding a
//! `span.leftCol` label and a `span.rightCol` value) inside three container
//! regions: `div#information` (title/agency/salary/grade), `div.columnReport`
//! (posting dates), and `div#contact` (name, email, multi-line address).
//! A missing container yields an empty field group, never an error.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

const NA: &str = "N/A";

static ROW: LazyLock<Selector> = LazyLock::new(|| sel("p.row"));
static LEFT_COL: LazyLock<Selector> = LazyLock::new(|| sel("span.leftCol"));
static RIGHT_COL: LazyLock<Selector> = LazyLock::new(|| sel("span.rightCol"));
static INFORMATION: LazyLock<Selector> = LazyLock::new(|| sel("div#information"));
static COLUMN_REPORT: LazyLock<Selector> = LazyLock::new(|| sel("div.columnReport"));
static CONTACT: LazyLock<Selector> = LazyLock::new(|| sel("div#contact"));

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Everything we extract from one vacancy page. Built fresh per request and
/// discarded after the response; nothing is persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobRecord {
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub date_posted: String,
    pub applications_due: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
}

impl JobRecord {
    /// Parses all sections of one vacancy page.
    pub fn from_page(job_id: &str, html: &str) -> JobRecord {
        let doc = Html::parse_document(html);
        let mut record = JobRecord {
            job_id: job_id.to_string(),
            date_posted: NA.to_string(),
            applications_due: NA.to_string(),
            ..JobRecord::default()
        };
        parse_information(&doc, &mut record);
        parse_dates(&doc, &mut record);
        parse_contact(&doc, &mut record);
        record
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Label dispatch (information section)
// ────────────────────────────────────────────────────────────────────────────

/// Recognized labels of the `#information` section. Label → field is a pure
/// table-driven mapping; unrecognized labels are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfoField {
    Title,
    Agency,
    Salary,
    Grade,
}

impl InfoField {
    fn from_label(label: &str) -> Option<InfoField> {
        match label {
            "Title" => Some(InfoField::Title),
            "Agency" => Some(InfoField::Agency),
            "Salary Range" | "Salary" => Some(InfoField::Salary),
            "Salary Grade" | "Grade" => Some(InfoField::Grade),
            _ => None,
        }
    }

    fn apply(self, record: &mut JobRecord, value: &str) {
        match self {
            InfoField::Title => record.title = Some(value.to_string()),
            InfoField::Agency => record.agency = Some(reorder_agency(value)),
            InfoField::Salary => record.salary = Some(value.to_string()),
            InfoField::Grade => record.grade = Some(value.to_string()),
        }
    }
}

/// The site writes some agencies qualifier-last ("Children and Family
/// Services, Office of"); reorder to the natural form.
fn reorder_agency(value: &str) -> String {
    match value.split_once(", Office of") {
        Some((head, _)) => format!("Office of {}", head.trim()),
        None => value.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section parsers
// ────────────────────────────────────────────────────────────────────────────

fn parse_information(doc: &Html, record: &mut JobRecord) {
    let Some(info) = doc.select(&INFORMATION).next() else {
        return;
    };
    for (left, right) in labeled_rows(info) {
        let label = direct_label(left);
        let value = text_stripped(right);
        if let Some(field) = InfoField::from_label(label.trim()) {
            field.apply(record, &value);
        }
    }
}

fn parse_dates(doc: &Html, record: &mut JobRecord) {
    // Both dates stay "N/A" when the container or a label is absent.
    let Some(column) = doc.select(&COLUMN_REPORT).next() else {
        return;
    };
    for (left, right) in labeled_rows(column) {
        let label = text_stripped(left);
        let value = text_stripped(right);
        if label.contains("Date Posted") {
            record.date_posted = value;
        } else if label.contains("Applications Due") {
            record.applications_due = value;
        }
    }
}

fn parse_contact(doc: &Html, record: &mut JobRecord) {
    let Some(contact) = doc.select(&CONTACT).next() else {
        return;
    };
    let rows: Vec<ElementRef> = contact.select(&ROW).collect();

    // First pass: name and email, stopping at the first address label.
    for row in &rows {
        let key = left_text(row);
        let value = right_text(row);
        match key.as_str() {
            "Name" => record.name = Some(value),
            "Email Address" => record.email = Some(value),
            _ => {}
        }
        if is_address_label(&key) {
            break;
        }
    }

    // Second pass: assemble the multi-line address from the first address row.
    let start = rows
        .iter()
        .position(|row| is_address_label(&left_text(row)))
        .unwrap_or(rows.len());
    let address = assemble_address(&rows, start);
    let address = address.trim();
    if !address.is_empty() {
        record.full_address = Some(address.to_string());
    }
}

fn is_address_label(key: &str) -> bool {
    matches!(key, "Street" | "City" | "State" | "Zip Code")
}

/// Accumulates street lines and the city/state/zip line starting at
/// `start`. A `Street` row may be followed by continuation rows whose left
/// label is empty; each contributes another street line. Any label outside
/// the address set terminates the scan.
fn assemble_address(rows: &[ElementRef], start: usize) -> String {
    let mut street_lines: Vec<String> = Vec::new();
    let mut city_state_zip = String::new();

    let mut i = start;
    while i < rows.len() {
        let key = left_text(&rows[i]);
        let value = right_text(&rows[i]);

        match key.as_str() {
            "Street" => {
                street_lines.push(value);
                let mut j = i + 1;
                while j < rows.len() {
                    match rows[j].select(&LEFT_COL).next() {
                        Some(left) if text_stripped(left).is_empty() => {
                            street_lines.push(right_text(&rows[j]));
                            j += 1;
                        }
                        _ => break,
                    }
                }
                i = j - 1;
            }
            "City" | "State" | "Zip Code" => {
                city_state_zip.push_str(&value);
                city_state_zip.push(' ');
            }
            _ => break,
        }
        i += 1;
    }

    let mut full_address = street_lines.join("\n");
    let csz = city_state_zip.trim();
    if !full_address.is_empty() && !csz.is_empty() {
        full_address.push('\n');
        full_address.push_str(csz);
    } else if !csz.is_empty() {
        full_address = csz.to_string();
    }
    full_address
}

// ────────────────────────────────────────────────────────────────────────────
// Row/text helpers
// ────────────────────────────────────────────────────────────────────────────

/// Yields the (label span, value span) pairs of a container's rows, skipping
/// rows missing either column.
fn labeled_rows<'a>(
    container: ElementRef<'a>,
) -> impl Iterator<Item = (ElementRef<'a>, ElementRef<'a>)> + 'a {
    container.select(&ROW).filter_map(|row| {
        let left = row.select(&LEFT_COL).next()?;
        let right = row.select(&RIGHT_COL).next()?;
        Some((left, right))
    })
}

fn left_text(row: &ElementRef) -> String {
    row.select(&LEFT_COL).next().map(text_stripped).unwrap_or_default()
}

fn right_text(row: &ElementRef) -> String {
    row.select(&RIGHT_COL).next().map(text_stripped).unwrap_or_default()
}

/// All descendant text, each fragment trimmed, concatenated.
fn text_stripped(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

/// The label of a left column is its last non-empty DIRECT text child, which
/// skips the inline help links the site nests inside the span. Falls back to
/// the full descendant text when the span has no direct text of its own.
fn direct_label(left: ElementRef) -> String {
    let direct: Vec<String> = left
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    match direct.last() {
        Some(last) => last.clone(),
        None => left
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, value: &str) -> String {
        format!(
            r#"<p class="row"><span class="leftCol">{label}</span><span class="rightCol">{value}</span></p>"#
        )
    }

    fn full_page() -> String {
        let info = [
            // Help link nested inside the label span; the direct text wins.
            row(r##"<a href="#">?</a> Title"##, "Program Aide"),
            row("Agency", "Children and Family Services, Office of"),
            row("Salary Range", "From $40000 to $50000 Annually"),
            row("Salary Grade", "11"),
            row("Occupational Category", "Ignored"),
        ]
        .join("");
        let dates = [
            row("Date Posted", "01/15/2026"),
            row("Applications Due", "01/30/2026"),
        ]
        .join("");
        let contact = [
            row("Name", "John Smith"),
            row("Email Address", "jobs@example.ny.gov"),
            row("Street", "123 Main St"),
            row("", "Suite 4"),
            row("City", "Albany"),
            row("State", "NY"),
            row("Zip Code", "12207"),
        ]
        .join("");
        format!(
            r#"<html><body>
                <div id="information">{info}</div>
                <div class="columnReport">{dates}</div>
                <div id="contact">{contact}</div>
            </body></html>"#
        )
    }

    #[test]
    fn test_information_labels_map_to_fields() {
        let record = JobRecord::from_page("111", &full_page());
        assert_eq!(record.job_id, "111");
        assert_eq!(record.title.as_deref(), Some("Program Aide"));
        assert_eq!(record.salary.as_deref(), Some("From $40000 to $50000 Annually"));
        assert_eq!(record.grade.as_deref(), Some("11"));
    }

    #[test]
    fn test_agency_qualifier_is_reordered() {
        let record = JobRecord::from_page("111", &full_page());
        assert_eq!(
            record.agency.as_deref(),
            Some("Office of Children and Family Services")
        );
    }

    #[test]
    fn test_agency_without_qualifier_is_untouched() {
        assert_eq!(reorder_agency("Department of Labor"), "Department of Labor");
    }

    #[test]
    fn test_dates_are_extracted() {
        let record = JobRecord::from_page("111", &full_page());
        assert_eq!(record.date_posted, "01/15/2026");
        assert_eq!(record.applications_due, "01/30/2026");
    }

    #[test]
    fn test_missing_date_container_defaults_to_na() {
        let html = r#"<html><body><div id="information"></div></body></html>"#;
        let record = JobRecord::from_page("111", html);
        assert_eq!(record.date_posted, "N/A");
        assert_eq!(record.applications_due, "N/A");
    }

    #[test]
    fn test_missing_containers_yield_empty_fields_not_errors() {
        let record = JobRecord::from_page("111", "<html><body></body></html>");
        assert!(record.title.is_none());
        assert!(record.name.is_none());
        assert!(record.full_address.is_none());
    }

    #[test]
    fn test_contact_name_and_email() {
        let record = JobRecord::from_page("111", &full_page());
        assert_eq!(record.name.as_deref(), Some("John Smith"));
        assert_eq!(record.email.as_deref(), Some("jobs@example.ny.gov"));
    }

    #[test]
    fn test_address_assembly_joins_street_and_city_state_zip() {
        let record = JobRecord::from_page("111", &full_page());
        assert_eq!(
            record.full_address.as_deref(),
            Some("123 Main St\nSuite 4\nAlbany NY 12207")
        );
    }

    #[test]
    fn test_address_without_street_is_city_state_zip_only() {
        let contact = [
            row("Name", "John Smith"),
            row("City", "Albany"),
            row("State", "NY"),
            row("Zip Code", "12207"),
        ]
        .join("");
        let html = format!(r#"<html><body><div id="contact">{contact}</div></body></html>"#);
        let record = JobRecord::from_page("111", &html);
        assert_eq!(record.full_address.as_deref(), Some("Albany NY 12207"));
    }

    #[test]
    fn test_address_scan_stops_at_non_address_label() {
        let contact = [
            row("Street", "123 Main St"),
            row("Fax", "555-0100"),
            row("City", "Albany"),
        ]
        .join("");
        let html = format!(r#"<html><body><div id="contact">{contact}</div></body></html>"#);
        let record = JobRecord::from_page("111", &html);
        // The Fax row terminates the scan before City is reached.
        assert_eq!(record.full_address.as_deref(), Some("123 Main St"));
    }

    #[test]
    fn test_information_rows_are_order_independent() {
        let info = [
            row("Salary Grade", "11"),
            row("Title", "Program Aide"),
            row("Agency", "Department of Labor"),
        ]
        .join("");
        let html = format!(r#"<html><body><div id="information">{info}</div></body></html>"#);
        let record = JobRecord::from_page("111", &html);
        assert_eq!(record.title.as_deref(), Some("Program Aide"));
        assert_eq!(record.grade.as_deref(), Some("11"));
        assert_eq!(record.agency.as_deref(), Some("Department of Labor"));
    }

    #[test]
    fn test_unrecognized_labels_are_ignored() {
        let info = row("Telecommuting Allowed", "Yes");
        let html = format!(r#"<html><body><div id="information">{info}</div></body></html>"#);
        let record = JobRecord::from_page("111", &html);
        assert!(record.title.is_none());
        assert!(record.salary.is_none());
    }
}
