//! Uploaded-template extraction: turns `.txt`, `.docx`, or `.pdf` bytes into
//! the normalized plain text the reflow step expects, plus a best-effort
//! detected font size (docx only; everything else gets the 12pt default).

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::template::reflow::text_to_html;

pub const DEFAULT_FONT_SIZE: &str = "12pt";

static MULTI_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-line regex compiles"));
static DOCX_RUN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").expect("run-text regex compiles"));
static DOCX_FONT_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:sz w:val="(\d+)""#).expect("font-size regex compiles"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    #[error("could not read docx: {0}")]
    Docx(String),

    #[error("could not read pdf: {0}")]
    Pdf(String),
}

/// The three artifacts the cover-letter flow needs from an upload.
#[derive(Debug, Clone)]
pub struct ExtractedTemplate {
    pub text: String,
    pub html: String,
    pub font_size: String,
}

/// Extracts normalized text (and its structured-HTML form) from an uploaded
/// template, dispatching on the lowercased filename extension.
pub fn extract_text_and_html(filename: &str, bytes: &[u8]) -> Result<ExtractedTemplate, ExtractError> {
    let lower = filename.to_lowercase();
    let mut font_size = DEFAULT_FONT_SIZE.to_string();

    let text = if lower.ends_with(".txt") {
        normalize_text(&String::from_utf8_lossy(bytes))
    } else if lower.ends_with(".docx") {
        let (text, detected) = extract_docx(bytes)?;
        if let Some(detected) = detected {
            font_size = detected;
        }
        text
    } else if lower.ends_with(".pdf") {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;
        normalize_text(&raw)
    } else {
        return Err(ExtractError::Unsupported(filename.to_string()));
    };

    let html = text_to_html(&text);
    Ok(ExtractedTemplate {
        text,
        html,
        font_size,
    })
}

/// Unifies line endings, collapses NBSP/tab to plain spaces, trims, and
/// collapses runs of 3+ newlines down to one blank line.
pub fn normalize_text(s: &str) -> String {
    let s = s
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{a0}', " ")
        .replace('\t', " ");
    MULTI_BLANK.replace_all(s.trim(), "\n\n").into_owned()
}

/// A docx is a zip; the text lives in `word/document.xml` as `<w:t>` runs
/// grouped into `<w:p>` paragraphs. Font size (`<w:sz>`, in half-points) is
/// best-effort: the first declaration in the document wins.
fn extract_docx(bytes: &[u8]) -> Result<(String, Option<String>), ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(e.to_string()))?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = document_xml
        .split("</w:p>")
        .map(|para| {
            let runs: Vec<String> = DOCX_RUN_TEXT
                .captures_iter(para)
                .map(|caps| unescape_xml(&caps[1]))
                .collect();
            normalize_text(&runs.concat())
        })
        .collect();

    let font_size = DOCX_FONT_SIZE
        .captures(&document_xml)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .map(|half_points| format_pt(half_points as f32 / 2.0));

    Ok((paragraphs.join("\n\n"), font_size))
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Formats a point size without a useless trailing `.0`.
pub fn format_pt(size: f32) -> String {
    if size.fract() == 0.0 {
        format!("{}pt", size as u32)
    } else {
        format!("{size}pt")
    }
}

/// Browsers post back sizes like `"12.0pt"`; strip the redundant decimal.
pub fn normalize_font_size(raw: &str) -> String {
    match raw.strip_suffix(".0pt") {
        Some(head) => format!("{head}pt"),
        None => raw.to_string(),
    }
}
