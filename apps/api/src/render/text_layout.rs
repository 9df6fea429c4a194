//! Fallback renderer: strips the letter HTML back to plain text and lays it
//! out manually on US-letter pages with printpdf's built-in Helvetica.
//!
//! Pagination is a pure function over (text, font size) so the page-break
//! behavior is testable without touching a PDF writer.

use std::sync::LazyLock;

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use regex::Regex;

use super::RenderError;

// US letter in points.
const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
/// Top/bottom margin; the cursor starts this far below the top edge and a
/// page breaks when it passes this close to the bottom.
const MARGIN_PT: f32 = 72.0;

static PARAGRAPH_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?p[^>]*>").expect("paragraph-tag regex compiles"));
static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br\s*/?>").expect("line-break regex compiles"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag regex compiles"));
static MULTI_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-line regex compiles"));

/// Maps `<p>` to a paragraph break and `<br>` to a line break; every other
/// tag is discarded.
pub fn strip_html(html: &str) -> String {
    let text = PARAGRAPH_TAG.replace_all(html, "\n\n");
    let text = LINE_BREAK_TAG.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    MULTI_BLANK.replace_all(text.trim(), "\n\n").into_owned()
}

/// Parses a `"12pt"`-style size; anything malformed or non-positive falls
/// back to 12.
pub fn parse_font_size(font_size: &str) -> f32 {
    match font_size.trim_end_matches("pt").trim().parse::<f32>() {
        Ok(size) if size > 0.0 => size,
        _ => 12.0,
    }
}

/// One line placed on a page, `y_pt` measured from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub y_pt: f32,
    pub text: String,
}

/// Splits plain text into pages of positioned lines. The cursor starts
/// `MARGIN_PT` below the top edge and advances `font_size + 2` per line; a
/// blank-line paragraph gap advances the same amount. A new page starts when
/// the cursor passes within `MARGIN_PT` of the bottom.
pub fn paginate(text: &str, size_pt: f32) -> Vec<Vec<PositionedLine>> {
    let line_height = size_pt + 2.0;
    let top = PAGE_HEIGHT_PT - MARGIN_PT;

    let mut pages: Vec<Vec<PositionedLine>> = Vec::new();
    let mut current: Vec<PositionedLine> = Vec::new();
    let mut y = top;

    for paragraph in text.split("\n\n") {
        let lines: Vec<&str> = paragraph
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            y -= line_height;
        } else {
            for line in lines {
                current.push(PositionedLine {
                    y_pt: y,
                    text: line.to_string(),
                });
                y -= line_height;
                if y < MARGIN_PT {
                    pages.push(std::mem::take(&mut current));
                    y = top;
                }
            }
        }

        // Paragraph gap.
        y -= line_height;
        if y < MARGIN_PT {
            pages.push(std::mem::take(&mut current));
            y = top;
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

/// Writes plain text to a paginated PDF at the given font size.
pub fn text_to_pdf(text: &str, font_size: &str) -> Result<Vec<u8>, RenderError> {
    let size_pt = parse_font_size(font_size);
    let pages = paginate(text, size_pt);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Cover Letter",
        Mm::from(Pt(PAGE_WIDTH_PT)),
        Mm::from(Pt(PAGE_HEIGHT_PT)),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (i, page_lines) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) =
                doc.add_page(Mm::from(Pt(PAGE_WIDTH_PT)), Mm::from(Pt(PAGE_HEIGHT_PT)), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };
        for line in page_lines {
            layer.use_text(
                line.text.clone(),
                size_pt,
                Mm::from(Pt(MARGIN_PT)),
                Mm::from(Pt(line.y_pt)),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_maps_tags_to_breaks() {
        assert_eq!(strip_html("<p>a</p><br><b>x</b>"), "a\n\nx");
        assert_eq!(strip_html("<p>a<br>b</p>"), "a\nb");
        assert_eq!(strip_html("<p><br></p><p>c</p>"), "c");
    }

    #[test]
    fn test_strip_html_handles_self_closing_breaks() {
        assert_eq!(strip_html("a<br/>b<br />c"), "a\nb\nc");
    }

    #[test]
    fn test_parse_font_size_defaults_on_garbage() {
        assert_eq!(parse_font_size("12pt"), 12.0);
        assert_eq!(parse_font_size("11.5pt"), 11.5);
        assert_eq!(parse_font_size("abc"), 12.0);
        assert_eq!(parse_font_size("-3pt"), 12.0);
    }

    #[test]
    fn test_short_text_fits_one_page() {
        let pages = paginate("Header\n\nOne paragraph.", 12.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 2);
        // Cursor starts 72pt below the top edge.
        assert_eq!(pages[0][0].y_pt, 792.0 - 72.0);
    }

    #[test]
    fn test_lines_advance_by_font_size_plus_two() {
        let pages = paginate("a\nb", 12.0);
        assert_eq!(pages[0][0].y_pt - pages[0][1].y_pt, 14.0);
    }

    #[test]
    fn test_paragraph_gap_is_one_extra_line() {
        let pages = paginate("a\n\nb", 12.0);
        assert_eq!(pages[0][0].y_pt - pages[0][1].y_pt, 28.0);
    }

    #[test]
    fn test_long_text_breaks_page_within_margins() {
        let many_lines = vec!["line"; 100].join("\n");
        let pages = paginate(&many_lines, 12.0);
        // 14pt line advance between 720 and 72 fits 47 lines per page.
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), 100);
        assert_eq!(pages[0].len(), 47);
        // Every placed line stays inside the margins.
        for page in &pages {
            for line in page {
                assert!(line.y_pt >= 72.0 && line.y_pt <= 720.0);
            }
        }
        // Larger font → fewer lines per page → more pages.
        let big = paginate(&many_lines, 24.0);
        assert!(big.len() > pages.len());
    }

    #[test]
    fn test_text_to_pdf_produces_nonempty_pdf() {
        let bytes = text_to_pdf("Header\n\nBody paragraph.", "12pt").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_multi_page_pdf_is_still_valid() {
        let many_lines = vec!["line"; 120].join("\n");
        let bytes = text_to_pdf(&many_lines, "14pt").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
