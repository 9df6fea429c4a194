//! Text → structured-HTML reflow for the cover-letter editor.
//!
//! The document splits into a header block (addresses, date, subject) and a
//! body block. Header lines keep their line breaks as `<br>`; body blocks are
//! reflowed into single paragraphs with blank paragraphs between them. That
//! asymmetry is the contract the editor relies on: re-wrapping an address
//! would mangle it, while letter prose should flow with the page width.

/// Explicit marker a template may use to end its header block. Without it the
/// split falls back to the first blank line.
pub const HEADER_MARKER: &str = "---END HEADER---";

const BLANK_PARAGRAPH: &str = "<p><br></p>";

/// Converts normalized plain text into paragraph/line-break HTML.
pub fn text_to_html(text: &str) -> String {
    let (header_raw, body_raw) = split_header_body(text);
    format!("{}{}", header_to_html(header_raw), body_to_html(body_raw))
}

fn split_header_body(text: &str) -> (&str, &str) {
    if let Some((header, body)) = text.split_once(HEADER_MARKER) {
        (header, body)
    } else if let Some((header, body)) = text.split_once("\n\n") {
        (header, body)
    } else {
        (text, "")
    }
}

/// Header: blank-line-delimited chunks become paragraphs; lines within a
/// chunk are joined with inline breaks; an empty chunk is an explicit blank
/// paragraph.
fn header_to_html(header_raw: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for chunk in header_raw.trim().split("\n\n") {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            parts.push(BLANK_PARAGRAPH.to_string());
        } else {
            let lines: Vec<&str> = chunk
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            parts.push(format!("<p>{}</p>", lines.join(" <br> ")));
        }
    }
    parts.concat()
}

/// Body: one mandatory blank paragraph first, then each block reflowed into a
/// single paragraph (internal newlines become spaces) followed by a blank
/// paragraph; a trailing blank paragraph is dropped.
fn body_to_html(body_raw: &str) -> String {
    let mut parts: Vec<String> = vec![BLANK_PARAGRAPH.to_string()];
    for block in body_raw.trim().split("\n\n") {
        let block = block.trim();
        if !block.is_empty() {
            parts.push(format!("<p>{}</p>", block.replace('\n', " ")));
            parts.push(BLANK_PARAGRAPH.to_string());
        }
    }
    if parts.last().map(String::as_str) == Some(BLANK_PARAGRAPH) {
        parts.pop();
    }
    parts.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lines_keep_breaks_body_reflows() {
        let out = text_to_html("Line1\nLine2\n\nPara one.\n\nPara two.");
        assert_eq!(
            out,
            "<p>Line1 <br> Line2</p>\
             <p><br></p><p>Para one.</p><p><br></p><p>Para two.</p>"
        );
    }

    #[test]
    fn test_explicit_header_marker_wins_over_blank_line() {
        let out = text_to_html("A\n\nB\n---END HEADER---\nBody here.");
        // Both A and B belong to the header when the marker is present.
        assert_eq!(out, "<p>A</p><p>B</p><p><br></p><p>Body here.</p>");
    }

    #[test]
    fn test_body_internal_newlines_become_spaces() {
        let out = text_to_html("Header\n\nwrapped\nbody\nlines");
        assert_eq!(out, "<p>Header</p><p><br></p><p>wrapped body lines</p>");
    }

    #[test]
    fn test_no_trailing_blank_paragraph() {
        let out = text_to_html("H\n\nP1\n\nP2");
        assert!(!out.ends_with(BLANK_PARAGRAPH));
        assert!(out.ends_with("<p>P2</p>"));
    }

    #[test]
    fn test_header_only_document() {
        let out = text_to_html("Just a header line");
        // Empty body: its mandatory blank paragraph is itself trailing, so it
        // is dropped and only the header paragraph remains.
        assert_eq!(out, "<p>Just a header line</p>");
    }

    #[test]
    fn test_blank_paragraph_separates_header_and_body() {
        let out = text_to_html("Header\n\nBody");
        assert_eq!(out, "<p>Header</p><p><br></p><p>Body</p>");
    }
}
