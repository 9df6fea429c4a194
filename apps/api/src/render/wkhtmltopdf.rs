//! Primary renderer: pipes a styled HTML document through the wkhtmltopdf
//! binary (stdin → stdout, no temp files).

use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::RenderError;

/// Inline CSS injected into every letter. `{font_size}` is replaced with the
/// requested size; everything else pins the editor's look: Liberation Sans,
/// tight line height, no paragraph margins.
const LETTER_CSS: &str = r#"
    body, body * {
        font-family: "Liberation Sans", sans-serif !important;
        font-size: {font_size} !important;
        line-height: 1.2 !important;
        margin: 0;
        padding: 0;
    }
    p {
        margin-top: 0;
        margin-bottom: 0;
        text-indent: 0;
    }
    p br {
        line-height: 0.8;
        display: block;
        content: "";
        margin-bottom: -0.2em;
    }
"#;

/// Wraps the letter body in a full HTML document with the letter CSS.
pub fn styled_document(html: &str, font_size: &str) -> String {
    let css = LETTER_CSS.replace("{font_size}", font_size);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <style>{css}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        html.trim()
    )
}

/// Runs wkhtmltopdf on the styled document. Letter paper, 1in margins.
/// Any spawn failure, non-zero exit, or empty output is an error the caller
/// recovers from by falling back to the text layout.
pub async fn render_html(
    binary: &Path,
    html: &str,
    font_size: &str,
) -> Result<Vec<u8>, RenderError> {
    let styled = styled_document(html, font_size);

    let mut child = Command::new(binary)
        .args([
            "--page-size",
            "Letter",
            "--margin-top",
            "1in",
            "--margin-right",
            "1in",
            "--margin-bottom",
            "1in",
            "--margin-left",
            "1in",
            "--encoding",
            "UTF-8",
            "--quiet",
            "-",
            "-",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(styled.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(RenderError::Renderer(format!(
            "wkhtmltopdf exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    if output.stdout.is_empty() {
        return Err(RenderError::Renderer("wkhtmltopdf produced no output".to_string()));
    }
    Ok(output.stdout)
}
