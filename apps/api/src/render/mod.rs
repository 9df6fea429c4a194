//! Document rendering. The primary path shells out to wkhtmltopdf; when the
//! binary is absent or fails, the letter is stripped back to text and
//! paginated by [`text_layout`]. The caller always gets PDF bytes unless
//! both paths fail.

pub mod text_layout;
pub mod wkhtmltopdf;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer failed: {0}")]
    Renderer(String),

    #[error("PDF write error: {0}")]
    Pdf(String),
}

/// Holds the renderer capability resolved once at startup; call sites never
/// re-probe for the binary.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    wkhtmltopdf: Option<PathBuf>,
}

impl PdfRenderer {
    /// Resolves the primary capability: an explicit `WKHTMLTOPDF_PATH`
    /// override wins, otherwise PATH is probed for the binary.
    pub fn resolve(config: &Config) -> PdfRenderer {
        let wkhtmltopdf = match &config.wkhtmltopdf_path {
            Some(path) => {
                let path = PathBuf::from(path);
                if path.is_file() {
                    Some(path)
                } else {
                    warn!("WKHTMLTOPDF_PATH={} does not exist; using text fallback", path.display());
                    None
                }
            }
            None => find_in_path("wkhtmltopdf"),
        };
        match &wkhtmltopdf {
            Some(path) => info!("wkhtmltopdf found at {}", path.display()),
            None => info!("wkhtmltopdf not found; PDF downloads use the text-layout fallback"),
        }
        PdfRenderer { wkhtmltopdf }
    }

    /// Builds a renderer with no primary capability (text fallback only).
    pub fn fallback_only() -> PdfRenderer {
        PdfRenderer { wkhtmltopdf: None }
    }

    pub fn has_primary(&self) -> bool {
        self.wkhtmltopdf.is_some()
    }

    /// Renders the letter HTML to PDF bytes. Primary-path failures are logged
    /// and recovered via the fallback, never surfaced to the caller.
    pub async fn render(&self, html: &str, font_size: &str) -> Result<Vec<u8>, RenderError> {
        if let Some(binary) = &self.wkhtmltopdf {
            match wkhtmltopdf::render_html(binary, html, font_size).await {
                Ok(pdf) => return Ok(pdf),
                Err(e) => warn!("wkhtmltopdf failed, falling back to text layout: {e}"),
            }
        }
        let text = text_layout::strip_html(html);
        text_layout::text_to_pdf(&text, font_size)
    }
}

fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}
