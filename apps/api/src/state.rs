use std::sync::Arc;

use crate::config::Config;
use crate::letter::greeting::NameClassifier;
use crate::render::PdfRenderer;
use crate::scrape::fetch::JobFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable page fetcher; tests substitute a stub.
    pub fetcher: Arc<dyn JobFetcher>,
    /// Greeting strategy. Default: rule-based entity classifier; the plain
    /// heuristic when `GREETING_NER=false`.
    pub classifier: Arc<dyn NameClassifier>,
    /// Renderer with the primary capability resolved once at startup.
    pub renderer: PdfRenderer,
}
