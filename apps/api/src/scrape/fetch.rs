//! Vacancy-page fetching. The fetcher is a trait so tests (and any future
//! cache) can stand in for the live site; the HTTP implementation carries a
//! shared `reqwest::Client` with the configured timeout.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::scrape::parser::JobRecord;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(u16),
}

/// Fetches the raw HTML of one vacancy page.
#[async_trait]
pub trait JobFetcher: Send + Sync {
    async fn fetch_page(&self, job_id: &str) -> Result<String, FetchError>;
}

/// Live fetcher against statejobs.ny.gov.
pub struct HttpJobFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJobFetcher {
    /// `timeout_secs` bounds the whole request; a hung upstream degrades to a
    /// skipped job id rather than an unbounded wait.
    pub fn new(base_url: String, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(HttpJobFetcher { client, base_url })
    }
}

#[async_trait]
impl JobFetcher for HttpJobFetcher {
    async fn fetch_page(&self, job_id: &str) -> Result<String, FetchError> {
        let url = format!("{}?id={}", self.base_url, job_id);
        info!("Fetching job {job_id} from {url}");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Fetches and parses one job id.
pub async fn get_job_data(
    fetcher: &dyn JobFetcher,
    job_id: &str,
) -> Result<JobRecord, FetchError> {
    let html = fetcher.fetch_page(job_id).await?;
    Ok(JobRecord::from_page(job_id, &html))
}

/// Batch lookup. Ids that fail to fetch are logged and dropped; the rest come
/// back in input order. Partial results are expected, not an error.
pub async fn fetch_jobs(fetcher: &dyn JobFetcher, job_ids: &[String]) -> Vec<JobRecord> {
    let mut results = Vec::new();
    for job_id in job_ids {
        match get_job_data(fetcher, job_id).await {
            Ok(record) => results.push(record),
            Err(e) => warn!("Error fetching job {job_id}: {e}"),
        }
    }
    results
}

/// Splits a comma-separated id list, trimming whitespace and dropping empties.
pub fn split_job_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub fetcher: serves a minimal page for known ids, fails the rest.
    struct StubFetcher {
        known: Vec<String>,
    }

    #[async_trait]
    impl JobFetcher for StubFetcher {
        async fn fetch_page(&self, job_id: &str) -> Result<String, FetchError> {
            if self.known.iter().any(|id| id == job_id) {
                Ok(format!(
                    r#"<div id="information"><p class="row">
                        <span class="leftCol">Title</span>
                        <span class="rightCol">Job {job_id}</span>
                    </p></div>"#
                ))
            } else {
                Err(FetchError::Status(404))
            }
        }
    }

    #[tokio::test]
    async fn test_batch_skips_failed_id_and_preserves_order() {
        let fetcher = StubFetcher {
            known: vec!["1".to_string(), "3".to_string()],
        };
        let ids: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
        let results = fetch_jobs(&fetcher, &ids).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].job_id, "1");
        assert_eq!(results[1].job_id, "3");
        assert_eq!(results[0].title.as_deref(), Some("Job 1"));
    }

    #[tokio::test]
    async fn test_all_failed_ids_yield_empty_batch() {
        let fetcher = StubFetcher { known: vec![] };
        let ids = vec!["9".to_string()];
        assert!(fetch_jobs(&fetcher, &ids).await.is_empty());
    }

    #[test]
    fn test_split_job_ids_trims_and_drops_empties() {
        assert_eq!(split_job_ids(" 1, 2 ,,3 "), vec!["1", "2", "3"]);
        assert!(split_job_ids("").is_empty());
    }
}
