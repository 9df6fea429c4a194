//! Command-line interface: fetch one or more NYS job postings by id and
//! print them as labelled text or JSON. Shares the fetch/parse core with the
//! API service.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use statejobs_api::scrape::fetch::{fetch_jobs, split_job_ids, HttpJobFetcher};
use statejobs_api::scrape::parser::JobRecord;

const DEFAULT_BASE_URL: &str = "https://statejobs.ny.gov/public/vacancyDetailsView.cfm";

#[derive(Debug, Parser)]
#[command(name = "statejobs", about = "Fetch and display New York State job details by job ID.")]
struct Cli {
    /// Comma-separated list of job IDs to fetch (e.g. 12345,67890)
    #[arg(long = "job-ids", short = 'j', required = true)]
    job_ids: String,

    /// Output results as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Base URL of the vacancy-details page
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let job_ids = split_job_ids(&cli.job_ids);

    println!("Welcome to StateJobs Helper.\n");

    let fetcher = HttpJobFetcher::new(cli.base_url, cli.timeout)?;
    let results = fetch_jobs(&fetcher, &job_ids).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for job in &results {
            print_job(job);
        }
    }

    Ok(())
}

fn print_job(job: &JobRecord) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());
    println!("\nJob ID: {}", job.job_id);
    println!("Title: {}", field(&job.title));
    println!("Agency: {}", field(&job.agency));
    println!("Job Grade: {}", field(&job.grade));
    println!("Salary: {}", field(&job.salary));
    println!("Posted On: {}", job.date_posted);
    println!("Applications Due: {}", job.applications_due);
    println!("Contact Name: {}", field(&job.name));
    println!("Email: {}", field(&job.email));
    println!("Address:");
    println!("{}", field(&job.full_address));
}
