//! Field extraction pipeline: fetch a vacancy page, parse its labeled rows
//! into a [`parser::JobRecord`].

pub mod fetch;
pub mod handlers;
pub mod parser;

pub use fetch::{fetch_jobs, get_job_data, HttpJobFetcher, JobFetcher};
pub use parser::JobRecord;
