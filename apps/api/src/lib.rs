//! StateJobs helper — scrapes statejobs.ny.gov vacancy pages and fills
//! user-uploaded cover-letter templates with the extracted job data.
//!
//! The crate is both the axum service binary and a library so the CLI can
//! reuse the fetch/parse core.

pub mod config;
pub mod errors;
pub mod letter;
pub mod render;
pub mod routes;
pub mod scrape;
pub mod state;
pub mod template;
