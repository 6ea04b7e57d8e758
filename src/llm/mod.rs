//! Completion pipeline stages — prompt building, the remote call, and
//! turning the returned text into a candidate dataset.

pub mod client;
pub mod fences;
pub mod parse;
pub mod prompts;

pub use client::{CompletionClient, FetchError};
pub use fences::ExtractError;
pub use parse::ParseError;

use serde_json::Value;

/// Why a completion could not be turned into a candidate.
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Extract the fenced JSON block from `completion` and validate it as a
/// sequence of rows.
pub fn candidate_from_completion(completion: &str) -> Result<Vec<Value>, CandidateError> {
    let payload = fences::extract_json_block(completion)?;
    let rows = parse::parse_candidate(payload)?;
    Ok(rows)
}
