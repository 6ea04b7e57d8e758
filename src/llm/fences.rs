//! Locate the fenced JSON block in a completion.
//!
//! The model is asked for a JSON array but answers in prose, usually with
//! the payload wrapped in a ```json fence. The block runs from the FIRST
//! opening fence to the LAST closing fence, so nested or repeated fences
//! inside the payload do not cut it short.

pub const OPEN_FENCE: &str = "```json";
pub const CLOSE_FENCE: &str = "```";

/// Return the trimmed text between the first ```json and the last ```.
///
/// A missing closing fence (or one that only appears before the payload
/// starts) extends the block to the end of the text. A missing opening
/// fence is an error rather than a guess.
pub fn extract_json_block(completion: &str) -> Result<&str, ExtractError> {
    let start = completion
        .find(OPEN_FENCE)
        .map(|pos| pos + OPEN_FENCE.len())
        .ok_or(ExtractError::NoCodeBlock)?;

    let end = match completion.rfind(CLOSE_FENCE) {
        Some(pos) if pos >= start => pos,
        _ => completion.len(),
    };

    Ok(completion[start..end].trim())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No JSON code block found in the response. Please try again.")]
    NoCodeBlock,
}
