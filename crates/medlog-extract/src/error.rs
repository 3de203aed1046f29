use thiserror::Error;

/// Failure talking to the extraction endpoint or reading its reply.
///
/// Never escapes [`crate::Extractor`]; it is resolved to a fallback there.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response carried no text content")]
    EmptyReply,
}

/// Why a batch reply was not used
#[derive(Error, Debug)]
pub enum BatchRejection {
    #[error("batch request failed: {0}")]
    Transport(#[source] ExtractError),
    #[error("batch reply is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("batch reply is not a JSON array")]
    NotArray,
    #[error("batch reply has {got} items, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("batch item {index} does not match the field schema: {source}")]
    Element {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}
