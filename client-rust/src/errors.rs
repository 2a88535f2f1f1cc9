use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    /// The request was rejected before anything was sent
    /// (e.g. a draft without a title, an invalid header value).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the store failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-success status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The store has no article with the given id.
    /// Only produced by in-memory stores; the REST store reports a 404 as
    /// `StatusCode`.
    #[error("Article {0} not found")]
    NotFound(String),
}

pub type CollectionResult<T> = Result<T, CollectionError>;
