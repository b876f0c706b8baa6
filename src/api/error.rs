use thiserror::Error;

/// Failure taxonomy for remote calls. User-initiated actions surface these in
/// a toast; background side effects only log them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response payload: {0}")]
    Decode(String),

    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("not signed in")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}
