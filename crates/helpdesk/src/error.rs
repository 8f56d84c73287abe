use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("helpdesk {operation} failed ({status}): {body}")]
    Api {
        operation: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("signing secret is not usable as an HMAC key")]
    InvalidSecret,
}

pub type Result<T> = std::result::Result<T, Error>;
