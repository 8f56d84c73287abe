use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("telegram {method} failed ({status}): {body}")]
    Api {
        method: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("getFile returned no file path")]
    MissingFilePath,
}

pub type Result<T> = std::result::Result<T, Error>;
