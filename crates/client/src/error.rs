use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-2xx status. `message` is the
    /// backend-provided error text when the body carried one.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Invalid response payload: {0}")]
    Decode(reqwest::Error),

    #[error("Invalid backend base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err)
        } else {
            ApiError::Transport(err)
        }
    }
}

impl ApiError {
    /// True when the failure came from the backend rejecting the request
    /// (as opposed to the request never completing).
    pub fn is_backend(&self) -> bool {
        matches!(self, ApiError::Backend { .. })
    }
}
