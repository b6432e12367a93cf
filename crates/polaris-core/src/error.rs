use thiserror::Error;

/// Result alias used throughout polaris-core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Not authenticated. Please run 'polaris auth login' first")]
    NotAuthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized: your session has expired. Please run 'polaris auth login' again")]
    SessionExpired,

    #[error("Request failed with status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("{error} - {description}")]
    OAuth {
        status: u16,
        error: String,
        description: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid server response: {0}")]
    InvalidServerResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Truncate a response body to avoid printing excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => Error::SessionExpired,
            code => Error::Server {
                status: code,
                body: Self::truncate_body(body),
            },
        }
    }

    /// True when the error means the stored token can no longer be used.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::NotAuthenticated | Error::SessionExpired)
    }
}
