use core::fmt;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::dto::Message;

#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Message>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(Message::new(message)),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

impl From<FetchError> for Error {
    fn from(error: FetchError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, &error.message())
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
    }
}

/// Failure of a single upstream read. None of these are retried.
#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(serde_json::Error),
}

impl FetchError {
    /// Text shown next to the manual retry action.
    pub fn message(&self) -> String {
        match self {
            FetchError::Transport(e) => format!("Failed to fetch: {}", e),
            FetchError::Status(status) => format!("HTTP error! status: {}", status.as_u16()),
            FetchError::Decode(e) => format!("Malformed response: {}", e),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "Transport error: {}", e),
            FetchError::Status(status) => write!(f, "Status error: {}", status),
            FetchError::Decode(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => FetchError::Status(status),
            None => FetchError::Transport(error),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Decode(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_carries_code() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "HTTP error! status: 404");
    }

    #[test]
    fn fetch_error_maps_to_bad_gateway() {
        let err: Error = FetchError::Status(StatusCode::SERVICE_UNAVAILABLE).into();
        assert_eq!(err.code, StatusCode::BAD_GATEWAY);
        assert_eq!(err.body.message, "HTTP error! status: 503");
    }

    #[test]
    fn decode_error_is_reported_as_malformed() {
        let parse = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err = FetchError::from(parse);
        assert!(err.message().starts_with("Malformed response"));
    }
}
