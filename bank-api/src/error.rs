use reqwest::StatusCode;
use serde::Deserialize;

/// Errors returned by the backend client.
///
/// `Api` carries the message extracted from a non-2xx response body:
/// the body is parsed as JSON and its `message` field is used when
/// present, otherwise the raw body text stands in.
#[derive(Debug)]
pub enum BankApiError {
    Api(StatusCode, String),
    Transport(reqwest::Error),
}

impl BankApiError {
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        BankApiError::Api(status, extract_message(body))
    }

    /// The human-readable message to surface to the user.
    pub fn message(&self) -> String {
        match self {
            BankApiError::Api(_, message) => message.clone(),
            BankApiError::Transport(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.to_string(),
    }
}

impl From<reqwest::Error> for BankApiError {
    fn from(value: reqwest::Error) -> Self {
        BankApiError::Transport(value)
    }
}

impl std::fmt::Display for BankApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BankApiError::Api(status, message) => write!(f, "({}) {}", status, message),
            BankApiError::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for BankApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_body_yields_message_field() {
        let err = BankApiError::from_response(
            StatusCode::NOT_FOUND,
            r#"{"message":"not found"}"#,
        );
        assert_eq!(err.message(), "not found");
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        let err = BankApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn json_without_message_field_falls_back_to_raw_text() {
        let body = r#"{"error":"denied"}"#;
        let err = BankApiError::from_response(StatusCode::FORBIDDEN, body);
        assert_eq!(err.message(), body);
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = BankApiError::Api(StatusCode::BAD_REQUEST, "Insufficient funds".to_string());
        assert_eq!(err.to_string(), "(400 Bad Request) Insufficient funds");
    }
}
