use thiserror::Error;

/// Errors returned by the store-locator backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` carries the
    /// `erro` field of the body when the backend supplied one.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: u16,
        url: String,
        message: Option<String>,
    },

    /// A 2xx response whose body is an `{"erro": ...}` object.
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// The body decoded as JSON but not into the expected shape (e.g. an
    /// object where a list was expected).
    #[error("unexpected payload shape for {context}")]
    UnexpectedShape { context: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record decoded but failed domain validation.
    #[error("malformed record in {context}: {reason}")]
    Malformed { context: String, reason: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// The human-readable error text the backend sent, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_from_status() {
        let err = ApiError::Status {
            status: 400,
            url: "http://localhost/pdvs/proximos".to_string(),
            message: Some("CEP não encontrado".to_string()),
        };
        assert_eq!(err.server_message(), Some("CEP não encontrado"));
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn server_message_from_rejected() {
        let err = ApiError::Rejected("produto inválido".to_string());
        assert_eq!(err.server_message(), Some("produto inválido"));
    }

    #[test]
    fn shape_error_has_no_server_message() {
        let err = ApiError::UnexpectedShape {
            context: "pdvs/proximos".to_string(),
        };
        assert!(err.server_message().is_none());
    }
}
