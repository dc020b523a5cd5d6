use thiserror::Error;

/// Failure of a single backend call.
///
/// This is the only error that crosses the [`crate::Gateway`] boundary. It
/// carries strings rather than the underlying client error so it can be cloned
/// into UI state and compared in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl TransportError {
    /// HTTP status code, when the server produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else {
            match e.status() {
                Some(status) => TransportError::Status {
                    status: status.as_u16(),
                    body: e.to_string(),
                },
                None => TransportError::Network(e.to_string()),
            }
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = TransportError::Status {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "server responded with 404: not found");
        assert_eq!(TransportError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_json_errors_are_decode_errors() {
        let err: TransportError = serde_json::from_str::<Vec<i32>>("{").unwrap_err().into();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
