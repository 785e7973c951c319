use std::fmt;

#[derive(Debug)]
pub enum FeedError {
    /// The request never produced a readable response (connect, TLS, timeout, body read).
    Transport(reqwest::Error),
    /// Upstream answered with a non-2xx status. The body is kept verbatim for passthrough.
    Rejected { status: u16, body: String },
    /// A 2xx body that is not JSON or does not have the expected feed shape.
    Shape(serde_json::Error),
}

impl FeedError {
    pub fn stage(&self) -> &'static str {
        match self {
            FeedError::Transport(_) => "transport",
            FeedError::Rejected { .. } => "http",
            FeedError::Shape(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        FeedError::Transport(err.without_url())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Shape(err)
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Transport(err) => write!(f, "feed request failed: {err}"),
            FeedError::Rejected { status, .. } => write!(f, "feed service returned HTTP {status}"),
            FeedError::Shape(err) => write!(f, "feed response has unexpected shape: {err}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Transport(err) => Some(err),
            FeedError::Rejected { .. } => None,
            FeedError::Shape(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_message_names_the_cause() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = FeedError::from(parse);
        assert_eq!(err.stage(), "decode");
        assert!(err.to_string().starts_with("feed response has unexpected shape: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rejected_message_has_status_but_not_body() {
        let err = FeedError::Rejected {
            status: 403,
            body: "secret body".to_string(),
        };
        assert_eq!(err.to_string(), "feed service returned HTTP 403");
        assert_eq!(err.stage(), "http");
    }
}
