//! Transport error type.

use std::fmt;

/// An HTTP-level failure talking to the WSDOT traveler API.
///
/// Covers bad status codes, unexpected content types, empty bodies, and
/// network failures. Payload shape problems are reported separately by
/// [`crate::travel_times::ValidationError`].
#[derive(Debug, thiserror::Error)]
pub struct TransportError {
    message: String,
    url: String,
    status: Option<u16>,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportError {
    /// Create an error for a request to `url`.
    pub fn new(message: impl Into<String>, url: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            url: url.into(),
            status,
            source: None,
        }
    }

    pub(crate) fn with_source(mut self, source: reqwest::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Human-readable description, e.g. "unexpected status".
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The request URL, without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP status code, when one was received and is relevant.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.url.is_empty() {
            if !self.message.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "calling {}", self.url)?;
            if let Some(status) = self.status {
                write!(f, " got {status}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransportError::new("unexpected status", "http://host/api/x", Some(503));
        assert_eq!(
            err.to_string(),
            "unexpected status calling http://host/api/x got 503"
        );

        let err = TransportError::new("received no data", "http://host/api/x", None);
        assert_eq!(err.to_string(), "received no data calling http://host/api/x");

        let err = TransportError::new("", "http://host/api/x", Some(404));
        assert_eq!(err.to_string(), "calling http://host/api/x got 404");

        let err = TransportError::new("pool unavailable", "", Some(500));
        assert_eq!(err.to_string(), "pool unavailable");
    }

    #[test]
    fn accessors() {
        let err = TransportError::new("unexpected data type", "http://host/", Some(200));
        assert_eq!(err.message(), "unexpected data type");
        assert_eq!(err.url(), "http://host/");
        assert_eq!(err.status(), Some(200));
        assert!(std::error::Error::source(&err).is_none());
    }
}
