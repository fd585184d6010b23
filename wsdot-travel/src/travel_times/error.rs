//! Travel times error types.

use crate::transport::TransportError;

/// A decoded response that does not match the travel time record shape.
///
/// `index` is the position of the offending element in a list response and
/// `None` for single-object responses. `path` locates the failing value
/// inside the record (e.g. `StartPoint.Latitude`), empty at the record root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The top-level JSON had the wrong shape (e.g. an object where a list was expected)
    #[error("expected {expected}, got {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    /// A record failed to deserialize
    #[error("{}{message}", location(.index, .path))]
    Record {
        index: Option<usize>,
        path: String,
        message: String,
    },
}

/// "record 2 at StartPoint: ", "record 2: ", "at EndPoint: " or "".
fn location(index: &Option<usize>, path: &str) -> String {
    match (index, path.is_empty()) {
        (Some(i), true) => format!("record {i}: "),
        (Some(i), false) => format!("record {i} at {path}: "),
        (None, true) => String::new(),
        (None, false) => format!("at {path}: "),
    }
}

impl ValidationError {
    pub(crate) fn record(
        index: Option<usize>,
        err: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        let path = if err.path().iter().next().is_some() {
            err.path().to_string()
        } else {
            String::new()
        };
        Self::Record {
            index,
            path,
            message: err.into_inner().to_string(),
        }
    }

    /// Location of the rejected value within its record; empty at the root.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::Record { path, .. } => path,
            ValidationError::Shape { .. } => "",
        }
    }

    /// Position of the rejected element in a list response, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::Record { index, .. } => *index,
            ValidationError::Shape { .. } => None,
        }
    }
}

/// Errors from the travel times client.
///
/// The two kinds are disjoint: a transport failure means no payload was
/// examined, a validation failure means the payload arrived but was rejected.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid travel time data: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
