use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::SourceLocation;

/// Stack information attached to a formatted error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Unprocessed call-stack snapshot.
    Raw(Vec<u8>),
    /// Bordered, filtered report built by
    /// [`make_localized_stack_trace`](crate::stack::make_localized_stack_trace).
    Rendered(String),
}

impl Diagnostic {
    /// Text form of the diagnostic. Raw snapshots are decoded lossily.
    pub fn to_text(&self) -> String {
        match self {
            Diagnostic::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Diagnostic::Rendered(text) => text.clone(),
        }
    }
}

/// Normalized, serialization-ready error record.
///
/// Only `message` and `locations` take part in serialization, the diagnostic
/// stays in process.
///
/// ```rust
/// use gqlerrors::{FormattedError, SourceLocation};
///
/// let err = FormattedError::new("boom", vec![SourceLocation::new(1, 2)]);
/// let json = serde_json::to_string(&err).unwrap();
/// assert_eq!(json, r#"{"message":"boom","locations":[{"line":1,"column":2}]}"#);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct FormattedError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<SourceLocation>,
    #[serde(skip)]
    pub diagnostic: Option<Diagnostic>,
}

impl FormattedError {
    pub fn new<M: Into<String>>(message: M, locations: Vec<SourceLocation>) -> Self {
        Self {
            message: message.into(),
            locations,
            diagnostic: None,
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Option<Diagnostic>) -> Self {
        self.diagnostic = diagnostic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostic, FormattedError};
    use crate::location::SourceLocation;

    #[test]
    fn test_diagnostic_is_not_serialized() {
        let err = FormattedError::new("boom", vec![])
            .with_diagnostic(Some(Diagnostic::Rendered("secret frames".into())));
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"message":"boom","locations":[]}"#);
    }

    #[test]
    fn test_missing_locations_deserialize_empty() {
        let err: FormattedError = serde_json::from_str(r#"{"message":"boom"}"#).unwrap();
        assert!(err.locations.is_empty());
        assert_eq!(err.diagnostic, None);
    }

    #[test]
    fn test_display_is_message() {
        let err = FormattedError::new("field X not found", vec![]);
        assert_eq!(err.to_string(), "field X not found");
    }

    #[test]
    fn test_raw_diagnostic_text() {
        let d = Diagnostic::Raw(b"0: main\n".to_vec());
        assert_eq!(d.to_text(), "0: main\n");
    }

    #[test]
    fn test_batch_serializes_in_order() {
        let errs = vec![
            FormattedError::new("a \"quoted\"", vec![SourceLocation::new(1, 1)])
                .with_diagnostic(Some(Diagnostic::Raw(b"frames".to_vec()))),
            FormattedError::new("line\nbreak", vec![]),
        ];
        assert_eq!(
            serde_json::to_string(&errs).unwrap(),
            r#"[{"message":"a \"quoted\"","locations":[{"line":1,"column":1}]},{"message":"line\nbreak","locations":[]}]"#
        );
    }
}
