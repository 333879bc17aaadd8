use thiserror::Error;

use crate::location::SourceLocation;

/// Error raised while executing a query that knows where in the query
/// document it happened.
///
/// ```rust
/// use gqlerrors::{Error, SourceLocation};
///
/// let err = Error::new("field X not found").at(2, 5);
/// assert_eq!(err.to_string(), "field X not found");
/// assert_eq!(err.locations, vec![SourceLocation::new(2, 5)]);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Error {
    pub message: String,
    pub locations: Vec<SourceLocation>,
}

impl Error {
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
        }
    }

    pub fn with_locations<M: Into<String>>(message: M, locations: Vec<SourceLocation>) -> Self {
        Self {
            message: message.into(),
            locations,
        }
    }

    /// Appends a location, keeping the order in which they were reported.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.locations.push(SourceLocation::new(line, column));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::location::SourceLocation;

    #[test]
    fn test_locations_keep_order() {
        let err = Error::new("boom").at(3, 1).at(1, 7);
        assert_eq!(
            err.locations,
            vec![SourceLocation::new(3, 1), SourceLocation::new(1, 7)]
        );
    }
}
