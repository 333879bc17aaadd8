//! Converts errors raised while executing a query into records that are safe
//! to hand to a client: a message, the locations in the query document the
//! error points at, and an optional stack diagnostic kept in process.
//!
//! - an already formatted error is returned as is
//! - a located [`Error`] keeps its message and locations
//! - any other error keeps its message and gets no locations
//!
//! ```rust
//! use gqlerrors::{format_errors, Error, SourceLocation};
//!
//! let missing = Error::new("field X not found").at(2, 5);
//! let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
//!
//! let formatted = format_errors([&missing as &(dyn std::error::Error + 'static), &io]);
//! assert_eq!(formatted[0].locations, vec![SourceLocation::new(2, 5)]);
//! assert!(formatted[1].locations.is_empty());
//!
//! assert_eq!(
//!     serde_json::to_string(&formatted).unwrap(),
//!     r#"[{"message":"field X not found","locations":[{"line":2,"column":5}]},{"message":"boom","locations":[]}]"#
//! );
//! ```

pub mod error;
pub mod format;
pub mod formatted;
pub mod location;
pub mod options;
pub mod stack;

pub use error::Error;
pub use format::{
    classify, format_error, format_errors, new_formatted_error, Classified, Formatter,
};
pub use formatted::{Diagnostic, FormattedError};
pub use location::SourceLocation;
pub use options::{CapturePolicy, Options};
