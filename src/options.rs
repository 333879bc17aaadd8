use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What gets stored in [`FormattedError::diagnostic`](crate::FormattedError::diagnostic).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePolicy {
    /// Unprocessed stack snapshot bytes.
    Raw,
    /// Bordered report with library and runtime frames removed.
    Rendered,
    /// No stack is captured at all.
    Disabled,
}

/// Marker naming frames of this crate.
pub const LIBRARY_MARKER: &str = "gqlerrors";

/// Markers naming frames of the Rust runtime and standard library.
pub const RUNTIME_MARKERS: &[&str] = &[
    "/rustc/",
    "std::rt::",
    "std::sys",
    "std::panic",
    "std::backtrace",
    "std::thread",
    "core::ops::function",
    "__rust_",
    "__libc_start",
    "<unknown>",
];

/// Formatter configuration.
///
/// Every field has a default, so a partial document is enough:
///
/// ```rust
/// use gqlerrors::{CapturePolicy, Options};
///
/// let opts: Options = serde_json::from_str(r#"{"capture":"raw"}"#).unwrap();
/// assert_eq!(opts.capture, CapturePolicy::Raw);
/// assert_eq!(opts.library_marker, "gqlerrors");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Diagnostic capture policy.
    pub capture: CapturePolicy,
    /// Prefix removed from rendered stack lines. `None` means the working
    /// directory of the process at formatter construction.
    pub base_path: Option<PathBuf>,
    /// Lines containing this marker are dropped from rendered stacks.
    pub library_marker: String,
    /// Lines containing any of these are dropped from rendered stacks.
    pub runtime_markers: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            capture: CapturePolicy::Rendered,
            base_path: None,
            library_marker: LIBRARY_MARKER.to_string(),
            runtime_markers: RUNTIME_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CapturePolicy, Options};

    #[test]
    fn test_defaults_fill_missing_fields() {
        let opts: Options =
            serde_json::from_str(r#"{"base_path":"/srv/app","runtime_markers":["rt"]}"#).unwrap();
        assert_eq!(opts.capture, CapturePolicy::Rendered);
        assert_eq!(opts.base_path.as_deref(), Some(std::path::Path::new("/srv/app")));
        assert_eq!(opts.runtime_markers, vec!["rt".to_string()]);
    }

    #[test]
    fn test_disabled_policy_name() {
        let opts: Options = serde_json::from_str(r#"{"capture":"disabled"}"#).unwrap();
        assert_eq!(opts.capture, CapturePolicy::Disabled);
    }
}
