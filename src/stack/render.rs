use crate::options::Options;
use crate::stack::scan::{frames, lines};

const BORDER: &str =
    "|---------------------------------------------------------------------------\n";

/// Decides which stack lines survive rendering and how they are shortened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    pub base_path: String,
    pub library_marker: String,
    pub runtime_markers: Vec<String>,
}

impl LineFilter {
    /// Filter with the default markers stripping `base_path`.
    pub fn new<P: Into<String>>(base_path: P) -> Self {
        Self::from_options(&Options::default(), base_path.into())
    }

    pub fn from_options(options: &Options, base_path: String) -> Self {
        Self {
            base_path,
            library_marker: options.library_marker.clone(),
            runtime_markers: options.runtime_markers.clone(),
        }
    }

    /// `true` if the line belongs to this library or to the runtime.
    pub fn is_noise(&self, line: &str) -> bool {
        (!self.library_marker.is_empty() && line.contains(self.library_marker.as_str()))
            || self
                .runtime_markers
                .iter()
                .any(|m| !m.is_empty() && line.contains(m.as_str()))
    }

    /// Removes every occurrence of the base path.
    pub fn strip(&self, line: &str) -> String {
        if self.base_path.is_empty() {
            return line.to_string();
        }
        line.replace(self.base_path.as_str(), "")
    }
}

/// Builds the bordered report out of a raw stack dump.
///
/// ```rust
/// use gqlerrors::stack::make_localized_stack_trace;
///
/// let stack = b"at /srv/app/src/resolvers.rs:10\nat /rustc/abc/library/std/src/rt.rs:1\n";
/// let out = make_localized_stack_trace("boom", stack, &["user", "email"], "/srv/app");
///
/// assert!(out.contains("|  graphql error on field user - email\n"));
/// assert!(out.contains("|  at /src/resolvers.rs:10\n"));
/// assert!(!out.contains("rt.rs"));
/// ```
pub fn make_localized_stack_trace(
    msg: &str,
    stack_trace: &[u8],
    field_names: &[&str],
    base_path: &str,
) -> String {
    render(msg, stack_trace, field_names, &LineFilter::new(base_path))
}

/// Same as [`make_localized_stack_trace`] with an explicit line filter.
pub fn render(msg: &str, stack_trace: &[u8], field_names: &[&str], filter: &LineFilter) -> String {
    let text = String::from_utf8_lossy(stack_trace);

    let mut out = String::from("\n\n");
    out.push_str(BORDER);
    out.push_str("|  graphql error");
    if !field_names.is_empty() {
        out.push_str(" on field ");
        out.push_str(&field_names.join(" - "));
    }
    out.push('\n');
    out.push_str(BORDER);
    out.push_str("|\n|  ");
    out.push_str(msg);
    out.push_str("\n|  ...\n");

    let lines = lines(&text);
    for frame in frames(&lines) {
        // a frame goes away together with its location lines
        if frame.iter().any(|line| filter.is_noise(line)) {
            continue;
        }
        for line in frame {
            out.push_str("|  ");
            out.push_str(&filter.strip(line));
            out.push('\n');
        }
    }

    out.push_str("|  ...\n");
    out.push_str(BORDER);
    out
}
