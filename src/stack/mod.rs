//! Stack snapshots and their rendered form.

mod render;
pub mod scan;

use std::backtrace::Backtrace;

pub use render::{make_localized_stack_trace, render, LineFilter};
pub use scan::lines;

/// Captures the current call stack, regardless of `RUST_BACKTRACE`.
///
/// The full style is used so that file paths stay absolute and the base path
/// can be stripped from them.
pub fn capture() -> Vec<u8> {
    let bytes = format!("{:#}", Backtrace::force_capture()).into_bytes();
    log::trace!("captured stack snapshot of {} bytes", bytes.len());
    bytes
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::{capture, make_localized_stack_trace, render, LineFilter};

    fn own_frame_lines(text: &str) -> Vec<&str> {
        text.lines()
            .filter(|l| l.contains("src/stack/mod.rs") || l.contains("src/format.rs"))
            .collect()
    }

    #[test]
    fn test_rendered_snapshot_drops_library_and_runtime_frames() {
        let raw = capture();
        assert!(String::from_utf8_lossy(&raw).contains("gqlerrors::stack"));

        let out = make_localized_stack_trace("boom", &raw, &[], "");
        assert!(own_frame_lines(&out).is_empty(), "{:?}", own_frame_lines(&out));
        assert!(!out.contains("gqlerrors::"));
        assert!(!out.contains("std::rt::"));
        assert!(!out.contains("std::thread"));
        assert!(!out.contains("<unknown>"));
    }

    #[test]
    fn test_snapshot_paths_are_stripped_of_base_path() {
        let cwd = env::current_dir().unwrap().to_string_lossy().into_owned();
        let raw = capture();
        assert!(String::from_utf8_lossy(&raw).contains(&cwd));

        // keep this crate's frames so there is something to strip
        let filter = LineFilter {
            base_path: cwd.clone(),
            library_marker: String::new(),
            runtime_markers: vec![],
        };
        let out = render("boom", &raw, &[], &filter);
        assert!(!out.contains(&cwd));
        assert!(out.contains("at /src/stack/mod.rs:"));
    }
}
