//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string, e.g. `checkers 0.1.0 (2026-10-17 1a2b3c4)`.
pub fn version_line() -> String {
    format!(
        "checkers {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
