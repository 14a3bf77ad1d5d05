//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version banner logged at startup, e.g. `factmod-server 0.1.0`.
#[must_use]
pub fn banner(binary: &str) -> String {
    format!("{binary} {}", version())
}
