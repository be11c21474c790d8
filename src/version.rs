//! Version information.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` sent with every request: `sharpai-sdk-rust/{version}`.
pub fn user_agent() -> String {
    format!("sharpai-sdk-rust/{PKG_VERSION}")
}
