//! Utility modules for the O2-IMS Gateway
//!
//! - **error**: Gateway error type and its HTTP rendering
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging setup

pub use logging::init_logging;

/// Check if a string is an absolute http(s) URL
pub fn is_valid_http_url(input: &str) -> bool {
    match url::Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}
