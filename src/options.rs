//! Configuration options for section export.

use std::time::Duration;

/// Configuration for the asset-fetching side of an extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use offline_academy::Options;
///
/// let options = Options {
///     user_agent: "my-exporter/1.0".to_string(),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// User-Agent header sent with asset requests.
    ///
    /// Default: `"offline-academy/0.1"`
    pub user_agent: String,

    /// Per-request timeout for asset fetches. No other timeout is imposed;
    /// a hung request stalls only the final batch await, not the page scan.
    ///
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            user_agent: "offline-academy/0.1".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();
        assert_eq!(opts.user_agent, "offline-academy/0.1");
        assert_eq!(opts.request_timeout, Duration::from_secs(30));
    }
}
