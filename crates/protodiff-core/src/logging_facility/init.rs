//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `protodiff_core=debug`
    Development,
    /// JSON output, `protodiff_core=info`
    Production,
    /// No output; tests install their own layer via `init_test_capture()`
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is unset or unparsable.
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "protodiff_core=debug",
            Profile::Production => "protodiff_core=info",
            Profile::Test => "off",
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process has any effect.
///
/// # Example
///
/// ```
/// use protodiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(profile.env_filter())
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .init();
        }
        Profile::Test => {
            // A later init_test_capture() in the same process finds a
            // subscriber already set; keep this path side-effect free.
        }
    });
}
