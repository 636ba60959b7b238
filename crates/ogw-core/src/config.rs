//! Paint configuration
//!
//! Options default to the lenient behaviour. `OGW_FAILURE_POLICY` and
//! `OGW_WINDOW` can override them through [`PaintOptions::from_env`]:
//!
//! ```bash
//! OGW_FAILURE_POLICY=abort OGW_WINDOW=1200x630 ./my_app
//! ```

use std::str::FromStr;

/// What happens when a font or image fails for a single node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Skip the node, record a warning, keep painting
    #[default]
    Degrade,
    /// Stop at the first failure
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "degrade" | "warn" => Ok(FailurePolicy::Degrade),
            "abort" | "strict" => Ok(FailurePolicy::Abort),
            other => Err(format!("unknown failure policy '{}'", other)),
        }
    }
}

/// Knobs for a single paint call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintOptions {
    pub failure_policy: FailurePolicy,
    /// Root size used when neither the window nor a background image has one
    pub default_window: (u32, u32),
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Degrade,
            default_window: (1200, 630),
        }
    }
}

impl PaintOptions {
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Defaults overridden by `OGW_FAILURE_POLICY` and `OGW_WINDOW`
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(val) = std::env::var("OGW_FAILURE_POLICY") {
            match val.parse() {
                Ok(policy) => {
                    options.failure_policy = policy;
                    log::info!("Failure policy {:?} set via OGW_FAILURE_POLICY", policy);
                },
                Err(e) => log::warn!("Ignoring OGW_FAILURE_POLICY: {}", e),
            }
        }

        if let Ok(val) = std::env::var("OGW_WINDOW") {
            match parse_window(&val) {
                Some(size) => options.default_window = size,
                None => log::warn!("Ignoring OGW_WINDOW: expected WxH, got '{}'", val),
            }
        }

        options
    }
}

/// Parses `1200x630` style sizes
pub fn parse_window(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}
