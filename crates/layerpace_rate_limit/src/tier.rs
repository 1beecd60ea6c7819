//! The two rate-limit tiers enforced by the remote service.

use crate::ThrottleConfig;
use serde::Serialize;
use std::time::Duration;

/// Which limit a response reports on.
///
/// The server does not name the tier. It only reports the window length,
/// and each tier has its own fixed window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RateLimitTier {
    /// Global limit shared by every request.
    Average,
    /// Limit per resource type and operation.
    Burst,
}

impl RateLimitTier {
    /// Identify the tier from a reported window length.
    ///
    /// Returns `None` for a window matching neither tier.
    pub fn classify(window: Duration, config: &ThrottleConfig) -> Option<Self> {
        if window == config.average_window() {
            Some(Self::Average)
        } else if window == config.burst_window() {
            Some(Self::Burst)
        } else {
            None
        }
    }

    /// Window length configured for this tier.
    pub fn window(self, config: &ThrottleConfig) -> Duration {
        match self {
            Self::Average => config.average_window(),
            Self::Burst => config.burst_window(),
        }
    }
}
