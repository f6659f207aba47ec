/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

use std::borrow::Cow;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::time::Instant;

use super::Sample;

/// Wall clock anchored to a monotonic instant
///
/// Captures unix time once and advances it with [`tokio::time::Instant`],
/// so samples stamped during a paused-time test land into predictable seconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RunClock {
    timestamp: Duration,
    instant: Instant,
}

impl RunClock {
    pub fn now() -> Self {
        Self {
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default(),
            instant: Instant::now(),
        }
    }

    /// Anchors clock at `timestamp` since unix epoch
    pub fn new(timestamp: Duration, instant: std::time::Instant) -> Self {
        Self {
            timestamp,
            instant: Instant::from_std(instant),
        }
    }

    /// Current unix second
    #[inline]
    pub fn unix_second(&self) -> i64 {
        (self.timestamp + self.instant.elapsed()).as_secs() as i64
    }

    /// Creates sample stamped with current unix second
    pub fn sample(&self, name: impl Into<Cow<'static, str>>, value: f64) -> Sample {
        Sample::new(self.unix_second(), name, value)
    }
}
