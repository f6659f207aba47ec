/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

/// Batch of samples delivered together by a single producer
pub type SampleBatch = Vec<Sample>;

/// Single observed measurement event
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    timestamp: i64,
    name: Cow<'static, str>,
    value: f64,
}

impl Sample {
    pub fn new(timestamp: i64, name: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self {
            timestamp,
            name: name.into(),
            value,
        }
    }

    /// Creates sample truncating wall-clock time to its unix second
    ///
    /// Times before the epoch are floored, so `-0.5s` lands into second `-1`
    pub fn at(time: SystemTime, name: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(unix_second(time), name, value)
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

pub(crate) fn unix_second(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(error) => {
            let before = error.duration();
            let seconds = before.as_secs() as i64;
            match before.subsec_nanos() {
                0 => -seconds,
                _ => -seconds - 1,
            }
        }
    }
}
