/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Samples reported by the host test runner and the signals extracted from them

use std::borrow::Cow;

pub use clock::RunClock;
pub use sample::*;

mod clock;
mod sample;

/// Signal carried by a sample that aggregation cares about
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum SampleMetric {
    /// Number of issued requests
    RequestCount,
    /// Number of failed requests
    FailureCount,
    /// Request duration observation
    Duration,
}

/// Maps metric names used by the host onto [`SampleMetric`] signals
///
/// Defaults to k6 built-in HTTP metric names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricNames {
    request_count: Cow<'static, str>,
    failure_count: Cow<'static, str>,
    duration: Cow<'static, str>,
}

impl Default for MetricNames {
    fn default() -> Self {
        Self {
            request_count: Cow::Borrowed("http_reqs"),
            failure_count: Cow::Borrowed("http_req_failed"),
            duration: Cow::Borrowed("http_req_duration"),
        }
    }
}

impl MetricNames {
    pub fn with_request_count(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            request_count: name.into(),
            ..self
        }
    }

    pub fn with_failure_count(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            failure_count: name.into(),
            ..self
        }
    }

    pub fn with_duration(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            duration: name.into(),
            ..self
        }
    }

    /// Returns signal for metric name, `None` when name is not tracked
    pub fn classify(&self, name: &str) -> Option<SampleMetric> {
        if name == self.request_count {
            Some(SampleMetric::RequestCount)
        } else if name == self.failure_count {
            Some(SampleMetric::FailureCount)
        } else if name == self.duration {
            Some(SampleMetric::Duration)
        } else {
            None
        }
    }

    pub fn name(&self, metric: SampleMetric) -> &str {
        match metric {
            SampleMetric::RequestCount => self.request_count.as_ref(),
            SampleMetric::FailureCount => self.failure_count.as_ref(),
            SampleMetric::Duration => self.duration.as_ref(),
        }
    }
}
