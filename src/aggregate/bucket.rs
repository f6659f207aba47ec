/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

use crate::metric::SampleMetric;

/// Accumulated samples of a single second
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bucket {
    request_rate: f64,
    request_samples: usize,
    error_rate: f64,
    durations: Vec<f64>,
}

impl Bucket {
    pub fn request_rate(&self) -> f64 {
        self.request_rate
    }

    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Whether any request-count sample has been recorded, even a zero one
    pub fn has_requests(&self) -> bool {
        self.request_samples > 0
    }

    pub(crate) fn durations_mut(&mut self) -> &mut [f64] {
        &mut self.durations
    }

    pub(crate) fn record(&mut self, metric: SampleMetric, value: f64) {
        match metric {
            SampleMetric::RequestCount => {
                self.request_rate += value;
                self.request_samples += 1;
            }
            SampleMetric::FailureCount => self.error_rate += value,
            SampleMetric::Duration => self.durations.push(value),
        }
    }

    pub(crate) fn merge_into(self, other: &mut Self) {
        other.request_rate += self.request_rate;
        other.request_samples += self.request_samples;
        other.error_rate += self.error_rate;
        other.durations.extend(self.durations);
    }
}
