/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use crate::aggregate::{
    percentile_mut, AggregateError, AggregateSettings, AggregatedRun, PointPolicy,
};

use super::{BucketMetric, LoadTestResult, Summary};

/// Folds aggregated buckets into [`LoadTestResult`]
#[derive(Debug, Clone, Copy)]
pub struct SummaryReducer {
    percentile: f64,
    warmup_seconds: usize,
    point_policy: PointPolicy,
}

impl Default for SummaryReducer {
    fn default() -> Self {
        Self::new(&AggregateSettings::default())
    }
}

impl SummaryReducer {
    pub fn new(settings: &AggregateSettings) -> Self {
        Self {
            percentile: settings.percentile(),
            warmup_seconds: settings.warmup_seconds(),
            point_policy: settings.point_policy(),
        }
    }

    /// Builds per-second points and run summary
    ///
    /// Request and error sums are truncated toward zero before they are added
    /// to run totals. Request rate is divided by number of reported seconds
    /// minus warm-up seconds.
    ///
    /// # Errors
    ///
    /// * [`AggregateError::EmptyInput`] when a reported second or the whole run
    ///   has no duration observations
    /// * [`AggregateError::DegenerateDuration`] when there are not more reported
    ///   seconds than warm-up seconds
    /// * [`AggregateError::TotalOverflow`] when a second sum is no longer finite
    ///   or run totals do not fit into `i64`
    pub fn reduce(&self, run: AggregatedRun) -> Result<LoadTestResult, AggregateError> {
        let (buckets, mut durations) = run.into_parts();

        let mut points = BTreeMap::new();
        let (mut total_request, mut total_error) = (0i64, 0i64);
        let mut dropped = 0usize;

        for (timestamp, mut bucket) in buckets {
            if self.point_policy == PointPolicy::RequestBuckets && !bucket.has_requests() {
                dropped += 1;
                continue;
            }

            let totals = add_truncated(total_request, bucket.request_rate())
                .zip(add_truncated(total_error, bucket.error_rate()));
            let Some((request, failed)) = totals else {
                error!(
                    timestamp,
                    total_request,
                    total_error,
                    "Second sums overflow run totals"
                );
                return Err(AggregateError::TotalOverflow);
            };
            (total_request, total_error) = (request, failed);

            let request_duration =
                match percentile_mut(self.percentile, bucket.durations_mut()) {
                    Ok(value) => value,
                    Err(reason) => {
                        error!(timestamp, %reason, "Failed to calculate second request duration");
                        return Err(reason);
                    }
                };

            points.insert(
                timestamp,
                BucketMetric::new(
                    bucket.request_rate(),
                    bucket.error_rate(),
                    request_duration,
                ),
            );
        }

        if dropped > 0 {
            warn!(dropped, "Seconds without request samples are left out of the report");
        }

        let seconds = points.len();
        if seconds <= self.warmup_seconds {
            error!(
                seconds,
                warmup = self.warmup_seconds,
                "Not enough seconds to calculate request rate"
            );
            return Err(AggregateError::DegenerateDuration {
                seconds,
                warmup: self.warmup_seconds,
            });
        }

        let request_rate_per_second =
            total_request as f64 / (seconds - self.warmup_seconds) as f64;
        let request_duration = percentile_mut(self.percentile, &mut durations)?;

        debug!(
            seconds,
            total_request, total_error, request_rate_per_second, "Reduced load test run"
        );

        let summary = Summary::new(
            total_request,
            total_error,
            request_rate_per_second,
            request_duration,
        )?;

        Ok(LoadTestResult::new(points, summary))
    }
}

fn add_truncated(total: i64, sum: f64) -> Option<i64> {
    if !sum.is_finite() {
        return None;
    }

    total.checked_add(sum as i64)
}
