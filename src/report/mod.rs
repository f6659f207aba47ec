/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Final load test report and the reducer that builds it

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::AggregateError;

pub use reducer::SummaryReducer;

mod reducer;

/// Derived metrics of a single second
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketMetric {
    request_rate: f64,
    error_rate: f64,
    request_duration: f64,
}

impl BucketMetric {
    pub fn new(request_rate: f64, error_rate: f64, request_duration: f64) -> Self {
        Self {
            request_rate,
            error_rate,
            request_duration,
        }
    }

    pub fn request_rate(&self) -> f64 {
        self.request_rate
    }

    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// Request duration at configured percentile
    pub fn request_duration(&self) -> f64 {
        self.request_duration
    }
}

/// Run-wide totals
///
/// Number of successful requests is always derived from totals,
/// so `total_success == total_request - total_error` holds for every instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    total_request: i64,
    total_success: i64,
    total_error: i64,
    request_rate_per_second: f64,
    request_duration: f64,
}

impl Summary {
    /// Fails with [`AggregateError::TotalOverflow`] when successes do not fit into `i64`
    pub fn new(
        total_request: i64,
        total_error: i64,
        request_rate_per_second: f64,
        request_duration: f64,
    ) -> Result<Self, AggregateError> {
        Ok(Self {
            total_request,
            total_success: total_request
                .checked_sub(total_error)
                .ok_or(AggregateError::TotalOverflow)?,
            total_error,
            request_rate_per_second,
            request_duration,
        })
    }

    pub fn total_request(&self) -> i64 {
        self.total_request
    }

    pub fn total_success(&self) -> i64 {
        self.total_success
    }

    pub fn total_error(&self) -> i64 {
        self.total_error
    }

    pub fn request_rate_per_second(&self) -> f64 {
        self.request_rate_per_second
    }

    pub fn request_duration(&self) -> f64 {
        self.request_duration
    }
}

/// Immutable result of a load test run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadTestResult {
    points: BTreeMap<i64, BucketMetric>,
    summary: Summary,
}

impl LoadTestResult {
    pub fn new(points: BTreeMap<i64, BucketMetric>, summary: Summary) -> Self {
        Self { points, summary }
    }

    /// Metrics per unix second in ascending order
    pub fn points(&self) -> &BTreeMap<i64, BucketMetric> {
        &self.points
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}
