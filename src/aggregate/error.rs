/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use thiserror::Error;

use crate::metric::SampleMetric;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("Sample batch is empty")]
    EmptyBatch,

    #[error("Percentile requested over an empty set of observations")]
    EmptyInput,

    #[error("Percentile {0} is outside of [0, 1] range")]
    PercentileOutOfRange(f64),

    // Request rate needs more seconds than the warm-up excludes
    #[error("Request rate over {seconds} second(s) with {warmup} warm-up second(s) is undefined")]
    DegenerateDuration { seconds: usize, warmup: usize },

    #[error("{metric:?} sample value {value} is not a finite number")]
    NonFiniteSample { metric: SampleMetric, value: f64 },

    #[error("Run totals exceed the range of a 64-bit integer")]
    TotalOverflow,

    #[error("Load test run has already been finalized")]
    FinalizeCalledTwice,

    #[error("Load test run has not been started")]
    NotStarted,

    #[error("Load test run is finished and does not accept samples")]
    RunFinished,
}
