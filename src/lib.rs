/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Compact JSON report for load test results
//!
//! Samples produced by a load test runner are grouped into per-second buckets
//! and reduced into request rates, error counts and request duration
//! percentiles, both per second and for the whole run.

#![warn(missing_debug_implementations, unreachable_pub)]

pub mod aggregate;
pub mod metric;
pub mod output;
pub mod report;
pub mod run;
pub mod source;

mod sync;

pub mod prelude {
    pub use crate::aggregate::{
        percentile, AggregateError, AggregateSettings, Bucketing, PointPolicy,
        SampleAggregator,
    };
    pub use crate::metric::{MetricNames, RunClock, Sample, SampleBatch, SampleMetric};
    #[cfg(any(feature = "test_util", test))]
    pub use crate::output::TestEmitter;
    pub use crate::output::{
        CompactedJsonOutput, JsonEmitter, JsonFileEmitter, OutputError, ResultEmitter,
    };
    pub use crate::report::{BucketMetric, LoadTestResult, Summary, SummaryReducer};
    pub use crate::run::LoadTestRun;
    pub use crate::source::{LocalSampleSource, SampleSource};
}
