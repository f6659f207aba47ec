/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Per-second aggregation of samples and percentile calculation

pub use aggregator::{AggregatedRun, SampleAggregator};
pub use bucket::Bucket;
pub use error::AggregateError;
pub use percentile::{percentile, percentile_mut};
pub use settings::{AggregateSettings, Bucketing, PointPolicy};

mod aggregator;
mod bucket;
mod error;
mod percentile;
mod settings;
