/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use crate::metric::MetricNames;

const DEFAULT_SHARDS: usize = 16;

/// How samples inside a single batch are assigned to buckets
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub enum Bucketing {
    /// Every sample goes into the second of the first sample in the batch
    ///
    /// Producers must deliver batches that belong to a single second.
    #[default]
    FirstSample,
    /// Each sample goes into its own second
    PerSample,
}

/// Which buckets end up in the per-second report
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub enum PointPolicy {
    /// Only seconds that received at least one request-count sample
    #[default]
    RequestBuckets,
    /// Every second that received any tracked sample
    AllBuckets,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AggregateSettings {
    percentile: f64,
    warmup_seconds: usize,
    bucketing: Bucketing,
    point_policy: PointPolicy,
    metric_names: MetricNames,
    shards: usize,
}

impl AggregateSettings {
    /// Changes percentile reported for request duration
    ///
    /// # Arguments
    ///
    /// * `percentile`: fraction in `[0, 1]` range, `0.95` by default
    pub fn with_percentile(self, percentile: f64) -> Self {
        Self { percentile, ..self }
    }

    /// Number of leading seconds excluded from request rate denominator
    pub fn with_warmup_seconds(self, warmup_seconds: usize) -> Self {
        Self {
            warmup_seconds,
            ..self
        }
    }

    pub fn with_bucketing(self, bucketing: Bucketing) -> Self {
        Self { bucketing, ..self }
    }

    pub fn with_point_policy(self, point_policy: PointPolicy) -> Self {
        Self {
            point_policy,
            ..self
        }
    }

    pub fn with_metric_names(self, metric_names: MetricNames) -> Self {
        Self {
            metric_names,
            ..self
        }
    }

    /// Number of independently locked bucket partitions
    ///
    /// # Arguments
    ///
    /// * `shards`: partitions count, values below one are raised to one
    pub fn with_shards(self, shards: usize) -> Self {
        Self {
            shards: shards.max(1),
            ..self
        }
    }

    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    pub fn warmup_seconds(&self) -> usize {
        self.warmup_seconds
    }

    pub fn bucketing(&self) -> Bucketing {
        self.bucketing
    }

    pub fn point_policy(&self) -> PointPolicy {
        self.point_policy
    }

    pub fn metric_names(&self) -> &MetricNames {
        &self.metric_names
    }

    pub fn shards(&self) -> usize {
        self.shards
    }
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            percentile: 0.95,
            warmup_seconds: 1,
            bucketing: Bucketing::default(),
            point_policy: PointPolicy::default(),
            metric_names: MetricNames::default(),
            shards: DEFAULT_SHARDS,
        }
    }
}
