/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::{error, trace};

use crate::metric::{MetricNames, Sample, SampleMetric};
use crate::sync::{lock, Mutex};

use super::{AggregateError, AggregateSettings, Bucket, Bucketing};

/// Accumulates sample batches into per-second buckets
///
/// Batches can be ingested from multiple threads at once. Buckets are spread
/// over independently locked shards by their second, so batches for different
/// seconds rarely contend, while updates of the same second are serialized.
#[derive(Debug)]
pub struct SampleAggregator {
    names: MetricNames,
    bucketing: Bucketing,
    shards: Vec<Mutex<FxHashMap<i64, Bucket>>>,
    durations: Mutex<Vec<f64>>,
}

/// Buckets and run-wide duration log collected by [`SampleAggregator`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AggregatedRun {
    buckets: BTreeMap<i64, Bucket>,
    durations: Vec<f64>,
}

impl AggregatedRun {
    pub fn buckets(&self) -> &BTreeMap<i64, Bucket> {
        &self.buckets
    }

    /// Every duration observation of the run in arrival order
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<i64, Bucket>, Vec<f64>) {
        (self.buckets, self.durations)
    }
}

impl SampleAggregator {
    pub fn new(settings: &AggregateSettings) -> Self {
        Self {
            names: settings.metric_names().clone(),
            bucketing: settings.bucketing(),
            shards: (0..settings.shards())
                .map(|_| Mutex::new(FxHashMap::default()))
                .collect(),
            durations: Mutex::new(Vec::new()),
        }
    }

    /// Records a batch of samples
    ///
    /// With [`Bucketing::FirstSample`] every sample is stored under the second
    /// of the first sample in the batch.
    ///
    /// Batch is applied as a whole. An empty batch, or one with a NaN or
    /// infinite value of a tracked metric, is rejected without touching
    /// already aggregated values.
    pub fn ingest(&self, batch: &[Sample]) -> Result<(), AggregateError> {
        let first_timestamp = match batch.first() {
            Some(sample) => sample.timestamp(),
            None => {
                error!("Rejected empty sample batch");
                return Err(AggregateError::EmptyBatch);
            }
        };

        let mut deltas: FxHashMap<i64, Bucket> = FxHashMap::default();
        let mut durations = Vec::new();

        for sample in batch {
            let Some(metric) = self.names.classify(sample.name()) else {
                trace!(name = sample.name(), "Ignored untracked sample");
                continue;
            };

            if !sample.value().is_finite() {
                error!(
                    name = sample.name(),
                    value = sample.value(),
                    "Rejected sample batch with non-finite value"
                );
                return Err(AggregateError::NonFiniteSample {
                    metric,
                    value: sample.value(),
                });
            }

            let timestamp = match self.bucketing {
                Bucketing::FirstSample => first_timestamp,
                Bucketing::PerSample => sample.timestamp(),
            };

            if metric == SampleMetric::Duration {
                durations.push(sample.value());
            }

            deltas
                .entry(timestamp)
                .or_default()
                .record(metric, sample.value());
        }

        for (timestamp, delta) in deltas {
            let mut shard = lock(self.shard(timestamp));
            delta.merge_into(shard.entry(timestamp).or_default());
        }

        if !durations.is_empty() {
            lock(&self.durations).extend(durations);
        }

        Ok(())
    }

    /// Number of seconds that received at least one tracked sample
    pub fn bucket_count(&self) -> usize {
        self.shards.iter().map(|shard| lock(shard).len()).sum()
    }

    /// Consumes aggregator returning buckets ordered by second
    pub fn into_run(self) -> AggregatedRun {
        self.drain()
    }

    pub(crate) fn drain(&self) -> AggregatedRun {
        let mut buckets = BTreeMap::new();
        for shard in self.shards.iter() {
            buckets.extend(std::mem::take(&mut *lock(shard)));
        }

        AggregatedRun {
            buckets,
            durations: std::mem::take(&mut *lock(&self.durations)),
        }
    }

    #[inline]
    fn shard(&self, timestamp: i64) -> &Mutex<FxHashMap<i64, Bucket>> {
        &self.shards[timestamp.rem_euclid(self.shards.len() as i64) as usize]
    }
}
