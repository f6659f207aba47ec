/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Lifecycle of a single load test run
//!
//! A run is started, receives sample batches from any number of producers,
//! and is finalized exactly once into [`LoadTestResult`].

use std::mem;

use tracing::{debug, warn};

use crate::aggregate::{AggregateError, AggregateSettings, SampleAggregator};
use crate::metric::Sample;
use crate::report::{LoadTestResult, SummaryReducer};
use crate::source::SampleSource;
use crate::sync::{read, write, RwLock};

#[derive(Debug)]
enum RunState {
    Idle,
    Running(SampleAggregator),
    Finalized,
}

/// Aggregation state of one load test run
///
/// Ingestion holds a shared lock for the whole batch, while finalization takes
/// an exclusive one. Finalization therefore starts only after every in-flight
/// batch has been applied, and no batch is accepted after it.
#[derive(Debug)]
pub struct LoadTestRun {
    settings: AggregateSettings,
    state: RwLock<RunState>,
}

impl Default for LoadTestRun {
    fn default() -> Self {
        Self::new(AggregateSettings::default())
    }
}

impl LoadTestRun {
    pub fn new(settings: AggregateSettings) -> Self {
        Self {
            settings,
            state: RwLock::new(RunState::Idle),
        }
    }

    pub fn settings(&self) -> &AggregateSettings {
        &self.settings
    }

    /// Starts a new run discarding state of the previous one
    pub fn start(&self) {
        let previous = mem::replace(
            &mut *write(&self.state),
            RunState::Running(SampleAggregator::new(&self.settings)),
        );

        if let RunState::Running(aggregator) = previous {
            warn!(
                buckets = aggregator.bucket_count(),
                "Restarted load test run before it was finalized"
            );
        }

        debug!("Started load test run");
    }

    /// Records a batch of samples, see [`SampleAggregator::ingest`]
    pub fn ingest(&self, batch: &[Sample]) -> Result<(), AggregateError> {
        match &*read(&self.state) {
            RunState::Running(aggregator) => aggregator.ingest(batch),
            RunState::Idle => Err(AggregateError::NotStarted),
            RunState::Finalized => Err(AggregateError::RunFinished),
        }
    }

    /// Ingests every batch from `source` until it is closed
    ///
    /// Returns number of ingested batches, stops on the first rejected one.
    pub async fn drain<S>(&self, source: &mut S) -> Result<usize, AggregateError>
    where
        S: SampleSource,
    {
        let mut batches = 0;
        while let Some(batch) = source.next_batch().await {
            self.ingest(&batch)?;
            batches += 1;
        }

        Ok(batches)
    }

    /// Reduces collected samples into the final result
    ///
    /// Run is consumed even if reduction fails,
    /// any later call returns [`AggregateError::FinalizeCalledTwice`].
    pub fn finalize(&self) -> Result<LoadTestResult, AggregateError> {
        let aggregator = {
            let mut state = write(&self.state);
            match mem::replace(&mut *state, RunState::Finalized) {
                RunState::Running(aggregator) => aggregator,
                RunState::Finalized => return Err(AggregateError::FinalizeCalledTwice),
                RunState::Idle => {
                    *state = RunState::Idle;
                    return Err(AggregateError::NotStarted);
                }
            }
        };

        debug!(buckets = aggregator.bucket_count(), "Finalizing load test run");
        SummaryReducer::new(&self.settings).reduce(aggregator.into_run())
    }
}
