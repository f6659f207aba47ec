/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Host facing output that collects samples and emits the final result

use tracing::{debug, error};

pub use error::OutputError;
pub use json::{JsonEmitter, JsonFileEmitter};
#[cfg(any(feature = "test_util", test))]
pub use test_emitter::TestEmitter;

use crate::aggregate::AggregateSettings;
use crate::metric::SampleBatch;
use crate::report::LoadTestResult;
use crate::run::LoadTestRun;
use crate::sync::{lock, Mutex};

mod error;
mod json;
#[cfg(any(feature = "test_util", test))]
mod test_emitter;

/// Receiver of the final load test result
pub trait ResultEmitter {
    /// Prepares emitter when a run starts
    fn open(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn emit(&mut self, result: &LoadTestResult) -> Result<(), OutputError>;
}

/// Output extension that reduces samples into a compact JSON report
///
/// Mirrors lifecycle of a host test runner output: it is started once,
/// receives sample containers while the test runs and is stopped at the end.
#[derive(Debug)]
pub struct CompactedJsonOutput<E> {
    run: LoadTestRun,
    emitter: Mutex<E>,
}

impl CompactedJsonOutput<JsonFileEmitter> {
    /// Creates output writing into file passed as host output argument
    pub fn from_argument(
        argument: &str,
        settings: AggregateSettings,
    ) -> Result<Self, OutputError> {
        Ok(Self::new(settings, JsonFileEmitter::from_argument(argument)?))
    }
}

impl<E> CompactedJsonOutput<E>
where
    E: ResultEmitter,
{
    pub const DESCRIPTION: &'static str =
        "This extension will return compacted json for k6 result";

    pub fn new(settings: AggregateSettings, emitter: E) -> Self {
        Self {
            run: LoadTestRun::new(settings),
            emitter: Mutex::new(emitter),
        }
    }

    pub fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    pub fn run(&self) -> &LoadTestRun {
        &self.run
    }

    pub fn start(&self) -> Result<(), OutputError> {
        lock(&self.emitter).open()?;
        self.run.start();
        Ok(())
    }

    /// Ingests each container as a separate batch
    ///
    /// Stops at the first rejected container, previously ingested ones are kept.
    pub fn add_metric_samples(&self, containers: &[SampleBatch]) -> Result<(), OutputError> {
        for container in containers {
            self.run.ingest(container)?;
        }

        Ok(())
    }

    /// Finalizes the run and hands the result to the emitter
    pub fn stop(&self) -> Result<LoadTestResult, OutputError> {
        let result = self.run.finalize()?;

        if let Err(reason) = lock(&self.emitter).emit(&result) {
            error!(%reason, "Failed to emit load test result");
            return Err(reason);
        }

        debug!(points = result.points().len(), "Emitted load test result");
        Ok(result)
    }
}

impl<E> CompactedJsonOutput<E> {
    pub fn into_emitter(self) -> E {
        self.emitter
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
