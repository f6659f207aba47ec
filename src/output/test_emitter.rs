/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use crate::report::LoadTestResult;

use super::{OutputError, ResultEmitter};

/// Test emitter
///
/// Keeps emitted results for later verification in tests
#[derive(Debug, Default)]
pub struct TestEmitter {
    opened: usize,
    results: Vec<LoadTestResult>,
}

impl TestEmitter {
    /// Number of times emitter was opened
    pub fn opened(&self) -> usize {
        self.opened
    }

    pub fn results(&self) -> &[LoadTestResult] {
        &self.results
    }
}

impl ResultEmitter for TestEmitter {
    fn open(&mut self) -> Result<(), OutputError> {
        self.opened += 1;
        Ok(())
    }

    fn emit(&mut self, result: &LoadTestResult) -> Result<(), OutputError> {
        self.results.push(result.clone());
        Ok(())
    }
}
