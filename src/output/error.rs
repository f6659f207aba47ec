/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use thiserror::Error;

use crate::aggregate::AggregateError;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Result file path is not provided")]
    MissingPath,

    #[error("Failed to write load test result: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize load test result: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use std::io::{Error, ErrorKind};

    use super::*;

    #[test]
    fn can_be_created_from_io_error() {
        let _error: OutputError = Error::from(ErrorKind::InvalidData).into();
    }

    #[test]
    fn keeps_aggregate_error_message() {
        let error: OutputError = AggregateError::FinalizeCalledTwice.into();

        assert_eq!(error.to_string(), "Load test run has already been finalized");
    }
}
