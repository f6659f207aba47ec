/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Asynchronous producers of sample batches

use tokio::sync::mpsc::{Receiver, UnboundedReceiver};

use crate::metric::SampleBatch;

/// Source of sample batches consumed by [`LoadTestRun::drain`](crate::run::LoadTestRun::drain)
///
/// Returns `None` once producer is closed.
#[trait_variant::make(SampleSource: Send)]
#[allow(async_fn_in_trait)]
pub trait LocalSampleSource {
    async fn next_batch(&mut self) -> Option<SampleBatch>;
}

impl SampleSource for Receiver<SampleBatch> {
    async fn next_batch(&mut self) -> Option<SampleBatch> {
        self.recv().await
    }
}

impl SampleSource for UnboundedReceiver<SampleBatch> {
    async fn next_batch(&mut self) -> Option<SampleBatch> {
        self.recv().await
    }
}
