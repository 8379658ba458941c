use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::SubmissionFault;
use crate::domain::rsvp::SubmissionReceipt;

// Port for retrieving the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> i64;
}

// Port for the repeating countdown schedule. Dropping the ticker cancels it.
#[async_trait]
pub trait Ticker: Send {
    // Resolves at the next scheduled tick. The first call resolves immediately.
    async fn tick(&mut self);
}

// Port for one-shot suspensions (simulated latency, highlight hold).
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

// Port for the simulated RSVP backend.
pub trait SubmissionRecorder: Send + Sync {
    fn record(&self, receipt: &SubmissionReceipt) -> Result<(), SubmissionFault>;
}
