use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::SubmissionFault;
use crate::domain::ports::{Clock, Delay, SubmissionRecorder, Ticker};
use crate::domain::rsvp::SubmissionReceipt;

// Shared manually-advanced time source for deterministic use-case tests.
#[derive(Clone)]
pub(crate) struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub(crate) fn new(now_epoch_millis: i64) -> Self {
        Self(Arc::new(AtomicI64::new(now_epoch_millis)))
    }

    pub(crate) fn advance(&self, millis: i64) {
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

// Wall clock that follows tokio's paused time, for tests on real timers.
#[derive(Clone)]
pub(crate) struct PausedClock {
    base_millis: i64,
    started: tokio::time::Instant,
}

impl PausedClock {
    pub(crate) fn new(base_millis: i64) -> Self {
        Self {
            base_millis,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for PausedClock {
    fn now_epoch_millis(&self) -> i64 {
        self.base_millis + self.started.elapsed().as_millis() as i64
    }
}

// Ticker driven by the test: each unit sent on the paired sender is one tick.
pub(crate) struct ManualTicker {
    ticks: mpsc::UnboundedReceiver<()>,
}

impl ManualTicker {
    pub(crate) fn new() -> (Self, mpsc::UnboundedSender<()>) {
        let (tx, ticks) = mpsc::unbounded_channel();
        (Self { ticks }, tx)
    }
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn tick(&mut self) {
        if self.ticks.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct ZeroDelay;

#[async_trait]
impl Delay for ZeroDelay {
    async fn sleep(&self, _duration: Duration) {}
}

// Zero delay that remembers what it was asked to wait for.
#[derive(Clone, Default)]
pub(crate) struct RecordingDelay {
    pub(crate) requested: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        let mut guard = self.requested.lock().expect("delay mutex poisoned");
        guard.push(duration);
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingRecorder {
    pub(crate) receipts: Arc<Mutex<Vec<SubmissionReceipt>>>,
    should_fail: bool,
}

impl RecordingRecorder {
    pub(crate) fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn recorded(&self) -> Vec<SubmissionReceipt> {
        let guard = self.receipts.lock().expect("receipts mutex poisoned");
        guard.clone()
    }
}

impl SubmissionRecorder for RecordingRecorder {
    fn record(&self, receipt: &SubmissionReceipt) -> Result<(), SubmissionFault> {
        if self.should_fail {
            return Err(SubmissionFault::Recorder("record failed".to_string()));
        }

        let mut guard = self.receipts.lock().expect("receipts mutex poisoned");
        guard.push(receipt.clone());
        Ok(())
    }
}
