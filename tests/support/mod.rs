// Shared fakes and helpers for page session integration tests.
#![allow(dead_code)]

use std::{
    // `Arc` + `Mutex` let tests inspect what the recorder saw after the session ran.
    sync::{Arc, Mutex},
    time::Duration,
};

use wedding_invite::InviteConfig;
use wedding_invite::domain::ports::{Clock, SubmissionRecorder};
use wedding_invite::domain::{CountdownTarget, SubmissionFault, SubmissionReceipt};
use wedding_invite::interface_adapters::protocol::RsvpFormDto;
use wedding_invite::use_cases::CountdownSettings;

// Wall-clock start used by every test; the paused tokio clock advances from here.
pub const BASE_MS: i64 = 1_757_000_000_000;

pub const COMPLETION_MESSAGE: &str = "Today is Our Special Day! 🎉";

// Wall clock that follows tokio's (paused) time so timers and "now" agree.
#[derive(Clone)]
pub struct PausedClock {
    base_ms: i64,
    started: tokio::time::Instant,
}

impl PausedClock {
    pub fn new(base_ms: i64) -> Self {
        Self {
            base_ms,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for PausedClock {
    fn now_epoch_millis(&self) -> i64 {
        self.base_ms + self.started.elapsed().as_millis() as i64
    }
}

#[derive(Clone, Default)]
pub struct CollectingRecorder {
    receipts: Arc<Mutex<Vec<SubmissionReceipt>>>,
    // Toggle used to simulate an internal fault in the simulated backend.
    should_fail: bool,
}

impl CollectingRecorder {
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<SubmissionReceipt> {
        let guard = self.receipts.lock().expect("receipts mutex poisoned");
        guard.clone()
    }
}

impl SubmissionRecorder for CollectingRecorder {
    fn record(&self, receipt: &SubmissionReceipt) -> Result<(), SubmissionFault> {
        if self.should_fail {
            return Err(SubmissionFault::Recorder("backend unavailable".to_string()));
        }
        let mut guard = self.receipts.lock().expect("receipts mutex poisoned");
        guard.push(receipt.clone());
        Ok(())
    }
}

// Session config counting down to `target_ms` with production timings.
pub fn config(target_ms: i64) -> InviteConfig {
    InviteConfig {
        target: CountdownTarget::from_epoch_millis(target_ms),
        tick_interval: Duration::from_secs(1),
        countdown: CountdownSettings {
            highlight_duration: Duration::from_millis(200),
            completion_message: COMPLETION_MESSAGE.to_string(),
        },
        submit_delay: Duration::from_millis(1500),
    }
}

pub fn valid_form() -> RsvpFormDto {
    RsvpFormDto {
        guest_name: Some("Aliya".to_string()),
        guest_count: Some("2".to_string()),
        contact_info: Some("98765 43210".to_string()),
        dietary_preferences: None,
    }
}

// Let the render task drain: paused time only advances once every task is idle.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
