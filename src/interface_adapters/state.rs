use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::info;

use crate::domain::SubmissionFault;
use crate::domain::ports::{Clock, Delay, SubmissionRecorder, Ticker};
use crate::domain::rsvp::SubmissionReceipt;
use crate::interface_adapters::page::PageModel;
use crate::use_cases::RenderIntent;

// Page session state shared between the event loop and the render task.
#[derive(Clone)]
pub struct PageState {
    pub page: Arc<Mutex<PageModel>>,
    // Intents flowing from both components into the single render task.
    pub render_tx: mpsc::Sender<RenderIntent>,
}

// System clock adapter used by the countdown and RSVP timestamps.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

// Repeating schedule backed by a tokio interval; the first tick fires immediately.
pub struct TokioTicker {
    interval: Interval,
}

impl TokioTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        // A stalled tick re-reads the clock anyway; bursts would only repaint.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for TokioTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// Simulated RSVP backend: logs the payload as JSON. Nothing is stored or sent.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingRecorder;

impl SubmissionRecorder for LoggingRecorder {
    fn record(&self, receipt: &SubmissionReceipt) -> Result<(), SubmissionFault> {
        let payload = serde_json::to_string(receipt)
            .map_err(|err| SubmissionFault::Encoding(err.to_string()))?;
        info!(
            reference = %receipt.reference,
            headcount = ?receipt.submission.guest_count.headcount(),
            %payload,
            persisted = false,
            "rsvp received (simulated backend)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RsvpForm;
    use chrono::Local;

    #[test]
    fn logging_recorder_accepts_a_receipt() {
        let submission = RsvpForm {
            guest_name: Some("Aliya".to_string()),
            guest_count: Some("2".to_string()),
            contact_info: Some("9876543210".to_string()),
            dietary_preferences: None,
        }
        .to_submission()
        .expect("expected valid submission");
        let receipt = SubmissionReceipt {
            reference: uuid::Uuid::new_v4(),
            submitted_at: Local::now(),
            submission,
        };

        assert_eq!(LoggingRecorder.record(&receipt), Ok(()));
    }

    #[test]
    fn receipt_payload_carries_the_selected_guest_option() {
        let submission = RsvpForm {
            guest_name: Some("Zaid".to_string()),
            guest_count: Some("5+".to_string()),
            contact_info: Some("9876543210".to_string()),
            dietary_preferences: Some("vegan".to_string()),
        }
        .to_submission()
        .expect("expected valid submission");

        let value = serde_json::to_value(&submission).expect("serializable");

        assert_eq!(value["guest_count"], "5+");
        assert_eq!(value["dietary_preferences"], "vegan");
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_fires_immediately_then_every_period() {
        let mut ticker = TokioTicker::new(Duration::from_secs(1));
        let started = tokio::time::Instant::now();

        ticker.tick().await;
        assert_eq!(started.elapsed(), Duration::ZERO);

        ticker.tick().await;
        ticker.tick().await;
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_epoch_millis() > 1_577_836_800_000);
    }
}
