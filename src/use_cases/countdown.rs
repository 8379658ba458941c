// Countdown engine and the task that republishes it on every scheduled tick.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::types::{RenderIntent, publish};
use crate::domain::ports::{Clock, Delay, Ticker};
use crate::domain::{CountdownSnapshot, CountdownTarget, TimeUnit};

/// Message that replaces the countdown heading once the target is reached.
pub const DEFAULT_COMPLETION_MESSAGE: &str = "Today is Our Special Day! 🎉";

#[derive(Debug, Clone)]
pub struct CountdownSettings {
    /// How long a changed digit stays highlighted.
    pub highlight_duration: Duration,
    /// Heading text shown once the target is reached.
    pub completion_message: String,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            highlight_duration: Duration::from_millis(200),
            completion_message: DEFAULT_COMPLETION_MESSAGE.to_string(),
        }
    }
}

/// Result of a single engine tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub snapshot: CountdownSnapshot,
    /// Units that changed since the previous tick. Empty on the first tick.
    pub changed: Vec<TimeUnit>,
    /// True only on the tick that first observes the target as reached.
    pub reached: bool,
}

/// Pure countdown state: the target plus the last published snapshot.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    target: CountdownTarget,
    previous: Option<CountdownSnapshot>,
    reached: bool,
}

impl CountdownEngine {
    pub fn new(target: CountdownTarget) -> Self {
        Self {
            target,
            previous: None,
            reached: false,
        }
    }

    pub fn target(&self) -> CountdownTarget {
        self.target
    }

    pub fn has_reached(&self) -> bool {
        self.reached
    }

    pub fn tick(&mut self, now_epoch_millis: i64) -> TickOutcome {
        let snapshot =
            CountdownSnapshot::from_distance(self.target.distance_from(now_epoch_millis));
        let changed = self
            .previous
            .map(|previous| snapshot.changed_units(&previous))
            .unwrap_or_default();
        let reached = snapshot.expired && !self.reached;

        self.previous = Some(snapshot);
        self.reached |= snapshot.expired;

        TickOutcome {
            snapshot,
            changed,
            reached,
        }
    }
}

/// Why a countdown task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownExit {
    Reached,
    Cancelled,
    // Render channel closed; nobody is displaying the countdown anymore.
    Detached,
}

// Digits highlighted by one tick, waiting for their hold to elapse.
struct HighlightHold<'a> {
    units: Vec<TimeUnit>,
    timer: Pin<Box<dyn Future<Output = ()> + Send + 'a>>,
}

// Resolves when the oldest hold elapses, with the units it may switch off.
// Units re-highlighted by a newer hold stay on.
async fn next_release(holds: &mut VecDeque<HighlightHold<'_>>) -> Vec<TimeUnit> {
    let Some(oldest) = holds.front_mut() else {
        return std::future::pending().await;
    };
    oldest.timer.as_mut().await;

    let Some(released) = holds.pop_front() else {
        return Vec::new();
    };
    released
        .units
        .into_iter()
        .filter(|unit| !holds.iter().any(|hold| hold.units.contains(unit)))
        .collect()
}

pub async fn countdown_task<C, T, D>(
    mut engine: CountdownEngine,
    clock: C,
    mut ticker: T,
    delay: D,
    settings: CountdownSettings,
    render_tx: mpsc::Sender<RenderIntent>,
    shutdown: Arc<Notify>,
) -> CountdownExit
where
    C: Clock,
    T: Ticker,
    D: Delay,
{
    // Holds all last the same duration, so they elapse in the order queued.
    let mut holds: VecDeque<HighlightHold<'_>> = VecDeque::new();

    loop {
        if engine.has_reached() && holds.is_empty() {
            info!(target_ms = engine.target().epoch_millis(), "countdown target reached");
            return CountdownExit::Reached;
        }

        tokio::select! {
            biased;
            _ = shutdown.notified() => {
                info!("countdown cancelled");
                return CountdownExit::Cancelled;
            }
            units = next_release(&mut holds) => {
                let clear = units
                    .into_iter()
                    .map(|unit| RenderIntent::HighlightUnit { unit, on: false })
                    .collect::<Vec<_>>();
                if publish(&render_tx, clear).await.is_err() {
                    warn!("render channel closed; countdown exiting");
                    return CountdownExit::Detached;
                }
                continue;
            }
            // No ticks are taken once the target is reached.
            _ = ticker.tick(), if !engine.has_reached() => {}
        }

        let outcome = engine.tick(clock.now_epoch_millis());
        let snapshot = outcome.snapshot;
        debug!(
            days = snapshot.days,
            hours = snapshot.hours,
            minutes = snapshot.minutes,
            seconds = snapshot.seconds,
            "countdown tick"
        );

        let mut intents: Vec<RenderIntent> = TimeUnit::ALL
            .into_iter()
            .map(|unit| RenderIntent::SetUnit {
                unit,
                value: snapshot.value(unit),
            })
            .collect();
        for &unit in &outcome.changed {
            intents.push(RenderIntent::HighlightUnit { unit, on: true });
        }
        if outcome.reached {
            intents.push(RenderIntent::ShowCompletion {
                message: settings.completion_message.clone(),
            });
        }
        if publish(&render_tx, intents).await.is_err() {
            warn!("render channel closed; countdown exiting");
            return CountdownExit::Detached;
        }

        if !outcome.changed.is_empty() {
            holds.push_back(HighlightHold {
                units: outcome.changed,
                timer: delay.sleep(settings.highlight_duration),
            });
        }
    }
}

/// Running countdown task. Spawning again with a fresh engine restarts it.
#[derive(Debug)]
pub struct CountdownHandle {
    shutdown: Arc<Notify>,
    join: JoinHandle<CountdownExit>,
    exit_rx: watch::Receiver<Option<CountdownExit>>,
}

impl CountdownHandle {
    pub fn spawn<C, T, D>(
        target: CountdownTarget,
        clock: C,
        ticker: T,
        delay: D,
        settings: CountdownSettings,
        render_tx: mpsc::Sender<RenderIntent>,
    ) -> Self
    where
        C: Clock + 'static,
        T: Ticker + 'static,
        D: Delay + 'static,
    {
        let shutdown = Arc::new(Notify::new());
        let (exit_tx, exit_rx) = watch::channel(None);
        let task = countdown_task(
            CountdownEngine::new(target),
            clock,
            ticker,
            delay,
            settings,
            render_tx,
            shutdown.clone(),
        );
        let join = tokio::spawn(async move {
            let exit = task.await;
            let _ = exit_tx.send(Some(exit));
            exit
        });

        Self {
            shutdown,
            join,
            exit_rx,
        }
    }

    /// Stops the schedule at the next await point; no-op once finished.
    pub fn cancel(&self) {
        self.shutdown.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Resolves once the task has stopped. Safe to drop and call again.
    pub async fn finished(&mut self) -> Option<CountdownExit> {
        match self.exit_rx.wait_for(Option::is_some).await {
            Ok(exit) => *exit,
            // Sender dropped without an exit: the task panicked.
            Err(_) => None,
        }
    }

    pub async fn join(self) -> Option<CountdownExit> {
        match self.join.await {
            Ok(exit) => Some(exit),
            Err(err) => {
                error!(error = %err, "countdown task failed");
                None
            }
        }
    }
}
