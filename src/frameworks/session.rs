// Framework bootstrap for a page session: wires ports, starts both features at
// page-ready and feeds page events to the RSVP form.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::ports::{Clock, Delay, SubmissionRecorder, Ticker};
use crate::domain::{ElementId, InitError, RsvpForm};
use crate::frameworks::config::{self, ConfigError, InviteConfig, RENDER_CHANNEL_CAPACITY};
use crate::interface_adapters::page::{PageModel, render_task};
use crate::interface_adapters::protocol::{PageEvent, parse_event};
use crate::interface_adapters::state::{
    LoggingRecorder, PageState, SystemClock, TokioDelay, TokioTicker,
};
use crate::use_cases::{
    CountdownExit, CountdownHandle, RenderIntent, RsvpFormController, RsvpSettings,
    SubmissionOutcome, publish,
};

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Port implementations a session runs on.
pub struct SessionPorts<C, T, D, R> {
    pub clock: C,
    pub ticker: T,
    pub delay: D,
    pub recorder: R,
}

/// One page view: the shared page model, the running countdown and the RSVP
/// form. A feature whose elements are missing is simply absent.
pub struct PageSession<C, D, R> {
    state: PageState,
    countdown: Option<CountdownHandle>,
    rsvp: Option<RsvpFormController<C, D, R>>,
    render: JoinHandle<()>,
}

impl<C, D, R> PageSession<C, D, R>
where
    C: Clock + Clone + 'static,
    D: Delay + Clone + 'static,
    R: SubmissionRecorder,
{
    /// Page-ready: initializes both features and starts rendering.
    pub fn start<T>(
        mut page: PageModel,
        config: &InviteConfig,
        ports: SessionPorts<C, T, D, R>,
    ) -> Self
    where
        T: Ticker + 'static,
    {
        let SessionPorts {
            clock,
            ticker,
            delay,
            recorder,
        } = ports;
        let (render_tx, render_rx) = mpsc::channel::<RenderIntent>(RENDER_CHANNEL_CAPACITY);

        // Each initializer aborts on its own; the other feature still starts.
        let countdown = init_countdown(
            &page,
            config,
            clock.clone(),
            ticker,
            delay.clone(),
            render_tx.clone(),
        )
        .inspect_err(|err| error!(error = %err, "countdown disabled"))
        .ok();
        let rsvp = init_rsvp_form(&mut page, config, clock, delay, recorder)
            .inspect_err(|err| error!(error = %err, "rsvp form disabled"))
            .ok();

        let page = Arc::new(Mutex::new(page));
        let render = tokio::spawn(render_task(page.clone(), render_rx));
        info!(
            countdown = countdown.is_some(),
            rsvp = rsvp.is_some(),
            "page ready"
        );

        Self {
            state: PageState { page, render_tx },
            countdown,
            rsvp,
            render,
        }
    }

    /// Shared page model, as last rendered.
    pub fn page(&self) -> Arc<Mutex<PageModel>> {
        self.state.page.clone()
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn has_rsvp_form(&self) -> bool {
        self.rsvp.is_some()
    }

    /// Dispatches one page event. Returns the outcome for submit events.
    pub async fn handle(&mut self, event: PageEvent) -> Option<SubmissionOutcome> {
        let Some(rsvp) = self.rsvp.as_mut() else {
            warn!(?event, "rsvp form unavailable; event ignored");
            return None;
        };

        let intents = match event {
            PageEvent::Edit(field) => rsvp.field_edited(field.field),
            PageEvent::Focus(field) => rsvp.field_focused(field.field),
            PageEvent::Blur(field) => rsvp.field_blurred(field.field),
            PageEvent::Dismiss => rsvp.dismiss_failure(),
            PageEvent::Submit(dto) => {
                let form = RsvpForm::from(dto);
                return Some(rsvp.submit(&form, &self.state.render_tx).await);
            }
        };

        if publish(&self.state.render_tx, intents).await.is_err() {
            warn!("render channel closed; page event dropped");
        }
        None
    }

    /// Waits for the countdown to stop on its own. Cancel-safe.
    pub async fn countdown_finished(&mut self) -> Option<CountdownExit> {
        match self.countdown.as_mut() {
            Some(handle) => handle.finished().await,
            None => None,
        }
    }

    /// Tears the page down: stops the countdown, drains pending renders and
    /// returns the final page.
    pub async fn close(self) -> PageModel {
        let Self {
            state,
            countdown,
            rsvp,
            render,
        } = self;

        if let Some(handle) = countdown {
            handle.cancel();
            handle.join().await;
        }
        drop(rsvp);

        let PageState { page, render_tx } = state;
        drop(render_tx);
        if let Err(err) = render.await {
            error!(error = %err, "render task failed");
        }

        let page = page.lock().await;
        page.clone()
    }
}

fn init_countdown<C, T, D>(
    page: &PageModel,
    config: &InviteConfig,
    clock: C,
    ticker: T,
    delay: D,
    render_tx: mpsc::Sender<RenderIntent>,
) -> Result<CountdownHandle, InitError>
where
    C: Clock + 'static,
    T: Ticker + 'static,
    D: Delay + 'static,
{
    page.require_all(&ElementId::COUNTDOWN)?;

    Ok(CountdownHandle::spawn(
        config.target,
        clock,
        ticker,
        delay,
        config.countdown.clone(),
        render_tx,
    ))
}

fn init_rsvp_form<C, D, R>(
    page: &mut PageModel,
    config: &InviteConfig,
    clock: C,
    delay: D,
    recorder: R,
) -> Result<RsvpFormController<C, D, R>, InitError>
where
    C: Clock,
    D: Delay,
    R: SubmissionRecorder,
{
    page.require_all(&ElementId::RSVP)?;

    let mut settings = RsvpSettings {
        submit_delay: config.submit_delay,
        ..RsvpSettings::default()
    };
    // Restore whatever label the page ships with after a failed attempt.
    let label = page.require(ElementId::SubmitButton)?.text.trim();
    if !label.is_empty() {
        settings.submit_label = label.to_string();
    }
    page.set_visible(ElementId::SuccessPanel, false);

    Ok(RsvpFormController::new(clock, delay, recorder, settings))
}

/// Runs a page session on the system clock, reading page events from stdin
/// until it closes, then keeping the page up until the countdown ends or
/// Ctrl-C.
pub async fn run() -> Result<(), ConfigError> {
    init_runtime();

    let config = config::load().inspect_err(|err| {
        error!(error = %err, "invalid configuration");
    })?;
    info!(
        target_ms = config.target.epoch_millis(),
        tick_ms = config.tick_interval.as_millis(),
        "loaded invitation config"
    );

    let ports = SessionPorts {
        clock: SystemClock,
        ticker: TokioTicker::new(config.tick_interval),
        delay: TokioDelay,
        recorder: LoggingRecorder,
    };
    let mut session = PageSession::start(PageModel::invitation(), &config, ports);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interrupted = false;
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match parse_event(&line) {
                    Ok(event) => {
                        if let Some(outcome) = session.handle(event).await {
                            info!(?outcome, "rsvp attempt settled");
                        }
                    }
                    Err(err) => warn!(error = %err, "malformed page event skipped"),
                },
                Ok(None) => {
                    info!("page event source closed");
                    break;
                }
                Err(err) => {
                    warn!(error = %err, "page event source failed");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                interrupted = true;
                break;
            }
        }
    }

    if !interrupted && session.has_countdown() {
        tokio::select! {
            exit = session.countdown_finished() => info!(?exit, "countdown stopped"),
            _ = tokio::signal::ctrl_c() => {}
        }
    }

    let page = session.close().await;
    info!(countdown = %page.countdown_text(), "page session closed");
    Ok(())
}
