use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::clock::TimeSource;
use crate::render::FrameRenderer;
use crate::sink::DisplaySink;

/// What to do when a refresh cycle fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and try again at the next minute.
    #[default]
    SkipFrame,
    /// End the loop and hand the error to whoever joins it.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    pub poll_increment: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            poll_increment: crate::konst::POLL_INCREMENT,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Outcome of a loop that stopped without aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshSummary {
    pub frames_delivered: u64,
    pub failed_cycles: u64,
}

/// Renders the time and pushes it to a display once a minute until stopped.
pub struct RefreshScheduler<S, T> {
    sink: S,
    time: T,
    renderer: FrameRenderer,
    settings: RefreshSettings,
}

impl<S, T> RefreshScheduler<S, T>
where
    S: DisplaySink,
    T: TimeSource,
{
    pub fn new(sink: S, time: T, renderer: FrameRenderer, settings: RefreshSettings) -> Self {
        Self {
            sink,
            time,
            renderer,
            settings,
        }
    }

    /// Spawns the refresh loop onto the current tokio runtime.
    pub fn start(self) -> RefreshHandle {
        let cancellation_token = CancellationToken::new();
        let task = tokio::task::spawn(self.run(cancellation_token.clone()));

        RefreshHandle {
            cancellation_token,
            task,
        }
    }

    async fn run(
        mut self,
        cancellation_token: CancellationToken,
    ) -> Result<RefreshSummary, crate::error::Error> {
        let _stopped_on_exit = cancellation_token.clone().drop_guard();
        let canvas = self.sink.canvas();
        let mut summary = RefreshSummary::default();

        tracing::info!(
            %canvas,
            font = %self.renderer.font(),
            poll_increment = ?self.settings.poll_increment,
            "Starting refresh loop"
        );

        while !cancellation_token.is_cancelled() {
            match self.refresh_once() {
                Ok(()) => summary.frames_delivered += 1,
                Err(error) => match self.settings.failure_policy {
                    FailurePolicy::SkipFrame => {
                        summary.failed_cycles += 1;
                        tracing::error!(?error, "Refresh failed, skipping frame");
                    }
                    FailurePolicy::Abort => {
                        tracing::error!(?error, "Refresh failed, stopping");
                        return Err(error);
                    }
                },
            }

            let remaining = match self.time.now() {
                Ok(now) => crate::clock::until_next_minute(&now),
                Err(error) => {
                    tracing::warn!(?error, "Could not read time, waiting a full minute");
                    Duration::from_secs(60)
                }
            };

            wait(remaining, self.settings.poll_increment, &cancellation_token).await;
        }

        tracing::info!(?summary, "Refresh loop stopped");
        Ok(summary)
    }

    fn refresh_once(&mut self) -> Result<(), crate::error::Error> {
        let now = self.time.now()?;
        let time_str = crate::clock::format_time(&now)?;

        let frame = self
            .renderer
            .render(self.sink.canvas(), &time_str)?
            .oriented(self.sink.orientation());
        self.sink.push(&frame)?;

        tracing::debug!(%time_str, "Rendered clock");
        Ok(())
    }
}

/// Sleeps for `remaining` in slices of at most `poll_increment`, giving up as
/// soon as a stop is requested.
///
/// The last slice is shortened to whatever is left, so the next refresh lands
/// on second :01 instead of up to one `poll_increment` past it.
async fn wait(
    mut remaining: Duration,
    poll_increment: Duration,
    cancellation_token: &CancellationToken,
) {
    while !remaining.is_zero() {
        let slice = remaining.min(poll_increment);

        let Some(()) = cancellation_token
            .run_until_cancelled(tokio::time::sleep(slice))
            .await
        else {
            tracing::debug!("Stop requested while waiting");
            return;
        };

        remaining = remaining.saturating_sub(slice);
    }
}

/// Owner of a running refresh loop.
pub struct RefreshHandle {
    cancellation_token: CancellationToken,
    task: tokio::task::JoinHandle<Result<RefreshSummary, crate::error::Error>>,
}

impl RefreshHandle {
    /// Asks the loop to stop. Returns immediately; safe to call repeatedly.
    pub fn stop(&self) {
        if !self.is_stopped() {
            tracing::info!("Stopping refresh loop");
        }
        self.cancellation_token.cancel();
    }

    /// True once a stop was requested or the loop ended on its own.
    pub fn is_stopped(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Resolves when the loop is stopping, for whatever reason.
    pub async fn finished(&self) {
        self.cancellation_token.cancelled().await
    }

    /// Waits for the loop to exit.
    pub async fn join(self) -> Result<RefreshSummary, crate::error::Error> {
        self.task.await.map_err(crate::error::Error::Join)?
    }
}
