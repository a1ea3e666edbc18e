//! The polling loop: fetch → validate → translate → notify → sleep.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    domain::Timestamp, errors::Error, homework::report_from_response, notifier::Notifier,
    ports::HomeworkSource, Result,
};

/// What a single cycle ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Upstream returned no homeworks; nothing was sent.
    NoChanges,
    /// A status report was handed to the notifier.
    Delivered,
    /// The cycle failed and the error text was handed to the notifier.
    ErrorNotified,
    /// The cycle failed with the same text as the last reported error.
    ErrorSuppressed,
}

pub struct Poller {
    source: Arc<dyn HomeworkSource>,
    notifier: Notifier,
    interval: Duration,
    cursor: Timestamp,
    last_error: Option<String>,
}

impl Poller {
    pub fn new(
        source: Arc<dyn HomeworkSource>,
        notifier: Notifier,
        interval: Duration,
        start: Timestamp,
    ) -> Self {
        Self {
            source,
            notifier,
            interval,
            cursor: start,
            last_error: None,
        }
    }

    pub fn cursor(&self) -> Timestamp {
        self.cursor
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run one cycle against the current cursor, then move the cursor to `now`.
    ///
    /// The cursor moves even when the cycle fails.
    #[instrument(skip_all, fields(from_date = self.cursor))]
    pub async fn run_cycle(&mut self, now: Timestamp) -> CycleOutcome {
        let outcome = match self.poll().await {
            Ok(None) => {
                debug!(from_date = self.cursor, "homework status has not changed");
                self.last_error = None;
                CycleOutcome::NoChanges
            }
            Ok(Some(report)) => {
                self.notifier.notify(&report).await;
                self.last_error = None;
                CycleOutcome::Delivered
            }
            Err(e) => self.report_error(e).await,
        };

        self.cursor = now;
        outcome
    }

    /// Poll forever, sleeping `interval` between cycles, until `shutdown` fires.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            chat_id = %self.notifier.chat_id(),
            interval_secs = self.interval.as_secs(),
            from_date = self.cursor,
            "polling started"
        );

        loop {
            let now = Utc::now().timestamp();
            tokio::select! {
                _ = shutdown.cancelled() => break,
                outcome = self.run_cycle(now) => debug!(?outcome, "cycle finished"),
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = sleep(self.interval) => {}
            }
        }

        info!("polling stopped");
    }

    async fn poll(&self) -> Result<Option<String>> {
        let response = self.source.fetch(self.cursor).await?;
        report_from_response(&response)
    }

    #[instrument(skip_all, fields(kind = e.kind()))]
    async fn report_error(&mut self, e: Error) -> CycleOutcome {
        let message = e.user_message();
        if e.is_upstream() {
            error!("{message}");
        } else {
            error!("unexpected failure in polling cycle: {message}");
        }

        if self.last_error.as_deref() == Some(message.as_str()) {
            debug!("same error already reported, not notifying again");
            return CycleOutcome::ErrorSuppressed;
        }

        // Only a delivered error suppresses its repeats.
        if self.notifier.notify(&message).await {
            self.last_error = Some(message);
        } else {
            warn!("error notification not delivered, will retry next cycle");
        }
        CycleOutcome::ErrorNotified
    }
}
