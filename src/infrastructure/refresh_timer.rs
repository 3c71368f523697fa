// Tokio-backed refresh schedule
use crate::application::refresh_schedule::RefreshSchedule;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

/// Longer periods are clamped so deadline arithmetic stays in range
const MAX_PERIOD: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Emits `()` on `ticks` every period until stopped. At most one task runs at a time.
pub struct TokioRefreshTimer {
    ticks: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl TokioRefreshTimer {
    pub fn new(ticks: mpsc::Sender<()>) -> Self {
        Self { ticks, task: None }
    }

    /// Timer plus the receiving end of its tick channel
    pub fn channel() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        (Self::new(tx), rx)
    }
}

impl RefreshSchedule for TokioRefreshTimer {
    fn start(&mut self, period: Duration) {
        self.stop();

        let period = period.min(MAX_PERIOD);
        let tx = self.ticks.clone();
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = IntervalStream::new(interval);

            while ticks.next().await.is_some() {
                // A full channel means a refresh is already pending
                if let Err(mpsc::error::TrySendError::Closed(_)) = tx.try_send(()) {
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TokioRefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
