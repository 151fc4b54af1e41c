// Scheduler - Drives poll cycles on a fixed interval until cancelled
use crate::application::poll_service::PollService;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

pub struct PollScheduler {
    service: PollService,
    interval: Duration,
}

/// Handle to a running scheduler.
///
/// Dropping the handle does not stop the loop; call [`PollHandle::cancel`]
/// or [`PollHandle::shutdown`]. Cycles already in flight always finish.
pub struct PollHandle {
    token: CancellationToken,
    trigger: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl PollScheduler {
    pub fn new(service: PollService, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Start polling: one cycle right away, then one per interval.
    ///
    /// Every cycle runs as its own task, so a slow cycle does not hold back
    /// the next tick.
    pub fn start(self) -> PollHandle {
        let token = CancellationToken::new();
        let (trigger_tx, mut trigger_rx) = mpsc::channel(8);
        let loop_token = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(interval_ms = self.interval.as_millis() as u64, "Poll scheduler started");

            loop {
                tokio::select! {
                    biased;
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {}
                    Some(()) = trigger_rx.recv() => {
                        tracing::debug!("Manual poll triggered");
                    }
                }

                let service = self.service.clone();
                tokio::spawn(async move {
                    service.run_cycle().await;
                });
            }

            tracing::info!("Poll scheduler stopped");
        });

        PollHandle {
            token,
            trigger: trigger_tx,
            task,
        }
    }
}

impl PollHandle {
    /// Run one extra cycle now. Returns false once the scheduler has stopped.
    pub async fn trigger(&self) -> bool {
        self.trigger.send(()).await.is_ok()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop ticking and wait for the loop to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!("Poll scheduler task ended abnormally: {}", e);
        }
    }
}
