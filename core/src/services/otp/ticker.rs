//! Background countdown ticker

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::entities::TickOutcome;

use super::state::SharedState;

/// Shortest accepted tick period; `interval_at` rejects zero
const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Owns a running ticker task; dropping it stops the task
pub(crate) struct TickerGuard {
    token: CancellationToken,
}

impl TickerGuard {
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Start decrementing the countdown once per `period` until it reaches zero
/// or `token` is cancelled
///
/// Must be called from within a tokio runtime.
pub(crate) fn spawn_ticker(
    state: Arc<SharedState>,
    period: Duration,
    token: CancellationToken,
) -> TickerGuard {
    let task_token = token.clone();
    let period = period.max(MIN_TICK_PERIOD);

    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    debug!(event = "countdown_cancelled", "Countdown ticker cancelled");
                    break;
                }
                _ = interval.tick() => {
                    match state.update(|s| s.timer.tick()) {
                        TickOutcome::Running(_) => {}
                        TickOutcome::Expired => {
                            info!(event = "countdown_expired", "Resend is now available");
                            break;
                        }
                        TickOutcome::Idle => break,
                    }
                }
            }
        }
    });

    TickerGuard { token }
}
