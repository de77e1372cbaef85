//! Timer subscription

use std::time::{Duration, Instant};

use futures::stream::{self, BoxStream, StreamExt};
use tokio::time::{interval, MissedTickBehavior};

use super::{SubId, SubSource};

/// Emits the current instant once per `period`
///
/// The first tick fires immediately. Missed ticks are skipped rather than
/// burst, so a slow host does not receive a backlog of stale ticks.
/// Periods shorter than [`Every::MIN_PERIOD`] tick at that rate instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Every(pub Duration);

impl Every {
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub fn millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl SubSource for Every {
    type Output = Instant;

    fn id(&self) -> SubId {
        SubId::of::<Self>(&self.0)
    }

    fn stream(self: Box<Self>) -> BoxStream<'static, Instant> {
        let period = self.0.max(Self::MIN_PERIOD);
        // The interval is created on first poll so it binds to the host's runtime.
        stream::unfold(None, move |ticker| async move {
            let mut ticker = ticker.unwrap_or_else(|| {
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                ticker
            });
            let instant = ticker.tick().await;
            Some((instant.into_std(), Some(ticker)))
        })
        .boxed()
    }
}
