use std::time::Duration;

/// Delay applied after every HTTP attempt
///
/// The controller calls [`Pacer::pause`] unconditionally after each fetch, whether it
/// succeeded, failed or was a detail-page fetch.
#[allow(async_fn_in_trait)]
pub trait Pacer {
    async fn pause(&self, interval: Duration);
}

/// Pacer that sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    async fn pause(&self, interval: Duration) {
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }
}
