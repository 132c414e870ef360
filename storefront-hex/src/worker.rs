use std::sync::Arc;
use std::time::Duration;

use storefront_types::{RateSource, RefreshStatus, ReverseGeocodeSource};
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::StorefrontService;

/// Refreshes exchange rates on a fixed period.
///
/// A failed refresh is logged and retried on the next tick; the rate table
/// keeps whatever it held before.
pub struct RateRefreshWorker<G: ReverseGeocodeSource, R: RateSource> {
    service: Arc<StorefrontService<G, R>>,
    period: Duration,
}

impl<G: ReverseGeocodeSource, R: RateSource> RateRefreshWorker<G, R> {
    pub fn new(service: Arc<StorefrontService<G, R>>, period: Duration) -> Self {
        Self { service, period }
    }

    #[instrument(skip(self), fields(period_secs = self.period.as_secs()))]
    pub async fn run(self) {
        info!("Starting rate refresh worker");
        loop {
            self.tick().await;
            sleep(self.period).await;
        }
    }

    /// Performs a single refresh and reports whether it succeeded.
    pub async fn tick(&self) -> bool {
        let result = self.service.refresh_rates().await;
        match result.status {
            RefreshStatus::Updated => {
                info!(
                    updated = result.updated.len(),
                    ignored = result.ignored.len(),
                    "Exchange rates refreshed"
                );
                true
            }
            RefreshStatus::Failed => {
                warn!(
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "Exchange rate refresh failed, keeping previous rates"
                );
                false
            }
        }
    }
}
