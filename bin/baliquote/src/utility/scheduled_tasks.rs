use baliquote_core::services::automation_service::AutomationService;
use baliquote_core::services::exchange_rate_service::ExchangeRateService;
use baliquote_core::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

const DAILY_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24);

pub fn spawn_background_tasks(state: Arc<AppState>) {
    let fx_state = state.clone();
    tokio::spawn(async move {
        info!("Starting exchange rate refresh task");
        refresh_exchange_rates(fx_state).await;
    });

    let expiry_state = state.clone();
    tokio::spawn(async move {
        info!("Starting daily quote expiry task");
        expire_overdue_quotes(expiry_state).await;
    });

    info!("Background tasks spawned");
}

/// First tick fires immediately so a fresh database gets rates on boot.
async fn refresh_exchange_rates(state: Arc<AppState>) {
    let period = Duration::from_secs(state.config.fx_refresh_interval_secs.max(60));
    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match ExchangeRateService::refresh_rates(&state).await {
            Ok(result) => debug!(source = %result.source, "Scheduled exchange rate refresh done"),
            Err(e) => error!("Exchange rate refresh failed: {}", e),
        }
    }
}

async fn expire_overdue_quotes(state: Arc<AppState>) {
    let mut interval = interval(DAILY_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match AutomationService::expire_quotes(&state) {
            Ok(result) if result.expired == 0 => debug!("No overdue quotes"),
            Ok(result) => info!("Expired {} overdue quotes", result.expired),
            Err(e) => error!("Quote expiry sweep failed: {}", e),
        }
    }
}
