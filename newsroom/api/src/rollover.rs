use std::sync::Arc;
use std::time::Duration;

use tokio::select;

use crate::global::GlobalState;
use crate::rundown;

/// Watches the calendar. When the date changes while the service is running,
/// every rundown still open for a past air date is force-closed
/// (snapshot-then-flip), independent of user action.
pub async fn run(global: Arc<GlobalState>) -> anyhow::Result<()> {
	let mut timer = tokio::time::interval(Duration::from_secs(global.config.rundown.rollover_interval_secs));
	let mut last_date = chrono::Local::now().date_naive();

	loop {
		select! {
			_ = global.ctx.done() => return Ok(()),
			_ = timer.tick() => {}
		}

		let today = chrono::Local::now().date_naive();
		if today == last_date {
			continue;
		}

		tracing::info!(%today, "date rolled over, closing stale rundowns");

		match rundown::close_stale_rundowns(&global, today).await {
			Ok(count) if count > 0 => tracing::info!(count, "closed stale rundowns"),
			Ok(_) => {}
			Err(err) => tracing::error!(error = %err, "failed to close stale rundowns"),
		}

		last_date = today;
	}
}
