use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{require_open, RundownError};
use crate::database::{Block, Item, Newscast, RundownSnapshot, SnapshotBlock, SnapshotPayload};
use crate::events::{LifecycleEvent, RundownEvent};
use crate::global::GlobalState;

/// Opens a newscast's rundown for editing.
///
/// A newscast with no blocks yet gets its first block created here: a copy of
/// the previous day's last block (items included, fresh identities) when
/// `seed_from_previous` is set and such a block exists, else an empty
/// "Bloco 1". Reopening a newscast that already has blocks leaves them alone.
pub async fn open_rundown(
	global: &Arc<GlobalState>,
	newscast_id: Uuid,
	seed_from_previous: bool,
) -> Result<Newscast, RundownError> {
	let mut tx = global.db.begin().await?;

	// The row lock serializes concurrent open/close of the same newscast.
	let newscast: Newscast = sqlx::query_as("SELECT * FROM telejornais WHERE id = $1 FOR UPDATE")
		.bind(newscast_id)
		.fetch_optional(&mut *tx)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;

	if newscast.rundown_open {
		return Err(RundownError::InvalidInput("rundown is already open"));
	}

	let newscast: Newscast =
		sqlx::query_as("UPDATE telejornais SET rundown_open = true, updated_at = NOW() WHERE id = $1 RETURNING *")
			.bind(newscast_id)
			.fetch_one(&mut *tx)
			.await?;

	let mut created_block = None;
	let mut created_items = Vec::new();

	if Block::in_newscast(&mut *tx, newscast_id).await?.is_empty() {
		let seed = if seed_from_previous {
			match Newscast::previous_day(&mut *tx, &newscast.name, newscast.air_date).await? {
				Some(previous) => match Block::last_in_newscast(&mut *tx, previous.id).await? {
					Some(block) => {
						let items = Item::in_block(&mut *tx, block.id).await?;
						Some((block.name, items))
					}
					None => None,
				},
				None => None,
			}
		} else {
			None
		};

		let (name, seed_items) = seed.unwrap_or_else(|| ("Bloco 1".to_string(), Vec::new()));

		let block: Block = sqlx::query_as(
			"INSERT INTO blocos (id, telejornal_id, name, sort_order, created_at, updated_at) \
			 VALUES ($1, $2, $3, 1, NOW(), NOW()) \
			 RETURNING *",
		)
		.bind(Uuid::new_v4())
		.bind(newscast_id)
		.bind(&name)
		.fetch_one(&mut *tx)
		.await?;

		for (index, item) in seed_items.iter().enumerate() {
			let created: Item = sqlx::query_as(
				"INSERT INTO materias (id, bloco_id, sort_order, page_number, headline, lead_in, script, caption, \
				 status, reporter, location, tags, equipment, duration_seconds, version, created_at, updated_at) \
				 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 1, NOW(), NOW()) \
				 RETURNING *",
			)
			.bind(Uuid::new_v4())
			.bind(block.id)
			.bind(index as i32 + 1)
			.bind(item.page_number)
			.bind(&item.headline)
			.bind(&item.lead_in)
			.bind(&item.script)
			.bind(&item.caption)
			.bind(item.status)
			.bind(&item.reporter)
			.bind(&item.location)
			.bind(&item.tags)
			.bind(&item.equipment)
			.bind(item.duration_seconds)
			.fetch_one(&mut *tx)
			.await?;
			created_items.push(created);
		}

		created_block = Some(block);
	}

	tx.commit().await?;

	global
		.publish_lifecycle(newscast_id, &LifecycleEvent::RundownOpened { newscast_id })
		.await?;

	if let Some(block) = created_block {
		global
			.publish_rundown(newscast_id, &RundownEvent::BlockUpserted { block })
			.await?;
	}
	for item in created_items {
		global
			.publish_rundown(newscast_id, &RundownEvent::ItemUpserted { item, old_block_id: None })
			.await?;
	}

	Ok(newscast)
}

/// Closes a newscast's rundown: snapshots the full block/item tree into
/// `espelhos_salvos`, then flips the flag, atomically.
pub async fn close_rundown(
	global: &Arc<GlobalState>,
	newscast_id: Uuid,
) -> Result<(Newscast, RundownSnapshot), RundownError> {
	let mut tx = global.db.begin().await?;

	let newscast: Newscast = sqlx::query_as("SELECT * FROM telejornais WHERE id = $1 FOR UPDATE")
		.bind(newscast_id)
		.fetch_optional(&mut *tx)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;

	require_open(&newscast)?;

	let blocks = Block::in_newscast(&mut *tx, newscast_id).await?;
	let mut snapshot_blocks = Vec::with_capacity(blocks.len());
	for block in blocks {
		let items = Item::in_block(&mut *tx, block.id).await?;
		snapshot_blocks.push(SnapshotBlock { block, items });
	}

	let payload = serde_json::to_value(SnapshotPayload {
		newscast: newscast.clone(),
		blocks: snapshot_blocks,
	})
	.map_err(|_| RundownError::InvalidInput("failed to encode snapshot"))?;

	let snapshot: RundownSnapshot = sqlx::query_as(
		"INSERT INTO espelhos_salvos (id, telejornal_id, label, payload, created_at) \
		 VALUES ($1, $2, $3, $4, NOW()) \
		 RETURNING *",
	)
	.bind(Uuid::new_v4())
	.bind(newscast_id)
	.bind(snapshot_label(&newscast))
	.bind(payload)
	.fetch_one(&mut *tx)
	.await?;

	let newscast: Newscast =
		sqlx::query_as("UPDATE telejornais SET rundown_open = false, updated_at = NOW() WHERE id = $1 RETURNING *")
			.bind(newscast_id)
			.fetch_one(&mut *tx)
			.await?;

	tx.commit().await?;

	global
		.publish_lifecycle(
			newscast_id,
			&LifecycleEvent::RundownClosed {
				newscast_id,
				snapshot_id: snapshot.id,
			},
		)
		.await?;

	Ok((newscast, snapshot))
}

/// Force-closes every rundown still open for an air date before `today`.
/// Returns how many were closed. Failures are logged and skipped so one bad
/// newscast doesn't wedge the rollover.
pub async fn close_stale_rundowns(global: &Arc<GlobalState>, today: NaiveDate) -> Result<usize, RundownError> {
	let stale: Vec<Newscast> = sqlx::query_as("SELECT * FROM telejornais WHERE rundown_open = true AND air_date < $1")
		.bind(today)
		.fetch_all(global.db.as_ref())
		.await?;

	let mut closed = 0;
	for newscast in stale {
		match close_rundown(global, newscast.id).await {
			Ok(_) => {
				tracing::info!(newscast_id = %newscast.id, name = %newscast.name, "force-closed stale rundown");
				closed += 1;
			}
			Err(err) => {
				tracing::error!(newscast_id = %newscast.id, error = %err, "failed to force-close stale rundown");
			}
		}
	}

	Ok(closed)
}

fn snapshot_label(newscast: &Newscast) -> String {
	format!("{} {}", newscast.name, newscast.air_date)
}

#[cfg(test)]
mod tests {
	use chrono::{TimeZone, Utc};

	use super::*;
	use crate::database::ItemStatus;

	fn newscast() -> Newscast {
		Newscast {
			id: Uuid::from_u128(1),
			name: "Jornal da Noite".to_string(),
			air_date: NaiveDate::from_ymd_opt(2026, 8, 4).expect("valid date"),
			rundown_open: true,
			created_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
			updated_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
		}
	}

	#[test]
	fn test_snapshot_label() {
		assert_eq!(snapshot_label(&newscast()), "Jornal da Noite 2026-08-04");
	}

	#[test]
	fn test_snapshot_payload_round_trip() {
		let newscast = newscast();
		let block = Block {
			id: Uuid::from_u128(2),
			telejornal_id: newscast.id,
			name: "Bloco 1".to_string(),
			sort_order: 1,
			created_at: newscast.created_at,
			updated_at: newscast.updated_at,
		};
		let item = Item {
			id: Uuid::from_u128(3),
			bloco_id: block.id,
			sort_order: 1,
			page_number: 1,
			headline: "Incêndio".to_string(),
			lead_in: None,
			script: None,
			caption: None,
			status: ItemStatus::Draft,
			reporter: None,
			location: None,
			tags: Vec::new(),
			equipment: None,
			duration_seconds: 90,
			version: 1,
			created_at: newscast.created_at,
			updated_at: newscast.updated_at,
		};

		let payload = SnapshotPayload {
			newscast,
			blocks: vec![SnapshotBlock {
				block,
				items: vec![item],
			}],
		};

		let value = serde_json::to_value(&payload).expect("failed to encode");
		let decoded: SnapshotPayload = serde_json::from_value(value).expect("failed to decode");

		assert_eq!(decoded.blocks.len(), 1);
		assert_eq!(decoded.blocks[0].items[0].headline, "Incêndio");
		assert_eq!(decoded.newscast.name, "Jornal da Noite");
	}
}
