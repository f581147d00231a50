use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ItemStatus;

/// A story item ("matéria").
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct Item {
	/// The unique identifier for the item.
	pub id: Uuid,
	/// The block which owns the item.
	pub bloco_id: Uuid,
	/// The position of the item within its block, a dense 1..N sequence.
	pub sort_order: i32,
	/// The page number ("página"), unique across the owning newscast and kept
	/// stable when items move between blocks of the same newscast.
	pub page_number: i32,
	/// The slug/headline ("retranca").
	pub headline: String,
	/// The teleprompter head ("cabeça"), read by the anchor.
	pub lead_in: Option<String>,
	/// The story body read off the teleprompter.
	pub script: Option<String>,
	/// The on-screen caption ("GC").
	pub caption: Option<String>,
	/// Editorial status of the item.
	pub status: ItemStatus,
	/// The reporter credited on the story.
	pub reporter: Option<String>,
	/// Where the story was recorded.
	pub location: Option<String>,
	/// Free-form tags.
	pub tags: Vec<String>,
	/// Equipment notes (live truck, drone, ...).
	pub equipment: Option<String>,
	/// Expected on-air duration.
	pub duration_seconds: i32,
	/// Monotonic per-row version, incremented on every write. Consumers of
	/// the change feed use it to discard stale and echoed updates.
	pub version: i64,
	/// The time the item was created.
	pub created_at: DateTime<Utc>,
	/// The time the item was last updated.
	pub updated_at: DateTime<Utc>,
}

impl Item {
	pub async fn by_id<'e>(executor: impl sqlx::PgExecutor<'e>, id: Uuid) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM materias WHERE id = $1")
			.bind(id)
			.fetch_optional(executor)
			.await
	}

	pub async fn in_block<'e>(executor: impl sqlx::PgExecutor<'e>, bloco_id: Uuid) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as("SELECT * FROM materias WHERE bloco_id = $1 ORDER BY sort_order")
			.bind(bloco_id)
			.fetch_all(executor)
			.await
	}

	pub async fn in_newscast<'e>(executor: impl sqlx::PgExecutor<'e>, telejornal_id: Uuid) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as(
			"SELECT materias.* FROM materias \
			 INNER JOIN blocos ON blocos.id = materias.bloco_id \
			 WHERE blocos.telejornal_id = $1 \
			 ORDER BY blocos.sort_order, materias.sort_order",
		)
		.bind(telejornal_id)
		.fetch_all(executor)
		.await
	}

	/// The next free page number in a newscast: one past the maximum page
	/// number currently in use.
	pub async fn next_page_number<'e>(executor: impl sqlx::PgExecutor<'e>, telejornal_id: Uuid) -> sqlx::Result<i32> {
		sqlx::query_scalar(
			"SELECT COALESCE(MAX(materias.page_number), 0) + 1 FROM materias \
			 INNER JOIN blocos ON blocos.id = materias.bloco_id \
			 WHERE blocos.telejornal_id = $1",
		)
		.bind(telejornal_id)
		.fetch_one(executor)
		.await
	}
}
