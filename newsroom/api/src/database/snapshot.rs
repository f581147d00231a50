use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Block, Item, Newscast};

/// An immutable archival copy of a rundown ("espelho salvo"), taken when the
/// rundown is closed.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct RundownSnapshot {
	/// The unique identifier for the snapshot.
	pub id: Uuid,
	/// The newscast the snapshot was taken from.
	pub telejornal_id: Uuid,
	/// A human-readable label, e.g. "Jornal da Noite 2026-08-04".
	pub label: String,
	/// The full block/item tree at close time.
	pub payload: serde_json::Value,
	/// The time the snapshot was taken.
	pub created_at: DateTime<Utc>,
}

/// The JSONB shape stored in a snapshot's `payload` column: the whole tree,
/// identities included, as it stood at close time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SnapshotPayload {
	pub newscast: Newscast,
	pub blocks: Vec<SnapshotBlock>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SnapshotBlock {
	pub block: Block,
	pub items: Vec<Item>,
}

impl RundownSnapshot {
	pub async fn by_id<'e>(executor: impl sqlx::PgExecutor<'e>, id: Uuid) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM espelhos_salvos WHERE id = $1")
			.bind(id)
			.fetch_optional(executor)
			.await
	}

	pub async fn in_newscast<'e>(executor: impl sqlx::PgExecutor<'e>, telejornal_id: Uuid) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as("SELECT * FROM espelhos_salvos WHERE telejornal_id = $1 ORDER BY created_at DESC")
			.bind(telejornal_id)
			.fetch_all(executor)
			.await
	}
}
