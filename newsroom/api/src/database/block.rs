use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A block ("bloco"): an ordered segment of a newscast which owns an ordered
/// list of items.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct Block {
	/// The unique identifier for the block.
	pub id: Uuid,
	/// The newscast which owns the block.
	pub telejornal_id: Uuid,
	/// The name of the block, e.g. "Bloco 1".
	pub name: String,
	/// The position of the block within its newscast, 1-based and dense.
	pub sort_order: i32,
	/// The time the block was created.
	pub created_at: DateTime<Utc>,
	/// The time the block was last updated.
	pub updated_at: DateTime<Utc>,
}

impl Block {
	pub async fn by_id<'e>(executor: impl sqlx::PgExecutor<'e>, id: Uuid) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM blocos WHERE id = $1")
			.bind(id)
			.fetch_optional(executor)
			.await
	}

	pub async fn in_newscast<'e>(executor: impl sqlx::PgExecutor<'e>, telejornal_id: Uuid) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as("SELECT * FROM blocos WHERE telejornal_id = $1 ORDER BY sort_order")
			.bind(telejornal_id)
			.fetch_all(executor)
			.await
	}

	pub async fn last_in_newscast<'e>(
		executor: impl sqlx::PgExecutor<'e>,
		telejornal_id: Uuid,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM blocos WHERE telejornal_id = $1 ORDER BY sort_order DESC LIMIT 1")
			.bind(telejornal_id)
			.fetch_optional(executor)
			.await
	}
}
