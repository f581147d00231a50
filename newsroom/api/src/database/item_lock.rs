use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A cooperative edit lock on an item. Locks do not gate writes at the
/// storage layer; they exist so two producers don't open the same edit
/// dialog. Acquire/renew/release are compare-and-swap on the token, so the
/// cooperation itself is race-free.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct ItemLock {
	/// The locked item.
	pub item_id: Uuid,
	/// Who holds the lock (a display name, not an authenticated identity).
	pub holder: String,
	/// The secret handed to the holder; renew/release must present it.
	pub token: Uuid,
	/// The time the lock was acquired.
	pub acquired_at: DateTime<Utc>,
	/// The time the lock lapses unless renewed.
	pub expires_at: DateTime<Utc>,
}

impl ItemLock {
	pub async fn by_item<'e>(executor: impl sqlx::PgExecutor<'e>, item_id: Uuid) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM materias_locks WHERE item_id = $1 AND expires_at > NOW()")
			.bind(item_id)
			.fetch_optional(executor)
			.await
	}

	/// Inserts a lock, or steals an expired one. Returns `None` when a live
	/// lock is held by someone else.
	pub async fn acquire<'e>(
		executor: impl sqlx::PgExecutor<'e>,
		item_id: Uuid,
		holder: &str,
		ttl_secs: i64,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as(
			"INSERT INTO materias_locks (item_id, holder, token, acquired_at, expires_at) \
			 VALUES ($1, $2, $3, NOW(), NOW() + make_interval(secs => $4)) \
			 ON CONFLICT (item_id) DO UPDATE \
			 SET holder = $2, token = $3, acquired_at = NOW(), expires_at = NOW() + make_interval(secs => $4) \
			 WHERE materias_locks.expires_at <= NOW() \
			 RETURNING *",
		)
		.bind(item_id)
		.bind(holder)
		.bind(Uuid::new_v4())
		.bind(ttl_secs as f64)
		.fetch_optional(executor)
		.await
	}

	/// Extends the lock, provided the caller still holds it.
	pub async fn renew<'e>(
		executor: impl sqlx::PgExecutor<'e>,
		item_id: Uuid,
		token: Uuid,
		ttl_secs: i64,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as(
			"UPDATE materias_locks SET expires_at = NOW() + make_interval(secs => $3) \
			 WHERE item_id = $1 AND token = $2 AND expires_at > NOW() \
			 RETURNING *",
		)
		.bind(item_id)
		.bind(token)
		.bind(ttl_secs as f64)
		.fetch_optional(executor)
		.await
	}

	/// Releases the lock, provided the caller still holds it.
	pub async fn release<'e>(executor: impl sqlx::PgExecutor<'e>, item_id: Uuid, token: Uuid) -> sqlx::Result<bool> {
		let result = sqlx::query("DELETE FROM materias_locks WHERE item_id = $1 AND token = $2")
			.bind(item_id)
			.bind(token)
			.execute(executor)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}
