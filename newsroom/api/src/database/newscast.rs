use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A newscast ("telejornal"): one edition of a show on a given air date.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct Newscast {
	/// The unique identifier for the newscast.
	pub id: Uuid,
	/// The name of the show, e.g. "Jornal da Noite".
	pub name: String,
	/// The calendar date this edition airs.
	pub air_date: NaiveDate,
	/// Whether the rundown is open for editing. All block/item mutation is
	/// gated on this flag.
	pub rundown_open: bool,
	/// The time the newscast was created.
	pub created_at: DateTime<Utc>,
	/// The time the newscast was last updated.
	pub updated_at: DateTime<Utc>,
}

impl Newscast {
	pub async fn by_id<'e>(executor: impl sqlx::PgExecutor<'e>, id: Uuid) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM telejornais WHERE id = $1")
			.bind(id)
			.fetch_optional(executor)
			.await
	}

	/// The same show's edition of the previous day, used to seed the first
	/// block when a rundown is opened.
	pub async fn previous_day<'e>(
		executor: impl sqlx::PgExecutor<'e>,
		name: &str,
		air_date: NaiveDate,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM telejornais WHERE name = $1 AND air_date = $2")
			.bind(name)
			.bind(air_date.pred_opt().unwrap_or(air_date))
			.fetch_optional(executor)
			.await
	}
}
