use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Item, ItemStatus};

/// A reusable rundown skeleton ("modelo salvo"): block and item structure
/// without identities, applied into an open newscast.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct RundownTemplate {
	/// The unique identifier for the template.
	pub id: Uuid,
	/// The name of the template.
	pub name: String,
	/// The block/item skeleton.
	pub payload: serde_json::Value,
	/// The time the template was saved.
	pub created_at: DateTime<Utc>,
}

/// The JSONB shape stored in a template's `payload` column: structure only,
/// no identities, orders or pages.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TemplatePayload {
	pub blocks: Vec<TemplateBlock>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TemplateBlock {
	pub name: String,
	pub items: Vec<TemplateItem>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TemplateItem {
	pub headline: String,
	pub lead_in: Option<String>,
	pub script: Option<String>,
	pub caption: Option<String>,
	pub status: ItemStatus,
	pub reporter: Option<String>,
	pub location: Option<String>,
	pub tags: Vec<String>,
	pub equipment: Option<String>,
	pub duration_seconds: i32,
}

impl From<&Item> for TemplateItem {
	fn from(item: &Item) -> Self {
		Self {
			headline: item.headline.clone(),
			lead_in: item.lead_in.clone(),
			script: item.script.clone(),
			caption: item.caption.clone(),
			status: item.status,
			reporter: item.reporter.clone(),
			location: item.location.clone(),
			tags: item.tags.clone(),
			equipment: item.equipment.clone(),
			duration_seconds: item.duration_seconds,
		}
	}
}

impl RundownTemplate {
	pub async fn by_id<'e>(executor: impl sqlx::PgExecutor<'e>, id: Uuid) -> sqlx::Result<Option<Self>> {
		sqlx::query_as("SELECT * FROM modelos_salvos WHERE id = $1")
			.bind(id)
			.fetch_optional(executor)
			.await
	}

	pub async fn list<'e>(executor: impl sqlx::PgExecutor<'e>) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as("SELECT * FROM modelos_salvos ORDER BY created_at DESC")
			.fetch_all(executor)
			.await
	}
}
