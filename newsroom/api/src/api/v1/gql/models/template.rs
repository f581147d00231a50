use async_graphql::{Json, SimpleObject};
use uuid::Uuid;

use super::date::DateRFC3339;
use crate::database;

#[derive(SimpleObject)]
pub struct RundownTemplate {
	pub id: Uuid,
	pub name: String,
	pub payload: Json<serde_json::Value>,
	pub created_at: DateRFC3339,
}

impl From<database::RundownTemplate> for RundownTemplate {
	fn from(value: database::RundownTemplate) -> Self {
		Self {
			id: value.id,
			name: value.name,
			payload: Json(value.payload),
			created_at: value.created_at.into(),
		}
	}
}
