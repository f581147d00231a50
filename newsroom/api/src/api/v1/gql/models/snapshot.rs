use async_graphql::{Json, SimpleObject};
use uuid::Uuid;

use super::date::DateRFC3339;
use crate::database;

/// An immutable rundown snapshot, listed without its payload.
#[derive(SimpleObject)]
pub struct RundownSnapshot {
	pub id: Uuid,
	pub newscast_id: Uuid,
	pub label: String,
	pub created_at: DateRFC3339,
}

impl From<database::RundownSnapshot> for RundownSnapshot {
	fn from(value: database::RundownSnapshot) -> Self {
		Self {
			id: value.id,
			newscast_id: value.telejornal_id,
			label: value.label,
			created_at: value.created_at.into(),
		}
	}
}

/// A snapshot with the archived block/item tree attached.
#[derive(SimpleObject)]
pub struct RundownSnapshotWithPayload {
	pub id: Uuid,
	pub newscast_id: Uuid,
	pub label: String,
	pub payload: Json<serde_json::Value>,
	pub created_at: DateRFC3339,
}

impl From<database::RundownSnapshot> for RundownSnapshotWithPayload {
	fn from(value: database::RundownSnapshot) -> Self {
		Self {
			id: value.id,
			newscast_id: value.telejornal_id,
			label: value.label,
			payload: Json(value.payload),
			created_at: value.created_at.into(),
		}
	}
}
