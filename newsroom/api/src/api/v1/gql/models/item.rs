use async_graphql::{Enum, SimpleObject};
use uuid::Uuid;

use super::date::DateRFC3339;
use crate::database;

/// Editorial state of an item.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
	Draft,
	Review,
	Approved,
	Published,
	Urgent,
}

impl From<database::ItemStatus> for ItemStatus {
	fn from(value: database::ItemStatus) -> Self {
		match value {
			database::ItemStatus::Draft => Self::Draft,
			database::ItemStatus::Review => Self::Review,
			database::ItemStatus::Approved => Self::Approved,
			database::ItemStatus::Published => Self::Published,
			database::ItemStatus::Urgent => Self::Urgent,
		}
	}
}

impl From<ItemStatus> for database::ItemStatus {
	fn from(value: ItemStatus) -> Self {
		match value {
			ItemStatus::Draft => Self::Draft,
			ItemStatus::Review => Self::Review,
			ItemStatus::Approved => Self::Approved,
			ItemStatus::Published => Self::Published,
			ItemStatus::Urgent => Self::Urgent,
		}
	}
}

#[derive(SimpleObject)]
pub struct Item {
	pub id: Uuid,
	pub block_id: Uuid,
	pub sort_order: i32,
	pub page_number: i32,
	/// The slug/headline ("retranca").
	pub headline: String,
	/// The teleprompter head ("cabeça").
	pub lead_in: Option<String>,
	/// The story body read off the teleprompter.
	pub script: Option<String>,
	/// The on-screen caption ("GC").
	pub caption: Option<String>,
	pub status: ItemStatus,
	pub reporter: Option<String>,
	pub location: Option<String>,
	pub tags: Vec<String>,
	pub equipment: Option<String>,
	pub duration_seconds: i32,
	pub version: i64,
	pub created_at: DateRFC3339,
	pub updated_at: DateRFC3339,
}

impl From<database::Item> for Item {
	fn from(value: database::Item) -> Self {
		Self {
			id: value.id,
			block_id: value.bloco_id,
			sort_order: value.sort_order,
			page_number: value.page_number,
			headline: value.headline,
			lead_in: value.lead_in,
			script: value.script,
			caption: value.caption,
			status: value.status.into(),
			reporter: value.reporter,
			location: value.location,
			tags: value.tags,
			equipment: value.equipment,
			duration_seconds: value.duration_seconds,
			version: value.version,
			created_at: value.created_at.into(),
			updated_at: value.updated_at.into(),
		}
	}
}
