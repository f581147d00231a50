use async_graphql::SimpleObject;
use uuid::Uuid;

use super::date::DateRFC3339;
use crate::database;

/// What anyone may see about an item's edit lock. The token stays with the
/// holder.
#[derive(SimpleObject)]
pub struct ItemLock {
	pub item_id: Uuid,
	pub holder: String,
	pub acquired_at: DateRFC3339,
	pub expires_at: DateRFC3339,
}

impl From<database::ItemLock> for ItemLock {
	fn from(value: database::ItemLock) -> Self {
		Self {
			item_id: value.item_id,
			holder: value.holder,
			acquired_at: value.acquired_at.into(),
			expires_at: value.expires_at.into(),
		}
	}
}

/// Returned to the producer who acquired or renewed a lock; the token is the
/// proof of ownership renew/release must present.
#[derive(SimpleObject)]
pub struct AcquiredLock {
	pub item_id: Uuid,
	pub holder: String,
	pub token: Uuid,
	pub expires_at: DateRFC3339,
}

impl From<database::ItemLock> for AcquiredLock {
	fn from(value: database::ItemLock) -> Self {
		Self {
			item_id: value.item_id,
			holder: value.holder,
			token: value.token,
			expires_at: value.expires_at.into(),
		}
	}
}
