use async_graphql::{Context, Object};
use uuid::Uuid;

use super::super::error::{GqlError, Result, ResultExt};
use super::super::ext::ContextExt;
use super::super::models::lock::AcquiredLock;
use crate::database;

#[derive(Default)]
pub struct LockMutation;

#[Object]
impl LockMutation {
	/// Takes the edit lock on an item, stealing it if the previous one
	/// expired. The returned token must be presented to renew or release.
	async fn acquire(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the item.")] item_id: Uuid,
	) -> Result<AcquiredLock> {
		let global = ctx.get_global();
		let holder = ctx.get_req_context().client_id()?;

		database::Item::by_id(global.db.as_ref(), item_id)
			.await
			.map_err_gql("failed to fetch item")?
			.ok_or_else(|| GqlError::NotFound.with_message("item not found"))?;

		let ttl = global.config.rundown.lock_ttl_secs as i64;

		match database::ItemLock::acquire(global.db.as_ref(), item_id, &holder, ttl)
			.await
			.map_err_gql("failed to acquire lock")?
		{
			Some(lock) => Ok(lock.into()),
			None => {
				let held = database::ItemLock::by_item(global.db.as_ref(), item_id)
					.await
					.map_err_gql("failed to fetch lock")?;

				let holder = held.map(|l| l.holder).unwrap_or_else(|| "another producer".to_string());
				Err(GqlError::LockHeld.with_message(&format!("item is being edited by {holder}")))
			}
		}
	}

	/// Extends a held lock.
	async fn renew(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the item.")] item_id: Uuid,
		#[graphql(desc = "The token returned by acquire.")] token: Uuid,
	) -> Result<AcquiredLock> {
		let global = ctx.get_global();

		let ttl = global.config.rundown.lock_ttl_secs as i64;

		database::ItemLock::renew(global.db.as_ref(), item_id, token, ttl)
			.await
			.map_err_gql("failed to renew lock")?
			.map(AcquiredLock::from)
			.ok_or_else(|| GqlError::LockHeld.with_message("lock expired or was taken by another producer"))
	}

	/// Releases a held lock.
	async fn release(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the item.")] item_id: Uuid,
		#[graphql(desc = "The token returned by acquire.")] token: Uuid,
	) -> Result<bool> {
		let global = ctx.get_global();

		database::ItemLock::release(global.db.as_ref(), item_id, token)
			.await
			.map_err_gql("failed to release lock")
	}
}
