use async_graphql::{Context, Object};
use uuid::Uuid;

use super::error::{Result, ResultExt};
use super::ext::ContextExt;
use super::models::clipboard::ClipboardContents;
use super::models::item::Item;
use super::models::lock::ItemLock;
use super::models::newscast::Newscast;
use super::models::rundown::Rundown;
use super::models::snapshot::{RundownSnapshot, RundownSnapshotWithPayload};
use super::models::template::RundownTemplate;
use crate::database;
use crate::rundown::RundownView;

#[derive(Default)]
/// The root query type which contains root level fields.
pub struct Query;

#[Object]
impl Query {
	/// All newscasts, newest air date first.
	async fn newscasts(&self, ctx: &Context<'_>) -> Result<Vec<Newscast>> {
		let global = ctx.get_global();

		let newscasts: Vec<database::Newscast> =
			sqlx::query_as("SELECT * FROM telejornais ORDER BY air_date DESC, name")
				.fetch_all(global.db.as_ref())
				.await
				.map_err_gql("failed to fetch newscasts")?;

		Ok(newscasts.into_iter().map(Newscast::from).collect())
	}

	async fn newscast(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] id: Uuid,
	) -> Result<Option<Newscast>> {
		let global = ctx.get_global();

		let newscast = database::Newscast::by_id(global.db.as_ref(), id)
			.await
			.map_err_gql("failed to fetch newscast")?;

		Ok(newscast.map(Newscast::from))
	}

	/// The full rundown tree of a newscast, durations included.
	async fn rundown(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] newscast_id: Uuid,
	) -> Result<Option<Rundown>> {
		let global = ctx.get_global();

		let view = RundownView::load(global.db.as_ref(), newscast_id)
			.await
			.map_err_gql("failed to fetch rundown")?;

		Ok(view.map(Rundown::from))
	}

	async fn item(&self, ctx: &Context<'_>, #[graphql(desc = "The id of the item.")] id: Uuid) -> Result<Option<Item>> {
		let global = ctx.get_global();

		let item = database::Item::by_id(global.db.as_ref(), id)
			.await
			.map_err_gql("failed to fetch item")?;

		Ok(item.map(Item::from))
	}

	/// The live edit lock on an item, if one is held.
	async fn item_lock(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the item.")] item_id: Uuid,
	) -> Result<Option<ItemLock>> {
		let global = ctx.get_global();

		let lock = database::ItemLock::by_item(global.db.as_ref(), item_id)
			.await
			.map_err_gql("failed to fetch item lock")?;

		Ok(lock.map(ItemLock::from))
	}

	/// Archived snapshots of a newscast's rundown, newest first.
	async fn snapshots(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] newscast_id: Uuid,
	) -> Result<Vec<RundownSnapshot>> {
		let global = ctx.get_global();

		let snapshots = database::RundownSnapshot::in_newscast(global.db.as_ref(), newscast_id)
			.await
			.map_err_gql("failed to fetch snapshots")?;

		Ok(snapshots.into_iter().map(RundownSnapshot::from).collect())
	}

	async fn snapshot(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the snapshot.")] id: Uuid,
	) -> Result<Option<RundownSnapshotWithPayload>> {
		let global = ctx.get_global();

		let snapshot = database::RundownSnapshot::by_id(global.db.as_ref(), id)
			.await
			.map_err_gql("failed to fetch snapshot")?;

		Ok(snapshot.map(RundownSnapshotWithPayload::from))
	}

	/// Saved rundown templates, newest first.
	async fn templates(&self, ctx: &Context<'_>) -> Result<Vec<RundownTemplate>> {
		let global = ctx.get_global();

		let templates = database::RundownTemplate::list(global.db.as_ref())
			.await
			.map_err_gql("failed to fetch templates")?;

		Ok(templates.into_iter().map(RundownTemplate::from).collect())
	}

	/// What the caller's clipboard holds, if anything unexpired.
	async fn clipboard(&self, ctx: &Context<'_>) -> Result<Option<ClipboardContents>> {
		let global = ctx.get_global();
		let request_context = ctx.get_req_context();

		let client_id = request_context.client_id()?;

		Ok(global.clipboard.get(&client_id).map(ClipboardContents::from))
	}
}
