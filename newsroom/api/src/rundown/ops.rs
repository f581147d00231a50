use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use super::{is_unique_violation, plan_block_reorder, plan_move, plan_removal, require_open};
use super::{MoveRequest, PlanItem, Placement, RundownError};
use crate::database::{
	Block, Item, ItemStatus, Newscast, RundownTemplate, TemplateBlock, TemplateItem, TemplatePayload,
};
use crate::events::RundownEvent;
use crate::global::GlobalState;

/// Unique constraint behind the duplicate-first-block race.
pub const BLOCK_NAME_CONSTRAINT: &str = "blocos_telejornal_id_name_key";

/// Field values for a newly created item.
#[derive(Debug, Clone)]
pub struct NewItem {
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

/// Field updates for an item; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
	pub headline: Option<String>,
	pub lead_in: Option<String>,
	pub script: Option<String>,
	pub caption: Option<String>,
	pub status: Option<ItemStatus>,
	pub reporter: Option<String>,
	pub location: Option<String>,
	pub tags: Option<Vec<String>>,
	pub equipment: Option<String>,
	pub duration_seconds: Option<i32>,
}

/// The single reorder/transfer operation: moves the item at `source_index`
/// of `source_block_id` to `dest_index` of `dest_block_id`, densely
/// renumbering both blocks and assigning the next free page number when the
/// move crosses newscasts. All placements are written in one transaction.
/// Returns the rows that changed.
pub async fn move_item(
	global: &Arc<GlobalState>,
	source_block_id: Uuid,
	source_index: usize,
	dest_block_id: Uuid,
	dest_index: usize,
) -> Result<Vec<Item>, RundownError> {
	let mut tx = global.db.begin().await?;

	let source_block = Block::by_id(&mut *tx, source_block_id)
		.await?
		.ok_or(RundownError::NotFound("source block"))?;
	let dest_block = Block::by_id(&mut *tx, dest_block_id)
		.await?
		.ok_or(RundownError::NotFound("destination block"))?;

	let source_newscast = Newscast::by_id(&mut *tx, source_block.telejornal_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&source_newscast)?;

	let cross_newscast = source_block.telejornal_id != dest_block.telejornal_id;
	if cross_newscast {
		let dest_newscast = Newscast::by_id(&mut *tx, dest_block.telejornal_id)
			.await?
			.ok_or(RundownError::NotFound("destination newscast"))?;
		require_open(&dest_newscast)?;
	}

	let source_items = Item::in_block(&mut *tx, source_block.id).await?;
	let dest_items = if source_block.id == dest_block.id {
		Vec::new()
	} else {
		Item::in_block(&mut *tx, dest_block.id).await?
	};

	let transfer_page = if cross_newscast {
		Some(Item::next_page_number(&mut *tx, dest_block.telejornal_id).await?)
	} else {
		None
	};

	let source_plan: Vec<PlanItem> = source_items.iter().map(PlanItem::from).collect();
	let dest_plan: Vec<PlanItem> = dest_items.iter().map(PlanItem::from).collect();

	let plan = plan_move(&MoveRequest {
		source_block: source_block.id,
		source_items: &source_plan,
		source_index,
		dest_block: dest_block.id,
		dest_items: &dest_plan,
		dest_index,
		transfer_page,
	})?;

	if plan.is_empty() {
		return Ok(Vec::new());
	}

	let moved_id = source_plan[source_index].id;

	let updated = apply_placements(&mut tx, &plan).await?;

	tx.commit().await?;

	for item in &updated {
		let old_block_id = (item.id == moved_id && source_block.id != dest_block.id).then_some(source_block.id);

		let event = RundownEvent::ItemUpserted {
			item: item.clone(),
			old_block_id,
		};

		let newscast_id = if item.bloco_id == dest_block.id {
			dest_block.telejornal_id
		} else {
			source_block.telejornal_id
		};

		global.publish_rundown(newscast_id, &event).await?;

		// The source newscast's subscribers also need to see a transferred
		// item leave.
		if item.id == moved_id && cross_newscast {
			global.publish_rundown(source_block.telejornal_id, &event).await?;
		}
	}

	Ok(updated)
}

pub async fn create_item(global: &Arc<GlobalState>, block_id: Uuid, fields: NewItem) -> Result<Item, RundownError> {
	if fields.headline.trim().is_empty() {
		return Err(RundownError::InvalidInput("headline must not be empty"));
	}

	let mut tx = global.db.begin().await?;

	let block = Block::by_id(&mut *tx, block_id).await?.ok_or(RundownError::NotFound("block"))?;
	let newscast = Newscast::by_id(&mut *tx, block.telejornal_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let sort_order: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(sort_order), 0) + 1 FROM materias WHERE bloco_id = $1")
		.bind(block.id)
		.fetch_one(&mut *tx)
		.await?;
	let page_number = Item::next_page_number(&mut *tx, block.telejornal_id).await?;

	let item = insert_item(&mut tx, block.id, sort_order, page_number, &fields).await?;

	tx.commit().await?;

	global
		.publish_rundown(
			block.telejornal_id,
			&RundownEvent::ItemUpserted {
				item: item.clone(),
				old_block_id: None,
			},
		)
		.await?;

	Ok(item)
}

pub async fn update_item(global: &Arc<GlobalState>, item_id: Uuid, changes: UpdateItem) -> Result<Item, RundownError> {
	if changes.headline.as_deref().is_some_and(|h| h.trim().is_empty()) {
		return Err(RundownError::InvalidInput("headline must not be empty"));
	}

	let mut tx = global.db.begin().await?;

	let item = Item::by_id(&mut *tx, item_id).await?.ok_or(RundownError::NotFound("item"))?;
	let block = Block::by_id(&mut *tx, item.bloco_id)
		.await?
		.ok_or(RundownError::NotFound("block"))?;
	let newscast = Newscast::by_id(&mut *tx, block.telejornal_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let item: Item = sqlx::query_as(
		"UPDATE materias SET \
			headline = COALESCE($2, headline), \
			lead_in = COALESCE($3, lead_in), \
			script = COALESCE($4, script), \
			caption = COALESCE($5, caption), \
			status = COALESCE($6, status), \
			reporter = COALESCE($7, reporter), \
			location = COALESCE($8, location), \
			tags = COALESCE($9, tags), \
			equipment = COALESCE($10, equipment), \
			duration_seconds = COALESCE($11, duration_seconds), \
			version = version + 1, \
			updated_at = NOW() \
		 WHERE id = $1 \
		 RETURNING *",
	)
	.bind(item.id)
	.bind(changes.headline)
	.bind(changes.lead_in)
	.bind(changes.script)
	.bind(changes.caption)
	.bind(changes.status)
	.bind(changes.reporter)
	.bind(changes.location)
	.bind(changes.tags)
	.bind(changes.equipment)
	.bind(changes.duration_seconds)
	.fetch_one(&mut *tx)
	.await?;

	tx.commit().await?;

	global
		.publish_rundown(
			block.telejornal_id,
			&RundownEvent::ItemUpserted {
				item: item.clone(),
				old_block_id: None,
			},
		)
		.await?;

	Ok(item)
}

pub async fn delete_item(global: &Arc<GlobalState>, item_id: Uuid) -> Result<Item, RundownError> {
	let mut tx = global.db.begin().await?;

	let item = Item::by_id(&mut *tx, item_id).await?.ok_or(RundownError::NotFound("item"))?;
	let block = Block::by_id(&mut *tx, item.bloco_id)
		.await?
		.ok_or(RundownError::NotFound("block"))?;
	let newscast = Newscast::by_id(&mut *tx, block.telejornal_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	sqlx::query("DELETE FROM materias WHERE id = $1").bind(item.id).execute(&mut *tx).await?;

	let remaining = Item::in_block(&mut *tx, block.id).await?;
	let remaining_plan: Vec<PlanItem> = remaining.iter().map(PlanItem::from).collect();
	let renumbered = apply_placements(&mut tx, &plan_removal(block.id, &remaining_plan)).await?;

	tx.commit().await?;

	global
		.publish_rundown(
			block.telejornal_id,
			&RundownEvent::ItemDeleted {
				item_id: item.id,
				block_id: block.id,
				version: item.version + 1,
			},
		)
		.await?;

	for renumbered_item in &renumbered {
		global
			.publish_rundown(
				block.telejornal_id,
				&RundownEvent::ItemUpserted {
					item: renumbered_item.clone(),
					old_block_id: None,
				},
			)
			.await?;
	}

	Ok(item)
}

/// Creates a block at the end of a newscast's rundown. When two clients race
/// to create the same block (the "Bloco 1" case), the loser gets the row the
/// winner created instead of an error.
pub async fn create_block(global: &Arc<GlobalState>, newscast_id: Uuid, name: &str) -> Result<Block, RundownError> {
	if name.trim().is_empty() {
		return Err(RundownError::InvalidInput("block name must not be empty"));
	}

	let newscast = Newscast::by_id(global.db.as_ref(), newscast_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let result: Result<Block, sqlx::Error> = sqlx::query_as(
		"INSERT INTO blocos (id, telejornal_id, name, sort_order, created_at, updated_at) \
		 SELECT $1, $2, $3, COALESCE(MAX(sort_order), 0) + 1, NOW(), NOW() FROM blocos WHERE telejornal_id = $2 \
		 RETURNING *",
	)
	.bind(Uuid::new_v4())
	.bind(newscast_id)
	.bind(name)
	.fetch_one(global.db.as_ref())
	.await;

	let (block, created) = match result {
		Ok(block) => (block, true),
		Err(err) if is_unique_violation(&err, BLOCK_NAME_CONSTRAINT) => {
			// Lost the race: someone created it first, refetch theirs.
			let block: Block = sqlx::query_as("SELECT * FROM blocos WHERE telejornal_id = $1 AND name = $2")
				.bind(newscast_id)
				.bind(name)
				.fetch_optional(global.db.as_ref())
				.await?
				.ok_or(RundownError::NotFound("block"))?;
			(block, false)
		}
		Err(err) => return Err(err.into()),
	};

	if created {
		global
			.publish_rundown(newscast_id, &RundownEvent::BlockUpserted { block: block.clone() })
			.await?;
	}

	Ok(block)
}

pub async fn rename_block(global: &Arc<GlobalState>, block_id: Uuid, name: &str) -> Result<Block, RundownError> {
	if name.trim().is_empty() {
		return Err(RundownError::InvalidInput("block name must not be empty"));
	}

	let mut tx = global.db.begin().await?;

	let block = Block::by_id(&mut *tx, block_id).await?.ok_or(RundownError::NotFound("block"))?;
	let newscast = Newscast::by_id(&mut *tx, block.telejornal_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let block: Block = sqlx::query_as("UPDATE blocos SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *")
		.bind(block.id)
		.bind(name)
		.fetch_one(&mut *tx)
		.await
		.map_err(|err| {
			if is_unique_violation(&err, BLOCK_NAME_CONSTRAINT) {
				RundownError::InvalidInput("a block with this name already exists")
			} else {
				err.into()
			}
		})?;

	tx.commit().await?;

	global
		.publish_rundown(block.telejornal_id, &RundownEvent::BlockUpserted { block: block.clone() })
		.await?;

	Ok(block)
}

/// Deletes a block with everything it owns and closes the gap in the
/// newscast's block ordering.
pub async fn delete_block(global: &Arc<GlobalState>, block_id: Uuid) -> Result<Block, RundownError> {
	let mut tx = global.db.begin().await?;

	let block = Block::by_id(&mut *tx, block_id).await?.ok_or(RundownError::NotFound("block"))?;
	let newscast = Newscast::by_id(&mut *tx, block.telejornal_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	sqlx::query("DELETE FROM materias WHERE bloco_id = $1").bind(block.id).execute(&mut *tx).await?;
	sqlx::query("DELETE FROM blocos WHERE id = $1").bind(block.id).execute(&mut *tx).await?;

	let survivors = Block::in_newscast(&mut *tx, block.telejornal_id).await?;
	let mut renumbered = Vec::new();
	for (index, survivor) in survivors.iter().enumerate() {
		let sort_order = index as i32 + 1;
		if survivor.sort_order != sort_order {
			let updated: Block =
				sqlx::query_as("UPDATE blocos SET sort_order = $2, updated_at = NOW() WHERE id = $1 RETURNING *")
					.bind(survivor.id)
					.bind(sort_order)
					.fetch_one(&mut *tx)
					.await?;
			renumbered.push(updated);
		}
	}

	tx.commit().await?;

	global
		.publish_rundown(block.telejornal_id, &RundownEvent::BlockDeleted { block_id: block.id })
		.await?;

	for renumbered_block in &renumbered {
		global
			.publish_rundown(
				block.telejornal_id,
				&RundownEvent::BlockUpserted {
					block: renumbered_block.clone(),
				},
			)
			.await?;
	}

	Ok(block)
}

pub async fn reorder_blocks(
	global: &Arc<GlobalState>,
	newscast_id: Uuid,
	from: usize,
	to: usize,
) -> Result<Vec<Block>, RundownError> {
	let mut tx = global.db.begin().await?;

	let newscast = Newscast::by_id(&mut *tx, newscast_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let blocks = Block::in_newscast(&mut *tx, newscast_id).await?;
	let positions: Vec<(Uuid, i32)> = blocks.iter().map(|b| (b.id, b.sort_order)).collect();

	let mut updated = Vec::new();
	for (id, sort_order) in plan_block_reorder(&positions, from, to)? {
		let block: Block = sqlx::query_as("UPDATE blocos SET sort_order = $2, updated_at = NOW() WHERE id = $1 RETURNING *")
			.bind(id)
			.bind(sort_order)
			.fetch_one(&mut *tx)
			.await?;
		updated.push(block);
	}

	tx.commit().await?;

	for block in &updated {
		global
			.publish_rundown(newscast_id, &RundownEvent::BlockUpserted { block: block.clone() })
			.await?;
	}

	Ok(updated)
}

/// Pastes a copied item into a newscast: after `target_item_id` when given,
/// else at the end of the newscast's first block. The duplicate gets a fresh
/// identity, a suffixed headline and the newscast's next free page number.
pub async fn paste_item(
	global: &Arc<GlobalState>,
	newscast_id: Uuid,
	source: &Item,
	target_item_id: Option<Uuid>,
) -> Result<Item, RundownError> {
	let mut tx = global.db.begin().await?;

	let newscast = Newscast::by_id(&mut *tx, newscast_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let (block_id, insert_index) = match target_item_id {
		Some(target_id) => {
			let target = Item::by_id(&mut *tx, target_id)
				.await?
				.ok_or(RundownError::NotFound("target item"))?;
			let block = Block::by_id(&mut *tx, target.bloco_id)
				.await?
				.ok_or(RundownError::NotFound("target block"))?;
			if block.telejornal_id != newscast_id {
				return Err(RundownError::InvalidInput("target item belongs to another newscast"));
			}
			(block.id, target.sort_order as usize)
		}
		None => {
			let blocks = Block::in_newscast(&mut *tx, newscast_id).await?;
			let first = blocks.first().ok_or(RundownError::NotFound("block"))?;
			let len = Item::in_block(&mut *tx, first.id).await?.len();
			(first.id, len)
		}
	};

	// Shift the tail of the block down to open the slot.
	let block_items = Item::in_block(&mut *tx, block_id).await?;
	let mut shifted = Vec::new();
	for item in block_items.iter().skip(insert_index) {
		let updated: Item = sqlx::query_as(
			"UPDATE materias SET sort_order = $2, version = version + 1, updated_at = NOW() WHERE id = $1 RETURNING *",
		)
		.bind(item.id)
		.bind(item.sort_order + 1)
		.fetch_one(&mut *tx)
		.await?;
		shifted.push(updated);
	}

	let page_number = Item::next_page_number(&mut *tx, newscast_id).await?;
	let fields = NewItem {
		headline: format!("{} (cópia)", source.headline),
		lead_in: source.lead_in.clone(),
		script: source.script.clone(),
		caption: source.caption.clone(),
		status: source.status,
		reporter: source.reporter.clone(),
		location: source.location.clone(),
		tags: source.tags.clone(),
		equipment: source.equipment.clone(),
		duration_seconds: source.duration_seconds,
	};
	let pasted = insert_item(&mut tx, block_id, insert_index as i32 + 1, page_number, &fields).await?;

	tx.commit().await?;

	for item in shifted.iter().chain(std::iter::once(&pasted)) {
		global
			.publish_rundown(
				newscast_id,
				&RundownEvent::ItemUpserted {
					item: item.clone(),
					old_block_id: None,
				},
			)
			.await?;
	}

	Ok(pasted)
}

/// Pastes a copied block with its items at the end of a newscast's rundown,
/// everything under fresh identities and fresh page numbers, in one
/// transaction.
pub async fn paste_block(
	global: &Arc<GlobalState>,
	newscast_id: Uuid,
	source_block: &Block,
	source_items: &[Item],
) -> Result<(Block, Vec<Item>), RundownError> {
	let mut tx = global.db.begin().await?;

	let newscast = Newscast::by_id(&mut *tx, newscast_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let existing = Block::in_newscast(&mut *tx, newscast_id).await?;
	let taken: HashSet<String> = existing.iter().map(|b| b.name.clone()).collect();
	let name = dedupe_name(&taken, &format!("{} (cópia)", source_block.name));
	let sort_order = existing.last().map(|b| b.sort_order).unwrap_or(0) + 1;

	let block: Block = sqlx::query_as(
		"INSERT INTO blocos (id, telejornal_id, name, sort_order, created_at, updated_at) \
		 VALUES ($1, $2, $3, $4, NOW(), NOW()) \
		 RETURNING *",
	)
	.bind(Uuid::new_v4())
	.bind(newscast_id)
	.bind(&name)
	.bind(sort_order)
	.fetch_one(&mut *tx)
	.await
	.map_err(|err| {
		if is_unique_violation(&err, BLOCK_NAME_CONSTRAINT) {
			RundownError::InvalidInput("a block with this name already exists")
		} else {
			err.into()
		}
	})?;

	let mut page_number = Item::next_page_number(&mut *tx, newscast_id).await?;
	let mut pasted = Vec::new();
	for (index, item) in source_items.iter().enumerate() {
		let fields = NewItem {
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
		};
		pasted.push(insert_item(&mut tx, block.id, index as i32 + 1, page_number, &fields).await?);
		page_number += 1;
	}

	tx.commit().await?;

	global
		.publish_rundown(newscast_id, &RundownEvent::BlockUpserted { block: block.clone() })
		.await?;
	for item in &pasted {
		global
			.publish_rundown(
				newscast_id,
				&RundownEvent::ItemUpserted {
					item: item.clone(),
					old_block_id: None,
				},
			)
			.await?;
	}

	Ok((block, pasted))
}

/// Saves the structure of a newscast's rundown as a reusable skeleton.
pub async fn save_template(
	global: &Arc<GlobalState>,
	newscast_id: Uuid,
	name: &str,
) -> Result<RundownTemplate, RundownError> {
	if name.trim().is_empty() {
		return Err(RundownError::InvalidInput("template name must not be empty"));
	}

	let mut tx = global.db.begin().await?;

	Newscast::by_id(&mut *tx, newscast_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;

	let blocks = Block::in_newscast(&mut *tx, newscast_id).await?;
	let mut template_blocks = Vec::with_capacity(blocks.len());
	for block in &blocks {
		let items = Item::in_block(&mut *tx, block.id).await?;
		template_blocks.push(TemplateBlock {
			name: block.name.clone(),
			items: items.iter().map(TemplateItem::from).collect(),
		});
	}

	let payload = serde_json::to_value(TemplatePayload {
		blocks: template_blocks,
	})
	.map_err(|_| RundownError::InvalidInput("failed to encode template"))?;

	let template: RundownTemplate = sqlx::query_as(
		"INSERT INTO modelos_salvos (id, name, payload, created_at) VALUES ($1, $2, $3, NOW()) RETURNING *",
	)
	.bind(Uuid::new_v4())
	.bind(name)
	.bind(payload)
	.fetch_one(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(template)
}

/// Recreates a template's blocks and items inside an open newscast, appended
/// after any existing blocks, with fresh identities, orders and pages.
pub async fn apply_template(
	global: &Arc<GlobalState>,
	template_id: Uuid,
	newscast_id: Uuid,
) -> Result<Vec<Block>, RundownError> {
	let mut tx = global.db.begin().await?;

	let template = RundownTemplate::by_id(&mut *tx, template_id)
		.await?
		.ok_or(RundownError::NotFound("template"))?;
	let payload: TemplatePayload =
		serde_json::from_value(template.payload).map_err(|_| RundownError::InvalidInput("malformed template payload"))?;

	let newscast = Newscast::by_id(&mut *tx, newscast_id)
		.await?
		.ok_or(RundownError::NotFound("newscast"))?;
	require_open(&newscast)?;

	let existing = Block::in_newscast(&mut *tx, newscast_id).await?;
	let mut taken: HashSet<String> = existing.iter().map(|b| b.name.clone()).collect();
	let mut sort_order = existing.last().map(|b| b.sort_order).unwrap_or(0);
	let mut page_number = Item::next_page_number(&mut *tx, newscast_id).await?;

	let mut created_blocks = Vec::new();
	let mut created_items = Vec::new();
	for template_block in &payload.blocks {
		let name = dedupe_name(&taken, &template_block.name);
		taken.insert(name.clone());
		sort_order += 1;

		let block: Block = sqlx::query_as(
			"INSERT INTO blocos (id, telejornal_id, name, sort_order, created_at, updated_at) \
			 VALUES ($1, $2, $3, $4, NOW(), NOW()) \
			 RETURNING *",
		)
		.bind(Uuid::new_v4())
		.bind(newscast_id)
		.bind(&name)
		.bind(sort_order)
		.fetch_one(&mut *tx)
		.await?;

		for (index, item) in template_block.items.iter().enumerate() {
			let fields = NewItem {
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
			};
			created_items.push(insert_item(&mut tx, block.id, index as i32 + 1, page_number, &fields).await?);
			page_number += 1;
		}

		created_blocks.push(block);
	}

	tx.commit().await?;

	for block in &created_blocks {
		global
			.publish_rundown(newscast_id, &RundownEvent::BlockUpserted { block: block.clone() })
			.await?;
	}
	for item in &created_items {
		global
			.publish_rundown(
				newscast_id,
				&RundownEvent::ItemUpserted {
					item: item.clone(),
					old_block_id: None,
				},
			)
			.await?;
	}

	Ok(created_blocks)
}

async fn apply_placements(
	tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
	placements: &[Placement],
) -> Result<Vec<Item>, RundownError> {
	let mut updated = Vec::with_capacity(placements.len());

	for placement in placements {
		let item: Item = sqlx::query_as(
			"UPDATE materias SET bloco_id = $2, sort_order = $3, page_number = $4, version = version + 1, \
			 updated_at = NOW() WHERE id = $1 RETURNING *",
		)
		.bind(placement.id)
		.bind(placement.block_id)
		.bind(placement.sort_order)
		.bind(placement.page_number)
		.fetch_one(&mut **tx)
		.await?;
		updated.push(item);
	}

	Ok(updated)
}

async fn insert_item(
	tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
	block_id: Uuid,
	sort_order: i32,
	page_number: i32,
	fields: &NewItem,
) -> Result<Item, RundownError> {
	let item: Item = sqlx::query_as(
		"INSERT INTO materias (id, bloco_id, sort_order, page_number, headline, lead_in, script, caption, status, \
		 reporter, location, tags, equipment, duration_seconds, version, created_at, updated_at) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 1, NOW(), NOW()) \
		 RETURNING *",
	)
	.bind(Uuid::new_v4())
	.bind(block_id)
	.bind(sort_order)
	.bind(page_number)
	.bind(&fields.headline)
	.bind(&fields.lead_in)
	.bind(&fields.script)
	.bind(&fields.caption)
	.bind(fields.status)
	.bind(&fields.reporter)
	.bind(&fields.location)
	.bind(&fields.tags)
	.bind(&fields.equipment)
	.bind(fields.duration_seconds)
	.fetch_one(&mut **tx)
	.await?;

	Ok(item)
}

/// Picks a block name not already present in `taken`, suffixing a counter
/// when the base name collides.
fn dedupe_name(taken: &HashSet<String>, base: &str) -> String {
	if !taken.contains(base) {
		return base.to_string();
	}

	let mut n = 2;
	loop {
		let candidate = format!("{base} ({n})");
		if !taken.contains(&candidate) {
			return candidate;
		}
		n += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_dedupe_name() {
		let mut taken = HashSet::new();
		assert_eq!(dedupe_name(&taken, "Bloco 1 (cópia)"), "Bloco 1 (cópia)");

		taken.insert("Bloco 1 (cópia)".to_string());
		assert_eq!(dedupe_name(&taken, "Bloco 1 (cópia)"), "Bloco 1 (cópia) (2)");

		taken.insert("Bloco 1 (cópia) (2)".to_string());
		assert_eq!(dedupe_name(&taken, "Bloco 1 (cópia)"), "Bloco 1 (cópia) (3)");
	}
}
