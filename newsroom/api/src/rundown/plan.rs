use uuid::Uuid;

use crate::database::Item;

/// The slice of an item the planner cares about: identity plus its stored
/// placement, so the plan can also repair blocks whose numbering drifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanItem {
	pub id: Uuid,
	pub sort_order: i32,
	pub page_number: i32,
}

impl From<&Item> for PlanItem {
	fn from(item: &Item) -> Self {
		Self {
			id: item.id,
			sort_order: item.sort_order,
			page_number: item.page_number,
		}
	}
}

/// Where an item ends up after a move: the full placement written back to the
/// store for every row the move touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
	pub id: Uuid,
	pub block_id: Uuid,
	pub sort_order: i32,
	pub page_number: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
	#[error("source index {index} is out of bounds for a block of {len} items")]
	SourceIndexOutOfBounds { index: usize, len: usize },
}

/// A move of one item between two positions, possibly across blocks and
/// newscasts.
///
/// This is the single reorder/transfer entry point: in-block reorders,
/// cross-block moves and cross-newscast transfers are all the same request
/// with different fields set. `dest_items` is ignored when `dest_block`
/// equals `source_block`. `transfer_page` carries the destination newscast's
/// next free page number and must be set exactly when the move crosses
/// newscasts.
#[derive(Debug, Clone, Copy)]
pub struct MoveRequest<'a> {
	pub source_block: Uuid,
	pub source_items: &'a [PlanItem],
	pub source_index: usize,
	pub dest_block: Uuid,
	pub dest_items: &'a [PlanItem],
	pub dest_index: usize,
	pub transfer_page: Option<i32>,
}

/// Computes the placements for a move. Both affected blocks come out densely
/// renumbered 1..N; only items whose placement actually changed are emitted,
/// so an identity move yields an empty plan.
pub fn plan_move(req: &MoveRequest<'_>) -> Result<Vec<Placement>, PlanError> {
	if req.source_index >= req.source_items.len() {
		return Err(PlanError::SourceIndexOutOfBounds {
			index: req.source_index,
			len: req.source_items.len(),
		});
	}

	let mut source: Vec<PlanItem> = req.source_items.to_vec();
	let mut moved = source.remove(req.source_index);

	if let Some(page) = req.transfer_page {
		moved.page_number = page;
	}

	let mut placements = Vec::new();

	if req.source_block == req.dest_block {
		let index = req.dest_index.min(source.len());
		source.insert(index, moved);

		emit_renumbered(&mut placements, req.source_block, &source, req.source_items);
	} else {
		let mut dest: Vec<PlanItem> = req.dest_items.to_vec();
		let index = req.dest_index.min(dest.len());
		dest.insert(index, moved);

		// The moved item is absent from the destination's old list, so
		// emit_renumbered always emits it, block change included.
		emit_renumbered(&mut placements, req.source_block, &source, req.source_items);
		emit_renumbered(&mut placements, req.dest_block, &dest, req.dest_items);
	}

	Ok(placements)
}

/// Emits a placement for every item whose dense 1..N position or page in
/// `new_list` differs from what `old_list` had stored.
fn emit_renumbered(placements: &mut Vec<Placement>, block_id: Uuid, new_list: &[PlanItem], old_list: &[PlanItem]) {
	for (index, item) in new_list.iter().enumerate() {
		let sort_order = index as i32 + 1;

		let unchanged = old_list
			.iter()
			.any(|old| old.id == item.id && old.sort_order == sort_order && old.page_number == item.page_number);

		if !unchanged {
			placements.push(Placement {
				id: item.id,
				block_id,
				sort_order,
				page_number: item.page_number,
			});
		}
	}
}

/// Renumbers the survivors of a block after an item was removed from it.
pub fn plan_removal(block_id: Uuid, remaining: &[PlanItem]) -> Vec<Placement> {
	let mut placements = Vec::new();
	emit_renumbered(&mut placements, block_id, remaining, remaining);
	placements
}

/// Computes the new dense ordering of a newscast's blocks after moving the
/// block at `from` to position `to`. Returns (block id, new sort_order) for
/// every block whose position changed.
pub fn plan_block_reorder(blocks: &[(Uuid, i32)], from: usize, to: usize) -> Result<Vec<(Uuid, i32)>, PlanError> {
	if from >= blocks.len() {
		return Err(PlanError::SourceIndexOutOfBounds {
			index: from,
			len: blocks.len(),
		});
	}

	let mut reordered: Vec<(Uuid, i32)> = blocks.to_vec();
	let moved = reordered.remove(from);
	reordered.insert(to.min(reordered.len()), moved);

	Ok(reordered
		.iter()
		.enumerate()
		.filter_map(|(index, &(id, old_order))| {
			let sort_order = index as i32 + 1;
			(old_order != sort_order).then_some((id, sort_order))
		})
		.collect())
}

#[cfg(test)]
mod tests;
