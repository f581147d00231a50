use chrono::{NaiveDate, TimeZone, Utc};

use super::*;
use crate::database::ItemStatus;

fn newscast(id: u128) -> Newscast {
	Newscast {
		id: Uuid::from_u128(id),
		name: "Jornal da Noite".to_string(),
		air_date: NaiveDate::from_ymd_opt(2026, 8, 4).expect("valid date"),
		rundown_open: true,
		created_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
		updated_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
	}
}

fn block(id: u128, telejornal_id: u128, sort_order: i32) -> Block {
	Block {
		id: Uuid::from_u128(id),
		telejornal_id: Uuid::from_u128(telejornal_id),
		name: format!("Bloco {sort_order}"),
		sort_order,
		created_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
		updated_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
	}
}

fn item(id: u128, bloco_id: u128, sort_order: i32, duration_seconds: i32, version: i64) -> Item {
	Item {
		id: Uuid::from_u128(id),
		bloco_id: Uuid::from_u128(bloco_id),
		sort_order,
		page_number: sort_order,
		headline: format!("Matéria {id}"),
		lead_in: None,
		script: None,
		caption: None,
		status: ItemStatus::Draft,
		reporter: None,
		location: None,
		tags: Vec::new(),
		equipment: None,
		duration_seconds,
		version,
		created_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
		updated_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
	}
}

fn view() -> RundownView {
	RundownView::new(
		newscast(1),
		vec![
			(block(0xa, 1, 1), vec![item(1, 0xa, 1, 60, 1), item(2, 0xa, 2, 30, 1)]),
			(block(0xb, 1, 2), vec![item(3, 0xb, 1, 45, 1)]),
		],
	)
}

#[test]
fn test_initial_durations() {
	let view = view();

	assert_eq!(view.blocks[0].duration_seconds, 90);
	assert_eq!(view.blocks[1].duration_seconds, 45);
	assert_eq!(view.duration_seconds(), 135);
}

#[test]
fn test_echoed_event_is_discarded() {
	let mut view = view();

	// The same version this view already carries: an echo of our own write.
	let echo = RundownEvent::ItemUpserted {
		item: item(1, 0xa, 1, 60, 1),
		old_block_id: None,
	};
	assert!(!view.apply(&echo));

	// A genuinely newer write is applied.
	let newer = RundownEvent::ItemUpserted {
		item: item(1, 0xa, 1, 120, 2),
		old_block_id: None,
	};
	assert!(view.apply(&newer));
	assert_eq!(view.blocks[0].duration_seconds, 150);

	// And the stale one that lost the race is not.
	let stale = RundownEvent::ItemUpserted {
		item: item(1, 0xa, 1, 60, 1),
		old_block_id: None,
	};
	assert!(!view.apply(&stale));
	assert_eq!(view.blocks[0].duration_seconds, 150);
}

#[test]
fn test_item_moves_between_blocks() {
	let mut view = view();

	// Item 2 moved from block a to block b, order 1; the feed delivers the
	// moved row first, then the renumbered neighbours.
	let moved = RundownEvent::ItemUpserted {
		item: item(2, 0xb, 1, 30, 2),
		old_block_id: Some(Uuid::from_u128(0xa)),
	};
	assert!(view.apply(&moved));

	assert_eq!(view.blocks[0].items.len(), 1);
	assert_eq!(view.blocks[1].items.len(), 2);
	assert_eq!(view.blocks[0].duration_seconds, 60);
	assert_eq!(view.blocks[1].duration_seconds, 75);

	// The moved row sorts before the one it displaced.
	assert_eq!(view.blocks[1].items[0].id, Uuid::from_u128(2));
}

#[test]
fn test_item_transferred_away_is_removed() {
	let mut view = view();

	// The item now belongs to a block of another newscast; this view only
	// sees it leave.
	let transferred = RundownEvent::ItemUpserted {
		item: item(3, 0xff, 1, 45, 2),
		old_block_id: Some(Uuid::from_u128(0xb)),
	};
	assert!(view.apply(&transferred));

	assert!(view.blocks[1].items.is_empty());
	assert_eq!(view.blocks[1].duration_seconds, 0);
}

#[test]
fn test_item_delete() {
	let mut view = view();

	let delete = RundownEvent::ItemDeleted {
		item_id: Uuid::from_u128(1),
		block_id: Uuid::from_u128(0xa),
		version: 2,
	};
	assert!(view.apply(&delete));
	assert_eq!(view.blocks[0].items.len(), 1);
	assert_eq!(view.blocks[0].duration_seconds, 30);

	// A late upsert of the deleted row with an older version stays dead.
	let late = RundownEvent::ItemUpserted {
		item: item(1, 0xa, 1, 60, 1),
		old_block_id: None,
	};
	assert!(!view.apply(&late));
	assert_eq!(view.blocks[0].items.len(), 1);
}

#[test]
fn test_block_events() {
	let mut view = view();

	// A new block slots in by sort order.
	let created = RundownEvent::BlockUpserted {
		block: block(0xc, 1, 3),
	};
	assert!(view.apply(&created));
	assert_eq!(view.blocks.len(), 3);
	assert_eq!(view.blocks[2].block.id, Uuid::from_u128(0xc));

	// Reordering an existing block re-sorts the view.
	let mut moved = block(0xc, 1, 3);
	moved.sort_order = 1;
	assert!(view.apply(&RundownEvent::BlockUpserted { block: moved }));
	assert_eq!(view.blocks[0].block.id, Uuid::from_u128(0xc));

	let deleted = RundownEvent::BlockDeleted {
		block_id: Uuid::from_u128(0xc),
	};
	assert!(view.apply(&deleted));
	assert_eq!(view.blocks.len(), 2);
	assert!(!view.apply(&deleted));
}
