use super::*;

fn item(id: u128, sort_order: i32, page_number: i32) -> PlanItem {
	PlanItem {
		id: Uuid::from_u128(id),
		sort_order,
		page_number,
	}
}

fn block(id: u128) -> Uuid {
	Uuid::from_u128(id)
}

/// Applies a plan to the ordered item lists of a set of blocks and asserts
/// every touched block ends up densely numbered 1..N.
fn assert_dense(placements: &[Placement], blocks: &[(Uuid, Vec<PlanItem>)]) {
	for &(block_id, ref items) in blocks {
		let mut orders: Vec<i32> = items
			.iter()
			.map(|i| {
				placements
					.iter()
					.find(|p| p.id == i.id)
					.filter(|p| p.block_id == block_id)
					.map(|p| p.sort_order)
					.unwrap_or(i.sort_order)
			})
			.collect();
		orders.sort_unstable();

		for (index, order) in orders.iter().enumerate() {
			assert_eq!(*order, index as i32 + 1, "block {block_id} is not densely numbered: {orders:?}");
		}
	}
}

#[test]
fn test_in_block_reorder() {
	let a = block(0xa);
	let items = [item(1, 1, 10), item(2, 2, 11), item(3, 3, 12)];

	let placements = plan_move(&MoveRequest {
		source_block: a,
		source_items: &items,
		source_index: 0,
		dest_block: a,
		dest_items: &[],
		dest_index: 2,
		transfer_page: None,
	})
	.expect("plan failed");

	// 1,2,3 -> 2,3,1; every item changed position.
	assert_eq!(placements.len(), 3);
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(2),
		block_id: a,
		sort_order: 1,
		page_number: 11,
	}));
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(3),
		block_id: a,
		sort_order: 2,
		page_number: 12,
	}));
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(1),
		block_id: a,
		sort_order: 3,
		page_number: 10,
	}));
}

#[test]
fn test_in_block_reorder_is_partial() {
	let a = block(0xa);
	let items = [item(1, 1, 10), item(2, 2, 11), item(3, 3, 12), item(4, 4, 13)];

	let placements = plan_move(&MoveRequest {
		source_block: a,
		source_items: &items,
		source_index: 2,
		dest_block: a,
		dest_items: &[],
		dest_index: 3,
		transfer_page: None,
	})
	.expect("plan failed");

	// Swapping the last two items leaves the first two untouched.
	assert_eq!(placements.len(), 2);
	assert!(placements.iter().all(|p| p.id != Uuid::from_u128(1) && p.id != Uuid::from_u128(2)));
}

#[test]
fn test_same_position_is_noop() {
	let a = block(0xa);
	let items = [item(1, 1, 10), item(2, 2, 11)];

	let placements = plan_move(&MoveRequest {
		source_block: a,
		source_items: &items,
		source_index: 1,
		dest_block: a,
		dest_items: &[],
		dest_index: 1,
		transfer_page: None,
	})
	.expect("plan failed");

	assert!(placements.is_empty());
}

#[test]
fn test_cross_block_move_keeps_page() {
	let a = block(0xa);
	let b = block(0xb);
	let source = [item(1, 1, 10), item(2, 2, 11)];
	let dest = [item(3, 1, 20)];

	let placements = plan_move(&MoveRequest {
		source_block: a,
		source_items: &source,
		source_index: 0,
		dest_block: b,
		dest_items: &dest,
		dest_index: 0,
		transfer_page: None,
	})
	.expect("plan failed");

	// Moved item lands in b at order 1 with its page intact; the survivor in
	// a closes the gap; the existing item in b shifts down.
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(1),
		block_id: b,
		sort_order: 1,
		page_number: 10,
	}));
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(2),
		block_id: a,
		sort_order: 1,
		page_number: 11,
	}));
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(3),
		block_id: b,
		sort_order: 2,
		page_number: 20,
	}));
	assert_eq!(placements.len(), 3);

	assert_dense(&placements, &[(a, vec![source[1]]), (b, vec![source[0], dest[0]])]);
}

#[test]
fn test_cross_newscast_transfer_assigns_next_page() {
	// The rundown example: newscast N block A has pages 1 and 2; newscast M
	// block B has page 5. Dragging page 2 into B means it becomes page 6 and
	// both B items end up orders 1 and 2.
	let a = block(0xa);
	let b = block(0xb);
	let source = [item(1, 1, 1), item(2, 2, 2)];
	let dest = [item(3, 1, 5)];

	let placements = plan_move(&MoveRequest {
		source_block: a,
		source_items: &source,
		source_index: 1,
		dest_block: b,
		dest_items: &dest,
		dest_index: 1,
		transfer_page: Some(6),
	})
	.expect("plan failed");

	// Source survivor keeps order 1, page 1: nothing to emit for it.
	assert_eq!(placements.len(), 1);
	assert_eq!(
		placements[0],
		Placement {
			id: Uuid::from_u128(2),
			block_id: b,
			sort_order: 2,
			page_number: 6,
		}
	);

	assert_dense(&placements, &[(a, vec![source[0]]), (b, vec![dest[0], source[1]])]);
}

#[test]
fn test_source_index_out_of_bounds() {
	let a = block(0xa);
	let items = [item(1, 1, 10)];

	let err = plan_move(&MoveRequest {
		source_block: a,
		source_items: &items,
		source_index: 1,
		dest_block: a,
		dest_items: &[],
		dest_index: 0,
		transfer_page: None,
	})
	.expect_err("plan should fail");

	assert_eq!(err, PlanError::SourceIndexOutOfBounds { index: 1, len: 1 });
}

#[test]
fn test_dest_index_is_clamped() {
	let a = block(0xa);
	let b = block(0xb);
	let source = [item(1, 1, 10)];
	let dest = [item(2, 1, 20)];

	let placements = plan_move(&MoveRequest {
		source_block: a,
		source_items: &source,
		source_index: 0,
		dest_block: b,
		dest_items: &dest,
		dest_index: 99,
		transfer_page: None,
	})
	.expect("plan failed");

	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(1),
		block_id: b,
		sort_order: 2,
		page_number: 10,
	}));
}

#[test]
fn test_plan_repairs_drifted_numbering() {
	// A block whose stored orders have gaps comes out dense even when the
	// move itself would otherwise be a no-op.
	let a = block(0xa);
	let items = [item(1, 2, 10), item(2, 5, 11)];

	let placements = plan_move(&MoveRequest {
		source_block: a,
		source_items: &items,
		source_index: 0,
		dest_block: a,
		dest_items: &[],
		dest_index: 0,
		transfer_page: None,
	})
	.expect("plan failed");

	assert_eq!(placements.len(), 2);
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(1),
		block_id: a,
		sort_order: 1,
		page_number: 10,
	}));
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(2),
		block_id: a,
		sort_order: 2,
		page_number: 11,
	}));
}

#[test]
fn test_plan_removal_closes_gaps() {
	let a = block(0xa);
	// Orders 1,3,4 after the item at order 2 was deleted.
	let remaining = [item(1, 1, 10), item(2, 3, 11), item(3, 4, 12)];

	let placements = plan_removal(a, &remaining);

	assert_eq!(placements.len(), 2);
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(2),
		block_id: a,
		sort_order: 2,
		page_number: 11,
	}));
	assert!(placements.contains(&Placement {
		id: Uuid::from_u128(3),
		block_id: a,
		sort_order: 3,
		page_number: 12,
	}));
}

#[test]
fn test_block_reorder() {
	let blocks = [(block(1), 1), (block(2), 2), (block(3), 3)];

	let changed = plan_block_reorder(&blocks, 2, 0).expect("plan failed");

	assert_eq!(changed, vec![(block(3), 1), (block(1), 2), (block(2), 3)]);

	let unchanged = plan_block_reorder(&blocks, 1, 1).expect("plan failed");
	assert!(unchanged.is_empty());

	let err = plan_block_reorder(&blocks, 3, 0).expect_err("plan should fail");
	assert_eq!(err, PlanError::SourceIndexOutOfBounds { index: 3, len: 3 });
}
