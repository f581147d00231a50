use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::database::{Block, Item};

/// What a session has copied: exactly one item or one block with its items.
/// Copying either kind replaces whatever was there, so the clipboard never
/// holds both.
#[derive(Debug, Clone)]
pub enum ClipboardPayload {
	Item(Item),
	Block { block: Block, items: Vec<Item> },
}

#[derive(Debug)]
struct Entry {
	payload: ClipboardPayload,
	copied_at: Instant,
}

/// The session-scoped copy/paste buffer, owned by the application root.
/// Entries lapse after the configured TTL; an expired entry reads as an
/// empty clipboard.
#[derive(Debug)]
pub struct Clipboard {
	ttl: Duration,
	entries: Mutex<HashMap<String, Entry>>,
}

impl Clipboard {
	pub fn new(ttl: Duration) -> Self {
		Self {
			ttl,
			entries: Mutex::new(HashMap::new()),
		}
	}

	pub fn copy_item(&self, session_id: &str, item: Item) {
		self.put(session_id, ClipboardPayload::Item(item));
	}

	pub fn copy_block(&self, session_id: &str, block: Block, items: Vec<Item>) {
		self.put(session_id, ClipboardPayload::Block { block, items });
	}

	/// The session's current payload, if it hasn't expired. Expired entries
	/// are dropped on read.
	pub fn get(&self, session_id: &str) -> Option<ClipboardPayload> {
		let mut entries = self.entries.lock().expect("clipboard mutex poisoned");

		match entries.get(session_id) {
			Some(entry) if entry.copied_at.elapsed() < self.ttl => Some(entry.payload.clone()),
			Some(_) => {
				entries.remove(session_id);
				None
			}
			None => None,
		}
	}

	pub fn clear(&self, session_id: &str) {
		self.entries.lock().expect("clipboard mutex poisoned").remove(session_id);
	}

	fn put(&self, session_id: &str, payload: ClipboardPayload) {
		self.entries.lock().expect("clipboard mutex poisoned").insert(
			session_id.to_string(),
			Entry {
				payload,
				copied_at: Instant::now(),
			},
		);
	}
}

#[cfg(test)]
mod tests {
	use chrono::{TimeZone, Utc};
	use uuid::Uuid;

	use super::*;
	use crate::database::ItemStatus;

	fn item(id: u128) -> Item {
		Item {
			id: Uuid::from_u128(id),
			bloco_id: Uuid::from_u128(0xa),
			sort_order: 1,
			page_number: 1,
			headline: "Incêndio".to_string(),
			lead_in: None,
			script: None,
			caption: None,
			status: ItemStatus::Draft,
			reporter: None,
			location: None,
			tags: Vec::new(),
			equipment: None,
			duration_seconds: 90,
			version: 1,
			created_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
			updated_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
		}
	}

	fn block(id: u128) -> Block {
		Block {
			id: Uuid::from_u128(id),
			telejornal_id: Uuid::from_u128(1),
			name: "Bloco 1".to_string(),
			sort_order: 1,
			created_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
			updated_at: Utc.timestamp_opt(0, 0).single().expect("valid timestamp"),
		}
	}

	#[test]
	fn test_copy_block_replaces_copied_item() {
		let clipboard = Clipboard::new(Duration::from_secs(300));

		// Copy item "Incêndio", then a block, before pasting: the paste must
		// see the block.
		clipboard.copy_item("session", item(1));
		clipboard.copy_block("session", block(2), vec![item(3)]);

		match clipboard.get("session") {
			Some(ClipboardPayload::Block { block, items }) => {
				assert_eq!(block.id, Uuid::from_u128(2));
				assert_eq!(items.len(), 1);
			}
			other => panic!("expected block payload, got {other:?}"),
		}

		// And the other way around.
		clipboard.copy_item("session", item(1));
		match clipboard.get("session") {
			Some(ClipboardPayload::Item(item)) => assert_eq!(item.id, Uuid::from_u128(1)),
			other => panic!("expected item payload, got {other:?}"),
		}
	}

	#[test]
	fn test_expired_entry_reads_as_empty() {
		let clipboard = Clipboard::new(Duration::from_millis(10));

		clipboard.copy_item("session", item(1));
		std::thread::sleep(Duration::from_millis(20));

		assert!(clipboard.get("session").is_none());
		// The lapsed entry was dropped, not merely hidden.
		assert!(clipboard.get("session").is_none());
	}

	#[test]
	fn test_clear() {
		let clipboard = Clipboard::new(Duration::from_secs(300));

		clipboard.copy_item("session", item(1));
		clipboard.clear("session");

		assert!(clipboard.get("session").is_none());
	}

	#[test]
	fn test_sessions_are_isolated() {
		let clipboard = Clipboard::new(Duration::from_secs(300));

		clipboard.copy_item("producer-1", item(1));

		assert!(clipboard.get("producer-2").is_none());
		assert!(clipboard.get("producer-1").is_some());
	}
}
