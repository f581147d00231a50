use async_graphql::SimpleObject;

pub mod block;
pub mod clipboard;
pub mod item;
pub mod lock;
pub mod newscast;
pub mod template;

#[derive(Default, SimpleObject)]
/// The root mutation type which contains root level fields.
pub struct Mutation {
	newscast: newscast::NewscastMutation,
	block: block::BlockMutation,
	item: item::ItemMutation,
	clipboard: clipboard::ClipboardMutation,
	lock: lock::LockMutation,
	template: template::TemplateMutation,
}
