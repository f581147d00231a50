use async_graphql::MergedSubscription;

mod rundown;

#[derive(MergedSubscription, Default)]
/// The root subscription type which contains root level fields.
pub struct Subscription(rundown::RundownSubscription);
