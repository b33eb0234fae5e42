mod subscriptions;

pub use subscriptions::{StoreError, SubscriptionStore};
