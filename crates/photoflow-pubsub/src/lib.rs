//! Photoflow pub/sub library
//!
//! Capability interface over the collaborator notification topic, with
//! an SNS implementation and an in-memory backend for tests. The topic
//! doubles as the backing store for the access list: an email is
//! authorized when it holds a confirmed subscription.

pub mod memory;
pub mod sns;
pub mod traits;

pub use memory::{MemoryTopic, PublishedMessage};
pub use sns::SnsTopic;
pub use traits::{
    PubSubError, PubSubResult, Subscription, SubscriptionPage, Topic, PENDING_CONFIRMATION,
};
