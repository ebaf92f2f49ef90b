//! Access registry: membership queries against the access list.

use async_trait::async_trait;
use photoflow_core::AccessState;
use photoflow_pubsub::Topic;
use std::sync::Arc;

/// Membership query against the access list.
///
/// Kept as a trait so the backing can be swapped later (indexed lookup,
/// cache) without touching the upload gateway; the current backing is a
/// linear scan of the topic subscription list, which is O(subscriber
/// count) per check and fine at small scale.
#[async_trait]
pub trait AccessLookup: Send + Sync {
    /// Authorization state for `email`. Never fails: lookup errors are
    /// treated as not subscribed (fail-closed), trading availability
    /// for safety on authorization decisions.
    async fn check(&self, email: &str) -> AccessState;
}

/// Access registry backed by the notification topic's subscription list.
#[derive(Clone)]
pub struct TopicAccessRegistry {
    topic: Arc<dyn Topic>,
}

impl TopicAccessRegistry {
    pub fn new(topic: Arc<dyn Topic>) -> Self {
        Self { topic }
    }
}

#[async_trait]
impl AccessLookup for TopicAccessRegistry {
    async fn check(&self, email: &str) -> AccessState {
        let mut page_token = None;

        loop {
            let page = match self.topic.list_subscriptions(page_token).await {
                Ok(page) => page,
                Err(e) => {
                    // Fail closed: a pub/sub outage blocks uploads
                    // rather than letting unknown emails through.
                    tracing::warn!(
                        error = %e,
                        email = %email,
                        "Subscription lookup failed, treating as not subscribed"
                    );
                    return AccessState::NotSubscribed;
                }
            };

            for subscription in &page.subscriptions {
                if subscription.endpoint.eq_ignore_ascii_case(email) {
                    return if subscription.is_pending() {
                        AccessState::Pending
                    } else {
                        AccessState::Confirmed
                    };
                }
            }

            match page.next_token {
                Some(token) => page_token = Some(token),
                None => return AccessState::NotSubscribed,
            }
        }
    }
}
