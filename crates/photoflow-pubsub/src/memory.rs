//! In-memory topic backend for tests and local development.

use crate::traits::{
    PubSubError, PubSubResult, Subscription, SubscriptionPage, Topic, PENDING_CONFIRMATION,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A notification captured by the in-memory topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub recipient: String,
    pub subject: String,
    pub message: String,
}

#[derive(Default)]
struct Inner {
    subscriptions: Vec<Subscription>,
    published: Vec<PublishedMessage>,
    next_subscription_id: u64,
}

/// In-memory topic. Subscriptions start pending; tests confirm them
/// through [`MemoryTopic::confirm`], mirroring the out-of-band email
/// confirmation of the real collaborator.
#[derive(Clone, Default)]
pub struct MemoryTopic {
    inner: Arc<RwLock<Inner>>,
    fail_publish: Arc<AtomicBool>,
    fail_list: Arc<AtomicBool>,
}

/// Page size for the in-memory subscription listing, small enough that
/// tests exercise the pagination loop.
const PAGE_SIZE: usize = 2;

impl MemoryTopic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a subscription directly in the given state.
    pub async fn add_subscription(&self, email: &str, confirmed: bool) {
        let mut inner = self.inner.write().await;
        let subscription_id = if confirmed {
            inner.next_subscription_id += 1;
            format!("memory:subscription:{}", inner.next_subscription_id)
        } else {
            PENDING_CONFIRMATION.to_string()
        };
        inner.subscriptions.push(Subscription {
            endpoint: email.to_string(),
            subscription_id,
        });
    }

    /// Confirm a pending subscription, as the user would by clicking
    /// the emailed link.
    pub async fn confirm(&self, email: &str) {
        let mut inner = self.inner.write().await;
        inner.next_subscription_id += 1;
        let id = format!("memory:subscription:{}", inner.next_subscription_id);
        if let Some(sub) = inner
            .subscriptions
            .iter_mut()
            .find(|s| s.endpoint.eq_ignore_ascii_case(email) && s.is_pending())
        {
            sub.subscription_id = id;
        }
    }

    pub async fn subscription_count(&self, email: &str) -> usize {
        self.inner
            .read()
            .await
            .subscriptions
            .iter()
            .filter(|s| s.endpoint.eq_ignore_ascii_case(email))
            .count()
    }

    pub async fn published(&self) -> Vec<PublishedMessage> {
        self.inner.read().await.published.clone()
    }

    /// Make subsequent `publish` calls fail, for partial-failure tests.
    pub fn set_fail_publish(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::Relaxed);
    }

    /// Make subsequent listings fail, for fail-closed authorization tests.
    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl Topic for MemoryTopic {
    async fn list_subscriptions(
        &self,
        page_token: Option<String>,
    ) -> PubSubResult<SubscriptionPage> {
        if self.fail_list.load(Ordering::Relaxed) {
            return Err(PubSubError::ListFailed("simulated outage".to_string()));
        }

        let offset: usize = match page_token {
            Some(token) => token
                .parse()
                .map_err(|_| PubSubError::ListFailed(format!("bad page token: {}", token)))?,
            None => 0,
        };

        let inner = self.inner.read().await;
        let subscriptions: Vec<Subscription> = inner
            .subscriptions
            .iter()
            .skip(offset)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        let next_offset = offset + subscriptions.len();
        let next_token = if next_offset < inner.subscriptions.len() {
            Some(next_offset.to_string())
        } else {
            None
        };

        Ok(SubscriptionPage {
            subscriptions,
            next_token,
        })
    }

    async fn subscribe(&self, email: &str) -> PubSubResult<()> {
        if !email.contains('@') {
            return Err(PubSubError::InvalidEmail(email.to_string()));
        }
        self.add_subscription(email, false).await;
        Ok(())
    }

    async fn publish(&self, recipient: &str, subject: &str, message: &str) -> PubSubResult<()> {
        if self.fail_publish.load(Ordering::Relaxed) {
            return Err(PubSubError::PublishFailed("simulated outage".to_string()));
        }
        self.inner.write().await.published.push(PublishedMessage {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
