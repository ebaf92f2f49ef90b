//! Topic abstraction trait
//!
//! Defines the pub/sub capability the rest of the system depends on:
//! listing subscriptions (the access-list backing store), creating a
//! subscription (which triggers the collaborator's out-of-band
//! confirmation email), and publishing a notification.

use async_trait::async_trait;
use thiserror::Error;

/// Sentinel subscription identifier for a subscription whose owner has
/// not yet clicked the confirmation link.
pub const PENDING_CONFIRMATION: &str = "PendingConfirmation";

/// Pub/sub operation errors
#[derive(Debug, Error)]
pub enum PubSubError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Subscribe failed: {0}")]
    SubscribeFailed(String),

    #[error("Publish failed: {0}")]
    PublishFailed(String),

    #[error("Subscription listing failed: {0}")]
    ListFailed(String),
}

/// Result type for pub/sub operations
pub type PubSubResult<T> = Result<T, PubSubError>;

/// One topic subscription: the endpoint address and the backend's
/// subscription identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub endpoint: String,
    pub subscription_id: String,
}

impl Subscription {
    /// A subscription is pending while its identifier is still the
    /// confirmation sentinel.
    pub fn is_pending(&self) -> bool {
        self.subscription_id == PENDING_CONFIRMATION
    }
}

/// One page of the topic's subscription list.
#[derive(Debug, Clone)]
pub struct SubscriptionPage {
    pub subscriptions: Vec<Subscription>,
    pub next_token: Option<String>,
}

/// Pub/sub topic capability
///
/// Note on fan-out: the SNS backend publishes to a single configured
/// topic, so a shared topic delivers every notification to every
/// confirmed subscriber. `publish` still takes the intended recipient
/// explicitly; backends that can target or filter use it, the
/// shared-topic backend only logs it.
#[async_trait]
pub trait Topic: Send + Sync {
    /// List one page of the topic's subscriptions, starting from an
    /// opaque page token.
    async fn list_subscriptions(
        &self,
        page_token: Option<String>,
    ) -> PubSubResult<SubscriptionPage>;

    /// Create an email subscription for `email`. The collaborator
    /// dispatches the confirmation email out-of-band; this returns
    /// without waiting for confirmation.
    async fn subscribe(&self, email: &str) -> PubSubResult<()>;

    /// Publish a notification intended for `recipient`.
    async fn publish(&self, recipient: &str, subject: &str, message: &str) -> PubSubResult<()>;
}
