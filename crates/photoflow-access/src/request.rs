//! Self-service access requests.
//!
//! A user asks to join the access list by email. First request creates
//! a topic subscription, which makes the collaborator send a
//! confirmation email; confirming the link flips the subscription to
//! confirmed and the email becomes authorized. Repeat requests while
//! pending are deduplicated so no duplicate subscription is ever
//! created.

use crate::registry::AccessLookup;
use photoflow_core::{AccessState, AppError};
use photoflow_pubsub::{PubSubError, Topic};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequestOutcome {
    /// Email already holds a confirmed subscription.
    AlreadyApproved,
    /// A confirmation email is already out for this address.
    AlreadyPending,
    /// A new subscription was created; confirmation email is on its way.
    VerificationSent,
}

/// Access request service: dedupe against current state, then subscribe.
#[derive(Clone)]
pub struct AccessRequestService {
    registry: Arc<dyn AccessLookup>,
    topic: Arc<dyn Topic>,
}

impl AccessRequestService {
    pub fn new(registry: Arc<dyn AccessLookup>, topic: Arc<dyn Topic>) -> Self {
        Self { registry, topic }
    }

    /// Request access for `email`. Returns immediately; confirmation
    /// happens out-of-band via the collaborator's email link.
    pub async fn request_access(&self, email: &str) -> Result<AccessRequestOutcome, AppError> {
        // Minimal syntactic gate; the collaborator does the real
        // address validation on subscribe.
        if !email.contains('@') {
            return Err(AppError::InvalidInput("Invalid email address".to_string()));
        }

        match self.registry.check(email).await {
            AccessState::Confirmed => return Ok(AccessRequestOutcome::AlreadyApproved),
            AccessState::Pending => return Ok(AccessRequestOutcome::AlreadyPending),
            AccessState::NotSubscribed => {}
        }

        match self.topic.subscribe(email).await {
            Ok(()) => {
                tracing::info!(email = %email, "Access request created, verification email sent");
                Ok(AccessRequestOutcome::VerificationSent)
            }
            Err(PubSubError::InvalidEmail(_)) => {
                Err(AppError::InvalidInput("Invalid email format".to_string()))
            }
            Err(e) => Err(AppError::PubSub(e.to_string())),
        }
    }
}
