//! SNS topic implementation

use crate::traits::{PubSubError, PubSubResult, Subscription, SubscriptionPage, Topic};
use async_trait::async_trait;
use aws_sdk_sns::error::ProvideErrorMetadata;

/// Pub/sub topic backed by a single SNS topic with email subscriptions.
#[derive(Clone)]
pub struct SnsTopic {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsTopic {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }

    /// Build a client from the ambient AWS environment (credentials,
    /// region) and the configured topic ARN.
    pub async fn from_env(topic_arn: String) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_sns::Client::new(&config), topic_arn)
    }
}

#[async_trait]
impl Topic for SnsTopic {
    async fn list_subscriptions(
        &self,
        page_token: Option<String>,
    ) -> PubSubResult<SubscriptionPage> {
        let mut request = self
            .client
            .list_subscriptions_by_topic()
            .topic_arn(&self.topic_arn);
        if let Some(token) = page_token {
            request = request.next_token(token);
        }

        let output = request.send().await.map_err(|e| {
            tracing::error!(error = %e, topic_arn = %self.topic_arn, "SNS subscription listing failed");
            PubSubError::ListFailed(e.to_string())
        })?;

        let subscriptions = output
            .subscriptions()
            .iter()
            .map(|s| Subscription {
                endpoint: s.endpoint().unwrap_or_default().to_string(),
                subscription_id: s.subscription_arn().unwrap_or_default().to_string(),
            })
            .collect();

        Ok(SubscriptionPage {
            subscriptions,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn subscribe(&self, email: &str) -> PubSubResult<()> {
        let result = self
            .client
            .subscribe()
            .topic_arn(&self.topic_arn)
            .protocol("email")
            .endpoint(email)
            .return_subscription_arn(true)
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::info!(topic_arn = %self.topic_arn, "Created subscription");
                Ok(())
            }
            Err(e) => {
                let service_error = e.into_service_error();
                let message = service_error.message().unwrap_or_default().to_string();
                // SNS rejects syntactically invalid addresses with
                // InvalidParameter mentioning "Email address".
                if service_error.is_invalid_parameter_exception()
                    && message.contains("Email address")
                {
                    Err(PubSubError::InvalidEmail(email.to_string()))
                } else {
                    tracing::error!(
                        error = %service_error,
                        topic_arn = %self.topic_arn,
                        "SNS subscribe failed"
                    );
                    Err(PubSubError::SubscribeFailed(service_error.to_string()))
                }
            }
        }
    }

    async fn publish(&self, recipient: &str, subject: &str, message: &str) -> PubSubResult<()> {
        // Shared-topic fan-out: delivery reaches every confirmed
        // subscriber of the topic, not only `recipient`.
        tracing::debug!(recipient = %recipient, topic_arn = %self.topic_arn, "Publishing to shared topic");

        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, topic_arn = %self.topic_arn, "SNS publish failed");
                PubSubError::PublishFailed(e.to_string())
            })?;

        Ok(())
    }
}
