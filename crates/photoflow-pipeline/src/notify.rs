//! Notification composition and delivery.

use photoflow_core::SizeProfile;
use photoflow_pubsub::Topic;
use std::sync::Arc;
use std::time::Duration;

/// Composes the fixed plain-text result message and publishes it to the
/// notification topic.
#[derive(Clone)]
pub struct Notifier {
    topic: Arc<dyn Topic>,
    publish_timeout: Duration,
}

impl Notifier {
    pub fn new(topic: Arc<dyn Topic>, publish_timeout: Duration) -> Self {
        Self {
            topic,
            publish_timeout,
        }
    }

    /// Build the subject and body for a result notification. The body
    /// embeds the original filename and every derivative link with its
    /// size label and bound.
    pub fn compose(filename: &str, links: &[(SizeProfile, String)]) -> (String, String) {
        let subject = format!("Your resized images are ready - {}", filename);

        let mut body = String::new();
        body.push_str("Your images are ready!\n\n");
        body.push_str(&format!("Original file: {}\n\n", filename));
        body.push_str("Download your resized images (links valid for 7 days):\n\n");
        for (profile, url) in links {
            let bound = profile.bound();
            body.push_str(&format!("{} ({}x{}):\n{}\n\n", profile, bound, bound, url));
        }
        body.push_str("---\nLinks expire in 7 days.\nPowered by Photoflow\n");

        (subject, body)
    }

    /// Compose and publish the result notification for `email`.
    ///
    /// Returns whether delivery was handed off; never errors, so the
    /// pipeline can report processing success independently of
    /// notification delivery.
    pub async fn compose_and_send(
        &self,
        email: &str,
        filename: &str,
        links: &[(SizeProfile, String)],
    ) -> bool {
        let (subject, body) = Self::compose(filename, links);

        let publish = self.topic.publish(email, &subject, &body);
        match tokio::time::timeout(self.publish_timeout, publish).await {
            Ok(Ok(())) => {
                tracing::info!(email = %email, filename = %filename, "Result notification published");
                true
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, email = %email, "Notification publish failed");
                false
            }
            Err(_) => {
                tracing::warn!(
                    email = %email,
                    timeout_secs = self.publish_timeout.as_secs(),
                    "Notification publish timed out"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoflow_pubsub::MemoryTopic;

    fn links() -> Vec<(SizeProfile, String)> {
        SizeProfile::ALL
            .into_iter()
            .map(|p| (p, format!("https://storage.invalid/processed/x_{}.jpg", p)))
            .collect()
    }

    #[test]
    fn test_compose_embeds_filename_and_links() {
        let (subject, body) = Notifier::compose("photo.PNG", &links());
        assert!(subject.contains("photo.PNG"));
        assert!(body.contains("photo.PNG"));
        assert!(body.contains("thumbnail (150x150)"));
        assert!(body.contains("medium (500x500)"));
        assert!(body.contains("large (1200x1200)"));
        for (_, url) in links() {
            assert!(body.contains(&url));
        }
    }

    #[tokio::test]
    async fn test_send_success_and_failure() {
        let topic = MemoryTopic::new();
        let notifier = Notifier::new(Arc::new(topic.clone()), Duration::from_secs(5));

        assert!(
            notifier
                .compose_and_send("user@example.com", "photo.png", &links())
                .await
        );
        let published = topic.published().await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].recipient, "user@example.com");

        topic.set_fail_publish(true);
        assert!(
            !notifier
                .compose_and_send("user@example.com", "photo.png", &links())
                .await
        );
    }
}
