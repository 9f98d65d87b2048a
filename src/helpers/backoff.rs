use std::time::Duration;
use tracing::debug;

/// How long the places client waits before asking for a continuation page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackoffPolicy {
    Fixed(Duration),
    Disabled,
}

impl BackoffPolicy {
    pub async fn wait(&self) {
        match self {
            BackoffPolicy::Fixed(delay) => {
                debug!("Waiting {:?} before requesting the next page", delay);
                tokio::time::sleep(*delay).await;
            }
            BackoffPolicy::Disabled => {}
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy::Fixed(Duration::from_secs(2))
    }
}
