//! Welcome-notification port and its implementations

use async_trait::async_trait;

use crate::domain::user::User;

/// Port for notifying a user after a successful registration
///
/// Contract: implementations must not panic; any internal failure is
/// reported as a `false` return. No retries are performed at any layer.
#[async_trait]
pub trait WelcomeNotifier: Send + Sync {
    /// Sends a welcome email, returning whether the attempt succeeded
    async fn send_welcome_email(&self, user: &User) -> bool;
}

/// Logging-only notifier used when no real email provider is configured
///
/// Records the attempt via tracing and always reports success.
#[derive(Debug, Default, Clone)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WelcomeNotifier for LoggingNotifier {
    async fn send_welcome_email(&self, user: &User) -> bool {
        tracing::info!(user_id = %user.id, email = %user.email, "Sending welcome email");
        true
    }
}

/// Mock notifier for tests, returning a configured outcome
#[derive(Debug, Clone)]
pub struct MockNotifier {
    succeed: bool,
}

impl MockNotifier {
    /// A mock that always reports success
    pub fn succeeding() -> Self {
        Self { succeed: true }
    }

    /// A mock that always reports failure
    pub fn failing() -> Self {
        Self { succeed: false }
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::succeeding()
    }
}

#[async_trait]
impl WelcomeNotifier for MockNotifier {
    async fn send_welcome_email(&self, _user: &User) -> bool {
        self.succeed
    }
}
