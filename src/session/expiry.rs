//! Session expiry handling
//!
//! Consumes [`SessionEvent::Expired`] signals, shows a transient notice, and
//! navigates to the login route after a short delay so the notice has time to
//! render before the route changes. Navigation and notices are behind traits;
//! the transport layer knows nothing about routing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use super::SessionEvent;
use crate::config::Config;
use crate::error::UNAUTHENTICATED_MESSAGE;

/// Route-change sink the expiry handler drives.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Transient user-visible notice sink.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// Reacts to session expiry: notice first, login redirect after the delay.
pub struct SessionExpiryHandler {
    navigator: Arc<dyn Navigator>,
    notices: Arc<dyn NoticeSink>,
    login_path: String,
    redirect_delay: Duration,
}

impl SessionExpiryHandler {
    pub fn new(config: &Config, navigator: Arc<dyn Navigator>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            navigator,
            notices,
            login_path: config.login_path().to_string(),
            redirect_delay: config.redirect_delay(),
        }
    }

    /// Consume session events until the sender side is dropped.
    pub async fn run(self, mut events: UnboundedReceiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::Expired => self.handle_expired().await,
            }
        }
    }

    async fn handle_expired(&self) {
        tracing::info!("session expired, redirecting to {}", self.login_path);
        self.notices.notify(UNAUTHENTICATED_MESSAGE);
        tokio::time::sleep(self.redirect_delay).await;
        self.navigator.navigate(&self.login_path);
    }
}
