//! Session context
//!
//! Holds the bearer credential, the logged-in flag, and the cached user
//! profile. The context is an explicitly injected handle rather than ambient
//! global state: the client and the stores receive a clone and share the
//! same underlying session.
//!
//! Writes are restricted by convention to the login flow ([`establish`],
//! [`logout`]) and the expiry path ([`expire`]); everything else only reads.
//!
//! [`establish`]: SessionContext::establish
//! [`logout`]: SessionContext::logout
//! [`expire`]: SessionContext::expire

pub mod expiry;
pub mod storage;

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::models::UserInfo;

pub use expiry::{Navigator, NoticeSink, SessionExpiryHandler};
pub use storage::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, StorageError, TOKEN_KEY,
};

/// Signals emitted by the session for subscribers such as the expiry handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session was invalidated by an authentication failure
    Expired,
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    profile: Option<UserInfo>,
    expired: bool,
}

/// Shared session handle.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<Mutex<SessionState>>,
    store: Arc<dyn CredentialStore>,
    events: UnboundedSender<SessionEvent>,
}

impl SessionContext {
    /// Create a session over the given credential store. A credential
    /// persisted from an earlier run marks the session logged in. Returns
    /// the event receiver the expiry handler consumes.
    pub fn new(store: Arc<dyn CredentialStore>) -> (Self, UnboundedReceiver<SessionEvent>) {
        let token = match store.load() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("failed to restore credential: {}", err);
                None
            }
        };
        let (events, receiver) = mpsc::unbounded_channel();
        let session = Self {
            state: Arc::new(Mutex::new(SessionState {
                token,
                ..SessionState::default()
            })),
            store,
            events,
        };
        (session, receiver)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current bearer credential, if authenticated
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Whether a credential is present
    pub fn is_logged_in(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Cached profile of the authenticated user
    pub fn profile(&self) -> Option<UserInfo> {
        self.lock().profile.clone()
    }

    /// Install a fresh credential after a successful login.
    pub fn establish(&self, token: String, profile: Option<UserInfo>) {
        if let Err(err) = self.store.save(&token) {
            tracing::warn!("failed to persist credential: {}", err);
        }
        let mut state = self.lock();
        state.token = Some(token);
        state.profile = profile;
        state.expired = false;
    }

    /// Replace the cached user profile
    pub fn cache_profile(&self, profile: UserInfo) {
        self.lock().profile = Some(profile);
    }

    /// Drop the credential and cached profile on explicit logout. Emits no
    /// event; only a detected expiry triggers the redirect cycle.
    pub fn logout(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!("failed to clear persisted credential: {}", err);
        }
        let mut state = self.lock();
        state.token = None;
        state.profile = None;
    }

    /// Invalidate the session after an authentication failure. Idempotent:
    /// the first call clears the credential and emits one
    /// [`SessionEvent::Expired`]; repeated calls during the same expired
    /// session do nothing. Returns whether this call performed the expiry.
    pub fn expire(&self) -> bool {
        {
            let mut state = self.lock();
            if state.expired {
                return false;
            }
            state.expired = true;
            state.token = None;
            state.profile = None;
        }
        if let Err(err) = self.store.clear() {
            tracing::warn!("failed to clear persisted credential: {}", err);
        }
        // Receiver may be gone during shutdown; the expiry itself stands.
        let _ = self.events.send(SessionEvent::Expired);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_session() -> (SessionContext, UnboundedReceiver<SessionEvent>) {
        SessionContext::new(Arc::new(MemoryCredentialStore::new()))
    }

    #[test]
    fn test_new_session_is_logged_out() {
        let (session, _events) = fresh_session();
        assert!(!session.is_logged_in());
        assert!(session.token().is_none());
        assert!(session.profile().is_none());
    }

    #[test]
    fn test_restores_persisted_credential() {
        let store = Arc::new(MemoryCredentialStore::with_token("persisted"));
        let (session, _events) = SessionContext::new(store);
        assert!(session.is_logged_in());
        assert_eq!(session.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_establish_persists_and_marks_logged_in() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (session, _events) = SessionContext::new(store.clone());
        session.establish("abc".to_string(), None);
        assert!(session.is_logged_in());
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_logout_clears_without_event() {
        let (session, mut events) = fresh_session();
        session.establish("abc".to_string(), None);
        session.logout();
        assert!(!session.is_logged_in());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_expire_is_idempotent() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (session, mut events) = SessionContext::new(store.clone());
        session.establish("abc".to_string(), None);

        assert!(session.expire());
        assert!(!session.expire());
        assert!(!session.is_logged_in());
        assert!(store.load().unwrap().is_none());

        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
        assert!(events.try_recv().is_err(), "expiry must emit exactly once");
    }

    #[test]
    fn test_login_after_expiry_rearms_the_cycle() {
        let (session, mut events) = fresh_session();
        session.establish("first".to_string(), None);
        assert!(session.expire());
        session.establish("second".to_string(), None);
        assert!(session.expire());

        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    }
}
