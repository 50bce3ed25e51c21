//! Authentication state and access gating.
//!
//! The [`SessionGate`] is a two-state machine (unauthenticated or
//! authenticated) that moves only when the auth collaborator reports an
//! event. Views that need a signed-in user ask the gate for [`Access`] and
//! are sent to [`LOGIN_PATH`] otherwise.

use crate::favorites::StorageError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use thiserror::Error;
use tracing::{debug, info};

mod local;

pub use local::LocalAuthProvider;

/// Route unauthenticated users are redirected to.
pub const LOGIN_PATH: &str = "/login";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Who is signed in, as far as this application needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unauthenticated => None,
        }
    }
}

/// Notifications pushed by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Identity),
    SignedOut,
    /// Result of restoring a persisted session at startup
    Restored(Option<Identity>),
}

/// Outcome of evaluating a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(Identity),
    Redirect { to: &'static str },
}

/// The auth/session collaborator.
pub trait AuthProvider: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns the persisted identity, if a session survived a restart.
    fn restore(&self) -> Option<Identity>;
}

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

#[derive(Default)]
struct GateInner {
    state: SessionState,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

fn lock(inner: &Mutex<GateInner>) -> MutexGuard<'_, GateInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared session state with change subscriptions. Clones share state.
#[derive(Clone, Default)]
pub struct SessionGate {
    inner: Arc<Mutex<GateInner>>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        lock(&self.inner).state.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.inner).state.is_authenticated()
    }

    /// Applies a collaborator event.
    ///
    /// Listeners run only when the state actually changes, after the gate's
    /// lock is released, so they may read the gate. Returns whether the
    /// state changed.
    pub fn apply(&self, event: SessionEvent) -> bool {
        let next = match event {
            SessionEvent::SignedIn(identity) => SessionState::Authenticated(identity),
            SessionEvent::SignedOut | SessionEvent::Restored(None) => {
                SessionState::Unauthenticated
            }
            SessionEvent::Restored(Some(identity)) => SessionState::Authenticated(identity),
        };

        let listeners: Vec<Listener> = {
            let mut inner = lock(&self.inner);
            if inner.state == next {
                return false;
            }
            inner.state = next.clone();
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        debug!(authenticated = next.is_authenticated(), "Session state changed");
        for listener in listeners {
            listener(&next);
        }
        true
    }

    /// Registers `listener` for state changes until the returned
    /// [`Subscription`] is dropped or cancelled.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription {
            gate: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    /// Evaluates access to a view that requires a signed-in user.
    pub fn guard(&self) -> Access {
        match self.state() {
            SessionState::Authenticated(identity) => Access::Granted(identity),
            SessionState::Unauthenticated => Access::Redirect { to: LOGIN_PATH },
        }
    }
}

/// Handle for a registered listener; unsubscribes on drop.
pub struct Subscription {
    gate: Weak<Mutex<GateInner>>,
    id: u64,
}

impl Subscription {
    /// Unsubscribes now. Equivalent to dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.gate.upgrade() {
            lock(&inner).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Wires an [`AuthProvider`] to a [`SessionGate`].
pub struct Session<P> {
    provider: P,
    gate: SessionGate,
}

impl<P: AuthProvider> Session<P> {
    pub fn new(provider: P) -> Self {
        Session {
            provider,
            gate: SessionGate::new(),
        }
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Restores a persisted session, typically once at startup.
    pub fn restore(&self) -> SessionState {
        let restored = self.provider.restore();
        self.gate.apply(SessionEvent::Restored(restored));
        self.gate.state()
    }

    /// Signs in. On failure the state is left unchanged.
    pub fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self.provider.sign_in(email, password)?;
        info!(email = %identity.email, "Signed in");
        self.gate.apply(SessionEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    /// Signs out locally even if the provider fails to clear its records.
    pub fn logout(&self) -> Result<(), AuthError> {
        let result = self.provider.sign_out();
        self.gate.apply(SessionEvent::SignedOut);
        info!("Signed out");
        result
    }
}
