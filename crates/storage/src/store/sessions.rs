#![forbid(unsafe_code)]

use ad_core::session::Session;
use std::sync::{Arc, Mutex, Weak};

pub type SessionListener = Box<dyn Fn(Option<&Session>) + Send + Sync>;

/// In-memory session registry: one current session plus the listeners that
/// observe transitions. Listeners must not call back into the hub.
#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

#[derive(Default)]
struct HubInner {
    current: Option<Session>,
    next_token: u64,
    listeners: Vec<(u64, SessionListener)>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        match self.inner.lock() {
            Ok(inner) => inner.current.clone(),
            Err(_) => None,
        }
    }

    pub fn subscribe(&self, listener: SessionListener) -> SessionSubscription {
        let token = match self.inner.lock() {
            Ok(mut inner) => {
                let token = inner.next_token;
                inner.next_token += 1;
                inner.listeners.push((token, listener));
                token
            }
            Err(_) => u64::MAX,
        };
        SessionSubscription {
            hub: Arc::downgrade(&self.inner),
            token,
        }
    }

    pub fn sign_in(&self, session: Session) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.current = Some(session);
            inner.notify();
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.current = None;
            inner.notify();
        }
    }
}

impl HubInner {
    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(self.current.as_ref());
        }
    }
}

/// Scoped registration: dropping the handle unregisters the listener on
/// every exit path, including redirects away from a screen.
pub struct SessionSubscription {
    hub: Weak<Mutex<HubInner>>,
    token: u64,
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade()
            && let Ok(mut inner) = hub.lock()
        {
            inner.listeners.retain(|(token, _)| *token != self.token);
        }
    }
}
