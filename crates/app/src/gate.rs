#![forbid(unsafe_code)]

use crate::error::AppError;
use ad_core::ids::UserId;
use ad_core::session::Session;
use ad_storage::{RemoteStore, SessionSubscription};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
pub enum GateState {
    /// Neither the one-shot session read nor the subscription has answered.
    Resolving,
    SignedOut,
    SignedIn(Session),
}

/// Where a screen sends the user when the gate resolves to signed-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    SignIn,
}

/// Per-screen auth gate. Mounting subscribes to session transitions and
/// reads the current session once; both paths write the same state cell.
/// Dropping the gate releases the subscription on every exit path.
pub struct SessionGate {
    state: Arc<Mutex<GateState>>,
    store: Arc<dyn RemoteStore>,
    _subscription: SessionSubscription,
}

impl SessionGate {
    pub fn mount(store: Arc<dyn RemoteStore>) -> Self {
        let state = Arc::new(Mutex::new(GateState::Resolving));

        let cell = Arc::clone(&state);
        let subscription = store.subscribe_sessions(Box::new(move |session| {
            let next = match session {
                Some(session) => GateState::SignedIn(session.clone()),
                None => GateState::SignedOut,
            };
            if let Ok(mut state) = cell.lock() {
                *state = next;
            }
        }));

        // The one-shot read may land before or after the first subscription
        // event; both report the same source of truth.
        let initial = match store.current_session() {
            Some(session) => GateState::SignedIn(session),
            None => GateState::SignedOut,
        };
        if let Ok(mut current) = state.lock() {
            *current = initial;
        }

        Self {
            state,
            store,
            _subscription: subscription,
        }
    }

    pub fn state(&self) -> GateState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(_) => GateState::SignedOut,
        }
    }

    /// Owner id for dependent fetches; `None` blocks them.
    pub fn user_id(&self) -> Option<UserId> {
        match self.state() {
            GateState::SignedIn(session) => Some(session.user.id),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self.state() {
            GateState::SignedOut => Some(Redirect::SignIn),
            _ => None,
        }
    }

    /// Asks the store to invalidate the session. Success reaches the gate
    /// through the subscription; failure leaves the session intact.
    pub fn sign_out(&self) -> Result<(), AppError> {
        self.store.sign_out().map_err(AppError::SignOutFailed)
    }
}
