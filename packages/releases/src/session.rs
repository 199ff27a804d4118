//! # Session: the explicitly passed auth context
//!
//! A [`Session`] owns an [`AuthClient`] and the current [`AuthState`]. It is
//! created by whoever needs it (the UI's `AuthProvider`, a test) and handed
//! down explicitly; there is no global.
//!
//! ## Lifecycle
//!
//! 1. [`Session::new`] starts in the loading state. Permissions resolve to
//!    "nothing allowed" until a user is known.
//! 2. [`Session::init`] performs the first `get_user` round-trip. Callers that
//!    cannot hold `&mut Session` across an await (such as a signal-backed UI)
//!    call the client themselves and pass the outcome to [`Session::resolve`].
//! 3. [`Session::set_user`] / [`Session::sign_out`] apply later changes.
//! 4. [`Session::teardown`] drops every listener and closes the session. A
//!    closed session ignores further state changes.
//!
//! Listeners registered with [`Session::on_auth_state_change`] run after every
//! state change while the session is open.

use crate::backend::AuthClient;
use crate::error::BackendError;
use crate::models::UserInfo;
use crate::permissions::Permissions;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
    /// Whether the backend was reachable on the last round-trip.
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&AuthState)>;

pub struct Session<A> {
    client: A,
    state: AuthState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    closed: bool,
}

impl<A: AuthClient> Session<A> {
    pub fn new(client: A) -> Self {
        Self {
            client,
            state: AuthState::default(),
            listeners: Vec::new(),
            next_subscription: 0,
            closed: false,
        }
    }

    pub fn client(&self) -> &A {
        &self.client
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.state.user.as_ref()
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::for_user(self.user())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fetch the current user from the backend.
    pub async fn init(&mut self) -> &AuthState {
        let result = self.client.get_user().await;
        self.resolve(result);
        &self.state
    }

    /// Apply the outcome of a `get_user` round-trip.
    ///
    /// A failure leaves nobody signed in: permissions fail closed.
    pub fn resolve(&mut self, result: Result<Option<UserInfo>, BackendError>) {
        let next = match result {
            Ok(user) => AuthState {
                user,
                loading: false,
                online: true,
            },
            Err(err) => {
                tracing::warn!("session refresh failed: {err}");
                AuthState {
                    user: None,
                    loading: false,
                    online: false,
                }
            }
        };
        self.apply(next);
    }

    /// Record that the backend is unreachable without dropping the user.
    pub fn mark_offline(&mut self) {
        let next = AuthState {
            online: false,
            ..self.state.clone()
        };
        self.apply(next);
    }

    /// Replace the signed-in user, e.g. after a password login.
    pub fn set_user(&mut self, user: Option<UserInfo>) {
        let next = AuthState {
            user,
            loading: false,
            online: true,
        };
        self.apply(next);
    }

    pub async fn sign_out(&mut self) -> Result<(), BackendError> {
        self.client.sign_out().await?;
        self.set_user(None);
        Ok(())
    }

    pub fn on_auth_state_change(&mut self, listener: impl Fn(&AuthState) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Close the session and drop all listeners.
    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.closed = true;
    }

    fn apply(&mut self, next: AuthState) {
        if self.closed || next == self.state {
            return;
        }
        self.state = next;
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::memory::MemoryBackend;
    use crate::role::Role;

    fn manager() -> UserInfo {
        UserInfo {
            id: "u1".into(),
            email: "m@example.com".into(),
            name: Some("Mia".into()),
            role: Some(Role::Manager),
        }
    }

    fn recorder<A: AuthClient>(session: &mut Session<A>) -> Rc<RefCell<Vec<AuthState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.on_auth_state_change(move |state| sink.borrow_mut().push(state.clone()));
        seen
    }

    #[tokio::test]
    async fn test_loading_session_denies_everything() {
        let session = Session::new(MemoryBackend::with_user(manager()));
        assert!(session.state().loading);
        assert!(!session.permissions().can_create());
    }

    #[tokio::test]
    async fn test_init_loads_user_and_notifies() {
        let mut session = Session::new(MemoryBackend::with_user(manager()));
        let seen = recorder(&mut session);

        let state = session.init().await;
        assert!(!state.loading);
        assert!(state.online);
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u1"));
        assert!(session.permissions().can_edit());
        assert!(!session.permissions().can_delete());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_init_fails_closed() {
        let backend = MemoryBackend::with_user(manager());
        backend.fail_next(BackendError::Network("down".into()));
        let mut session = Session::new(backend);

        let state = session.init().await;
        assert!(state.user.is_none());
        assert!(!state.online);
        assert!(!session.permissions().can_create());
    }

    #[tokio::test]
    async fn test_sign_out_clears_user() {
        let backend = MemoryBackend::with_user(manager());
        let mut session = Session::new(backend.clone());
        session.init().await;

        session.sign_out().await.unwrap();
        assert!(session.user().is_none());
        assert!(backend.get_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_offline_keeps_user() {
        let mut session = Session::new(MemoryBackend::with_user(manager()));
        session.init().await;
        session.mark_offline();
        assert!(!session.state().online);
        assert!(session.user().is_some());
    }

    #[test]
    fn test_unchanged_state_does_not_notify() {
        let mut session = Session::new(MemoryBackend::new());
        let seen = recorder(&mut session);
        session.set_user(Some(manager()));
        session.set_user(Some(manager()));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut session = Session::new(MemoryBackend::new());
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        let id = session.on_auth_state_change(move |_| *sink.borrow_mut() += 1);

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.set_user(Some(manager()));
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn test_teardown_stops_updates() {
        let mut session = Session::new(MemoryBackend::new());
        let seen = recorder(&mut session);
        session.teardown();
        session.set_user(Some(manager()));

        assert!(session.is_closed());
        assert!(seen.borrow().is_empty());
        assert!(session.user().is_none());
    }
}
