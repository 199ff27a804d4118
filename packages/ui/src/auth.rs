//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns a [`Session`] in a signal and provides it as context.
//! Components read it through [`use_auth`] (the current [`AuthState`]) and
//! [`use_permissions`] (the resolved [`Permissions`]). The session is torn down
//! when the provider unmounts.

use std::time::Duration;

use dioxus::prelude::*;
use releases::{AuthClient, AuthState, BackendError, Permissions, Session, UserInfo};

use crate::data::use_repository;
use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::time::{redirect, sleep};

const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// [`AuthClient`] backed by the `api` server functions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApiAuth;

impl AuthClient for ApiAuth {
    async fn get_user(&self) -> Result<Option<UserInfo>, BackendError> {
        api::get_current_user()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        api::logout()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))
    }
}

pub type AuthSession = Session<ApiAuth>;

pub fn use_session() -> Signal<AuthSession> {
    use_context::<Signal<AuthSession>>()
}

/// Get the current authentication state.
/// The calling component re-renders when the user logs in or out.
pub fn use_auth() -> AuthState {
    use_session().read().state().clone()
}

/// What the signed-in user may do. Nothing is allowed while loading.
pub fn use_permissions() -> Permissions {
    use_session().read().permissions()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut session = use_context_provider(|| {
        let mut session = Session::new(ApiAuth);
        session.on_auth_state_change(|state| {
            tracing::info!(
                signed_in = state.user.is_some(),
                online = state.online,
                "auth state changed"
            );
        });
        Signal::new(session)
    });

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        let result = ApiAuth.get_user().await;
        session.write().resolve(result);
    });

    // Periodic connectivity check
    use_effect(move || {
        spawn(async move {
            loop {
                sleep(REFRESH_INTERVAL).await;

                if session.peek().is_closed() {
                    break;
                }
                // Don't check while initial load is still in progress
                if session.peek().state().loading {
                    continue;
                }
                match ApiAuth.get_user().await {
                    Ok(user) => {
                        let changed = {
                            let current = session.peek();
                            current.user() != user.as_ref() || !current.state().online
                        };
                        if changed {
                            session.write().resolve(Ok(user));
                        }
                    }
                    Err(e) => {
                        tracing::debug!("connectivity check failed: {e}");
                        if session.peek().state().online {
                            session.write().mark_offline();
                        }
                    }
                }
            }
        });
    });

    use_drop(move || {
        if let Ok(mut session) = session.try_write() {
            session.teardown();
        }
    });

    rsx! {
        {children}
    }
}

/// Email and password sign-in form.
#[component]
pub fn LoginForm(on_success: EventHandler<UserInfo>) -> Element {
    let mut session = use_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            loading.set(true);
            match api::login_password(e, p).await {
                Ok(user) => {
                    session.write().set_user(Some(user.clone()));
                    on_success.call(user);
                }
                Err(err) => {
                    error.set(Some(err.to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_login,
            if let Some(err) = error() {
                div { class: "auth-error", "{err}" }
            }
            label { r#for: "login-email", "Email" }
            input {
                id: "login-email",
                r#type: "email",
                autocomplete: "username",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            label { r#for: "login-password", "Password" }
            input {
                id: "login-password",
                r#type: "password",
                autocomplete: "current-password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button {
                class: "btn primary",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}

/// Account registration form. New accounts have no role until an
/// administrator assigns one.
#[component]
pub fn RegisterForm(on_success: EventHandler<UserInfo>) -> Element {
    let mut session = use_session();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();

            if n.is_empty() {
                error.set(Some("Name is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if p != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            match api::register(e, p, n).await {
                Ok(user) => {
                    session.write().set_user(Some(user.clone()));
                    on_success.call(user);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_register,
            if let Some(err) = error() {
                div { class: "auth-error", "{err}" }
            }
            label { r#for: "register-name", "Name" }
            input {
                id: "register-name",
                r#type: "text",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }
            label { r#for: "register-email", "Email" }
            input {
                id: "register-email",
                r#type: "email",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            label { r#for: "register-password", "Password" }
            input {
                id: "register-password",
                r#type: "password",
                autocomplete: "new-password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            label { r#for: "register-confirm", "Confirm password" }
            input {
                id: "register-confirm",
                r#type: "password",
                autocomplete: "new-password",
                value: confirm_password(),
                oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
            }
            button {
                class: "btn primary",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Create account" }
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut session = use_session();
    let mut notifications = use_notifications();
    let repository = use_repository();

    let onclick = move |_| {
        let repository = repository.clone();
        async move {
            match ApiAuth.sign_out().await {
                Ok(()) => {
                    // Rows cached for this user must not outlive the session
                    repository.clear_cache();
                    session.write().set_user(None);
                    redirect("/login");
                }
                Err(e) => notify(&mut notifications, NoticeLevel::Error, &e.to_string()),
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
