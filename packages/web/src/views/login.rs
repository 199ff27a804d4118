//! Login page view with the email/password form.

use dioxus::prelude::*;
use ui::{use_auth, LoginForm};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // If already logged in, go to the dashboard
    if !auth.loading && auth.user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    rsx! {
        div {
            class: "auth-page",
            h1 { "Release Dashboard" }
            p { class: "muted", "Sign in to manage modules, clients and versions." }

            LoginForm {
                on_success: move |_| {
                    nav.replace(Route::Dashboard {});
                },
            }

            p {
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
