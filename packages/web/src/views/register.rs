//! Registration page view.

use dioxus::prelude::*;
use ui::{use_auth, RegisterForm};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // If already logged in, go to the dashboard
    if !auth.loading && auth.user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    rsx! {
        div {
            class: "auth-page",
            h1 { "Create Account" }
            p {
                class: "muted",
                "New accounts can sign in right away. An administrator assigns your role."
            }

            RegisterForm {
                on_success: move |_| {
                    nav.replace(Route::Dashboard {});
                },
            }

            p {
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
