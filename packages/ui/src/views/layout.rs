use dioxus::prelude::*;
use releases::MenuKey;

use crate::auth::use_auth;
use crate::notifications::NotificationList;
use crate::sidebar::AppSidebar;
use crate::time::redirect;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Signed-in shell: sidebar, the routed page and notifications.
///
/// Visitors who are not signed in are sent to `/login`. Accounts without a
/// role see a waiting message instead of the dashboard.
#[component]
pub fn DashboardLayoutView(
    /// Menu entry of the page being shown.
    active: MenuKey,
    on_navigate: EventHandler<MenuKey>,
    children: Element,
) -> Element {
    let auth = use_auth();

    if auth.loading {
        return rsx! {
            div { class: "splash", "Loading..." }
        };
    }

    let Some(user) = auth.user else {
        redirect("/login");
        return rsx! {
            div { class: "splash", "Redirecting to sign in..." }
        };
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "app-shell",
            AppSidebar { active, on_navigate }

            main {
                class: "app-main",
                if user.role.is_some() {
                    {children}
                } else {
                    div {
                        class: "page",
                        h1 { class: "page-title", "Awaiting access" }
                        p {
                            "Your account ({user.email}) has no role yet. "
                            "Ask an administrator to assign one."
                        }
                    }
                }
            }

            NotificationList {}
        }
    }
}
