use dioxus::prelude::*;
use releases::MenuKey;

use crate::auth::{use_auth, use_permissions, LogoutButton};
use crate::icons::{FaChartBar, FaCloud, FaCloudArrowUp, FaCubes, FaGauge, FaTag, FaUserShield, FaUsers};
use crate::Icon;

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");

/// Navigation sidebar. Only menu entries the signed-in role may see are listed.
#[component]
pub fn AppSidebar(active: MenuKey, on_navigate: EventHandler<MenuKey>) -> Element {
    let auth = use_auth();
    let permissions = use_permissions();

    rsx! {
        document::Stylesheet { href: SIDEBAR_CSS }

        nav {
            class: "sidebar",

            div {
                class: "sidebar-user",
                if let Some(ref user) = auth.user {
                    span { class: "sidebar-user-name", "{user.display_name()}" }
                    if let Some(role) = user.role {
                        span { class: "role-badge role-{role}", "{role}" }
                    }
                } else {
                    span { class: "sidebar-user-name", "Release Dashboard" }
                }
                ConnectionIndicator { online: auth.online }
            }

            ul {
                class: "sidebar-menu",
                for key in permissions.visible_menu().iter().copied() {
                    li {
                        key: "{key}",
                        button {
                            class: if active == key { "sidebar-item active" } else { "sidebar-item" },
                            onclick: move |_| on_navigate.call(key),
                            MenuIcon { menu: key }
                            span { "{key.label()}" }
                        }
                    }
                }
            }

            div {
                class: "sidebar-bottom",
                LogoutButton { class: "sidebar-item" }
            }
        }
    }
}

#[component]
fn MenuIcon(menu: MenuKey) -> Element {
    match menu {
        MenuKey::Dashboard => rsx! { Icon { icon: FaGauge, width: 14, height: 14 } },
        MenuKey::Modules => rsx! { Icon { icon: FaCubes, width: 14, height: 14 } },
        MenuKey::Clients => rsx! { Icon { icon: FaUsers, width: 14, height: 14 } },
        MenuKey::Versions => rsx! { Icon { icon: FaTag, width: 14, height: 14 } },
        MenuKey::Reports => rsx! { Icon { icon: FaChartBar, width: 14, height: 14 } },
        MenuKey::Users => rsx! { Icon { icon: FaUserShield, width: 14, height: 14 } },
    }
}

/// Cloud icon showing whether the last backend round-trip succeeded.
#[component]
fn ConnectionIndicator(online: bool) -> Element {
    if online {
        rsx! {
            span {
                class: "online-indicator online",
                title: "Connected",
                Icon { icon: FaCloud, width: 14, height: 14 }
            }
        }
    } else {
        rsx! {
            span {
                class: "online-indicator offline",
                title: "Offline",
                Icon { icon: FaCloudArrowUp, width: 14, height: 14 }
            }
        }
    }
}
