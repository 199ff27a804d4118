use dioxus::prelude::*;
use releases::MenuKey;
use ui::views::DashboardLayoutView;
use ui::MenuGate;

use crate::Route;

#[component]
pub fn SidebarLayout() -> Element {
    let nav = use_navigator();
    let route = use_route::<Route>();
    let active = route.menu().unwrap_or(MenuKey::Dashboard);

    rsx! {
        DashboardLayoutView {
            active,
            on_navigate: move |key: MenuKey| {
                nav.push(Route::for_menu(key));
            },
            MenuGate {
                menu: active,
                fallback: rsx! {
                    div {
                        class: "page",
                        h1 { class: "page-title", "Not available" }
                        p { "Your role does not include this page." }
                    }
                },
                Outlet::<Route> {}
            }
        }
    }
}
