//! Route targets inside the sidebar layout. The shared views live in `ui`.

use dioxus::prelude::*;
use ui::views::{ClientsView, DashboardView, ModulesView, ReportsView, UsersView, VersionsView};

#[component]
pub fn Dashboard() -> Element {
    rsx! { DashboardView {} }
}

#[component]
pub fn Modules() -> Element {
    rsx! { ModulesView {} }
}

#[component]
pub fn Clients() -> Element {
    rsx! { ClientsView {} }
}

#[component]
pub fn Versions() -> Element {
    rsx! { VersionsView {} }
}

#[component]
pub fn Reports() -> Element {
    rsx! { ReportsView {} }
}

#[component]
pub fn Users() -> Element {
    rsx! { UsersView {} }
}
