use dioxus::prelude::*;
use releases::{Client, DashboardStats, Module, Version};

use crate::auth::use_auth;
use crate::data::{use_dashboard_config, use_entity_list};

/// Totals and the latest releases.
#[component]
pub fn DashboardView() -> Element {
    let auth = use_auth();
    let config = use_dashboard_config();
    let stats = use_dashboard_stats(config().overview.recent_releases);

    let greeting = auth
        .user
        .as_ref()
        .map(|u| format!("Welcome, {}", u.display_name()))
        .unwrap_or_else(|| "Welcome".to_string());

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "{greeting}" }

            match stats {
                None => rsx! { p { class: "loading", "Loading..." } },
                Some(stats) => rsx! {
                    div {
                        class: "stat-cards",
                        StatCard { label: "Modules", value: stats.total_modules }
                        StatCard { label: "Clients", value: stats.total_clients }
                        StatCard { label: "Versions", value: stats.total_versions }
                    }

                    h2 { class: "section-title", "Recent releases" }
                    if stats.recent_releases.is_empty() {
                        p { class: "table-empty", "No dated releases yet." }
                    } else {
                        table {
                            class: "plain-table",
                            thead {
                                tr {
                                    th { "Module" }
                                    th { "Version" }
                                    th { "Released" }
                                }
                            }
                            tbody {
                                for release in stats.recent_releases.iter() {
                                    tr {
                                        key: "{release.version_id}",
                                        td { "{release.module_name}" }
                                        td { "{release.version_number}" }
                                        td { "{release.release_date}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: usize) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}

/// Statistics over all three tables, or `None` until every list has loaded.
pub fn use_dashboard_stats(recent: usize) -> Option<DashboardStats> {
    let modules = use_entity_list::<Module>();
    let clients = use_entity_list::<Client>();
    let versions = use_entity_list::<Version>();

    let (m, c, v) = (modules.read(), clients.read(), versions.read());
    match (&*m, &*c, &*v) {
        (Some(Ok(m)), Some(Ok(c)), Some(Ok(v))) => {
            Some(DashboardStats::compute_with_recent(m, c, v, recent))
        }
        _ => None,
    }
}
