use dioxus::prelude::*;

use super::use_dashboard_stats;
use releases::DashboardStats;

/// Release activity per module and per month.
#[component]
pub fn ReportsView() -> Element {
    let stats = use_dashboard_stats(DashboardStats::DEFAULT_RECENT);

    let Some(stats) = stats else {
        return rsx! {
            div {
                class: "page",
                h1 { class: "page-title", "Reports" }
                p { class: "loading", "Loading..." }
            }
        };
    };

    let busiest_month = stats
        .releases_per_month
        .iter()
        .map(|m| m.versions)
        .max()
        .unwrap_or(0);
    let bars: Vec<(String, usize, usize)> = stats
        .releases_per_month
        .iter()
        .map(|m| (m.month.clone(), m.versions, bar_width(m.versions, busiest_month)))
        .collect();

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Reports" }

            h2 { class: "section-title", "Versions per module" }
            table {
                class: "plain-table",
                thead {
                    tr {
                        th { "Module" }
                        th { "Versions" }
                    }
                }
                tbody {
                    for row in stats.versions_per_module.iter() {
                        tr {
                            key: "{row.module_id}",
                            td { "{row.module_name}" }
                            td { "{row.versions}" }
                        }
                    }
                }
            }

            h2 { class: "section-title", "Releases per month" }
            if bars.is_empty() {
                p { class: "table-empty", "No dated releases yet." }
            } else {
                div {
                    class: "bar-chart",
                    for (month, count, width) in bars {
                        div {
                            key: "{month}",
                            class: "bar-row",
                            span { class: "bar-label", "{month}" }
                            span { class: "bar", style: "width: {width}%" }
                            span { class: "bar-value", "{count}" }
                        }
                    }
                }
            }
        }
    }
}

/// Bar length as a percentage of the busiest month.
fn bar_width(count: usize, busiest: usize) -> usize {
    if busiest == 0 {
        return 0;
    }
    count * 100 / busiest
}
