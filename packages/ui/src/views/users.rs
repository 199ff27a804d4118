use dioxus::prelude::*;

use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::permissions::AdminOnly;

/// Read-only list of accounts and their roles.
#[component]
pub fn UsersView() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Users" }
            AdminOnly {
                fallback: rsx! { p { class: "table-empty", "Only administrators can see accounts." } },
                UserTable {}
            }
        }
    }
}

#[component]
fn UserTable() -> Element {
    let mut notifications = use_notifications();
    let users = use_resource(move || async move {
        match api::list_users().await {
            Ok(users) => users,
            Err(e) => {
                notify(&mut notifications, NoticeLevel::Error, &e.to_string());
                Vec::new()
            }
        }
    });

    let Some(users) = users() else {
        return rsx! { p { class: "loading", "Loading users..." } };
    };

    rsx! {
        table {
            class: "plain-table",
            thead {
                tr {
                    th { "Name" }
                    th { "Email" }
                    th { "Role" }
                }
            }
            tbody {
                for user in users {
                    tr {
                        key: "{user.id}",
                        td { "{user.display_name()}" }
                        td { "{user.email}" }
                        td {
                            match user.role {
                                Some(role) => rsx! { span { class: "role-badge role-{role}", "{role}" } },
                                None => rsx! { span { class: "role-badge none", "no role" } },
                            }
                        }
                    }
                }
            }
        }
    }
}
