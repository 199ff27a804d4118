use dioxus::prelude::*;
use releases::{Client, ClientDraft, Entity};

use super::{entity_ids, find_entity, BulkToolbar, ClientForm, ConfirmDialog, OpenForm};
use crate::auth::use_permissions;
use crate::bulk_table::{BulkTable, TableRow};
use crate::data::{use_dashboard_config, use_entity_list, use_entity_mutations};
use crate::selection::use_bulk_selection;

#[component]
pub fn ClientsView() -> Element {
    let clients = use_entity_list::<Client>();
    let mutations = use_entity_mutations::<Client>();
    let config = use_dashboard_config();
    let permissions = use_permissions();
    let mut form = use_signal(|| OpenForm::<ClientDraft>::None);
    let mut pending_delete = use_signal(Vec::<String>::new);

    let list: Vec<Client> = match &*clients.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let loading = clients.read().is_none();
    let mut selection = use_bulk_selection(
        config().selection.max_selection,
        entity_ids(&list),
    );

    let rows: Vec<TableRow> = list
        .iter()
        .map(|c| TableRow {
            id: c.id().to_string(),
            cells: vec![
                c.name.clone(),
                c.contact_email.clone().unwrap_or_default(),
                c.notes.clone().unwrap_or_default(),
            ],
        })
        .collect();

    let save = {
        let mutations = mutations.clone();
        move |draft: ClientDraft| {
            let mutations = mutations.clone();
            let editing = form().and_then(|(id, _)| id);
            spawn(async move {
                let saved = match editing {
                    Some(id) => mutations.update(id, draft).await,
                    None => mutations.create(draft).await,
                };
                if saved.is_some() {
                    form.set(None);
                }
            });
        }
    };

    let confirm_delete = {
        let mutations = mutations.clone();
        move |_: ()| {
            let mutations = mutations.clone();
            let ids = pending_delete();
            pending_delete.set(Vec::new());
            spawn(async move {
                if mutations.delete_many(ids).await.is_some() {
                    selection.deselect_all();
                }
            });
        }
    };

    let edit_list = list.clone();

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Clients" }

            BulkToolbar {
                noun: "client",
                selection,
                busy: mutations.is_pending(),
                on_create: move |_| form.set(Some((None, ClientDraft::default()))),
                on_delete: move |ids: Vec<String>| pending_delete.set(ids),
            }

            if loading {
                p { class: "loading", "Loading clients..." }
            } else {
                BulkTable {
                    columns: vec!["Name".to_string(), "Contact".to_string(), "Notes".to_string()],
                    rows,
                    selection,
                    editable: permissions.can_edit(),
                    on_edit: move |id: String| {
                        if let Some(client) = find_entity(&edit_list, &id) {
                            form.set(Some((Some(id), client.to_draft())));
                        }
                    },
                    empty_message: "No clients yet.",
                }
            }
        }

        if let Some((id, draft)) = form() {
            ClientForm {
                title: String::from(if id.is_some() { "Edit client" } else { "New client" }),
                draft,
                saving: mutations.is_pending(),
                on_save: save,
                on_cancel: move |_| form.set(None),
            }
        }

        if !pending_delete().is_empty() {
            ConfirmDialog {
                title: "Delete clients",
                message: format!("Delete {} client(s)?", pending_delete().len()),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(Vec::new()),
            }
        }
    }
}
