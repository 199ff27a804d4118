use dioxus::prelude::*;
use releases::{Entity, Module, ModuleDraft};

use super::{entity_ids, find_entity, BulkToolbar, ConfirmDialog, ModuleForm, OpenForm};
use crate::auth::use_permissions;
use crate::bulk_table::{BulkTable, TableRow};
use crate::data::{use_dashboard_config, use_entity_list, use_entity_mutations};
use crate::selection::use_bulk_selection;

#[component]
pub fn ModulesView() -> Element {
    let modules = use_entity_list::<Module>();
    let mutations = use_entity_mutations::<Module>();
    let config = use_dashboard_config();
    let permissions = use_permissions();
    let mut form = use_signal(|| OpenForm::<ModuleDraft>::None);
    let mut pending_delete = use_signal(Vec::<String>::new);

    let list: Vec<Module> = match &*modules.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let loading = modules.read().is_none();
    let mut selection = use_bulk_selection(
        config().selection.max_selection,
        entity_ids(&list),
    );

    let rows: Vec<TableRow> = list
        .iter()
        .map(|m| TableRow {
            id: m.id().to_string(),
            cells: vec![
                m.name.clone(),
                m.description.clone().unwrap_or_default(),
                m.created_at.format("%Y-%m-%d").to_string(),
            ],
        })
        .collect();

    let save = {
        let mutations = mutations.clone();
        move |draft: ModuleDraft| {
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
            h1 { class: "page-title", "Modules" }

            BulkToolbar {
                noun: "module",
                selection,
                busy: mutations.is_pending(),
                on_create: move |_| form.set(Some((None, ModuleDraft::default()))),
                on_delete: move |ids: Vec<String>| pending_delete.set(ids),
            }

            if loading {
                p { class: "loading", "Loading modules..." }
            } else {
                BulkTable {
                    columns: vec!["Name".to_string(), "Description".to_string(), "Created".to_string()],
                    rows,
                    selection,
                    editable: permissions.can_edit(),
                    on_edit: move |id: String| {
                        if let Some(module) = find_entity(&edit_list, &id) {
                            form.set(Some((Some(id), module.to_draft())));
                        }
                    },
                    empty_message: "No modules yet.",
                }
            }
        }

        if let Some((id, draft)) = form() {
            ModuleForm {
                title: String::from(if id.is_some() { "Edit module" } else { "New module" }),
                draft,
                saving: mutations.is_pending(),
                on_save: save,
                on_cancel: move |_| form.set(None),
            }
        }

        if !pending_delete().is_empty() {
            ConfirmDialog {
                title: "Delete modules",
                message: format!(
                    "Delete {} module(s)? Their versions are deleted too.",
                    pending_delete().len()
                ),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(Vec::new()),
            }
        }
    }
}
