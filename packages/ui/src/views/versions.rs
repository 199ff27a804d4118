use std::collections::HashMap;

use dioxus::prelude::*;
use releases::{Entity, Filter, Module, Version, VersionDraft};

use super::{entity_ids, find_entity, format_date, BulkToolbar, ConfirmDialog, OpenForm, VersionForm};
use crate::auth::use_permissions;
use crate::bulk_table::{BulkTable, TableRow};
use crate::data::{use_dashboard_config, use_entity_list, use_entity_mutations, use_entity_query};
use crate::release_notes::ReleaseNotes;
use crate::selection::use_bulk_selection;

/// Versions, optionally narrowed to one module.
#[component]
pub fn VersionsView() -> Element {
    let mut filter = use_signal(|| Option::<Filter>::None);
    let versions = use_entity_query::<Version>(filter);
    let modules = use_entity_list::<Module>();
    let mutations = use_entity_mutations::<Version>();
    let config = use_dashboard_config();
    let permissions = use_permissions();
    let mut form = use_signal(|| OpenForm::<VersionDraft>::None);
    let mut pending_delete = use_signal(Vec::<String>::new);
    let mut shown_notes = use_signal(|| Option::<String>::None);

    let module_list: Vec<Module> = match &*modules.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let names: HashMap<String, String> = module_list
        .iter()
        .map(|m| (m.id.clone(), m.name.clone()))
        .collect();

    let list: Vec<Version> = match &*versions.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let loading = versions.read().is_none();
    let mut selection = use_bulk_selection(
        config().selection.max_selection,
        entity_ids(&list),
    );

    let rows: Vec<TableRow> = list
        .iter()
        .map(|v| TableRow {
            id: v.id().to_string(),
            cells: vec![
                names.get(&v.module_id).cloned().unwrap_or_else(|| v.module_id.clone()),
                v.version_number.clone(),
                format_date(v.release_date),
            ],
        })
        .collect();

    let selected_module = filter().map(|f| f.value).unwrap_or_default();

    let save = {
        let mutations = mutations.clone();
        move |draft: VersionDraft| {
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

    let notes_panel = shown_notes()
        .and_then(|id| find_entity(&list, &id))
        .map(|v| {
            let module = names.get(&v.module_id).cloned().unwrap_or_default();
            (
                format!("{module} {}", v.version_number),
                v.notes.clone().unwrap_or_default(),
            )
        });
    let edit_list = list.clone();

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Versions" }

            div {
                class: "filter-bar",
                label { r#for: "version-filter", "Module" }
                select {
                    id: "version-filter",
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        if value.is_empty() {
                            filter.set(None);
                        } else {
                            filter.set(Some(Filter::eq("module_id", value)));
                        }
                    },
                    option { value: "", selected: selected_module.is_empty(), "All modules" }
                    for module in module_list.iter() {
                        option {
                            key: "{module.id}",
                            value: "{module.id}",
                            selected: module.id == selected_module,
                            "{module.name}"
                        }
                    }
                }
            }

            BulkToolbar {
                noun: "version",
                selection,
                busy: mutations.is_pending(),
                on_create: move |_| {
                    let draft = VersionDraft {
                        module_id: filter().map(|f| f.value).unwrap_or_default(),
                        ..VersionDraft::default()
                    };
                    form.set(Some((None, draft)));
                },
                on_delete: move |ids: Vec<String>| pending_delete.set(ids),
            }

            if loading {
                p { class: "loading", "Loading versions..." }
            } else {
                BulkTable {
                    columns: vec!["Module".to_string(), "Version".to_string(), "Released".to_string()],
                    rows,
                    selection,
                    editable: permissions.can_edit(),
                    on_edit: move |id: String| {
                        if let Some(version) = find_entity(&edit_list, &id) {
                            form.set(Some((Some(id), version.to_draft())));
                        }
                    },
                    empty_message: "No versions recorded.",
                }

                div {
                    class: "notes-picker",
                    for version in list.iter() {
                        button {
                            key: "{version.id}",
                            class: if shown_notes().as_deref() == Some(version.id.as_str()) { "chip active" } else { "chip" },
                            onclick: {
                                let id = version.id.clone();
                                move |_| {
                                    if shown_notes().as_deref() == Some(id.as_str()) {
                                        shown_notes.set(None);
                                    } else {
                                        shown_notes.set(Some(id.clone()));
                                    }
                                }
                            },
                            "{version.version_number}"
                        }
                    }
                }
            }

            if let Some((heading, source)) = notes_panel {
                section {
                    class: "release-notes-panel",
                    h2 { "{heading}" }
                    ReleaseNotes { source }
                }
            }
        }

        if let Some((id, draft)) = form() {
            VersionForm {
                title: String::from(if id.is_some() { "Edit version" } else { "New version" }),
                draft,
                modules: module_list.clone(),
                saving: mutations.is_pending(),
                on_save: save,
                on_cancel: move |_| form.set(None),
            }
        }

        if !pending_delete().is_empty() {
            ConfirmDialog {
                title: "Delete versions",
                message: format!("Delete {} version(s)?", pending_delete().len()),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(Vec::new()),
            }
        }
    }
}
