//! Create/edit forms for modules, clients and versions.
//!
//! Forms only collect input. Trimming and required-field checks happen in
//! `Entity::validate` when the draft is submitted, and failures surface as
//! notifications while the form stays open.

use chrono::NaiveDate;
use dioxus::prelude::*;
use releases::{ClientDraft, Module, ModuleDraft, VersionDraft};

use super::ModalOverlay;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Parse an `<input type="date">` value. Blank or malformed input is no date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[component]
fn FormShell(
    title: String,
    saving: bool,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            form {
                class: "modal-body",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                h2 { class: "modal-title", "{title}" }
                {children}
                div {
                    class: "modal-actions",
                    button {
                        class: "btn primary",
                        r#type: "submit",
                        disabled: saving,
                        if saving { "Saving..." } else { "Save" }
                    }
                    button {
                        class: "btn outline",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ModuleForm(
    title: String,
    draft: ModuleDraft,
    #[props(default)] saving: bool,
    on_save: EventHandler<ModuleDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut name = use_signal(|| draft.name.clone());
    let mut description = use_signal(|| optional_text(&draft.description));

    rsx! {
        FormShell {
            title,
            saving,
            on_cancel,
            on_submit: move |_| {
                on_save.call(ModuleDraft {
                    name: name(),
                    description: Some(description()),
                })
            },
            div {
                class: "modal-field",
                label { r#for: "module-name", "Name" }
                input {
                    id: "module-name",
                    r#type: "text",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "module-description", "Description" }
                textarea {
                    id: "module-description",
                    rows: 3,
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
            }
        }
    }
}

#[component]
pub fn ClientForm(
    title: String,
    draft: ClientDraft,
    #[props(default)] saving: bool,
    on_save: EventHandler<ClientDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut name = use_signal(|| draft.name.clone());
    let mut contact_email = use_signal(|| optional_text(&draft.contact_email));
    let mut notes = use_signal(|| optional_text(&draft.notes));

    rsx! {
        FormShell {
            title,
            saving,
            on_cancel,
            on_submit: move |_| {
                on_save.call(ClientDraft {
                    name: name(),
                    contact_email: Some(contact_email()),
                    notes: Some(notes()),
                })
            },
            div {
                class: "modal-field",
                label { r#for: "client-name", "Name" }
                input {
                    id: "client-name",
                    r#type: "text",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "client-email", "Contact email" }
                input {
                    id: "client-email",
                    r#type: "email",
                    value: contact_email(),
                    oninput: move |evt: FormEvent| contact_email.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "client-notes", "Notes" }
                textarea {
                    id: "client-notes",
                    rows: 3,
                    value: notes(),
                    oninput: move |evt: FormEvent| notes.set(evt.value()),
                }
            }
        }
    }
}

#[component]
pub fn VersionForm(
    title: String,
    draft: VersionDraft,
    modules: Vec<Module>,
    #[props(default)] saving: bool,
    on_save: EventHandler<VersionDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut module_id = use_signal(|| draft.module_id.clone());
    let mut version_number = use_signal(|| draft.version_number.clone());
    let mut release_date = use_signal(|| format_date(draft.release_date));
    let mut notes = use_signal(|| optional_text(&draft.notes));

    rsx! {
        FormShell {
            title,
            saving,
            on_cancel,
            on_submit: move |_| {
                on_save.call(VersionDraft {
                    module_id: module_id(),
                    version_number: version_number(),
                    release_date: parse_date(&release_date()),
                    notes: Some(notes()),
                })
            },
            div {
                class: "modal-field",
                label { r#for: "version-module", "Module" }
                select {
                    id: "version-module",
                    value: module_id(),
                    onchange: move |evt: FormEvent| module_id.set(evt.value()),
                    option { value: "", disabled: true, "Choose a module" }
                    for module in modules.iter() {
                        option {
                            key: "{module.id}",
                            value: "{module.id}",
                            selected: module.id == module_id(),
                            "{module.name}"
                        }
                    }
                }
            }
            div {
                class: "modal-field",
                label { r#for: "version-number", "Version" }
                input {
                    id: "version-number",
                    r#type: "text",
                    placeholder: "1.4.0",
                    value: version_number(),
                    oninput: move |evt: FormEvent| version_number.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "version-date", "Release date" }
                input {
                    id: "version-date",
                    r#type: "date",
                    value: release_date(),
                    oninput: move |evt: FormEvent| release_date.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "version-notes", "Release notes (Markdown)" }
                textarea {
                    id: "version-notes",
                    rows: 6,
                    value: notes(),
                    oninput: move |evt: FormEvent| notes.set(evt.value()),
                }
            }
        }
    }
}
