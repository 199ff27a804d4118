//! Table with per-row checkboxes backed by a [`BulkSelection`].

use dioxus::prelude::*;

use crate::selection::BulkSelection;

/// One rendered row. `cells` line up with the table's `columns`.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// Rows with selection checkboxes. Shift-click selects the range from the
/// previously clicked row.
#[component]
pub fn BulkTable(
    columns: Vec<String>,
    rows: Vec<TableRow>,
    selection: BulkSelection,
    /// Show an edit button per row.
    #[props(default)]
    editable: bool,
    #[props(default)] on_edit: EventHandler<String>,
    #[props(default = "Nothing here yet.".to_string())] empty_message: String,
) -> Element {
    let mut selection = selection;

    if rows.is_empty() {
        return rsx! {
            p { class: "table-empty", "{empty_message}" }
        };
    }

    let all_selected = selection.is_all_selected();
    let count = selection.count();
    let at_capacity = selection.is_at_capacity();

    rsx! {
        div {
            class: "bulk-table-status",
            match selection.max() {
                Some(max) => rsx! { span { "{count} of at most {max} selected" } },
                None => rsx! { span { "{count} selected" } },
            }
        }
        table {
            class: "bulk-table",
            thead {
                tr {
                    th {
                        class: "select-cell",
                        input {
                            r#type: "checkbox",
                            title: "Select all",
                            checked: all_selected,
                            onclick: move |_| {
                                if all_selected {
                                    selection.deselect_all();
                                } else {
                                    selection.select_all();
                                }
                            },
                        }
                    }
                    for column in columns.iter() {
                        th { "{column}" }
                    }
                    if editable {
                        th {}
                    }
                }
            }
            tbody {
                for row in rows {
                    tr {
                        key: "{row.id}",
                        class: if selection.is_selected(&row.id) { "selected" } else { "" },
                        td {
                            class: "select-cell",
                            input {
                                r#type: "checkbox",
                                checked: selection.is_selected(&row.id),
                                disabled: at_capacity && !selection.is_selected(&row.id),
                                onclick: {
                                    let id = row.id.clone();
                                    move |evt: MouseEvent| {
                                        let shift = evt.modifiers().contains(Modifiers::SHIFT);
                                        selection.click(&id, shift);
                                    }
                                },
                            }
                        }
                        for cell in row.cells.iter() {
                            td { "{cell}" }
                        }
                        if editable {
                            td {
                                class: "row-actions",
                                button {
                                    class: "btn small",
                                    onclick: {
                                        let id = row.id.clone();
                                        move |_| on_edit.call(id.clone())
                                    },
                                    "Edit"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
