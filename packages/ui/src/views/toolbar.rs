use dioxus::prelude::*;
use releases::Capability;

use crate::permissions::Protected;
use crate::selection::BulkSelection;

/// Create and bulk-delete actions above a [`crate::BulkTable`]. Each button is
/// only rendered for roles that hold the capability.
#[component]
pub fn BulkToolbar(
    noun: String,
    selection: BulkSelection,
    #[props(default)] busy: bool,
    on_create: EventHandler<()>,
    on_delete: EventHandler<Vec<String>>,
) -> Element {
    let mut selection = selection;
    let count = selection.count();

    rsx! {
        div {
            class: "toolbar",
            Protected {
                capability: Capability::Create,
                button {
                    class: "btn primary",
                    disabled: busy,
                    onclick: move |_| on_create.call(()),
                    "New {noun}"
                }
            }
            Protected {
                capability: Capability::Delete,
                button {
                    class: "btn danger",
                    disabled: busy || count == 0,
                    onclick: move |_| on_delete.call(selection.selected_ids()),
                    "Delete selected ({count})"
                }
            }
            if count > 0 {
                button {
                    class: "btn outline",
                    onclick: move |_| selection.deselect_all(),
                    "Clear selection"
                }
            }
        }
    }
}
