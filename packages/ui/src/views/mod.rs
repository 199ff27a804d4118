mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod forms;
pub use forms::{format_date, parse_date, ClientForm, ModuleForm, VersionForm};

mod toolbar;
pub use toolbar::BulkToolbar;

mod layout;
pub use layout::DashboardLayoutView;

mod dashboard;
pub use dashboard::{use_dashboard_stats, DashboardView};

mod modules;
pub use modules::ModulesView;

mod clients;
pub use clients::ClientsView;

mod versions;
pub use versions::VersionsView;

mod reports;
pub use reports::ReportsView;

mod users;
pub use users::UsersView;

use releases::Entity;

/// Open create/edit form: the record id when editing, and the draft.
pub(crate) type OpenForm<D> = Option<(Option<String>, D)>;

/// Ids of `list`, in list order.
pub(crate) fn entity_ids<E: Entity>(list: &[E]) -> Vec<String> {
    list.iter().map(|e| e.id().to_string()).collect()
}

pub(crate) fn find_entity<'a, E: Entity>(list: &'a [E], id: &str) -> Option<&'a E> {
    list.iter().find(|e| e.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use releases::Module;

    fn module(id: &str, name: &str) -> Module {
        Module {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_lookup_by_id() {
        let list = vec![module("m1", "auth"), module("m2", "billing")];
        assert_eq!(entity_ids(&list), vec!["m1", "m2"]);
        assert_eq!(find_entity(&list, "m2").map(|m| m.name.as_str()), Some("billing"));
        assert!(find_entity(&list, "m3").is_none());
    }
}
