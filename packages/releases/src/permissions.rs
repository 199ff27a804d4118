//! Role-based permission resolver.
//!
//! [`Permissions`] is a `Copy` view over an optional [`Role`]. The role is absent
//! while the session is loading, when nobody is signed in, and when the stored
//! role string does not parse. In every such case all checks return `false`.

use crate::models::UserInfo;
use crate::role::{Capability, MenuKey, Role};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Permissions {
    role: Option<Role>,
}

impl Permissions {
    pub const fn new(role: Option<Role>) -> Self {
        Self { role }
    }

    /// Resolve permissions for the (possibly absent) signed-in user.
    pub fn for_user(user: Option<&UserInfo>) -> Self {
        Self::new(user.and_then(|u| u.role))
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn is_manager(&self) -> bool {
        self.role == Some(Role::Manager)
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.role.is_some_and(|role| role.grants(capability))
    }

    pub fn can_create(&self) -> bool {
        self.allows(Capability::Create)
    }

    pub fn can_edit(&self) -> bool {
        self.allows(Capability::Edit)
    }

    pub fn can_delete(&self) -> bool {
        self.allows(Capability::Delete)
    }

    pub fn can_see_menu(&self, key: MenuKey) -> bool {
        self.role.is_some_and(|role| role.menu().contains(&key))
    }

    /// String form of [`can_see_menu`](Self::can_see_menu). Unknown keys are hidden.
    pub fn can_see_menu_key(&self, key: &str) -> bool {
        key.parse::<MenuKey>().is_ok_and(|key| self.can_see_menu(key))
    }

    /// Menu entries to render, in display order.
    pub fn visible_menu(&self) -> &'static [MenuKey] {
        self.role.map(Role::menu).unwrap_or(&[])
    }
}

impl From<Option<Role>> for Permissions {
    fn from(role: Option<Role>) -> Self {
        Self::new(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_cases() -> Vec<Permissions> {
        let mut cases: Vec<_> = Role::ALL.into_iter().map(|r| Permissions::new(Some(r))).collect();
        cases.push(Permissions::new(None));
        cases
    }

    #[test]
    fn test_can_delete_only_for_admin() {
        for perms in all_cases() {
            assert_eq!(perms.can_delete(), perms.role() == Some(Role::Admin), "{perms:?}");
        }
    }

    #[test]
    fn test_create_and_edit_for_admin_and_manager() {
        for perms in all_cases() {
            let expected = matches!(perms.role(), Some(Role::Admin | Role::Manager));
            assert_eq!(perms.can_create(), expected, "{perms:?}");
            assert_eq!(perms.can_edit(), expected, "{perms:?}");
        }
    }

    #[test]
    fn test_role_predicates() {
        assert!(Permissions::new(Some(Role::Admin)).is_admin());
        assert!(!Permissions::new(Some(Role::Admin)).is_manager());
        assert!(Permissions::new(Some(Role::Manager)).is_manager());
        assert!(!Permissions::new(Some(Role::Viewer)).is_admin());
        assert!(!Permissions::new(Some(Role::Viewer)).is_manager());
    }

    #[test]
    fn test_absent_role_fails_closed() {
        let perms = Permissions::default();
        assert!(!perms.is_admin());
        assert!(!perms.is_manager());
        assert!(!perms.can_create());
        assert!(!perms.can_edit());
        assert!(!perms.can_delete());
        for key in MenuKey::ALL {
            assert!(!perms.can_see_menu(key));
        }
        assert!(perms.visible_menu().is_empty());
    }

    #[test]
    fn test_menu_visibility() {
        let admin = Permissions::new(Some(Role::Admin));
        let viewer = Permissions::new(Some(Role::Viewer));

        assert!(admin.can_see_menu(MenuKey::Users));
        assert_eq!(admin.visible_menu().len(), MenuKey::ALL.len());

        assert!(viewer.can_see_menu(MenuKey::Dashboard));
        assert!(viewer.can_see_menu(MenuKey::Reports));
        assert!(!viewer.can_see_menu(MenuKey::Users));
    }

    #[test]
    fn test_menu_key_strings() {
        let manager = Permissions::new(Some(Role::Manager));
        assert!(manager.can_see_menu_key("modules"));
        assert!(!manager.can_see_menu_key("users"));
        assert!(!manager.can_see_menu_key("Modules"));
        assert!(!manager.can_see_menu_key("billing"));
    }

    #[test]
    fn test_for_user() {
        let user = UserInfo {
            id: "u1".into(),
            email: "a@example.com".into(),
            name: None,
            role: Some(Role::Manager),
        };
        assert!(Permissions::for_user(Some(&user)).can_edit());
        assert!(!Permissions::for_user(None).can_edit());

        let roleless = UserInfo { role: None, ..user };
        assert!(!Permissions::for_user(Some(&roleless)).can_create());
    }
}
