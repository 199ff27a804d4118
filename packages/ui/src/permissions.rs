//! Permission-gated regions.
//!
//! Forbidden controls are not rendered at all; nothing here reports an error.
//! An optional `fallback` renders in their place.

use dioxus::prelude::*;
use releases::{Capability, MenuKey};

use crate::auth::use_permissions;

/// Renders `children` when the signed-in role grants `capability`.
#[component]
pub fn Protected(capability: Capability, fallback: Option<Element>, children: Element) -> Element {
    if use_permissions().allows(capability) {
        rsx! { {children} }
    } else {
        fallback.unwrap_or_else(|| rsx! {})
    }
}

/// Renders `children` when `menu` is in the signed-in role's menu.
#[component]
pub fn MenuGate(menu: MenuKey, fallback: Option<Element>, children: Element) -> Element {
    if use_permissions().can_see_menu(menu) {
        rsx! { {children} }
    } else {
        fallback.unwrap_or_else(|| rsx! {})
    }
}

#[component]
pub fn AdminOnly(fallback: Option<Element>, children: Element) -> Element {
    if use_permissions().is_admin() {
        rsx! { {children} }
    } else {
        fallback.unwrap_or_else(|| rsx! {})
    }
}
