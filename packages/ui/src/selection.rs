//! Bulk row selection bound to a component.

use dioxus::prelude::*;
use releases::Selection;

/// Handle returned by [`use_bulk_selection`]. Copy it into event handlers freely.
#[derive(Clone, Copy, PartialEq)]
pub struct BulkSelection {
    state: Signal<Selection>,
    anchor: Signal<Option<String>>,
}

/// Selection over `items`, capped at `max` when set.
///
/// The listed ids and the cap are re-applied whenever they change, which prunes
/// selected ids that are no longer listed.
pub fn use_bulk_selection(max: Option<usize>, items: Vec<String>) -> BulkSelection {
    let mut state = use_signal(|| Selection::with_items(items.clone(), max));
    let mut anchor = use_signal(|| Option::<String>::None);

    use_effect(use_reactive!(|(items, max)| {
        if state.peek().items() != items.as_slice() {
            let current_anchor = anchor.peek().clone();
            if let Some(id) = current_anchor {
                if !items.contains(&id) {
                    anchor.set(None);
                }
            }
            state.write().set_items(items);
        }
        if state.peek().max() != max {
            state.write().set_max(max);
        }
    }));

    BulkSelection { state, anchor }
}

/// A row click. With `shift` held and a previous click recorded, selects the
/// range between them; otherwise toggles the row. Either way the row becomes
/// the new anchor.
pub fn click_row(selection: &mut Selection, anchor: &mut Option<String>, id: &str, shift: bool) {
    match anchor.as_deref() {
        Some(from) if shift => selection.select_range(from, id),
        _ => selection.toggle(id),
    }
    *anchor = Some(id.to_string());
}

impl BulkSelection {
    pub fn click(&mut self, id: &str, shift: bool) {
        let mut anchor = self.anchor.peek().clone();
        click_row(&mut self.state.write(), &mut anchor, id, shift);
        self.anchor.set(anchor);
    }

    pub fn toggle(&mut self, id: &str) {
        self.state.write().toggle(id);
    }

    pub fn select_all(&mut self) {
        self.state.write().select_all();
    }

    pub fn deselect_all(&mut self) {
        self.state.write().deselect_all();
        self.anchor.set(None);
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.state.read().is_selected(id)
    }

    pub fn is_all_selected(&self) -> bool {
        self.state.read().is_all_selected()
    }

    pub fn is_at_capacity(&self) -> bool {
        self.state.read().is_at_capacity()
    }

    pub fn count(&self) -> usize {
        self.state.read().count()
    }

    pub fn max(&self) -> Option<usize> {
        self.state.read().max()
    }

    /// Selected ids in list order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.state.read().selected_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_clicks_toggle() {
        let mut sel = Selection::with_items(items(), None);
        let mut anchor = None;
        click_row(&mut sel, &mut anchor, "b", false);
        click_row(&mut sel, &mut anchor, "d", false);
        click_row(&mut sel, &mut anchor, "b", false);
        assert_eq!(sel.selected_ids(), vec!["d".to_string()]);
        assert_eq!(anchor.as_deref(), Some("b"));
    }

    #[test]
    fn test_shift_click_selects_range_from_anchor() {
        let mut sel = Selection::with_items(items(), None);
        let mut anchor = None;
        click_row(&mut sel, &mut anchor, "d", false);
        click_row(&mut sel, &mut anchor, "b", true);
        assert_eq!(sel.selected_ids(), vec!["b", "c", "d"]);
        assert_eq!(anchor.as_deref(), Some("b"));
    }

    #[test]
    fn test_shift_click_without_anchor_toggles() {
        let mut sel = Selection::with_items(items(), None);
        let mut anchor = None;
        click_row(&mut sel, &mut anchor, "c", true);
        assert_eq!(sel.selected_ids(), vec!["c".to_string()]);
    }

    #[test]
    fn test_shift_click_respects_cap() {
        let mut sel = Selection::with_items(items(), Some(2));
        let mut anchor = None;
        click_row(&mut sel, &mut anchor, "a", false);
        click_row(&mut sel, &mut anchor, "e", true);
        assert_eq!(sel.count(), 2);
        assert!(sel.is_selected("a"));
    }
}
