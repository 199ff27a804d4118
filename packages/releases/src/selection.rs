//! Bulk row selection.
//!
//! [`Selection`] tracks which of the currently listed ids are marked for a batch
//! operation. It owns a copy of the listed ids so that range and select-all
//! operations can follow list order, and so the selection can be kept a subset
//! of the list when rows disappear.
//!
//! Every operation is a synchronous state transition. Ids that are not in the
//! current list are ignored rather than reported.

use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    items: Vec<String>,
    selected: HashSet<String>,
    max: Option<usize>,
}

impl Selection {
    /// Empty selection over an empty list, with an optional cap.
    pub fn new(max: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            selected: HashSet::new(),
            max,
        }
    }

    pub fn with_items<I, S>(items: I, max: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new(max);
        selection.set_items(items);
        selection
    }

    /// Replace the listed ids, dropping selected ids that are no longer listed.
    /// Repeated ids keep their first position.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        self.items = items
            .into_iter()
            .map(Into::into)
            .filter(|id: &String| seen.insert(id.clone()))
            .collect();
        let listed: HashSet<&str> = self.items.iter().map(String::as_str).collect();
        self.selected.retain(|id| listed.contains(id.as_str()));
    }

    /// Change the cap. A selection larger than the new cap keeps its first ids in list order.
    pub fn set_max(&mut self, max: Option<usize>) {
        self.max = max;
        if let Some(max) = max {
            if self.selected.len() > max {
                let keep: HashSet<String> = self.selected_ids().into_iter().take(max).collect();
                self.selected = keep;
            }
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Number of ids a full selection holds: `min(N, max)`.
    pub fn capacity(&self) -> usize {
        match self.max {
            Some(max) => self.items.len().min(max),
            None => self.items.len(),
        }
    }

    fn has_room(&self) -> bool {
        match self.max {
            Some(max) => self.selected.len() < max,
            None => true,
        }
    }

    fn is_listed(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    /// Select `id` if unselected and there is room; deselect it otherwise.
    pub fn toggle(&mut self, id: &str) {
        if self.selected.remove(id) {
            return;
        }
        if self.has_room() && self.is_listed(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn select_all(&mut self) {
        let take = self.capacity();
        self.selected = self.items.iter().take(take).cloned().collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Select the inclusive list range between two ids, in either order.
    ///
    /// Stops adding once the cap is reached. Ids selected outside the range stay
    /// selected. If either id is not listed nothing changes.
    pub fn select_range(&mut self, start_id: &str, end_id: &str) {
        let Some(start) = self.items.iter().position(|id| id == start_id) else {
            return;
        };
        let Some(end) = self.items.iter().position(|id| id == end_id) else {
            return;
        };
        let (lo, hi) = (start.min(end), start.max(end));

        for idx in lo..=hi {
            if self.selected.contains(&self.items[idx]) {
                continue;
            }
            if !self.has_room() {
                break;
            }
            self.selected.insert(self.items[idx].clone());
        }
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn is_all_selected(&self) -> bool {
        !self.items.is_empty() && self.selected.len() == self.capacity()
    }

    pub fn is_at_capacity(&self) -> bool {
        !self.has_room()
    }

    /// Selected ids in list order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|id| self.selected.contains(id.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc(max: Option<usize>) -> Selection {
        Selection::with_items(["a", "b", "c"], max)
    }

    fn ids(sel: &Selection) -> Vec<String> {
        sel.selected_ids()
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut sel = abc(None);
        sel.toggle("b");
        let before = sel.clone();

        sel.toggle("a");
        assert!(sel.is_selected("a"));
        sel.toggle("a");
        assert_eq!(sel, before);
    }

    #[test]
    fn test_repeated_ids_are_listed_once() {
        let mut sel = Selection::with_items(["a", "a", "b"], None);
        assert_eq!(sel.items(), ["a".to_string(), "b".to_string()]);
        assert_eq!(sel.capacity(), 2);

        sel.select_all();
        assert!(sel.is_all_selected());
        assert_eq!(ids(&sel), vec!["a", "b"]);
    }

    #[test]
    fn test_select_all_then_deselect_all() {
        let mut sel = abc(None);
        sel.select_all();
        assert_eq!(sel.count(), 3);
        sel.deselect_all();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle_respects_cap() {
        let mut sel = abc(Some(2));
        sel.toggle("a");
        sel.toggle("b");
        sel.toggle("c");
        assert_eq!(ids(&sel), vec!["a", "b"]);
        assert!(sel.is_at_capacity());

        // Deselecting still works at capacity and frees a slot.
        sel.toggle("a");
        sel.toggle("c");
        assert_eq!(ids(&sel), vec!["b", "c"]);
    }

    #[test]
    fn test_toggle_ignores_unlisted_ids() {
        let mut sel = abc(None);
        sel.toggle("zzz");
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_takes_first_ids_up_to_cap() {
        let mut sel = Selection::with_items(["a", "b", "c", "d"], Some(3));
        sel.toggle("d");
        sel.select_all();
        assert_eq!(ids(&sel), vec!["a", "b", "c"]);
        assert!(sel.is_all_selected());
    }

    #[test]
    fn test_select_range_is_order_independent() {
        let mut sel = Selection::with_items(["a", "b", "c", "d"], None);
        sel.select_range("b", "a");
        assert_eq!(ids(&sel), vec!["a", "b"]);

        let mut sel = Selection::with_items(["a", "b", "c", "d"], None);
        sel.select_range("b", "d");
        assert_eq!(ids(&sel), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_select_range_with_unknown_id_is_noop() {
        let mut sel = Selection::with_items(["a", "b", "c", "d"], None);
        sel.toggle("c");
        let before = sel.clone();
        sel.select_range("x", "a");
        assert_eq!(sel, before);
        sel.select_range("a", "x");
        assert_eq!(sel, before);
    }

    #[test]
    fn test_select_range_stops_at_cap_without_evicting() {
        let mut sel = Selection::with_items(["a", "b", "c", "d", "e"], Some(3));
        sel.toggle("e");
        sel.select_range("a", "d");
        assert_eq!(ids(&sel), vec!["a", "b", "e"]);
    }

    #[test]
    fn test_select_range_single_item() {
        let mut sel = abc(None);
        sel.select_range("b", "b");
        assert_eq!(ids(&sel), vec!["b"]);
    }

    #[test]
    fn test_is_all_selected() {
        let empty = Selection::new(None);
        assert!(!empty.is_all_selected());

        let mut sel = abc(None);
        assert!(!sel.is_all_selected());
        sel.select_all();
        assert!(sel.is_all_selected());
        sel.toggle("b");
        assert!(!sel.is_all_selected());
    }

    #[test]
    fn test_is_all_selected_with_cap_larger_than_list() {
        let mut sel = abc(Some(10));
        sel.select_all();
        assert!(sel.is_all_selected());
        assert_eq!(sel.capacity(), 3);
    }

    #[test]
    fn test_set_items_prunes_removed_ids() {
        let mut sel = abc(None);
        sel.select_all();
        sel.set_items(["a", "c", "d"]);
        assert_eq!(ids(&sel), vec!["a", "c"]);
        assert!(!sel.is_selected("b"));
    }

    #[test]
    fn test_set_max_trims_in_list_order() {
        let mut sel = Selection::with_items(["a", "b", "c", "d"], None);
        sel.toggle("d");
        sel.toggle("b");
        sel.toggle("a");
        sel.set_max(Some(2));
        assert_eq!(ids(&sel), vec!["a", "b"]);
    }

    #[test]
    fn test_zero_cap_selects_nothing() {
        let mut sel = abc(Some(0));
        sel.toggle("a");
        sel.select_all();
        sel.select_range("a", "c");
        assert!(sel.is_empty());
        assert_eq!(sel.capacity(), 0);
    }
}
