//! Ordered result list with an independent selection set.
//!
//! [`VideoList`] owns both halves and exposes four mutators (`replace`,
//! `reorder`, `toggle`, `set_all`). Every mutator leaves the selection a subset
//! of the listed ids; "all selected" is computed on read.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Item, VideoId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no item with id {0} in the current list")]
    InvalidReference(VideoId),
    #[error("duplicate id {0} in replacement list")]
    DuplicateId(VideoId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoList {
    items: Vec<Item>,
    selected: HashSet<VideoId>,
}

impl VideoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new list and clears the selection.
    ///
    /// Fails without touching the current state if `items` repeats an id.
    pub fn replace(&mut self, items: Vec<Item>) -> Result<(), StoreError> {
        let mut ids = HashSet::with_capacity(items.len());
        for item in &items {
            if !ids.insert(&item.id) {
                return Err(StoreError::DuplicateId(item.id.clone()));
            }
        }
        self.items = items;
        self.selected.clear();
        Ok(())
    }

    /// Moves `moved` to the current position of `target`; items in between
    /// shift by one. Moving an item onto itself is a no-op.
    pub fn reorder(&mut self, moved: &VideoId, target: &VideoId) -> Result<(), StoreError> {
        if moved == target {
            return Ok(());
        }
        let from = self.require_position(moved)?;
        let to = self.require_position(target)?;
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    /// Flips the selection of `id`.
    pub fn toggle(&mut self, id: &VideoId) -> Result<(), StoreError> {
        self.require_position(id)?;
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
        Ok(())
    }

    /// Selects every listed item, or none.
    pub fn set_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.items.iter().map(|item| item.id.clone()).collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &VideoId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &VideoId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    pub fn is_selected(&self, id: &VideoId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// True iff the list is non-empty and every item is selected.
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.selected.len() == self.items.len()
    }

    /// Selected items in list order; the order of selection does not matter.
    pub fn selected_in_order(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items
            .iter()
            .filter(|item| self.selected.contains(&item.id))
    }

    fn require_position(&self, id: &VideoId) -> Result<usize, StoreError> {
        self.position(id)
            .ok_or_else(|| StoreError::InvalidReference(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, VideoList};
    use crate::{Item, VideoId};
    use pretty_assertions::assert_eq;

    fn item(id: &str) -> Item {
        Item {
            id: VideoId::new(id),
            title: format!("動画{id}"),
            view_metric: 0,
            duration_text: "0:00".to_string(),
            thumbnail_ref: String::new(),
        }
    }

    fn list(ids: &[&str]) -> VideoList {
        let mut list = VideoList::new();
        list.replace(ids.iter().map(|id| item(id)).collect())
            .unwrap();
        list
    }

    fn order(list: &VideoList) -> Vec<&str> {
        list.items().iter().map(|i| i.id.as_str()).collect()
    }

    fn id(value: &str) -> VideoId {
        VideoId::new(value)
    }

    #[test]
    fn reorder_moves_forward_and_backward() {
        let mut l = list(&["a", "b", "c"]);
        l.reorder(&id("a"), &id("b")).unwrap();
        assert_eq!(order(&l), vec!["b", "a", "c"]);

        let mut l = list(&["a", "b", "c", "d"]);
        l.reorder(&id("a"), &id("d")).unwrap();
        assert_eq!(order(&l), vec!["b", "c", "d", "a"]);

        let mut l = list(&["a", "b", "c", "d"]);
        l.reorder(&id("d"), &id("b")).unwrap();
        assert_eq!(order(&l), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn reorder_onto_self_is_noop() {
        let mut l = list(&["a", "b"]);
        let before = l.clone();
        l.reorder(&id("b"), &id("b")).unwrap();
        assert_eq!(l, before);
    }

    #[test]
    fn reorder_unknown_id_errors_and_keeps_order() {
        let mut l = list(&["a", "b"]);
        assert_eq!(
            l.reorder(&id("zz"), &id("a")),
            Err(StoreError::InvalidReference(id("zz")))
        );
        assert_eq!(
            l.reorder(&id("a"), &id("zz")),
            Err(StoreError::InvalidReference(id("zz")))
        );
        assert_eq!(order(&l), vec!["a", "b"]);
    }

    #[test]
    fn reorder_keeps_selection() {
        let mut l = list(&["a", "b", "c"]);
        l.toggle(&id("c")).unwrap();
        l.reorder(&id("c"), &id("a")).unwrap();
        assert!(l.is_selected(&id("c")));
        assert_eq!(l.selected_count(), 1);
    }

    #[test]
    fn toggle_twice_restores_empty_selection() {
        let mut l = list(&["a", "b"]);
        l.toggle(&id("a")).unwrap();
        assert!(l.is_selected(&id("a")));
        l.toggle(&id("a")).unwrap();
        assert_eq!(l.selected_count(), 0);
    }

    #[test]
    fn toggle_unknown_id_errors() {
        let mut l = list(&["a"]);
        assert_eq!(
            l.toggle(&id("b")),
            Err(StoreError::InvalidReference(id("b")))
        );
        assert_eq!(l.selected_count(), 0);
    }

    #[test]
    fn all_selected_tracks_every_mutation() {
        let mut l = list(&["a", "b"]);
        assert!(!l.all_selected());
        l.toggle(&id("a")).unwrap();
        assert!(!l.all_selected());
        l.toggle(&id("b")).unwrap();
        assert!(l.all_selected());
        l.toggle(&id("a")).unwrap();
        assert!(!l.all_selected());
        l.set_all(true);
        assert!(l.all_selected());
        assert_eq!(l.selected_count(), 2);
        l.set_all(false);
        assert!(!l.all_selected());
        assert_eq!(l.selected_count(), 0);
    }

    #[test]
    fn replace_clears_selection() {
        let mut l = list(&["a", "b"]);
        l.set_all(true);
        l.replace(vec![item("a"), item("c")]).unwrap();
        assert_eq!(l.selected_count(), 0);
        assert!(!l.all_selected());
        assert_eq!(order(&l), vec!["a", "c"]);
    }

    #[test]
    fn replace_with_duplicates_is_rejected() {
        let mut l = list(&["x"]);
        l.set_all(true);
        let err = l.replace(vec![item("a"), item("a")]).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(id("a")));
        assert_eq!(order(&l), vec!["x"]);
        assert!(l.all_selected());
    }

    #[test]
    fn empty_list_never_reports_all_selected() {
        let mut l = list(&[]);
        l.set_all(true);
        assert!(!l.all_selected());
        assert_eq!(l.selected_count(), 0);
    }

    #[test]
    fn selected_in_order_follows_list_not_selection() {
        let mut l = list(&["a", "b", "c"]);
        l.toggle(&id("c")).unwrap();
        l.toggle(&id("a")).unwrap();
        let selected: Vec<_> = l.selected_in_order().map(|i| i.id.as_str()).collect();
        assert_eq!(selected, vec!["a", "c"]);

        l.reorder(&id("c"), &id("a")).unwrap();
        let selected: Vec<_> = l.selected_in_order().map(|i| i.id.as_str()).collect();
        assert_eq!(selected, vec!["c", "a"]);
    }
}
