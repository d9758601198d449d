//! Read/edit toggle over a list of records, one editable item at a time.
//!
//! The authoritative list comes from the last comparison fetch. A draft is a
//! clone of one item; edits touch only the draft until the save succeeds and
//! the list is re-synced from a refresh.

/// Editor state for one list (work experiences or cover-letter paragraphs).
#[derive(Debug, Clone)]
pub struct ListEditor<T> {
    original: Vec<T>,
    editing: Option<usize>,
    draft: Option<T>,
}

impl<T> Default for ListEditor<T> {
    fn default() -> Self {
        Self {
            original: Vec::new(),
            editing: None,
            draft: None,
        }
    }
}

impl<T: Clone + PartialEq> ListEditor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            original: items,
            ..Self::default()
        }
    }

    /// Replaces the authoritative list. An open edit stays open with its draft
    /// re-cloned from the new list, and closes if its index no longer exists.
    pub fn sync(&mut self, items: Vec<T>) {
        self.original = items;
        self.draft = self.editing.and_then(|i| self.original.get(i).cloned());
        if self.draft.is_none() {
            self.editing = None;
        }
    }

    /// Replaces the list and closes any open edit.
    pub fn reset(&mut self, items: Vec<T>) {
        self.original = items;
        self.cancel();
    }

    pub fn items(&self) -> &[T] {
        &self.original
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Opens `index` for editing, discarding any other draft.
    /// Returns `false` if the index is out of range.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        match self.original.get(index) {
            Some(item) => {
                self.draft = Some(item.clone());
                self.editing = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut T> {
        self.draft.as_mut()
    }

    /// Discards the draft. The list is left exactly as fetched.
    pub fn cancel(&mut self) {
        self.editing = None;
        self.draft = None;
    }

    /// The record to send on save: the draft of the item being edited.
    pub fn edited(&self) -> Option<(usize, &T)> {
        Some((self.editing?, self.draft.as_ref()?))
    }

    pub fn is_dirty(&self) -> bool {
        match self.edited() {
            Some((index, draft)) => self.original.get(index) != Some(draft),
            None => false,
        }
    }

    /// Closes the editor after a successful save. The caller re-syncs from the refresh.
    pub fn finish_save(&mut self) -> Option<T> {
        self.editing = None;
        self.draft.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_touches_only_draft() {
        let mut editor = ListEditor::new(vec!["first".to_string(), "second".to_string()]);
        assert!(editor.begin_edit(1));
        editor.draft_mut().unwrap().push_str(" (edited)");

        assert_eq!(editor.items(), ["first", "second"]);
        assert_eq!(editor.edited(), Some((1, &"second (edited)".to_string())));
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_cancel_restores_original() {
        let mut editor = ListEditor::new(vec![1, 2, 3]);
        editor.begin_edit(0);
        *editor.draft_mut().unwrap() = 42;
        editor.cancel();

        assert_eq!(editor.items(), [1, 2, 3]);
        assert!(editor.edited().is_none());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_single_item_editable() {
        let mut editor = ListEditor::new(vec![1, 2]);
        editor.begin_edit(0);
        *editor.draft_mut().unwrap() = 10;
        editor.begin_edit(1);

        assert_eq!(editor.editing(), Some(1));
        assert_eq!(editor.draft(), Some(&2));
        assert!(!editor.begin_edit(5));
    }

    #[test]
    fn test_sync_recloning_keeps_open_edit() {
        let mut editor = ListEditor::new(vec![1, 2]);
        editor.begin_edit(1);
        *editor.draft_mut().unwrap() = 20;
        editor.sync(vec![7, 8]);
        assert_eq!(editor.editing(), Some(1));
        assert_eq!(editor.draft(), Some(&8));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_sync_closes_edit_of_missing_item() {
        let mut editor = ListEditor::new(vec![1, 2]);
        editor.begin_edit(1);
        editor.sync(vec![7]);
        assert!(editor.editing().is_none());
        assert!(editor.draft().is_none());

        editor.begin_edit(0);
        editor.reset(vec![3, 4]);
        assert!(editor.editing().is_none());
        assert_eq!(editor.items(), [3, 4]);
    }
}
