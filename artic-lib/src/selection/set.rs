//! Selection set keyed by artwork identifier.

use std::collections::HashSet;
use std::collections::hash_set;

use crate::model::Artwork;
use crate::model::ArtworkId;

/// Every artwork selected so far, on any page.
///
/// The set may hold identifiers that are not on the page currently shown.
/// Which rows of a page are selected is always derived with
/// [`selected_on`](Self::selected_on) rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ArtworkId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an identifier. Returns `true` if it was not selected before.
    pub fn insert(&mut self, id: ArtworkId) -> bool {
        self.ids.insert(id)
    }

    /// Removes an identifier. Returns `true` if it was selected.
    pub fn remove(&mut self, id: ArtworkId) -> bool {
        self.ids.remove(&id)
    }

    /// Returns `true` if the identifier is selected.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the number of selected identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Iterates over the selected identifiers in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, ArtworkId> {
        self.ids.iter()
    }

    /// Returns the records of a page that are selected, in page order.
    pub fn selected_on<'a>(&self, records: &'a [Artwork]) -> Vec<&'a Artwork> {
        records.iter().filter(|r| self.contains(r.id)).collect()
    }

    /// Applies the selection state reported for one page.
    ///
    /// Every id in `selected` is added; every id of `page_ids` that is not in
    /// `selected` is removed. Identifiers of other pages are left alone.
    pub fn reconcile_page<P, S>(&mut self, page_ids: P, selected: S)
    where
        P: IntoIterator<Item = ArtworkId>,
        S: IntoIterator<Item = ArtworkId>,
    {
        let selected: HashSet<ArtworkId> = selected.into_iter().collect();
        for id in &selected {
            self.ids.insert(*id);
        }
        for id in page_ids {
            if !selected.contains(&id) {
                self.ids.remove(&id);
            }
        }
    }
}

impl FromIterator<ArtworkId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ArtworkId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<ArtworkId> for SelectionSet {
    fn extend<I: IntoIterator<Item = ArtworkId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a ArtworkId;
    type IntoIter = hash_set::Iter<'a, ArtworkId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ArtworkId> {
        raw.iter().copied().map(ArtworkId).collect()
    }

    #[test]
    fn test_reconcile_adds_and_removes_only_page_ids() {
        let mut selection: SelectionSet = ids(&[1, 2, 10, 11]).into_iter().collect();

        // Page shows 1..=4; user now has 2 and 3 checked.
        selection.reconcile_page(ids(&[1, 2, 3, 4]), ids(&[2, 3]));

        let mut result: Vec<_> = selection.iter().copied().collect();
        result.sort();
        assert_eq!(result, ids(&[2, 3, 10, 11]));
    }

    #[test]
    fn test_reconcile_deselect_all_on_page() {
        let mut selection: SelectionSet = ids(&[1, 2, 7]).into_iter().collect();
        selection.reconcile_page(ids(&[1, 2, 3]), Vec::new());

        assert!(!selection.contains(ArtworkId(1)));
        assert!(!selection.contains(ArtworkId(2)));
        assert!(selection.contains(ArtworkId(7)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_selected_on_keeps_page_order() {
        let records: Vec<Artwork> = [5, 3, 9, 1].into_iter().map(Artwork::new).collect();
        let selection: SelectionSet = ids(&[1, 5, 42]).into_iter().collect();

        let selected: Vec<_> = selection.selected_on(&records).iter().map(|r| r.id).collect();
        assert_eq!(selected, ids(&[5, 1]));
    }

    #[test]
    fn test_clear() {
        let mut selection: SelectionSet = ids(&[1, 2, 3]).into_iter().collect();
        selection.clear();
        assert!(selection.is_empty());
    }
}
