//! The user's current tag selection.

use std::collections::HashSet;

use super::KeywordId;

/// The set of selected keyword ids. Empty means "no filter".
pub type SelectionSet = HashSet<KeywordId>;

/// Session-local selection state. Pure container: no validation against
/// the catalog happens here — an id unknown to the catalog is legal to
/// select and simply matches nothing during filtering.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
	selected: SelectionSet,
}

impl SelectionState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the selection wholesale. Selecting is not a union with the
	/// previous selection.
	pub fn select(&mut self, ids: impl IntoIterator<Item = KeywordId>) {
		self.selected = ids.into_iter().collect();
	}

	pub fn clear(&mut self) {
		self.selected.clear();
	}

	/// Snapshot of the current selection.
	pub fn current(&self) -> SelectionSet {
		self.selected.clone()
	}

	pub fn is_empty(&self) -> bool {
		self.selected.is_empty()
	}

	pub fn len(&self) -> usize {
		self.selected.len()
	}
}
