//! The client-side join of specimens against their tag associations.

use std::collections::{HashMap, HashSet};

use crate::client::SpecimenRecord;
use crate::tag::{JoinKey, KeywordId, SelectionSet, TagAssociation};

/// Keep the specimens carrying at least one selected tag.
///
/// Builds an index of observed tag ids per join key, then filters: a
/// specimen passes when the intersection of its tag set with the selection
/// is non-empty (any selected tag matches — selection is a union filter).
/// Specimens without a join key have no tag set and never pass.
pub fn filter_by_selection(
	specimens: Vec<SpecimenRecord>,
	associations: &[TagAssociation],
	selection: &SelectionSet,
) -> Vec<SpecimenRecord> {
	let mut tags_by_object: HashMap<JoinKey, HashSet<KeywordId>> = HashMap::new();
	for association in associations {
		tags_by_object
			.entry(association.tag_object_id)
			.or_default()
			.insert(association.keyword_id);
	}

	specimens
		.into_iter()
		.filter(|specimen| {
			specimen.dwc_occurrence_object_id.is_some_and(|key| {
				tags_by_object
					.get(&key)
					.is_some_and(|tags| !tags.is_disjoint(selection))
			})
		})
		.collect()
}
