//! Adapter from remote tag definitions to the presentation shape.

use crate::config::TagDisplayEntry;

use super::{DisplayTag, TagDefinition};

/// Merge a remote tag definition with its display configuration, when any.
///
/// The configured name overrides the canonical one, the description comes
/// only from configuration, and the category defaults to "general" for
/// unconfigured tags. Pure and stateless; visibility is decided by the
/// catalog, not here.
pub fn to_display_tag(definition: &TagDefinition, entry: Option<&TagDisplayEntry>) -> DisplayTag {
	DisplayTag {
		id: definition.id,
		name: entry
			.and_then(|e| e.name.clone())
			.unwrap_or_else(|| definition.name.clone()),
		description: entry.and_then(|e| e.description.clone()),
		definition: definition.definition.clone(),
		category: entry
			.map(|e| e.category.clone())
			.unwrap_or_else(|| "general".to_string()),
		canonical_name: definition.name.clone(),
		css_color: definition.css_color.clone(),
	}
}
