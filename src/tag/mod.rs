//! Tag domain types shared across the catalog, selection, and filtering.

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod display;
pub mod selection;

pub use catalog::TagCatalog;
pub use display::to_display_tag;
pub use selection::{SelectionSet, SelectionState};

/// Identifier of a controlled-vocabulary keyword on the remote service.
pub type KeywordId = i64;

/// Identifier linking a specimen record to its tag associations.
///
/// This is the specimen's source collection-object id, the only field of a
/// specimen record the filtering engine ever interprets.
pub type JoinKey = i64;

/// A controlled-vocabulary term as returned by the remote service.
///
/// Immutable once fetched for a session; the catalog replaces its whole
/// set of definitions on every reload rather than merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDefinition {
	pub id: KeywordId,
	/// Canonical name, used as the key into the display configuration.
	pub name: String,
	#[serde(default)]
	pub definition: String,
	#[serde(default)]
	pub css_color: Option<String>,
}

/// A fact linking one specimen to one keyword. Many-to-many in aggregate.
///
/// Field names follow the remote service's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAssociation {
	pub tag_object_id: JoinKey,
	pub keyword_id: KeywordId,
}

/// A catalog entry shaped for presentation: the remote definition merged
/// with the local display configuration.
///
/// Derived on demand by [`to_display_tag`], never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTag {
	pub id: KeywordId,
	/// Display name; the configured override when present, otherwise the
	/// canonical name.
	pub name: String,
	/// Comes only from local configuration; the remote service does not
	/// supply one.
	pub description: Option<String>,
	pub definition: String,
	pub category: String,
	pub canonical_name: String,
	pub css_color: Option<String>,
}
