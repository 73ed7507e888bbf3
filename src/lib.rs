//! specimen-core
//!
//! Tag-join filtering for paginated specimen inventories. The upstream
//! service exposes specimen listing and tag association as two independent
//! endpoints with no server-side join; this crate maintains the tag
//! catalog (remote vocabulary overlaid with local display configuration),
//! tracks the user's tag selection, and runs a two-step fetch-then-join so
//! the caller sees a natively-filtered result set.

pub mod client;
pub mod config;
pub mod query;
pub mod tag;

pub use client::{
	ClientError, HttpRecordClient, PagingOptions, RemoteRecordClient, ScopeId, SpecimenPage,
	SpecimenRecord,
};
pub use config::{ConfigError, DisplayConfig, TagDisplayEntry};
pub use query::FilterEngine;
pub use tag::{
	DisplayTag, JoinKey, KeywordId, SelectionSet, SelectionState, TagAssociation, TagCatalog,
	TagDefinition,
};

use std::sync::Arc;

use tokio::sync::RwLock;

/// One session of tag-filtered specimen browsing: the catalog, the user's
/// selection, and the filtering engine behind a single handle.
///
/// Selection mutation is single-writer by construction (driven by the
/// embedding UI); concurrent readers always see a consistent snapshot.
/// Overlapping `filtered_specimens` calls are neither deduplicated nor
/// canceled — a caller that can issue them must serialize or discard stale
/// results itself.
pub struct SpecimenTagSession {
	catalog: TagCatalog,
	selection: RwLock<SelectionState>,
	engine: FilterEngine,
}

impl SpecimenTagSession {
	pub fn new(client: Arc<dyn RemoteRecordClient>, config: DisplayConfig) -> Self {
		Self {
			catalog: TagCatalog::new(client.clone(), config),
			selection: RwLock::new(SelectionState::new()),
			engine: FilterEngine::new(client),
		}
	}

	/// Fetch the tag vocabulary; see [`TagCatalog::load`].
	pub async fn load_tags(&self) -> Vec<DisplayTag> {
		self.catalog.load().await
	}

	/// The catalog shaped for presentation.
	pub async fn available_tags(&self) -> Vec<DisplayTag> {
		self.catalog.available().await
	}

	pub async fn is_loading_tags(&self) -> bool {
		self.catalog.is_loading().await
	}

	pub async fn tags_error(&self) -> Option<String> {
		self.catalog.error().await
	}

	/// Replace the tag selection wholesale.
	pub async fn set_selected_tags(&self, ids: impl IntoIterator<Item = KeywordId>) {
		self.selection.write().await.select(ids);
	}

	pub async fn clear_selected_tags(&self) {
		self.selection.write().await.clear();
	}

	pub async fn selected_tags(&self) -> SelectionSet {
		self.selection.read().await.current()
	}

	/// Fetch one specimen page with the current selection applied as a
	/// filter; see [`FilterEngine::query`].
	pub async fn filtered_specimens(
		&self,
		scope_id: ScopeId,
		paging: &PagingOptions,
	) -> client::Result<SpecimenPage> {
		let selection = self.selected_tags().await;
		self.engine.query(scope_id, paging, &selection).await
	}

	pub fn catalog(&self) -> &TagCatalog {
		&self.catalog
	}
}
