//! The catalog of selectable tags.
//!
//! Merges the remote controlled vocabulary with the local display
//! configuration. The vocabulary is loaded once per session (reloadable),
//! replaced wholesale on every attempt: a failed load leaves an empty
//! catalog and an error state, never stale data from a previous attempt.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::client::RemoteRecordClient;
use crate::config::DisplayConfig;

use super::{display::to_display_tag, DisplayTag, TagDefinition};

#[derive(Default)]
struct CatalogState {
	/// Snapshot of the last successful fetch. Swapped as a whole, never
	/// mutated in place, so concurrent readers keep a consistent view.
	definitions: Arc<Vec<TagDefinition>>,
	loading: bool,
	error: Option<String>,
}

/// Owns the known tag definitions and prepares the vocabulary the
/// selection operates over. Performs no specimen filtering itself.
pub struct TagCatalog {
	client: Arc<dyn RemoteRecordClient>,
	config: DisplayConfig,
	state: RwLock<CatalogState>,
}

impl TagCatalog {
	pub fn new(client: Arc<dyn RemoteRecordClient>, config: DisplayConfig) -> Self {
		Self {
			client,
			config,
			state: RwLock::new(CatalogState::default()),
		}
	}

	/// Fetch the vocabulary and replace the catalog with the result.
	///
	/// On failure the catalog is cleared and the error recorded; retry by
	/// calling `load` again. Returns the available catalog either way.
	pub async fn load(&self) -> Vec<DisplayTag> {
		{
			let mut state = self.state.write().await;
			state.loading = true;
			state.error = None;
		}

		let result = self.client.fetch_vocabulary().await;

		{
			let mut state = self.state.write().await;
			state.loading = false;
			match result {
				Ok(definitions) => {
					info!(count = definitions.len(), "loaded tag vocabulary");
					state.definitions = Arc::new(definitions);
				}
				Err(e) => {
					error!("failed to load tag vocabulary: {e}");
					state.definitions = Arc::new(Vec::new());
					state.error = Some(e.to_string());
				}
			}
		}

		self.available().await
	}

	/// The catalog shaped for presentation: every tag whose configuration
	/// says visible, plus every unconfigured tag (hidden only when
	/// explicitly configured so).
	pub async fn available(&self) -> Vec<DisplayTag> {
		let definitions = self.state.read().await.definitions.clone();

		definitions
			.iter()
			.filter(|definition| {
				self.config
					.get(&definition.name)
					.map_or(true, |entry| entry.visible)
			})
			.map(|definition| to_display_tag(definition, self.config.get(&definition.name)))
			.collect()
	}

	/// Raw definitions from the last successful fetch.
	pub async fn definitions(&self) -> Arc<Vec<TagDefinition>> {
		self.state.read().await.definitions.clone()
	}

	pub async fn is_loading(&self) -> bool {
		self.state.read().await.loading
	}

	/// The error recorded by the last failed load, if the catalog is in an
	/// error state.
	pub async fn error(&self) -> Option<String> {
		self.state.read().await.error.clone()
	}

	pub fn config(&self) -> &DisplayConfig {
		&self.config
	}
}
