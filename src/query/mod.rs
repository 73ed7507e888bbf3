//! The filtering engine: two-step fetch-then-join.
//!
//! The specimen listing endpoint accepts no tag filter, so the engine
//! fetches the page, fetches the tag associations for exactly those
//! specimens, and joins client-side. To the caller the result looks as if
//! the service filtered natively.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::{PagingOptions, RemoteRecordClient, Result, ScopeId, SpecimenPage};
use crate::tag::{JoinKey, SelectionSet};

pub mod join;

pub use join::filter_by_selection;

/// Orchestrates the two fetches and the join for one query. Stateless
/// between queries: specimens and associations are fetched fresh every
/// time, never cached across pagination boundaries.
pub struct FilterEngine {
	client: Arc<dyn RemoteRecordClient>,
}

impl FilterEngine {
	pub fn new(client: Arc<dyn RemoteRecordClient>) -> Self {
		Self { client }
	}

	/// Fetch a specimen page and apply the selection as a tag filter.
	///
	/// At most two sequential remote calls. The page fetch always happens,
	/// so paging metadata is faithfully preserved; the association fetch
	/// is skipped when the selection is empty, the page has no specimens,
	/// or no specimen carries a join key.
	///
	/// The returned envelope keeps the metadata from the unfiltered fetch:
	/// after filtering removes records, `total`/`per_page`/`page` still
	/// describe the pre-filter listing. Recomputing filtered totals would
	/// take a scan of the whole scope, which this engine deliberately does
	/// not do.
	///
	/// If the association fetch fails, the engine fails open: the error is
	/// logged and the unfiltered page returned. Losing the facet filter is
	/// degraded service, not a fatal failure.
	pub async fn query(
		&self,
		scope_id: ScopeId,
		paging: &PagingOptions,
		selection: &SelectionSet,
	) -> Result<SpecimenPage> {
		let page = self.client.fetch_specimens(scope_id, paging).await?;

		if selection.is_empty() {
			return Ok(page);
		}
		if page.specimens.is_empty() {
			return Ok(page);
		}

		let join_keys: Vec<JoinKey> = page
			.specimens
			.iter()
			.filter_map(|specimen| specimen.dwc_occurrence_object_id)
			.collect();
		if join_keys.is_empty() {
			return Ok(page);
		}

		match self.client.fetch_tag_associations(&join_keys).await {
			Ok(associations) => {
				let mut page = page;
				let before = page.specimens.len();
				page.specimens =
					filter_by_selection(page.specimens, &associations, selection);
				debug!(
					scope_id,
					before,
					after = page.specimens.len(),
					"filtered specimen page by tags"
				);
				Ok(page)
			}
			Err(e) => {
				warn!("tag association fetch failed, returning unfiltered page: {e}");
				Ok(page)
			}
		}
	}
}
