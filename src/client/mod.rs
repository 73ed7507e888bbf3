//! The remote record client seam.
//!
//! The core consumes three logical operations from the remote service:
//! the controlled vocabulary, a page of specimen records, and the tag
//! associations for a batch of specimens. Transport, auth, and retry are
//! the client implementation's concern, not the core's.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::tag::{JoinKey, TagAssociation, TagDefinition};

pub mod error;
pub mod http;

pub use error::{ClientError, Result};
pub use http::HttpRecordClient;

/// Identifier of the taxon scope a specimen listing is fetched for.
pub type ScopeId = i64;

/// Paging options for the specimen listing. Absent options mean "service
/// default paging".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingOptions {
	/// Number of items per page.
	pub per: Option<u32>,
	/// 1-based page index.
	pub page: Option<u32>,
}

impl PagingOptions {
	pub fn new(per: u32, page: u32) -> Self {
		Self {
			per: Some(per),
			page: Some(page),
		}
	}

	/// Query parameters for the listing request, skipping absent options.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		[
			("per", self.per.map(|per| per.to_string())),
			("page", self.page.map(|page| page.to_string())),
		]
		.into_iter()
		.filter_map(|(key, value)| value.map(|value| (key, value)))
		.collect()
	}
}

/// An opaque specimen record from the remote inventory.
///
/// The only field the engine interprets is the join key; everything else
/// passes through untouched in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecimenRecord {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dwc_occurrence_object_id: Option<JoinKey>,
	#[serde(flatten)]
	pub fields: serde_json::Map<String, serde_json::Value>,
}

/// The envelope of a paged specimen fetch: the records plus the paging
/// metadata the service reported for the *unfiltered* listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecimenPage {
	pub specimens: Vec<SpecimenRecord>,
	pub total: Option<u64>,
	pub per_page: Option<u32>,
	pub page: Option<u32>,
}

/// The three operations the filtering core requires from the remote
/// service.
#[async_trait]
pub trait RemoteRecordClient: Send + Sync {
	/// Fetch the controlled-vocabulary keyword listing. Unpaged.
	async fn fetch_vocabulary(&self) -> Result<Vec<TagDefinition>>;

	/// Fetch one page of specimen records for a taxon scope.
	async fn fetch_specimens(
		&self,
		scope_id: ScopeId,
		paging: &PagingOptions,
	) -> Result<SpecimenPage>;

	/// Fetch the tag associations for a batch of specimens, identified by
	/// their join keys. Must support at least the batch sizes produced by
	/// one specimen page.
	async fn fetch_tag_associations(&self, join_keys: &[JoinKey])
		-> Result<Vec<TagAssociation>>;
}
