//! Shared test fixtures: a scriptable in-memory record client.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use specimen_core::{
	ClientError, JoinKey, KeywordId, PagingOptions, RemoteRecordClient, ScopeId, SpecimenPage,
	SpecimenRecord, TagAssociation, TagDefinition,
};

/// Route library logs through the test harness. Safe to call from every
/// test; only the first call installs the subscriber.
pub fn init_tracing() {
	use tracing_subscriber::EnvFilter;

	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// In-memory client serving fixed data, with per-endpoint failure toggles
/// and call counters.
#[derive(Default)]
pub struct MockRecordClient {
	pub keywords: Vec<TagDefinition>,
	pub page: SpecimenPage,
	pub associations: Vec<TagAssociation>,

	fail_vocabulary: AtomicBool,
	fail_associations: AtomicBool,

	pub vocabulary_calls: AtomicUsize,
	pub specimen_calls: AtomicUsize,
	pub association_calls: AtomicUsize,
}

impl MockRecordClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_keywords(mut self, keywords: Vec<TagDefinition>) -> Self {
		self.keywords = keywords;
		self
	}

	pub fn with_page(mut self, page: SpecimenPage) -> Self {
		self.page = page;
		self
	}

	pub fn with_associations(mut self, associations: Vec<TagAssociation>) -> Self {
		self.associations = associations;
		self
	}

	pub fn set_fail_vocabulary(&self, fail: bool) {
		self.fail_vocabulary.store(fail, Ordering::SeqCst);
	}

	pub fn set_fail_associations(&self, fail: bool) {
		self.fail_associations.store(fail, Ordering::SeqCst);
	}

	pub fn association_call_count(&self) -> usize {
		self.association_calls.load(Ordering::SeqCst)
	}

	pub fn specimen_call_count(&self) -> usize {
		self.specimen_calls.load(Ordering::SeqCst)
	}

	fn unavailable() -> ClientError {
		ClientError::Status(StatusCode::SERVICE_UNAVAILABLE)
	}
}

#[async_trait]
impl RemoteRecordClient for MockRecordClient {
	async fn fetch_vocabulary(&self) -> Result<Vec<TagDefinition>, ClientError> {
		self.vocabulary_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_vocabulary.load(Ordering::SeqCst) {
			return Err(Self::unavailable());
		}
		Ok(self.keywords.clone())
	}

	async fn fetch_specimens(
		&self,
		_scope_id: ScopeId,
		_paging: &PagingOptions,
	) -> Result<SpecimenPage, ClientError> {
		self.specimen_calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.page.clone())
	}

	async fn fetch_tag_associations(
		&self,
		join_keys: &[JoinKey],
	) -> Result<Vec<TagAssociation>, ClientError> {
		self.association_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_associations.load(Ordering::SeqCst) {
			return Err(Self::unavailable());
		}
		// Scoped to exactly the requested batch, like the real endpoint.
		Ok(self
			.associations
			.iter()
			.filter(|association| join_keys.contains(&association.tag_object_id))
			.copied()
			.collect())
	}
}

pub fn keyword(id: KeywordId, name: &str) -> TagDefinition {
	TagDefinition {
		id,
		name: name.to_string(),
		definition: format!("Keyword {name}"),
		css_color: None,
	}
}

pub fn specimen(join_key: Option<JoinKey>, scientific_name: &str) -> SpecimenRecord {
	let mut fields = serde_json::Map::new();
	fields.insert(
		"scientificName".to_string(),
		serde_json::Value::String(scientific_name.to_string()),
	);
	SpecimenRecord {
		dwc_occurrence_object_id: join_key,
		fields,
	}
}

pub fn association(join_key: JoinKey, keyword_id: KeywordId) -> TagAssociation {
	TagAssociation {
		tag_object_id: join_key,
		keyword_id,
	}
}

pub fn page_of(specimens: Vec<SpecimenRecord>) -> SpecimenPage {
	SpecimenPage {
		total: Some(specimens.len() as u64),
		per_page: Some(50),
		page: Some(1),
		specimens,
	}
}
