//! reqwest-backed implementation of the remote record client.
//!
//! Endpoint shapes follow the TaxonWorks JSON API: keywords come from the
//! controlled-vocabulary listing, specimen pages from the Darwin Core
//! inventory (paging metadata in response headers), and tag associations
//! from the tags listing filtered by collection-object ids.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use tracing::debug;

use crate::tag::{JoinKey, TagAssociation, TagDefinition};

use super::{
	error::{ClientError, Result},
	PagingOptions, RemoteRecordClient, ScopeId, SpecimenPage, SpecimenRecord,
};

/// Maximum join keys per association request. Larger batches are split
/// into sequential requests and the results concatenated, so one specimen
/// page can never push the query string past practical URL-length limits.
const ASSOCIATION_KEY_CHUNK: usize = 200;

const TOTAL_HEADER: &str = "pagination-total";
const PER_PAGE_HEADER: &str = "pagination-per-page";
const PAGE_HEADER: &str = "pagination-page";

/// Remote record client over the service's HTTP API.
pub struct HttpRecordClient {
	http: reqwest::Client,
	base_url: String,
	project_token: Option<String>,
}

impl HttpRecordClient {
	/// Build a client for the given API base URL, e.g.
	/// `https://example.org/api/v1`.
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		let base_url = base_url.into();
		if reqwest::Url::parse(&base_url).is_err() {
			return Err(ClientError::InvalidBaseUrl(base_url));
		}

		Ok(Self {
			http: reqwest::Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
			project_token: None,
		})
	}

	/// Scope every request to a project via its access token.
	pub fn with_project_token(mut self, token: impl Into<String>) -> Self {
		self.project_token = Some(token.into());
		self
	}

	/// Reuse an existing `reqwest::Client` (connection pool, timeouts).
	pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
		self.http = http;
		self
	}

	async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
		let mut request = self
			.http
			.get(format!("{}{}", self.base_url, path))
			.query(query);
		if let Some(token) = &self.project_token {
			request = request.query(&[("project_token", token.as_str())]);
		}

		let response = request.send().await?;
		if !response.status().is_success() {
			return Err(ClientError::Status(response.status()));
		}
		Ok(response)
	}

	async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
		let body = response.bytes().await?;
		Ok(serde_json::from_slice(&body)?)
	}
}

fn header_number<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
	headers.get(name)?.to_str().ok()?.parse().ok()
}

#[async_trait]
impl RemoteRecordClient for HttpRecordClient {
	async fn fetch_vocabulary(&self) -> Result<Vec<TagDefinition>> {
		let response = self
			.get(
				"/controlled_vocabulary_terms",
				&[("type", "Keyword".to_string())],
			)
			.await?;
		Self::decode(response).await
	}

	async fn fetch_specimens(
		&self,
		scope_id: ScopeId,
		paging: &PagingOptions,
	) -> Result<SpecimenPage> {
		let path = format!("/otus/{scope_id}/inventory/dwc.json");
		let response = self.get(&path, &paging.query_pairs()).await?;

		let headers = response.headers();
		let total = header_number(headers, TOTAL_HEADER);
		let per_page = header_number(headers, PER_PAGE_HEADER);
		let page = header_number(headers, PAGE_HEADER);

		let specimens: Vec<SpecimenRecord> = Self::decode(response).await?;
		debug!(scope_id, count = specimens.len(), "fetched specimen page");

		Ok(SpecimenPage {
			specimens,
			total,
			per_page,
			page,
		})
	}

	async fn fetch_tag_associations(
		&self,
		join_keys: &[JoinKey],
	) -> Result<Vec<TagAssociation>> {
		let chunks = join_keys.chunks(ASSOCIATION_KEY_CHUNK);
		if chunks.len() > 1 {
			debug!(
				keys = join_keys.len(),
				requests = chunks.len(),
				"splitting association fetch"
			);
		}

		let mut associations = Vec::new();
		for chunk in chunks {
			let mut query: Vec<(&str, String)> =
				vec![("tag_object_type", "CollectionObject".to_string())];
			query.extend(chunk.iter().map(|key| ("tag_object_id[]", key.to_string())));

			let response = self.get("/tags", &query).await?;
			let mut batch: Vec<TagAssociation> = Self::decode(response).await?;
			associations.append(&mut batch);
		}

		Ok(associations)
	}
}
