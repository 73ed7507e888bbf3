//! Display configuration for specimen tags.
//!
//! The overlay table provides UI enhancements for tags defined on the
//! remote service, keyed by the tag's canonical name. It is loaded once at
//! startup and immutable afterwards. Tags with no entry here default to
//! visible, category "general", and their canonical name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors from loading a display configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("invalid config file: {0}")]
	Parse(#[from] toml::de::Error),
}

/// One row of the overlay table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDisplayEntry {
	/// Display name override; the canonical name is used when absent.
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default = "default_category")]
	pub category: String,
	#[serde(default = "default_visible")]
	pub visible: bool,
}

fn default_category() -> String {
	"general".to_string()
}

fn default_visible() -> bool {
	true
}

/// Immutable lookup table of display entries keyed by canonical tag name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayConfig {
	entries: HashMap<String, TagDisplayEntry>,
}

impl DisplayConfig {
	/// The configuration shipped with the crate, usable without any file.
	pub fn builtin() -> Self {
		fn entry(
			name: &str,
			description: &str,
			category: &str,
			visible: bool,
		) -> TagDisplayEntry {
			TagDisplayEntry {
				name: Some(name.to_string()),
				description: Some(description.to_string()),
				category: category.to_string(),
				visible,
			}
		}

		let entries = HashMap::from([
			// Current tags in the system
			(
				"Lot".to_string(),
				entry("Lot", "Lot of specimens not georeferenced", "collection", true),
			),
			(
				"Sex".to_string(),
				entry("Sex", "Sex determination tag", "biological", true),
			),
			// Tags for educational use
			(
				"education-suitable".to_string(),
				entry(
					"Education Suitable",
					"Secondary specimens suitable for classroom use",
					"loan",
					true,
				),
			),
			(
				"education-loan".to_string(),
				entry(
					"Education Loan",
					"Available for educational borrowing",
					"loan",
					true,
				),
			),
			// Identification status
			(
				"needs-identification".to_string(),
				entry(
					"Needs Identification",
					"Specimens requiring expert identification",
					"identification",
					true,
				),
			),
			(
				"family-only".to_string(),
				entry(
					"Family Only",
					"Identified to family level only",
					"identification",
					true,
				),
			),
			(
				"order-only".to_string(),
				entry(
					"Order Only",
					"Identified to order level only",
					"identification",
					true,
				),
			),
			(
				"genus-only".to_string(),
				entry(
					"Genus Only",
					"Identified to genus level only",
					"identification",
					true,
				),
			),
			// Condition
			(
				"good-condition".to_string(),
				entry(
					"Good Condition",
					"Specimen in good physical condition",
					"condition",
					true,
				),
			),
			(
				"damaged".to_string(),
				entry("Damaged", "Specimen has some damage", "condition", true),
			),
			(
				"fragile".to_string(),
				entry("Fragile", "Requires careful handling", "condition", true),
			),
			// Research
			(
				"type-specimen".to_string(),
				entry(
					"Type Specimen",
					"Type material - restricted access",
					"research",
					true,
				),
			),
			(
				"research-priority".to_string(),
				entry("Research Priority", "High priority for research", "research", true),
			),
			(
				"dna-suitable".to_string(),
				entry("DNA Suitable", "Suitable for molecular work", "research", true),
			),
			// Administrative tags (hidden from public)
			(
				"internal-review".to_string(),
				entry("Internal Review", "Needs internal review", "admin", false),
			),
			(
				"restricted".to_string(),
				entry("Restricted", "Restricted access", "admin", false),
			),
		]);

		Self { entries }
	}

	/// Load the overlay table from a TOML file.
	///
	/// The file is a table of entries keyed by canonical tag name:
	///
	/// ```toml
	/// ["education-loan"]
	/// name = "Education Loan"
	/// description = "Available for educational borrowing"
	/// category = "loan"
	/// ```
	pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
		info!("Loading tag display config from {:?}", path);
		let text = fs::read_to_string(path)?;
		let config = toml::from_str(&text)?;
		Ok(config)
	}

	/// Load from a file if it exists, otherwise fall back to the built-in
	/// table.
	pub fn load_or_builtin(path: &Path) -> Result<Self, ConfigError> {
		if path.exists() {
			Self::load_from(path)
		} else {
			Ok(Self::builtin())
		}
	}

	pub fn from_entries(entries: HashMap<String, TagDisplayEntry>) -> Self {
		Self { entries }
	}

	/// Look up the entry for a canonical tag name.
	pub fn get(&self, canonical_name: &str) -> Option<&TagDisplayEntry> {
		self.entries.get(canonical_name)
	}

	/// Display name for a canonical tag name, falling back to the name
	/// itself when unconfigured.
	pub fn display_name_for<'a>(&'a self, canonical_name: &'a str) -> &'a str {
		self.get(canonical_name)
			.and_then(|entry| entry.name.as_deref())
			.unwrap_or(canonical_name)
	}

	/// Entries that are visible, with their canonical names.
	pub fn visible_entries(&self) -> impl Iterator<Item = (&str, &TagDisplayEntry)> {
		self.entries
			.iter()
			.filter(|(_, entry)| entry.visible)
			.map(|(name, entry)| (name.as_str(), entry))
	}

	/// Visible entries in a given category, with their canonical names.
	pub fn entries_in_category<'a>(
		&'a self,
		category: &'a str,
	) -> impl Iterator<Item = (&'a str, &'a TagDisplayEntry)> {
		self.visible_entries()
			.filter(move |(_, entry)| entry.category == category)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::io::Write;

	#[test]
	fn builtin_table_hides_admin_tags() {
		let config = DisplayConfig::builtin();

		assert!(!config.get("internal-review").unwrap().visible);
		assert!(!config.get("restricted").unwrap().visible);
		assert!(config.get("Lot").unwrap().visible);
	}

	#[test]
	fn display_name_falls_back_to_canonical() {
		let config = DisplayConfig::builtin();

		assert_eq!(config.display_name_for("education-loan"), "Education Loan");
		assert_eq!(config.display_name_for("no-such-tag"), "no-such-tag");
	}

	#[test]
	fn category_listing_excludes_hidden_and_other_categories() {
		let config = DisplayConfig::builtin();

		let loan: Vec<&str> = config.entries_in_category("loan").map(|(n, _)| n).collect();
		assert_eq!(loan.len(), 2);
		assert!(loan.contains(&"education-suitable"));
		assert!(loan.contains(&"education-loan"));

		// Admin entries are hidden, so the category lists as empty.
		assert_eq!(config.entries_in_category("admin").count(), 0);
	}

	#[test]
	fn missing_fields_take_defaults() {
		let parsed: TagDisplayEntry = toml::from_str(r#"name = "Bare""#).unwrap();

		assert_eq!(parsed.category, "general");
		assert!(parsed.visible);
		assert_eq!(parsed.description, None);
	}

	#[test]
	fn loads_table_from_toml_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
["field-trip-2024"]
name = "Field Trip 2024"
description = "Collected on the 2024 survey"
category = "collection"

["embargoed"]
visible = false
"#
		)
		.unwrap();

		let config = DisplayConfig::load_from(file.path()).unwrap();

		assert_eq!(config.len(), 2);
		assert_eq!(config.display_name_for("field-trip-2024"), "Field Trip 2024");
		assert!(!config.get("embargoed").unwrap().visible);
		// No name override configured, canonical name passes through.
		assert_eq!(config.display_name_for("embargoed"), "embargoed");
	}

	#[test]
	fn load_or_builtin_falls_back_when_file_is_absent() {
		let dir = tempfile::tempdir().unwrap();
		let config = DisplayConfig::load_or_builtin(&dir.path().join("tags.toml")).unwrap();

		assert_eq!(config, DisplayConfig::builtin());
	}
}
