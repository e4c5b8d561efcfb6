// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Query and result types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A search query that is known to be non-blank and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
	/// Trims `raw`; returns `None` when nothing is left.
	pub fn parse(raw: &str) -> Option<Self> {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			None
		} else {
			Some(Self(trimmed.to_string()))
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Length in characters. Logged instead of the query text itself.
	pub fn char_count(&self) -> usize {
		self.0.chars().count()
	}
}

impl AsRef<str> for SearchQuery {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Row identifier. Backends return either integer or text keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionId {
	Number(i64),
	Text(String),
}

impl fmt::Display for SectionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SectionId::Number(n) => write!(f, "{n}"),
			SectionId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for SectionId {
	fn from(value: i64) -> Self {
		SectionId::Number(value)
	}
}

/// One statute section returned by `search_legal_sections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalSection {
	pub id: SectionId,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub section_number: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub description: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub punishment: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_trims_and_rejects_blank() {
		assert_eq!(SearchQuery::parse("  theft \n").unwrap().as_str(), "theft");
		assert!(SearchQuery::parse("").is_none());
		assert!(SearchQuery::parse(" \t\n ").is_none());
	}

	#[test]
	fn char_count_counts_characters_not_bytes() {
		let query = SearchQuery::parse("धारा 302").unwrap();
		assert_eq!(query.char_count(), 8);
	}

	#[test]
	fn section_decodes_numeric_id() {
		let json = r#"{
			"id": 1,
			"section_number": "379",
			"title": "Theft",
			"description": "Whoever intends to take dishonestly...",
			"punishment": "up to 3 years"
		}"#;
		let section: LegalSection = serde_json::from_str(json).unwrap();
		assert_eq!(section.id, SectionId::Number(1));
		assert_eq!(section.section_number, "379");
		assert_eq!(section.punishment, "up to 3 years");
	}

	#[test]
	fn section_decodes_text_id_and_null_fields() {
		let json = r#"{
			"id": "5b0c7c1e-1f0e-4d0a-9a53-9d0b4c4b2f11",
			"section_number": "302",
			"title": "Murder",
			"description": null
		}"#;
		let section: LegalSection = serde_json::from_str(json).unwrap();
		assert_eq!(
			section.id,
			SectionId::Text("5b0c7c1e-1f0e-4d0a-9a53-9d0b4c4b2f11".to_string())
		);
		assert_eq!(section.description, "");
		assert_eq!(section.punishment, "");
	}

	#[test]
	fn section_id_display() {
		assert_eq!(SectionId::Number(42).to_string(), "42");
		assert_eq!(SectionId::Text("abc".into()).to_string(), "abc");
	}
}
