//! Category mapping - user labels for the bank's merchant category codes

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of a user-supplied code to label table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMapping {
    pub source_code: String,
    /// Empty for rules that apply to every description
    #[serde(default)]
    pub source_description: String,
    pub target_label: String,
}

impl CategoryMapping {
    pub fn new(
        source_code: impl Into<String>,
        source_description: impl Into<String>,
        target_label: impl Into<String>,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            source_description: source_description.into(),
            target_label: target_label.into(),
        }
    }

    /// Lookup key: code and description concatenated with no delimiter
    pub fn key(&self) -> String {
        format!("{}{}", self.source_code, self.source_description)
    }
}

/// Lookup table from composite key to mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    entries: HashMap<String, CategoryMapping>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping, replacing any previous one with the same key
    pub fn insert(&mut self, mapping: CategoryMapping) {
        self.entries.insert(mapping.key(), mapping);
    }

    pub fn get(&self, key: &str) -> Option<&CategoryMapping> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryMapping> {
        self.entries.values()
    }

    /// Resolve a label: `code + description` first, then `code` alone.
    /// Case-sensitive.
    pub fn resolve(&self, code: &str, description: &str) -> Option<&str> {
        self.entries
            .get(&format!("{code}{description}"))
            .or_else(|| self.entries.get(code))
            .map(|m| m.target_label.as_str())
    }
}

impl FromIterator<CategoryMapping> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = CategoryMapping>>(iter: I) -> Self {
        let mut table = Self::new();
        for mapping in iter {
            table.insert(mapping);
        }
        table
    }
}

/// Resolve against an optional table; an absent table maps nothing
pub fn resolve_category<'a>(
    table: Option<&'a CategoryTable>,
    code: &str,
    description: &str,
) -> Option<&'a str> {
    table.and_then(|t| t.resolve(code, description))
}
