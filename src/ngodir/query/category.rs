//! Coarse categories mapped onto underlying tags.
//!
//! A category such as "housing" does not exist on records. It is resolved
//! through a [`CategoryTable`] into keyword lists that are matched against a
//! record's service tags (substring) and focus-group tags (equality).

use crate::model::Record;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Keywords a category resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,

    /// Matched case-insensitively as substrings of service tags.
    #[serde(default)]
    pub services: Vec<String>,

    /// Matched case-insensitively against whole focus-group tags.
    #[serde(default)]
    pub focus_groups: Vec<String>,
}

impl CategoryRule {
    pub fn services(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            services: keywords.iter().map(|k| k.to_string()).collect(),
            focus_groups: Vec::new(),
        }
    }

    pub fn focus_groups(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            services: Vec::new(),
            focus_groups: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        let service_hit = record.services.iter().any(|service| {
            let service = service.to_lowercase();
            self.services
                .iter()
                .any(|keyword| service.contains(&keyword.to_lowercase()))
        });
        if service_hit {
            return true;
        }

        record.focus_groups.iter().any(|group| {
            self.focus_groups
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(group))
        })
    }
}

/// Ordered lookup table from category name to rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

static DEFAULT_TABLE: Lazy<CategoryTable> = Lazy::new(|| {
    CategoryTable::new(vec![
        CategoryRule::services("housing", &["shelter", "housing"]),
        CategoryRule::services("healthcare", &["healthcare", "health"]),
        CategoryRule::services("legal", &["legal"]),
        CategoryRule::focus_groups("women", &["women"]),
        CategoryRule::focus_groups("transgender", &["transgender"]),
    ])
});

impl Default for CategoryTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn get(&self, name: &str) -> Option<&CategoryRule> {
        let name = name.trim();
        self.rules
            .iter()
            .find(|rule| rule.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
