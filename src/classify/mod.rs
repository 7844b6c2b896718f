//! Tag-to-category classification.
//!
//! The rules live in a TOML table (builtin copy embedded at compile time,
//! replaceable at runtime via [`CategoryTable::from_path`]): one table per
//! recognized OSM tag key, mapping tag values to category labels, with an
//! optional `"*"` wildcard per key. Table order in the file is the iteration
//! order for whole-POI classification.

pub mod conditional;

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;

use crate::domain::{ClassifiedPoi, Labels, TagSet};

const BUILTIN_RULES: &str = include_str!("../../rules/categories.toml");

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse category rules")]
    Parse(#[from] toml::de::Error),
    #[error("rules for `{0}` must be a table of value = category entries")]
    NotATable(String),
}

/// Value rules for one recognized tag key.
#[derive(Debug, Clone)]
struct TagRules {
    values: HashMap<String, Labels>,
    wildcard: Option<Labels>,
}

/// The classification table. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    /// (tag key, rules) in rules-file order; order decides which raw
    /// `key:value` string a classified POI retains.
    entries: Vec<(String, TagRules)>,
}

impl CategoryTable {
    /// The embedded default rules, parsed once per process.
    pub fn builtin() -> &'static CategoryTable {
        static TABLE: OnceLock<CategoryTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            CategoryTable::from_toml_str(BUILTIN_RULES).expect("builtin category rules are valid")
        })
    }

    /// Load an alternate rules file.
    pub fn from_path(path: &Path) -> Result<CategoryTable, RulesError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<CategoryTable, RulesError> {
        let document: toml::Table = toml::from_str(contents)?;
        let mut entries = Vec::with_capacity(document.len());

        for (tag_key, value) in document {
            let table = match value {
                toml::Value::Table(table) => table,
                _ => return Err(RulesError::NotATable(tag_key)),
            };

            let mut values = HashMap::new();
            let mut wildcard = None;
            for (tag_value, labels) in table {
                let labels: Labels = labels.try_into()?;
                if tag_value == "*" {
                    wildcard = Some(labels);
                } else {
                    values.insert(tag_value, labels);
                }
            }

            entries.push((tag_key, TagRules { values, wildcard }));
        }

        Ok(CategoryTable { entries })
    }

    /// Recognized tag keys, in declared order.
    pub fn recognized_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Classify a single `key=value` tag.
    ///
    /// Resolution order, first match wins:
    /// 1. unrecognized key -> None
    /// 2. wildcard, when the value is not explicitly listed
    /// 3. explicitly listed value
    /// 4. conditional refinement for `building` values (material/height/levels)
    /// 5. None
    pub fn classify_tag(&self, tag_key: &str, tag_value: &str, tags: &TagSet) -> Option<Labels> {
        let rules = self.rules_for(tag_key)?;

        if let Some(wildcard) = &rules.wildcard
            && !rules.values.contains_key(tag_value)
        {
            return Some(wildcard.clone());
        }

        if let Some(labels) = rules.values.get(tag_value) {
            return Some(labels.clone());
        }

        if tag_key == "building" {
            return conditional::refine_building(tag_value, tags).map(Labels::One);
        }

        None
    }

    /// Classify a whole feature from its tag set.
    ///
    /// Every recognized key present in the tag set contributes its labels to
    /// the deduplicated category set; the raw `key:value` retained on the POI
    /// is the last recognized key found, whether or not it mapped. Features
    /// with an empty category set yield None and are dropped by callers.
    pub fn classify_poi(&self, tags: &TagSet, coordinates: (f64, f64)) -> Option<ClassifiedPoi> {
        let mut categories = BTreeSet::new();
        let mut source_tag = None;

        for (key, _) in &self.entries {
            if let Some(value) = tags.get(key) {
                source_tag = Some(format!("{key}:{value}"));
                if let Some(labels) = self.classify_tag(key, value, tags) {
                    categories.extend(labels.iter());
                }
            }
        }

        if categories.is_empty() {
            return None;
        }

        let name = tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| "Unnamed".to_string());

        Some(ClassifiedPoi::new(name, coordinates, source_tag?, categories))
    }

    fn rules_for(&self, tag_key: &str) -> Option<&TagRules> {
        self.entries
            .iter()
            .find(|(key, _)| key == tag_key)
            .map(|(_, rules)| rules)
    }
}
