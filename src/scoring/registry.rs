use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog;
use super::rules::{CategoryRuleSet, RuleSetError};
use crate::config::ScoringConfig;

/// Serialized form of a registry, as stored in a rule set file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetCatalog {
    pub rule_sets: Vec<CategoryRuleSet>,
    #[serde(default)]
    pub default_category: Option<String>,
}

/// Immutable category → rule set table, validated once when it is built.
#[derive(Debug, Clone, Default)]
pub struct RuleSetRegistry {
    rule_sets: BTreeMap<String, CategoryRuleSet>,
    default_category: Option<String>,
}

impl RuleSetRegistry {
    pub fn new(rule_sets: Vec<CategoryRuleSet>) -> Result<Self, RuleSetError> {
        let mut table = BTreeMap::new();
        for rule_set in rule_sets {
            rule_set.validate()?;
            let key = normalize_category(&rule_set.category);
            if table.contains_key(&key) {
                return Err(RuleSetError::DuplicateCategory(key));
            }
            table.insert(key, rule_set);
        }

        Ok(Self {
            rule_sets: table,
            default_category: None,
        })
    }

    /// The rule sets shipped with the service.
    pub fn builtin() -> Result<Self, RuleSetError> {
        Self::new(catalog::builtin_rule_sets())
    }

    pub fn from_catalog(catalog: RuleSetCatalog) -> Result<Self, RuleSetError> {
        let registry = Self::new(catalog.rule_sets)?;
        Ok(registry.with_default_category(catalog.default_category))
    }

    pub fn from_json(raw: &str) -> Result<Self, RegistryError> {
        let catalog: RuleSetCatalog = serde_json::from_str(raw)?;
        Ok(Self::from_catalog(catalog)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Load the configured rule set file, or the built-in catalog when none is set.
    /// An explicit default category in the configuration overrides the file's.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, RegistryError> {
        let registry = match &config.rule_set_path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin()?,
        };
        let registry = match &config.default_category {
            Some(category) => registry.with_default_category(Some(category.clone())),
            None => registry,
        };

        info!(
            categories = registry.len(),
            source = %config
                .rule_set_path
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "builtin".to_string()),
            "rule set registry loaded"
        );

        Ok(registry)
    }

    pub fn with_default_category(mut self, category: Option<String>) -> Self {
        self.default_category = category
            .map(|value| normalize_category(&value))
            .filter(|value| !value.is_empty());
        self
    }

    pub fn default_category(&self) -> Option<&str> {
        self.default_category.as_deref()
    }

    pub fn resolve(&self, category: &str) -> Option<&CategoryRuleSet> {
        self.rule_sets.get(&normalize_category(category))
    }

    /// Registered category keys in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rule_sets.keys().map(String::as_str)
    }

    pub fn rule_sets(&self) -> impl Iterator<Item = &CategoryRuleSet> {
        self.rule_sets.values()
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }

    pub fn to_catalog(&self) -> RuleSetCatalog {
        RuleSetCatalog {
            rule_sets: self.rule_sets.values().cloned().collect(),
            default_category: self.default_category.clone(),
        }
    }
}

pub fn normalize_category(category: &str) -> String {
    category.trim().to_ascii_lowercase()
}

/// Failure to build a registry from external configuration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unable to read rule sets from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("rule set file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] RuleSetError),
}
