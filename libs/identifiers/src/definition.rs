//! Declarative text type definitions.
//!
//! Lets hosts describe their identifier types in configuration instead of
//! code:
//!
//! ```toml
//! [[type]]
//! name = "AccountID"
//!
//! [type.extractors]
//! fund = { start = 0, end = 4 }
//! branch = { start = 4, end = 8 }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{IdentifierError, RangeExtractor, TextTypeMetadata, TypeMetadata};

/// One named text type and its range extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextTypeDefinition {
    /// Type name; must not be blank.
    pub name: String,

    /// Range extractors by key.
    #[serde(default)]
    pub extractors: BTreeMap<String, RangeExtractor>,
}

impl TextTypeDefinition {
    /// Builds the text metadata this definition describes.
    pub fn build(&self) -> Result<TextTypeMetadata, IdentifierError> {
        let extractors = self
            .extractors
            .iter()
            .map(|(key, range)| (key.clone(), crate::share(*range)))
            .collect();
        TextTypeMetadata::with_extractors(self.name.clone(), &extractors)
    }
}

/// A set of text type definitions, as loaded from TOML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeCatalog {
    #[serde(default, rename = "type")]
    pub types: Vec<TextTypeDefinition>,
}

impl TypeCatalog {
    /// Parses a catalog from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, IdentifierError> {
        toml::from_str(content).map_err(|e| IdentifierError::InvalidDefinition(e.to_string()))
    }

    /// Parses a catalog from JSON.
    pub fn from_json_str(content: &str) -> Result<Self, IdentifierError> {
        serde_json::from_str(content).map_err(|e| IdentifierError::InvalidDefinition(e.to_string()))
    }

    /// Looks up a definition by name.
    pub fn get(&self, name: &str) -> Option<&TextTypeDefinition> {
        self.types.iter().find(|def| def.name == name)
    }

    /// Builds shared metadata for every definition, in declaration order.
    ///
    /// Fails if any name is blank or declared twice.
    pub fn build(&self) -> Result<Vec<Arc<TypeMetadata<String, String>>>, IdentifierError> {
        let mut seen = HashSet::new();
        self.types
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let metadata = def.build().map_err(|e| {
                    IdentifierError::InvalidDefinition(format!("type #{index}: {e}"))
                })?;
                if !seen.insert(def.name.as_str()) {
                    return Err(IdentifierError::InvalidDefinition(format!(
                        "type '{}' defined more than once",
                        def.name
                    )));
                }
                tracing::debug!(name = %def.name, extractors = def.extractors.len(), "loaded type definition");
                Ok(metadata.shared())
            })
            .collect()
    }
}
