//! Policy documents
//!
//! A [`PolicyDocument`] bundles the three records that apply to one
//! namespace/repository pair, as handed over by the policy editors:
//!
//! ```toml
//! [global]
//! enabled = true
//! protectedBranches = ["main"]
//! childrenConfigDisabled = false
//!
//! [namespace]
//! overwriteParentConfig = true
//! enabled = false
//!
//! [repository]
//! overwriteParentConfig = true
//! enabled = true
//! protectedBranches = ["main", "release/*"]
//! verificationType = "SCM_USER_SIGNATURE"
//! ```
//!
//! Missing sections take the default (disabled) record. Documents are only
//! read here; storing them is up to the caller.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::record::PolicyRecord;
use crate::error::{Error, Result};
use crate::resolve::PolicyChain;

/// The global, namespace and repository records for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDocument {
    pub global: PolicyRecord,
    pub namespace: PolicyRecord,
    pub repository: PolicyRecord,
}

impl PolicyDocument {
    pub fn new(global: PolicyRecord, namespace: PolicyRecord, repository: PolicyRecord) -> Self {
        Self {
            global,
            namespace,
            repository,
        }
    }

    /// Parse a document from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a document from JSON content
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a document from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self> {
        load_file(path)
    }

    /// The records as a resolution chain, root first.
    pub fn chain(&self) -> PolicyChain<'_> {
        PolicyChain::new(&self.global, &self.namespace, &self.repository)
    }
}

/// Load any deserializable document, picking the format from the extension.
///
/// - `.toml` -> TOML
/// - `.json` -> JSON
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    if !matches!(extension.as_str(), "toml" | "json") {
        return Err(Error::UnsupportedFormat { extension });
    }

    tracing::debug!(path = %path.display(), format = %extension, "Loading document");
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    if extension == "toml" {
        Ok(toml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}
