//! Policy and push fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use sigcheck_core::enforce::{Commit, Signature, SignatureStatus};
use sigcheck_core::policy::PolicyRecord;
use tempfile::TempDir;

/// A record carrying only the given lock and override flags.
pub fn flags(children_config_disabled: bool, overwrite_parent_config: bool) -> PolicyRecord {
    PolicyRecord {
        children_config_disabled,
        overwrite_parent_config,
        ..PolicyRecord::default()
    }
}

/// A record with flags, enabled for a single pattern unique to `level_tag`.
///
/// Lets a test tell which level a resolved policy came from by its branch.
pub fn tagged(level_tag: &str, children_config_disabled: bool, overwrite_parent_config: bool) -> PolicyRecord {
    PolicyRecord {
        children_config_disabled,
        overwrite_parent_config,
        ..PolicyRecord::enabled_for([level_tag])
    }
}

/// A commit with one verified signature owned by `owner`.
pub fn signed_commit(id: &str, owner: &str) -> Commit {
    Commit::new(id).with_signature(Signature {
        key_id: format!("key-{owner}"),
        status: SignatureStatus::Verified,
        owner: Some(owner.to_string()),
    })
}

/// A commit signed with a key unknown to the platform.
pub fn foreign_signed_commit(id: &str) -> Commit {
    Commit::new(id).with_signature(Signature {
        key_id: "key-unknown".to_string(),
        status: SignatureStatus::NotFound,
        owner: None,
    })
}

/// A commit without any signature.
pub fn unsigned_commit(id: &str) -> Commit {
    Commit::new(id)
}

/// Temporary directory holding policy and push documents.
pub struct TestDocuments {
    temp_dir: TempDir,
}

impl Default for TestDocuments {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocuments {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` inside the directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
