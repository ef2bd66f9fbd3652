use std::collections::{BTreeMap, HashMap};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::theme::{PreferenceKey, PreferenceStore};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<PreferenceKey, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: PreferenceKey, value: &str) -> anyhow::Result<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}

/// Preferences kept in a flat JSON object on disk.
///
/// A missing or unreadable file is treated as an empty store. Keys this crate
/// does not know about are preserved across writes.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_values(&path);
        Self { path, values }
    }

    fn persist(&self) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(&self.values).context("encode preferences")?;
        write_atomically(&self.path, &json)
    }
}

/// Replaces `path` with `bytes` via a temp file in the same directory. The
/// temp file is removed if the replace fails.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("write {}", tmp.path().display()))?;
    tmp.persist(path)
        .with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

impl PreferenceStore for FileStore {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.values.get(key.as_str()).cloned()
    }

    fn set(&mut self, key: PreferenceKey, value: &str) -> anyhow::Result<()> {
        self.values
            .insert(key.as_str().to_string(), value.to_string());
        self.persist()
    }
}

fn load_values(path: &Path) -> BTreeMap<String, String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot read preferences; using defaults");
            return BTreeMap::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(values) => values,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "malformed preferences; using defaults");
            BTreeMap::new()
        }
    }
}
