use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Key under which the raw script is kept.
pub const SCRIPT_KEY: &str = "teleprompterText";

/// Shown when no script has been stored yet.
pub const PLACEHOLDER_SCRIPT: &str =
    "Welcome to the Teleprompter! Paste your text on the previous page.";

/// A small key-value store for plain text.
pub trait ScriptStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The stored script, or the placeholder when nothing (or nothing but an
/// empty string) was stored.
pub fn load_script(store: &dyn ScriptStore) -> Result<String> {
    let stored = store.load(SCRIPT_KEY)?;
    Ok(stored
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_SCRIPT.to_string()))
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store inside the user's data directory.
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_dir().context("Could not determine data directory")?;
        Ok(Self::new(base.join("prompter-tui")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
            .collect();
        self.dir.join(format!("{file_name}.txt"))
    }
}

impl ScriptStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(text))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
