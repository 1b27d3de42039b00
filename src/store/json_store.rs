use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::store::schema::{HISTORY_FILE, PersistedData, STATE_FILE, WordMap};

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("creating data dir {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Create `state.json` and `history.json` as empty objects when missing.
    /// Existing files are left untouched.
    pub fn ensure_initialized(&self) -> Result<()> {
        for name in [STATE_FILE, HISTORY_FILE] {
            if !self.file_path(name).exists() {
                debug!(file = name, "initializing empty store file");
                self.save(name, &WordMap::new())?;
            }
        }
        Ok(())
    }

    fn load(&self, name: &str) -> WordMap {
        let path = self.file_path(name);
        if !path.exists() {
            return WordMap::new();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "unreadable store file, starting empty");
                WordMap::new()
            }),
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot read store file, starting empty");
                WordMap::new()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_state(&self) -> WordMap {
        self.load(STATE_FILE)
    }

    pub fn load_history(&self) -> WordMap {
        self.load(HISTORY_FILE)
    }

    pub fn load_all(&self) -> PersistedData {
        PersistedData {
            state: self.load_state(),
            history: self.load_history(),
        }
    }
}
