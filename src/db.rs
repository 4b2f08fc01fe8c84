//! File-backed project store.
//!
//! Projects are kept in a single JSON file, loaded whole and written back
//! atomically (temp file + rename). A missing or corrupt file degrades to an
//! empty store with a warning rather than an error.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::project::Project;

/// In-memory database of projects keyed by display name. Key resolution is
/// case-insensitive; the stored key keeps the casing the user created it with.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Database {
    pub projects: BTreeMap<String, Project>,
}

impl Database {
    /// Load from JSON, starting fresh when the file is absent or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Database::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("Error parsing store, starting fresh: {e}");
                    Database::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading store, starting fresh: {e}");
                Database::default()
            }
        }
    }

    /// Save to JSON using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(self).unwrap();
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Resolve a project name to its stored key, ignoring case.
    pub fn project_key(&self, name: &str) -> Option<String> {
        let wanted = name.to_lowercase();
        self.projects
            .keys()
            .find(|k| k.to_lowercase() == wanted)
            .cloned()
    }

    pub fn get(&self, key: &str) -> Option<&Project> {
        self.projects.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Project> {
        self.projects.get_mut(key)
    }
}
