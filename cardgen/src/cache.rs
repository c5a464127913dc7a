//! Rendered-card cache.
//!
//! Entries are PNG files named `{key}.png` in one directory. Age is taken
//! from the file's modification time, so the cache survives restarts without
//! an index file.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::output::write_atomic;

#[derive(Debug, Clone)]
pub struct CardCache {
    dir: PathBuf,
    enabled: bool,
    max_entries: usize,
    max_age: Duration,
}

struct Entry {
    path: PathBuf,
    modified: SystemTime,
}

impl CardCache {
    pub fn new(dir: impl Into<PathBuf>, enabled: bool, max_entries: usize, max_age: Duration) -> Self {
        Self {
            dir: dir.into(),
            enabled,
            max_entries,
            max_age,
        }
    }

    pub fn from_config(dir: impl Into<PathBuf>, config: &crate::ImageConfig) -> Self {
        Self::new(
            dir,
            config.enable_cache,
            config.cache_max_size,
            Duration::from_secs(config.cache_expire_time),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.png"))
    }

    /// Path of a fresh entry for `key`. Expired entries are removed on access.
    pub fn get(&self, key: &str) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        let path = self.entry_path(key);
        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        if self.is_expired(modified) {
            debug!(key, "cache entry expired");
            let _ = std::fs::remove_file(&path);
            return None;
        }
        debug!(key, "cache hit");
        Some(path)
    }

    /// Store `png` under `key`, then evict. Returns `None` when disabled or
    /// when `max_entries` is zero, in which case nothing is stored.
    pub fn put(&self, key: &str, png: &[u8]) -> Result<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }
        if self.max_entries == 0 {
            self.evict(None)?;
            return Ok(None);
        }
        let path = write_atomic(&self.dir, &format!("{key}.png"), png)?;
        self.evict(Some(&path))?;
        Ok(Some(path))
    }

    /// Drop expired entries, then the oldest ones until at most
    /// `max_entries` remain. `keep` is never evicted. Returns how many files
    /// were removed.
    pub fn evict(&self, keep: Option<&Path>) -> Result<usize> {
        let mut removed = 0;
        let mut live = Vec::new();
        for entry in self.entries()? {
            if self.is_expired(entry.modified) && Some(entry.path.as_path()) != keep {
                removed += remove(&entry.path);
            } else {
                live.push(entry);
            }
        }

        if live.len() > self.max_entries {
            live.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));
            let mut excess = live.len() - self.max_entries;
            for entry in &live {
                if excess == 0 {
                    break;
                }
                if Some(entry.path.as_path()) == keep {
                    continue;
                }
                removed += remove(&entry.path);
                excess -= 1;
            }
        }

        if removed > 0 {
            debug!(removed, dir = %self.dir.display(), "evicted cache entries");
        }
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.entries().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    pub fn clear(&self) -> Result<usize> {
        let entries = self.entries()?;
        Ok(entries.iter().map(|e| remove(&e.path)).sum())
    }

    fn is_expired(&self, modified: SystemTime) -> bool {
        let age = SystemTime::now().duration_since(modified).unwrap_or_default();
        age >= self.max_age
    }

    fn entries(&self) -> Result<Vec<Entry>> {
        let read = match std::fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err).with_context(|| format!("Read cache dir {}", self.dir.display())),
        };
        let mut entries = Vec::new();
        for item in read {
            let item = item.with_context(|| format!("Read cache dir {}", self.dir.display()))?;
            let path = item.path();
            if path.extension().is_none_or(|ext| ext != "png") {
                continue;
            }
            let modified = item
                .metadata()
                .and_then(|m| m.modified())
                .with_context(|| format!("Stat {}", path.display()))?;
            entries.push(Entry { path, modified });
        }
        Ok(entries)
    }
}

fn remove(path: &Path) -> usize {
    match std::fs::remove_file(path) {
        Ok(()) => 1,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to remove cache entry");
            0
        }
    }
}
