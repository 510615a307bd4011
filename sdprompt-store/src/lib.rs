use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

pub const BACKUP_DIR_NAME: &str = "_backup";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse category file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize category '{category}': {source}")]
    Serialize {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

/// The fixed set of user-editable prompt vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Descriptors,
    Negative,
    Rendering,
    Genres,
    Artists,
}

impl Category {
    /// Every category in editor menu order.
    pub const ALL: [Category; 5] = [
        Category::Descriptors,
        Category::Negative,
        Category::Rendering,
        Category::Genres,
        Category::Artists,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Descriptors => "descriptors",
            Category::Negative => "negative",
            Category::Rendering => "rendering",
            Category::Genres => "genres",
            Category::Artists => "artists",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let wanted = input.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

/// Where category files and their backups live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    category_dir: PathBuf,
    backup_dir: PathBuf,
}

impl StoreLayout {
    pub fn new(category_dir: impl Into<PathBuf>) -> Self {
        let category_dir = category_dir.into();
        let backup_dir = category_dir.join(BACKUP_DIR_NAME);
        Self {
            category_dir,
            backup_dir,
        }
    }

    pub fn category_dir(&self) -> &Path {
        &self.category_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn live_path(&self, category: Category) -> PathBuf {
        self.category_dir.join(format!("{}.json", category.name()))
    }

    pub fn backup_path(&self, category: Category) -> PathBuf {
        self.backup_dir.join(format!("{}.bak.json", category.name()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub backed_up: bool,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    NoBackup,
}

#[derive(Debug, Clone)]
pub struct CategoryStore {
    layout: StoreLayout,
}

impl CategoryStore {
    pub fn new(layout: StoreLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Reads the entries of `category`, treating a missing file as an empty list.
    pub fn load(&self, category: Category) -> Result<Vec<String>, StoreError> {
        let path = self.layout.live_path(category);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Parse { path, source })
    }

    pub fn load_all(&self) -> Result<BTreeMap<Category, Vec<String>>, StoreError> {
        Category::ALL
            .into_iter()
            .map(|category| self.load(category).map(|entries| (category, entries)))
            .collect()
    }

    /// Writes `entries` sorted and deduplicated, first copying the current file
    /// into the category's backup slot.
    ///
    /// The write is not atomic: a crash mid-write can leave the live file
    /// truncated, with the backup slot holding the previous version.
    pub fn save<S>(&self, category: Category, entries: &[S]) -> Result<SaveOutcome, StoreError>
    where
        S: AsRef<str>,
    {
        let backup_dir = self.layout.backup_dir();
        fs::create_dir_all(backup_dir).map_err(|source| StoreError::Io {
            path: backup_dir.to_path_buf(),
            source,
        })?;

        let live = self.layout.live_path(category);
        let backed_up = live.exists();
        if backed_up {
            let backup = self.layout.backup_path(category);
            fs::copy(&live, &backup).map_err(|source| StoreError::Io {
                path: backup.clone(),
                source,
            })?;
            tracing::debug!(%category, backup = %backup.display(), "backed up category");
        }

        let unique: BTreeSet<&str> = entries.iter().map(|entry| entry.as_ref()).collect();
        let serialized = serde_json::to_string_pretty(&unique)
            .map_err(|source| StoreError::Serialize { category, source })?;
        fs::write(&live, serialized).map_err(|source| StoreError::Io {
            path: live.clone(),
            source,
        })?;
        tracing::debug!(%category, entries = unique.len(), "saved category");

        Ok(SaveOutcome {
            backed_up,
            entries: unique.len(),
        })
    }

    /// Copies the backup slot over the live file. The slot itself is left as is.
    pub fn restore(&self, category: Category) -> Result<RestoreOutcome, StoreError> {
        let backup = self.layout.backup_path(category);
        if !backup.exists() {
            tracing::debug!(%category, "no backup to restore");
            return Ok(RestoreOutcome::NoBackup);
        }

        let live = self.layout.live_path(category);
        fs::copy(&backup, &live).map_err(|source| StoreError::Io { path: live, source })?;
        tracing::debug!(%category, "restored category from backup");
        Ok(RestoreOutcome::Restored)
    }
}

#[cfg(test)]
mod tests;
