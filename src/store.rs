//! JSONファイルへの選択状態の保存

use class_planner_common::{Class, Error, Result, SelectionStore};
use std::path::{Path, PathBuf};

/// 選択中の授業を1つのJSON配列として保存する
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionStore for FileStore {
    fn load(&self) -> Result<Vec<Class>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, classes: &[Class]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(classes)?;
        std::fs::write(&self.path, json)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))?;
        tracing::debug!(path = %self.path.display(), count = classes.len(), "selection saved");
        Ok(())
    }
}
