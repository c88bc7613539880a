//! localStorage への選択状態の保存

use class_planner_common::{Class, Error, Result, SelectionStore, STORAGE_KEY};
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};

/// `selectedClasses` キーにJSON配列として保存する
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl SelectionStore for BrowserStore {
    fn load(&self) -> Result<Vec<Class>> {
        match LocalStorage::get::<Vec<Class>>(STORAGE_KEY) {
            Ok(classes) => Ok(classes),
            Err(StorageError::KeyNotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }

    fn save(&self, classes: &[Class]) -> Result<()> {
        LocalStorage::set(STORAGE_KEY, classes).map_err(|e| Error::Storage(e.to_string()))
    }
}

impl BrowserStore {
    /// 保存済みの選択を削除
    pub fn clear(&self) {
        LocalStorage::delete(STORAGE_KEY);
    }
}
