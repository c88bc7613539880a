//! 選択中の授業と永続化
//!
//! `Selection` は選択順を保った授業リスト。追加前に時間割の重複を確認する。
//! `Planner` は Selection と保存先（`SelectionStore`）をまとめ、
//! 追加・削除のたびに即座に保存する。

use std::cell::RefCell;

use crate::conflict::find_conflict;
use crate::error::{Error, Result};
use crate::types::Class;

/// localStorage のキー
pub const STORAGE_KEY: &str = "selectedClasses";

/// 一覧に表示する授業の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassStatus {
    Selected,
    /// 重複する選択済み授業のID
    Conflict(String),
    Available,
}

/// 選択中の授業（選択順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    classes: Vec<Class>,
}

impl Selection {
    pub fn new(classes: Vec<Class>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Class> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.classes.iter().any(|c| c.id == id)
    }

    /// 候補と重複する選択済みの授業
    pub fn find_conflict(&self, candidate: &Class) -> Option<&Class> {
        find_conflict(candidate, &self.classes)
    }

    pub fn status(&self, class: &Class) -> ClassStatus {
        if self.contains(&class.id) {
            ClassStatus::Selected
        } else if let Some(existing) = self.find_conflict(class) {
            ClassStatus::Conflict(existing.id.clone())
        } else {
            ClassStatus::Available
        }
    }

    /// 重複が無ければ末尾に追加
    pub fn try_add(&mut self, class: Class) -> Result<()> {
        if self.contains(&class.id) {
            return Err(Error::AlreadySelected(class.id));
        }
        if let Some(existing) = self.find_conflict(&class) {
            return Err(Error::Conflict {
                candidate: class.id,
                existing: existing.id.clone(),
            });
        }
        self.classes.push(class);
        Ok(())
    }

    /// 削除できたら true（削除は常に許可）
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != id);
        self.classes.len() != before
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }

    /// 合計単位数（不明な単位は数えない）
    pub fn total_credits(&self) -> u32 {
        self.classes.iter().filter_map(|c| c.credits).sum()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Class;
    type IntoIter = std::slice::Iter<'a, Class>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

/// 選択状態の保存先
pub trait SelectionStore {
    /// 保存済みのスナップショットを読む（未保存なら空）
    fn load(&self) -> Result<Vec<Class>>;

    /// スナップショットを上書き保存
    fn save(&self, classes: &[Class]) -> Result<()>;
}

/// メモリ上の保存先（テスト用）
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されたJSON
    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.borrow().clone()
    }
}

impl SelectionStore for MemoryStore {
    fn load(&self) -> Result<Vec<Class>> {
        match self.snapshot.borrow().as_deref() {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, classes: &[Class]) -> Result<()> {
        *self.snapshot.borrow_mut() = Some(serde_json::to_string(classes)?);
        Ok(())
    }
}

/// Selection + 保存先。変更は即座に保存される。
pub struct Planner<S: SelectionStore> {
    selection: Selection,
    store: S,
}

impl<S: SelectionStore> Planner<S> {
    /// 保存先から読み込んで開く
    ///
    /// 読めないスナップショットは空の選択として扱う。
    pub fn open(store: S) -> Self {
        let classes = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load saved selection, starting empty");
            Vec::new()
        });
        Self {
            selection: Selection::new(classes),
            store,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 重複確認のうえ追加して保存
    pub fn add(&mut self, class: Class) -> Result<()> {
        self.commit(|selection| selection.try_add(class))
    }

    /// 削除して保存。見つからなければ何もしない。
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if !self.selection.contains(id) {
            return Ok(false);
        }
        self.commit(|selection| Ok(selection.remove(id)))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.commit(|selection| {
            selection.clear();
            Ok(())
        })
    }

    /// 複製に変更を適用し、保存に成功した場合のみ反映する
    fn commit<T>(&mut self, change: impl FnOnce(&mut Selection) -> Result<T>) -> Result<T> {
        let mut next = self.selection.clone();
        let value = change(&mut next)?;
        self.store.save(next.classes())?;
        self.selection = next;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassSchedule;

    fn class(id: &str, day: u8, start: u32, end: u32) -> Class {
        Class {
            id: id.to_string(),
            name: format!("Môn {}", id),
            credits: Some(3),
            instructor: "GV".to_string(),
            schedules: vec![ClassSchedule {
                day: Some(day),
                start_period: Some(start),
                end_period: Some(end),
                room: "A101".to_string(),
                start_date: "01/01/2024".to_string(),
                end_date: "31/05/2024".to_string(),
                weeks: vec![true, false, true],
                total_periods: Some(45),
            }],
        }
    }

    #[test]
    fn test_try_add_conflict() {
        let mut selection = Selection::default();
        selection.try_add(class("C1", 2, 1, 3)).unwrap();

        let err = selection.try_add(class("C2", 2, 3, 5)).unwrap_err();
        match err {
            Error::Conflict { candidate, existing } => {
                assert_eq!(candidate, "C2");
                assert_eq!(existing, "C1");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_status() {
        let mut selection = Selection::default();
        selection.try_add(class("C1", 2, 1, 3)).unwrap();

        assert_eq!(selection.status(&class("C1", 2, 1, 3)), ClassStatus::Selected);
        assert_eq!(
            selection.status(&class("C2", 2, 2, 4)),
            ClassStatus::Conflict("C1".to_string())
        );
        assert_eq!(selection.status(&class("C3", 2, 4, 6)), ClassStatus::Available);
    }

    #[test]
    fn test_try_add_already_selected() {
        let mut selection = Selection::default();
        selection.try_add(class("C1", 2, 1, 3)).unwrap();
        assert!(matches!(
            selection.try_add(class("C1", 2, 1, 3)),
            Err(Error::AlreadySelected(_))
        ));
    }

    #[test]
    fn test_remove_is_always_allowed() {
        let mut selection = Selection::default();
        selection.try_add(class("C1", 2, 1, 3)).unwrap();
        selection.try_add(class("C2", 3, 1, 3)).unwrap();

        assert!(selection.remove("C1"));
        assert!(!selection.remove("C1"));
        assert_eq!(selection.len(), 1);
        assert!(selection.contains("C2"));
    }

    #[test]
    fn test_total_credits_skips_unknown() {
        let mut unknown = class("C2", 3, 1, 3);
        unknown.credits = None;
        let selection = Selection::new(vec![class("C1", 2, 1, 3), unknown, class("C3", 4, 1, 3)]);
        assert_eq!(selection.total_credits(), 6);
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_order() {
        let store = MemoryStore::new();
        let classes = vec![class("C3", 4, 1, 3), class("C1", 2, 1, 3), class("C2", 3, 7, 9)];
        store.save(&classes).unwrap();

        let restored = store.load().unwrap();
        assert_eq!(restored, classes);
    }

    #[test]
    fn test_planner_writes_through() {
        let mut planner = Planner::open(MemoryStore::new());
        assert!(planner.selection().is_empty());
        assert!(planner.store().snapshot().is_none());

        planner.add(class("C1", 2, 1, 3)).unwrap();
        planner.add(class("C2", 3, 1, 3)).unwrap();
        let saved = planner.store().load().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id, "C1");

        assert!(planner.remove("C1").unwrap());
        let saved = planner.store().load().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, "C2");

        planner.clear().unwrap();
        assert!(planner.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_planner_rejected_add_does_not_save() {
        let mut planner = Planner::open(MemoryStore::new());
        planner.add(class("C1", 2, 1, 3)).unwrap();
        let before = planner.store().snapshot();

        assert!(planner.add(class("C2", 2, 2, 4)).is_err());
        assert_eq!(planner.store().snapshot(), before);
    }

    /// 保存に必ず失敗する保存先
    struct BrokenStore;

    impl SelectionStore for BrokenStore {
        fn load(&self) -> Result<Vec<Class>> {
            Ok(Vec::new())
        }

        fn save(&self, _classes: &[Class]) -> Result<()> {
            Err(Error::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_planner_failed_save_keeps_selection() {
        let mut planner = Planner::open(BrokenStore);

        assert!(matches!(planner.add(class("C1", 2, 1, 3)), Err(Error::Storage(_))));
        assert!(planner.selection().is_empty());

        planner.selection = Selection::new(vec![class("C1", 2, 1, 3)]);
        assert!(planner.remove("C1").is_err());
        assert!(planner.selection().contains("C1"));

        assert!(planner.clear().is_err());
        assert_eq!(planner.selection().len(), 1);
    }

    #[test]
    fn test_planner_reopens_saved_selection() {
        let store = MemoryStore::new();
        store.save(&[class("C1", 2, 1, 3)]).unwrap();

        let planner = Planner::open(store);
        assert!(planner.selection().contains("C1"));
    }

    #[test]
    fn test_planner_open_with_corrupt_snapshot() {
        let store = MemoryStore::new();
        *store.snapshot.borrow_mut() = Some("not json".to_string());

        let planner = Planner::open(store);
        assert!(planner.selection().is_empty());
    }
}
