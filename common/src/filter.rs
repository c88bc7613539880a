//! 授業の絞り込み・検索
//!
//! フィルタの各項目はAND、項目内の選択肢はOR（集合への所属）で評価する。
//! 検索語はフィルタ適用後に授業名・IDの部分一致（大文字小文字無視）で絞る。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{Class, TimeSlot};

/// 絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// 授業名（空なら全件）
    pub subjects: Vec<String>,
    /// 担当教員（空なら全件）
    pub instructors: Vec<String>,
    pub time_slot: TimeSlot,
    /// 曜日コード
    pub day_of_week: Option<u8>,
}

impl Filters {
    /// 条件なしに戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 授業名の選択を切り替え
    pub fn toggle_subject(&mut self, subject: &str) {
        toggle(&mut self.subjects, subject);
    }

    /// 担当教員の選択を切り替え
    pub fn toggle_instructor(&mut self, instructor: &str) {
        toggle(&mut self.instructors, instructor);
    }

    /// 授業が条件を満たすか
    pub fn matches(&self, class: &Class) -> bool {
        let matches_subject = self.subjects.is_empty() || self.subjects.contains(&class.name);
        let matches_instructor =
            self.instructors.is_empty() || self.instructors.contains(&class.instructor);
        let matches_time_slot = self.time_slot == TimeSlot::All
            || class
                .schedules
                .iter()
                .any(|s| self.time_slot.contains_start(s.start_period));
        let matches_day = match self.day_of_week {
            None => true,
            Some(day) => class.schedules.iter().any(|s| s.day == Some(day)),
        };

        matches_subject && matches_instructor && matches_time_slot && matches_day
    }
}

fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

/// 検索語に一致するか（授業名またはID、大文字小文字無視）
pub fn matches_search(class: &Class, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || class.name.to_lowercase().contains(&term)
        || class.id.to_lowercase().contains(&term)
}

/// フィルタ → 検索語の順に絞り込む
pub fn search<'a>(classes: &'a [Class], filters: &Filters, term: &str) -> Vec<&'a Class> {
    classes
        .iter()
        .filter(|c| filters.matches(c))
        .filter(|c| matches_search(c, term))
        .collect()
}

/// フィルタ候補の授業名（初出順・重複なし）
pub fn subject_options(classes: &[Class]) -> Vec<String> {
    distinct(classes.iter().map(|c| c.name.as_str()))
}

/// フィルタ候補の担当教員（初出順・重複なし）
pub fn instructor_options(classes: &[Class]) -> Vec<String> {
    distinct(classes.iter().map(|c| c.instructor.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
