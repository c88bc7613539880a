//! 時間割の重複判定
//!
//! 2つのスケジュールが重複するのは次の3条件をすべて満たすとき:
//! 1. 曜日コードが同じ
//! 2. 両方とも授業がある週が1つ以上ある
//! 3. 時限の範囲が交差する
//!
//! 曜日や時限が不明なスケジュールはどれとも重複しない。

use crate::types::{Class, ClassSchedule};

/// 2つのスケジュールが重複するか
pub fn schedules_overlap(a: &ClassSchedule, b: &ClassSchedule) -> bool {
    match (a.day, b.day) {
        (Some(day_a), Some(day_b)) if day_a == day_b => {}
        _ => return false,
    }

    let shares_week = a
        .weeks
        .iter()
        .zip(b.weeks.iter())
        .any(|(meets_a, meets_b)| *meets_a && *meets_b);
    if !shares_week {
        return false;
    }

    match (a.period_range(), b.period_range()) {
        (Some((start_a, end_a)), Some((start_b, end_b))) => !(end_a < start_b || start_a > end_b),
        _ => false,
    }
}

/// 2つの授業のいずれかのスケジュールが重複するか
pub fn classes_overlap(a: &Class, b: &Class) -> bool {
    a.schedules
        .iter()
        .any(|sa| b.schedules.iter().any(|sb| schedules_overlap(sa, sb)))
}

/// 選択済みの授業のうち、候補と重複する最初の授業
///
/// 候補自身（同じID）は判定から除く。
pub fn find_conflict<'a, I>(candidate: &Class, selected: I) -> Option<&'a Class>
where
    I: IntoIterator<Item = &'a Class>,
{
    selected
        .into_iter()
        .filter(|existing| existing.id != candidate.id)
        .find(|existing| classes_overlap(candidate, existing))
}
