//! 対話式の授業選択

use crate::error::{PlannerError, Result};
use crate::render;
use class_planner_common::{Class, ClassStatus, Selection};
use dialoguer::MultiSelect;

/// 追加できる授業（選択済み・重複を除く）
pub fn candidates<'a>(classes: &[&'a Class], selection: &Selection) -> Vec<&'a Class> {
    classes
        .iter()
        .copied()
        .filter(|c| selection.status(c) == ClassStatus::Available)
        .collect()
}

/// 候補から複数選択させ、選ばれた授業IDを返す
pub fn pick(candidates: &[&Class]) -> Result<Vec<String>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<String> = candidates
        .iter()
        .map(|c| render::class_line(c, &ClassStatus::Available))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("追加する授業を選択 [Space]選択 [Enter]確定")
        .items(&items)
        .interact_opt()
        .map_err(|e| PlannerError::Prompt(e.to_string()))?;

    Ok(chosen
        .unwrap_or_default()
        .into_iter()
        .filter_map(|i| candidates.get(i).map(|c| c.id.clone()))
        .collect())
}
