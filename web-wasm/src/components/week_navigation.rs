//! 週の切り替え

use chrono::NaiveDate;
use class_planner_common::{format_dmy, WeekCursor};
use leptos::prelude::*;

#[component]
pub fn WeekNavigation(
    cursor: ReadSignal<WeekCursor>,
    set_cursor: WriteSignal<WeekCursor>,
    start_date: ReadSignal<NaiveDate>,
) -> impl IntoView {
    let week_label = move || {
        let cursor = cursor.get();
        match cursor.week_range(start_date.get()) {
            Some((monday, sunday)) => format!(
                "Tuần {}: {} - {}",
                cursor.current(),
                format_dmy(monday),
                format_dmy(sunday)
            ),
            None => format!("Tuần {}", cursor.current()),
        }
    };

    view! {
        <div class="week-navigation">
            <button
                class="btn btn-secondary"
                disabled=move || !cursor.get().has_previous()
                on:click=move |_| set_cursor.update(|c| *c = c.previous())
            >
                "Tuần trước"
            </button>
            <span class="week-label">{week_label}</span>
            <button
                class="btn btn-secondary"
                disabled=move || !cursor.get().has_next()
                on:click=move |_| set_cursor.update(|c| *c = c.next())
            >
                "Tuần sau"
            </button>
        </div>
    }
}
