//! 絞り込みパネル
//!
//! 授業名・担当教員は複数選択、時間帯・曜日は単一選択。

use class_planner_common::{day_label, Filters, TimeSlot, DAY_CODES};
use leptos::prelude::*;

#[component]
pub fn FilterPanel<FR>(
    filters: ReadSignal<Filters>,
    set_filters: WriteSignal<Filters>,
    subjects: Memo<Vec<String>>,
    instructors: Memo<Vec<String>>,
    on_reset: FR,
) -> impl IntoView
where
    FR: Fn(()) + 'static + Clone + Send,
{
    let time_slots = [
        TimeSlot::All,
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    view! {
        <div class="filter-panel">
            <MultiSelect
                label="Môn học"
                options=subjects
                selected=Signal::derive(move || filters.get().subjects)
                on_toggle=move |value: String| set_filters.update(|f| f.toggle_subject(&value))
            />

            <MultiSelect
                label="Giảng viên"
                options=instructors
                selected=Signal::derive(move || filters.get().instructors)
                on_toggle=move |value: String| set_filters.update(|f| f.toggle_instructor(&value))
            />

            <div class="form-group">
                <label for="time-slot">"Ca học"</label>
                <select
                    id="time-slot"
                    prop:value=move || filters.get().time_slot.as_str()
                    on:change=move |ev| {
                        let slot = event_target_value(&ev).parse().unwrap_or_default();
                        set_filters.update(|f| f.time_slot = slot);
                    }
                >
                    {time_slots
                        .into_iter()
                        .map(|slot| view! { <option value=slot.as_str()>{slot.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="day-of-week">"Thứ"</label>
                <select
                    id="day-of-week"
                    prop:value=move || {
                        filters.get().day_of_week.map(|d| d.to_string()).unwrap_or_else(|| "all".to_string())
                    }
                    on:change=move |ev| {
                        let day = event_target_value(&ev).parse::<u8>().ok();
                        set_filters.update(|f| f.day_of_week = day);
                    }
                >
                    <option value="all">"Tất cả"</option>
                    {DAY_CODES
                        .map(|code| {
                            view! {
                                <option value=code.to_string()>{day_label(code).unwrap_or_default()}</option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <button
                class="btn btn-secondary"
                on:click={
                    let on_reset = on_reset.clone();
                    move |_| on_reset(())
                }
            >
                "Đặt lại bộ lọc"
            </button>
        </div>
    }
}

/// チェックボックス式の複数選択
#[component]
fn MultiSelect<FT>(
    label: &'static str,
    options: Memo<Vec<String>>,
    selected: Signal<Vec<String>>,
    on_toggle: FT,
) -> impl IntoView
where
    FT: Fn(String) + 'static + Clone + Send + Sync,
{
    let (query, set_query) = signal(String::new());

    let summary = move || {
        let count = selected.with(Vec::len);
        if count == 0 {
            format!("Chọn {}...", label.to_lowercase())
        } else {
            format!("Đã chọn {} {}", count, label.to_lowercase())
        }
    };

    let visible = move || {
        let q = query.get().to_lowercase();
        options
            .get()
            .into_iter()
            .filter(|o| q.is_empty() || o.to_lowercase().contains(&q))
            .collect::<Vec<_>>()
    };

    view! {
        <details class="multi-select">
            <summary>{summary}</summary>
            <input
                type="text"
                placeholder=format!("Tìm {}...", label.to_lowercase())
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />
            <ul class="options">
                <For
                    each=visible
                    key=|option| option.clone()
                    children=move |option| {
                        let on_toggle = on_toggle.clone();
                        let checked_value = option.clone();
                        let toggle_value = option.clone();
                        view! {
                            <li>
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selected.with(|s| s.contains(&checked_value))
                                        on:change=move |_| on_toggle(toggle_value.clone())
                                    />
                                    {option}
                                </label>
                            </li>
                        }
                    }
                />
            </ul>
        </details>
    }
}
