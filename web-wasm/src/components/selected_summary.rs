//! 選択中の授業一覧

use class_planner_common::{Class, Selection};
use leptos::prelude::*;

use super::class_search::{ClassInfo, ScheduleDetails};

#[component]
pub fn SelectedSummary<FR>(selection: Memo<Selection>, on_remove: FR) -> impl IntoView
where
    FR: Fn(String) + 'static + Clone + Send + Sync,
{
    let selected = move || selection.with(|s| s.classes().to_vec());

    view! {
        <div class="selected-summary">
            <h2>
                "Lớp đã chọn "
                {move || {
                    selection.with(|s| format!("({} lớp, {} tín chỉ)", s.len(), s.total_credits()))
                }}
            </h2>
            <Show
                when=move || !selection.with(Selection::is_empty)
                fallback=|| view! { <p class="text-muted">"Chưa chọn lớp nào"</p> }
            >
                <For
                    each=selected
                    key=|class: &Class| class.id.clone()
                    children={
                        let on_remove = on_remove.clone();
                        move |class: Class| {
                            let on_remove = on_remove.clone();
                            let id = class.id.clone();
                            view! {
                                <div class="selected-class">
                                    <div class="class-card-header">
                                        <ClassInfo class=class.clone() />
                                        <button
                                            class="btn btn-danger btn-small"
                                            on:click=move |_| on_remove(id.clone())
                                        >
                                            "Xóa"
                                        </button>
                                    </div>
                                    <ScheduleDetails schedules=class.schedules />
                                </div>
                            }
                        }
                    }
                />
            </Show>
        </div>
    }
}
