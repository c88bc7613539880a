//! 授業検索リスト

use class_planner_common::{search, Class, ClassSchedule, ClassStatus, Filters, Selection};
use leptos::prelude::*;

#[component]
pub fn ClassSearch<FA, FR>(
    classes: Signal<Vec<Class>>,
    filters: ReadSignal<Filters>,
    selection: Memo<Selection>,
    on_add: FA,
    on_remove: FR,
) -> impl IntoView
where
    FA: Fn(Class) + 'static + Clone + Send + Sync,
    FR: Fn(String) + 'static + Clone + Send + Sync,
{
    let (search_term, set_search_term) = signal(String::new());

    let results = Memo::new(move |_| {
        let term = search_term.get();
        filters.with(|f| {
            classes.with(|all| search(all, f, &term).into_iter().cloned().collect::<Vec<_>>())
        })
    });

    view! {
        <div class="class-search">
            <input
                type="text"
                class="search-input"
                placeholder="Tìm lớp học phần (tên hoặc mã)"
                prop:value=move || search_term.get()
                on:input=move |ev| set_search_term.set(event_target_value(&ev))
            />
            <p class="text-muted">{move || format!("{} lớp", results.with(Vec::len))}</p>
            <div class="class-list">
                <For
                    each=move || results.get()
                    key=|class| class.id.clone()
                    children=move |class| {
                        let on_add = on_add.clone();
                        let on_remove = on_remove.clone();
                        view! {
                            <ClassCard
                                class=class
                                selection=selection
                                on_add=on_add
                                on_remove=on_remove
                            />
                        }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn ClassCard<FA, FR>(
    class: Class,
    selection: Memo<Selection>,
    on_add: FA,
    on_remove: FR,
) -> impl IntoView
where
    FA: Fn(Class) + 'static + Clone + Send + Sync,
    FR: Fn(String) + 'static + Clone + Send + Sync,
{
    let status = {
        let class = class.clone();
        Memo::new(move |_| selection.with(|s| s.status(&class)))
    };

    let on_click = {
        let class = class.clone();
        move |_| match status.get_untracked() {
            ClassStatus::Selected => on_remove(class.id.clone()),
            ClassStatus::Available => on_add(class.clone()),
            ClassStatus::Conflict(_) => {}
        }
    };

    let button_class = move || match status.get() {
        ClassStatus::Selected => "btn btn-danger",
        ClassStatus::Conflict(_) => "btn btn-disabled",
        ClassStatus::Available => "btn btn-primary",
    };

    let button_label = move || match status.get() {
        ClassStatus::Selected => "Xóa".to_string(),
        ClassStatus::Conflict(existing) => format!("Trùng lịch ({})", existing),
        ClassStatus::Available => "Thêm".to_string(),
    };

    view! {
        <div class="class-card">
            <div class="class-card-header">
                <ClassInfo class=class.clone() />
                <button
                    class=button_class
                    disabled=move || matches!(status.get(), ClassStatus::Conflict(_))
                    on:click=on_click
                >
                    {button_label}
                </button>
            </div>
            <ScheduleDetails schedules=class.schedules />
        </div>
    }
}

/// 授業名・ID・担当教員・単位数
#[component]
pub fn ClassInfo(class: Class) -> impl IntoView {
    view! {
        <div class="class-info">
            <div class="class-name">{class.name}</div>
            <div class="text-muted">"Mã: " {class.id}</div>
            <div class="text-muted">"GV: " {class.instructor}</div>
            <div class="text-muted">"STC: " {class.credits.map(|c| c.to_string()).unwrap_or_default()}</div>
        </div>
    }
}

/// スケジュール一覧（不明な値は空欄）
#[component]
pub fn ScheduleDetails(schedules: Vec<ClassSchedule>) -> impl IntoView {
    let blank = |v: Option<u32>| v.map(|p| p.to_string()).unwrap_or_default();

    view! {
        <div class="schedule-details">
            {schedules
                .into_iter()
                .map(|s| {
                    view! {
                        <div class="schedule">
                            <div>
                                {s.day_label().unwrap_or_default()} ": Tiết "
                                {blank(s.start_period)} "-" {blank(s.end_period)}
                            </div>
                            <div>"Phòng: " {s.room}</div>
                            <div>"Từ: " {s.start_date} " - Đến: " {s.end_date}</div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
