use leptos::prelude::*;
use serde::de::DeserializeOwned;

use obra_types::{FieldValue, Record};

use crate::table::{
    reconcile_rows, DialogMode, FieldDef, FilterDebounce, TableQuery, PAGE_SIZE_CHOICES,
};

/// Everything a record dialog needs from the table that opened it. The
/// dialog reports back through `on_close`: `Some(record)` after a
/// successful save or delete, `None` on cancel.
#[derive(Clone)]
pub struct DialogRequest<T: Send + Sync + 'static> {
    pub mode: DialogMode,
    pub selected: Option<T>,
    pub on_close: Callback<Option<T>>,
}

/// Dialog capability a page supplies alongside its field definitions:
/// one named method per variant, each returning the rendered dialog
/// wired to `on_close`. The table decides when a dialog opens; the
/// per-resource implementation decides what it shows.
pub trait RecordDialogs<T: Send + Sync + 'static>: Send + Sync + 'static {
    fn create(&self, on_close: Callback<Option<T>>) -> AnyView;

    fn edit(&self, record: T, on_close: Callback<Option<T>>) -> AnyView;

    fn confirm_delete(&self, record: T, on_close: Callback<Option<T>>) -> AnyView;

    fn view(&self, record: T, on_close: Callback<Option<T>>) -> AnyView;
}

fn sort_marker(query: &TableQuery, key: &str) -> &'static str {
    if query.sort_key.as_deref() != Some(key) {
        return "";
    }
    match query.ascending {
        Some(true) => " \u{25B2}",
        Some(false) => " \u{25BC}",
        None => "",
    }
}

fn default_cell<T: Record>(record: &T, key: &str) -> AnyView {
    match record.field(key).unwrap_or(FieldValue::Empty) {
        FieldValue::Flag(true) => view! { <span class="flag-yes">"\u{2713}"</span> }.into_any(),
        FieldValue::Flag(false) => view! { <span class="flag-no">"\u{2717}"</span> }.into_any(),
        value => view! { <span>{value.to_string()}</span> }.into_any(),
    }
}

fn cell_class(fixed: bool) -> &'static str {
    if fixed {
        "col-pinned"
    } else {
        ""
    }
}

/// Server-paged table over one record type: sortable headers, debounced
/// per-column filters, and, when `has_actions` is set, row actions plus
/// the header "New" affordance, all routed through the page's
/// [`RecordDialogs`]. Fetching pauses while a dialog is open and resumes
/// when it closes, which is also what refreshes the listing.
#[component]
pub fn RecordTable<T, D>(
    fields: Vec<FieldDef<T>>,
    /// Fixed query pairs sent with every fetch, e.g. a parent id scope.
    #[prop(optional)]
    base_params: Vec<(String, String)>,
    /// Enables the action column and the header create affordance.
    #[prop(optional)]
    has_actions: bool,
    dialogs: D,
) -> impl IntoView
where
    T: Record + DeserializeOwned + Send + Sync + 'static,
    D: RecordDialogs<T>,
{
    let fields = StoredValue::new(fields);
    let dialogs = StoredValue::new(dialogs);

    let (rows, setRows) = signal(Vec::<T>::new());
    #[allow(unused_variables)]
    let (total, setTotal) = signal(0u64);
    #[allow(unused_variables)]
    let (loading, setLoading) = signal(true);
    let (query, setQuery) = signal(TableQuery::default());
    let (dialogMode, setDialogMode) = signal(DialogMode::None);
    let (selected, setSelected) = signal(Option::<T>::None);
    #[allow(unused_variables)]
    let debounce = StoredValue::new(FilterDebounce::default());

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        use crate::components::toast::use_toasts;
        use crate::services::records;
        use crate::table::fetch_suppressed;

        let toasts = use_toasts();
        let fetchParams = base_params;
        Effect::new(move |_| {
            // An open dialog pauses fetching; the mode read re-arms the
            // effect so closing the dialog refreshes the listing.
            if fetch_suppressed(dialogMode.get()) {
                return;
            }
            let params = query.get().request_params(&fetchParams);
            setLoading.set(true);
            spawn_local(async move {
                match records::read_page::<T>(&params).await {
                    Ok(envelope) => {
                        setRows.set(envelope.data.unwrap_or_default());
                        if let Some(page) = envelope.pagination {
                            setTotal.set(page.records);
                            // Only write the echo back when the server
                            // actually moved the window, otherwise this
                            // effect would loop.
                            let mut next = query.get_untracked();
                            if next.absorb(page.page, page.limit) {
                                setQuery.set(next);
                            }
                        }
                        setLoading.set(false);
                    }
                    Err(e) => {
                        setLoading.set(false);
                        toasts.error(e.to_string());
                    }
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = &base_params;

    let queueFilter = move |key: &'static str, raw: String| {
        #[cfg(feature = "hydrate")]
        {
            let mut ticket = 0;
            debounce.update_value(|d| ticket = d.arm(key, &raw));
            set_timeout(
                move || {
                    let mut settled = None;
                    debounce.update_value(|d| settled = d.settle(ticket));
                    // A newer keystroke re-armed the window.
                    let Some(pending) = settled else {
                        return;
                    };
                    let mut next = query.get_untracked();
                    if next.commit_filter(&pending.key, &pending.raw) {
                        setRows.set(Vec::new());
                        setQuery.set(next);
                    }
                },
                std::time::Duration::from_millis(crate::table::FILTER_DEBOUNCE_MS),
            );
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, raw);
        }
    };

    let closeDialog = Callback::new(move |outcome: Option<T>| {
        let mode = dialogMode.get_untracked();
        if outcome.is_some() {
            setRows.update(|rows| reconcile_rows(rows, mode, outcome));
        }
        setSelected.set(None);
        setDialogMode.set(DialogMode::None);
    });

    let goPrev = move |_| {
        if query.get_untracked().page > 1 {
            setRows.set(Vec::new());
            setQuery.update(|q| q.set_page(q.page - 1));
        }
    };
    let goNext = move |_| {
        let current = query.get_untracked();
        if current.page < current.page_count(total.get_untracked()) {
            setRows.set(Vec::new());
            setQuery.update(|q| q.set_page(q.page + 1));
        }
    };
    let changeLimit = move |ev| {
        if let Ok(limit) = event_target_value(&ev).parse::<u32>() {
            setRows.set(Vec::new());
            setQuery.update(|q| q.set_limit(limit));
        }
    };

    let headerCells = fields.with_value(|defs| {
        defs.iter()
            .map(|field| {
                let label = field.label;
                let sortKey = field.wire_sort_key();
                let heading = if field.sortable() {
                    view! {
                        <button
                            class="table-sort"
                            on:click=move |_| setQuery.update(|q| q.cycle_sort(sortKey))
                        >
                            {label}
                            {move || query.with(|q| sort_marker(q, sortKey))}
                        </button>
                    }
                        .into_any()
                } else {
                    view! { <span class="table-heading">{label}</span> }.into_any()
                };
                let filter = match field.filter_input_key() {
                    Some(key) => view! {
                        <input
                            class="table-filter"
                            type="text"
                            placeholder="Filter"
                            prop:value=move || query.with(|q| q.display_filter(key))
                            on:input=move |ev| queueFilter(key, event_target_value(&ev))
                        />
                    }
                        .into_any(),
                    None => view! { <span></span> }.into_any(),
                };
                view! {
                    <th
                        class=cell_class(field.fixed)
                        style=field.width.map(|w| format!("width:{w}"))
                    >
                        {heading}
                        {filter}
                    </th>
                }
            })
            .collect_view()
    });

    view! {
        <div class="record-table card">
            {has_actions
                .then(|| {
                    view! {
                        <div class="table-toolbar">
                            <button
                                class="btn btn-primary"
                                on:click=move |_| {
                                    setSelected.set(None);
                                    setDialogMode.set(DialogMode::Create);
                                }
                            >
                                "New"
                            </button>
                        </div>
                    }
                })}
            <table class="data-table">
                <thead>
                    <tr>
                        {headerCells}
                        {has_actions.then(|| view! { <th class="row-actions">"Actions"</th> })}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|record| {
                                let cells = fields
                                    .with_value(|defs| {
                                        defs.iter()
                                            .map(|field| {
                                                let content = match &field.view {
                                                    Some(custom) => custom.run(record.clone()),
                                                    None => default_cell(&record, field.key),
                                                };
                                                view! {
                                                    <td class=cell_class(field.fixed)>
                                                        {content}
                                                    </td>
                                                }
                                            })
                                            .collect_view()
                                    });
                                let actionCell = has_actions
                                    .then(|| {
                                        let viewRecord = record.clone();
                                        let editRecord = record.clone();
                                        let deleteRecord = record.clone();
                                        view! {
                                            <td class="row-actions">
                                                <button
                                                    class="btn btn-ghost btn-sm"
                                                    on:click=move |_| {
                                                        setSelected.set(Some(viewRecord.clone()));
                                                        setDialogMode.set(DialogMode::Read);
                                                    }
                                                >
                                                    "View"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-sm"
                                                    on:click=move |_| {
                                                        setSelected.set(Some(editRecord.clone()));
                                                        setDialogMode.set(DialogMode::Update);
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-sm"
                                                    on:click=move |_| {
                                                        setSelected.set(Some(deleteRecord.clone()));
                                                        setDialogMode.set(DialogMode::Delete);
                                                    }
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        }
                                    });
                                view! { <tr>{cells} {actionCell}</tr> }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            {move || {
                if loading.get() {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading records..."
                        </div>
                    }
                        .into_any()
                } else if rows.with(|r| r.is_empty()) {
                    view! {
                        <div class="table-empty">
                            <p>"No records found"</p>
                        </div>
                    }
                        .into_any()
                } else {
                    view! { <div></div> }.into_any()
                }
            }}
            <div class="table-pager">
                <span class="pager-count">
                    {move || format!("{} records", total.get())}
                </span>
                <label class="pager-size">
                    "Rows"
                    <select
                        prop:value=move || query.with(|q| q.limit.to_string())
                        on:change=changeLimit
                    >
                        {PAGE_SIZE_CHOICES
                            .into_iter()
                            .map(|size| {
                                view! {
                                    <option value=size.to_string()>{size.to_string()}</option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=move || query.with(|q| q.page <= 1)
                    on:click=goPrev
                >
                    "Prev"
                </button>
                <span class="pager-page">
                    {move || {
                        query.with(|q| format!("Page {} of {}", q.page, q.page_count(total.get())))
                    }}
                </span>
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=move || {
                        query.with(|q| q.page >= q.page_count(total.get()))
                    }
                    on:click=goNext
                >
                    "Next"
                </button>
            </div>
        </div>
        {move || {
            let empty = || view! { <div></div> }.into_any();
            match dialogMode.get() {
                DialogMode::None => empty(),
                DialogMode::Create => dialogs.with_value(|d| d.create(closeDialog)),
                DialogMode::Update => match selected.get() {
                    Some(record) => dialogs.with_value(|d| d.edit(record, closeDialog)),
                    None => empty(),
                },
                DialogMode::Delete => match selected.get() {
                    Some(record) => {
                        dialogs.with_value(|d| d.confirm_delete(record, closeDialog))
                    }
                    None => empty(),
                },
                DialogMode::Read => match selected.get() {
                    Some(record) => dialogs.with_value(|d| d.view(record, closeDialog)),
                    None => empty(),
                },
            }
        }}
    }
}
