//! Generic table used by every list page.
//!
//! The page builds a [`ListController`] and a set of [`Column`]s; the table
//! adds the toolbar, search box, filter panel, selection, row actions and
//! pagination around them.

pub mod column;
pub mod selection;

pub use column::{Align, Column};

use contracts::domain::common::{RecordId, Resource};
use contracts::shared::export::ExportFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::filter_panel::{
    filters_from_inputs, FilterField, FilterInputs, FilterPanel,
};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::search_input::SearchInput;
use crate::shared::components::ui::badge::Badge;
use crate::shared::config::config;
use crate::shared::export::{request_for, run_export};
use crate::shared::icons::icon;
use crate::shared::list_controller::ListController;
use crate::shared::notifications::{use_notifications, Notification, Notifier};
use crate::shared::rest_resource::{BulkDeleteOutcome, RestResource};
use self::selection::{TableCellCheckbox, TableHeaderCheckbox};

/// Button shown in the actions cell of every row.
pub struct RowAction<T: 'static> {
    pub title: &'static str,
    pub icon: &'static str,
    pub on_click: Callback<T>,
}

impl<T: 'static> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            title: self.title,
            icon: self.icon,
            on_click: self.on_click,
        }
    }
}

impl<T: 'static> RowAction<T> {
    pub fn new(title: &'static str, icon: &'static str, on_click: Callback<T>) -> Self {
        Self {
            title,
            icon,
            on_click,
        }
    }
}

/// Browser confirm dialog; false when there is no window.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn bulk_delete_notification<Id>(outcome: &BulkDeleteOutcome<Id>) -> Notification {
    let deleted = outcome.deleted.len();
    if outcome.is_complete() {
        return Notification::success(format!("Deleted: {}", deleted));
    }
    let first_error = outcome
        .failed
        .first()
        .map(|(_, err)| err.user_message())
        .unwrap_or_default();
    Notification::error(format!(
        "Deleted: {}, failed: {}. {}",
        deleted,
        outcome.failed.len(),
        first_error
    ))
}

async fn delete_and_reload<T: Resource + Send + Sync>(
    controller: ListController<T>,
    ids: Vec<T::Id>,
    notifier: Rc<dyn Notifier>,
) {
    let outcome = RestResource::<T>::new().delete_many(ids).await;
    for (id, err) in &outcome.failed {
        log::warn!("delete {} {} failed: {}", T::element_name(), id.as_string(), err);
    }
    notifier.notify(bulk_delete_notification(&outcome));
    controller.clear_selection();
    controller.reload();
}

#[component]
pub fn DataTable<T>(
    controller: ListController<T>,
    columns: Vec<Column<T>>,
    #[prop(optional)] on_add: Option<Callback<()>>,
    /// Double click on a row
    #[prop(optional)]
    on_open: Option<Callback<T>>,
    #[prop(optional)] row_actions: Vec<RowAction<T>>,
    /// Row delete, bulk selection and bulk delete
    #[prop(optional)]
    deletable: bool,
    #[prop(optional)] exportable: bool,
    #[prop(optional)] searchable: bool,
    #[prop(optional)] filter_fields: Vec<FilterField>,
    /// Replaces the default inputs-to-filters mapping
    #[prop(optional)]
    on_filter: Option<Callback<FilterInputs>>,
) -> impl IntoView
where
    T: Resource + Send + Sync,
{
    let settings = config().list.clone();
    let notifier = use_notifications();
    let has_actions = deletable || !row_actions.is_empty();
    let columns = StoredValue::new(columns);
    let row_actions = StoredValue::new(row_actions);

    controller.reload();

    // saves in detail tabs bump the version
    if let Some(ctx) = use_context::<AppGlobalContext>() {
        Effect::new(move |prev: Option<u64>| {
            let version = ctx.data_version.get();
            if prev.is_some_and(|p| p != version) {
                controller.reload();
            }
            version
        });
    }

    let delete_ids = move |ids: Vec<T::Id>, message: String| {
        if ids.is_empty() || !confirm(&message) {
            return;
        }
        spawn_local(delete_and_reload(controller, ids, Rc::new(notifier)));
    };

    let delete_selected = move || {
        let ids = controller.selected_ids();
        let message = format!("Delete selected records? Count: {}", ids.len());
        delete_ids(ids, message);
    };

    let export = move |format: ExportFormat| {
        let request = request_for(format, &controller.query.get_untracked());
        spawn_local(async move {
            run_export::<T>(request, &notifier).await;
        });
    };

    let apply_filter = Callback::new(move |inputs: FilterInputs| match on_filter {
        Some(custom) => custom.run(inputs),
        None => controller.filter(filters_from_inputs(&inputs)),
    });

    let render_row = move |row: T| {
        let row_id = row.id().as_string();
        let row_for_open = row.clone();
        let cells = columns.with_value(|cols| {
            cols.iter()
                .map(|column| {
                    let text = column.cell(&row);
                    let content = match column.badge_variant(&row) {
                        Some(variant) => {
                            view! { <Badge variant=variant.to_string()>{text}</Badge> }.into_any()
                        }
                        None => view! { <TableCellLayout truncate=true>{text}</TableCellLayout> }
                            .into_any(),
                    };
                    view! { <TableCell class=column.align.css_class()>{content}</TableCell> }
                })
                .collect_view()
        });
        let actions = has_actions.then(|| {
            let custom = row_actions
                .get_value()
                .into_iter()
                .map(|RowAction { title, icon: icon_name, on_click }| {
                    let row = row.clone();
                    view! {
                        <button
                            class="table__action"
                            title=title
                            on:click=move |e| {
                                e.stop_propagation();
                                on_click.run(row.clone());
                            }
                        >
                            {icon(icon_name)}
                        </button>
                    }
                })
                .collect_view();
            let row_for_delete = row.clone();
            view! {
                <TableCell class="table__actions">
                    {custom}
                    {deletable.then(|| view! {
                        <button
                            class="table__action table__action--danger"
                            title="Delete"
                            on:click=move |e| {
                                e.stop_propagation();
                                let message = format!(
                                    "Delete {} {}?",
                                    T::element_name(),
                                    row_for_delete.code()
                                );
                                delete_ids(vec![row_for_delete.id()], message);
                            }
                        >
                            {icon("trash")}
                        </button>
                    })}
                </TableCell>
            }
        });

        view! {
            <TableRow on:dblclick=move |_| {
                if let Some(open) = on_open {
                    open.run(row_for_open.clone());
                }
            }>
                {deletable.then(|| view! {
                    <TableCellCheckbox
                        item_id=row_id.clone()
                        selected=controller.selected
                        on_change=Callback::new(move |(id, checked)| controller.toggle_row(id, checked))
                    />
                })}
                {cells}
                {actions}
            </TableRow>
        }
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <div class="data-table__toolbar-left">
                    {on_add.map(|add| view! {
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| add.run(())>
                            {icon("plus")}
                            " Add"
                        </Button>
                    })}
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| controller.reload()>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    {deletable.then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || controller.selected.with(|s| s.is_empty()))
                            on_click=move |_| delete_selected()
                        >
                            {icon("trash")}
                            {move || format!(" Delete ({})", controller.selected.with(|s| s.len()))}
                        </Button>
                    })}
                    {exportable.then(|| {
                        ExportFormat::all()
                            .into_iter()
                            .map(|format| view! {
                                <Button appearance=ButtonAppearance::Subtle on_click=move |_| export(format)>
                                    {icon("download")}
                                    {format!(" {}", format.display_name())}
                                </Button>
                            })
                            .collect_view()
                    })}
                </div>
                <div class="data-table__toolbar-right">
                    {searchable.then(|| view! {
                        <SearchInput
                            on_search=Callback::new(move |text: String| controller.search(text))
                            active=Signal::derive(move || {
                                controller.query.with(|q| q.search_text().map(str::to_string))
                            })
                            debounce_ms=settings.search_debounce_ms
                            placeholder=format!("Search {}...", T::list_name().to_lowercase())
                        />
                    })}
                </div>
            </div>

            {(!filter_fields.is_empty()).then(|| view! {
                <FilterPanel fields=filter_fields on_apply=apply_filter />
            })}

            <div class="data-table__body">
                <Show when=move || controller.is_loading()>
                    <div class="data-table__overlay">
                        <Spinner />
                    </div>
                </Show>
                <Table>
                    <TableHeader>
                        <TableRow>
                            {deletable.then(|| view! {
                                <TableHeaderCheckbox
                                    state=Signal::derive(move || controller.selection_state())
                                    on_change=Callback::new(move |checked| controller.toggle_page(checked))
                                />
                            })}
                            {columns.with_value(|cols| {
                                cols.iter()
                                    .map(|column| {
                                        let title = column.title;
                                        let min_width = column.min_width;
                                        view! {
                                            <TableHeaderCell resizable=true min_width=min_width>
                                                {title}
                                            </TableHeaderCell>
                                        }
                                    })
                                    .collect_view()
                            })}
                            {has_actions.then(|| view! {
                                <TableHeaderCell resizable=false>""</TableHeaderCell>
                            })}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || controller.result.get().data
                            key=|row: &T| row.id().as_string()
                            children=render_row
                        />
                    </TableBody>
                </Table>
                <Show when=move || controller.result.with(|r| r.is_empty()) && !controller.is_loading()>
                    <div class="data-table__empty">"No records found"</div>
                </Show>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || controller.result.with(|r| r.current_page))
                total_pages=Signal::derive(move || controller.result.with(|r| r.total))
                total_records=Signal::derive(move || controller.result.with(|r| r.total_records))
                page_size=Signal::derive(move || controller.query.with(|q| q.request.page_size))
                on_page_change=Callback::new(move |page| controller.go_to_page(page))
                on_page_size_change=Callback::new(move |size| controller.set_page_size(size))
                page_size_options=settings.page_size_options.clone()
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api_envelope::ApiError;
    use crate::shared::notifications::NotificationKind;

    #[test]
    fn complete_bulk_delete_is_a_success() {
        let outcome: BulkDeleteOutcome<i64> = BulkDeleteOutcome {
            deleted: vec![1, 2, 3],
            failed: vec![],
        };
        let note = bulk_delete_notification(&outcome);
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.message, "Deleted: 3");
    }

    #[test]
    fn partial_bulk_delete_reports_failures() {
        let outcome: BulkDeleteOutcome<i64> = BulkDeleteOutcome {
            deleted: vec![1],
            failed: vec![(2, ApiError::Network("offline".into()))],
        };
        let note = bulk_delete_notification(&outcome);
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(note.message.starts_with("Deleted: 1, failed: 1."));
    }
}
