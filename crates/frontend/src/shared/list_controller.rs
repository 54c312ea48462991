use contracts::domain::common::{RecordId, Resource};
use contracts::shared::pagination::{Filters, ListQuery, ListResult, PageRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use std::rc::Rc;

use super::components::data_table::selection::{selection_state, SelectionState};
use super::list_provider::{ListProvider, ListSource};
use super::loading::LoadingCounter;
use super::notifications::{use_notifications, Notifier};
use super::rest_resource::RestResource;

/// Reactive state of one list page: the current query, the last result,
/// the loading counter and the row selection.
pub struct ListController<T: Send + Sync + 'static> {
    pub query: RwSignal<ListQuery>,
    pub result: RwSignal<ListResult<T>>,
    pub loading: LoadingCounter,
    pub selected: RwSignal<HashSet<String>>,
    provider: StoredValue<ListProvider<T>, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for ListController<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListController<T> {}

impl<T: Resource + Send + Sync> ListController<T> {
    /// Must be called inside a component; the provider is cancelled when
    /// that component unmounts.
    pub fn new(source: Rc<dyn ListSource<T>>, notifier: Rc<dyn Notifier>, page_size: u32) -> Self {
        let loading = LoadingCounter::new();
        let provider = StoredValue::new_local(ListProvider::new(source, notifier, Rc::new(loading)));

        on_cleanup(move || {
            provider.try_with_value(|p| p.cancel());
        });

        Self {
            query: RwSignal::new(ListQuery::list(PageRequest::first(page_size))),
            result: RwSignal::new(ListResult::empty(page_size)),
            loading,
            selected: RwSignal::new(HashSet::new()),
            provider,
        }
    }

    /// Controller backed by the resource's REST collection.
    pub fn for_resource(page_size: u32) -> Self {
        let notifier = use_notifications();
        Self::new(Rc::new(RestResource::<T>::new()), Rc::new(notifier), page_size)
    }

    pub fn run(&self, query: ListQuery) {
        self.query.set(query.clone());
        let Some(provider) = self.provider.try_get_value() else {
            return;
        };
        let result = self.result;
        let selected = self.selected;
        spawn_local(async move {
            if let Some(page) = provider.load(query).await {
                result.try_set(page);
                selected.try_update(|s| s.clear());
            }
        });
    }

    pub fn reload(&self) {
        self.run(self.query.get_untracked());
    }

    pub fn go_to_page(&self, page: u32) {
        self.run(self.query.get_untracked().with_page(page));
    }

    pub fn set_page_size(&self, page_size: u32) {
        self.run(self.query.get_untracked().with_page_size(page_size));
    }

    fn page_size(&self) -> u32 {
        self.query.with_untracked(|q| q.request.page_size)
    }

    /// New search text starts again from page 1; blank text lists everything.
    pub fn search(&self, text: String) {
        self.run(ListQuery::search(PageRequest::first(self.page_size()), text));
    }

    pub fn filter(&self, filters: Filters) {
        self.run(ListQuery::filter(PageRequest::first(self.page_size()), filters));
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn toggle_row(&self, id: String, checked: bool) {
        self.selected.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    }

    pub fn page_ids(&self) -> Vec<String> {
        self.result
            .with(|r| r.data.iter().map(|row| row.id().as_string()).collect())
    }

    pub fn toggle_page(&self, checked: bool) {
        let ids = self.page_ids();
        self.selected.update(|s| {
            for id in ids {
                if checked {
                    s.insert(id);
                } else {
                    s.remove(&id);
                }
            }
        });
    }

    pub fn selection_state(&self) -> SelectionState {
        let ids = self.page_ids();
        self.selected.with(|s| selection_state(&ids, s))
    }

    pub fn selected_ids(&self) -> Vec<T::Id> {
        self.selected.with_untracked(|s| {
            s.iter()
                .filter_map(|id| T::Id::from_string(id).ok())
                .collect()
        })
    }

    pub fn clear_selection(&self) {
        self.selected.set(HashSet::new());
    }
}
