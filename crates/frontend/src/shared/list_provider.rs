//! Paginated list provider.
//!
//! Every list page reads its rows through a [`ListProvider`]. The provider
//! picks the endpoint flavour from the [`ListQuery`] (plain list, search,
//! filter), applies one error policy for all of them and drops responses
//! that were overtaken by a newer request.

use async_trait::async_trait;
use contracts::shared::api_envelope::ApiError;
use contracts::shared::pagination::{Filters, ListQuery, ListResult, PageRequest, QueryKind};
use std::cell::Cell;
use std::rc::Rc;

use super::loading::{LoadingFlag, LoadingGuard};
use super::notifications::{Notification, Notifier};

/// Backend side of a list page.
#[async_trait(?Send)]
pub trait ListSource<T> {
    async fn list(&self, request: PageRequest) -> Result<ListResult<T>, ApiError>;

    async fn search(&self, text: &str, request: PageRequest) -> Result<ListResult<T>, ApiError>;

    async fn filter_by(
        &self,
        filters: &Filters,
        request: PageRequest,
    ) -> Result<ListResult<T>, ApiError>;
}

pub struct ListProvider<T> {
    source: Rc<dyn ListSource<T>>,
    notifier: Rc<dyn Notifier>,
    loading: Rc<dyn LoadingFlag>,
    ticket: Rc<Cell<u64>>,
    cancelled: Rc<Cell<bool>>,
}

impl<T> Clone for ListProvider<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            notifier: self.notifier.clone(),
            loading: self.loading.clone(),
            ticket: self.ticket.clone(),
            cancelled: self.cancelled.clone(),
        }
    }
}

impl<T: 'static> ListProvider<T> {
    pub fn new(
        source: Rc<dyn ListSource<T>>,
        notifier: Rc<dyn Notifier>,
        loading: Rc<dyn LoadingFlag>,
    ) -> Self {
        Self {
            source,
            notifier,
            loading,
            ticket: Rc::new(Cell::new(0)),
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    async fn request(&self, query: &ListQuery) -> Result<ListResult<T>, ApiError> {
        match &query.kind {
            QueryKind::List => self.source.list(query.request).await,
            QueryKind::Search(text) => self.source.search(text, query.request).await,
            QueryKind::Filter(filters) => self.source.filter_by(filters, query.request).await,
        }
    }

    /// A failed request is reported once and shows up as an empty page
    /// (`total == 0`); the caller never sees the error.
    fn settle(&self, outcome: Result<ListResult<T>, ApiError>, page_size: u32) -> ListResult<T> {
        match outcome {
            Ok(result) => result,
            Err(err) => {
                log::warn!("list request failed: {}", err);
                self.notifier.notify(Notification::from_api_error(&err));
                ListResult::empty(page_size)
            }
        }
    }

    pub async fn fetch(&self, query: &ListQuery) -> ListResult<T> {
        let outcome = self.request(query).await;
        self.settle(outcome, query.request.page_size)
    }

    /// Like [`fetch`](Self::fetch) but tracked by the loading flag. Returns
    /// `None` when a newer `load` started meanwhile or the provider was
    /// cancelled; such responses are dropped without notifying.
    pub async fn load(&self, query: ListQuery) -> Option<ListResult<T>> {
        if self.cancelled.get() {
            return None;
        }
        let ticket = self.ticket.get() + 1;
        self.ticket.set(ticket);

        let _guard = LoadingGuard::new(self.loading.clone());
        let outcome = self.request(&query).await;

        if self.cancelled.get() || self.ticket.get() != ticket {
            log::debug!("discarding stale list response (ticket {})", ticket);
            return None;
        }
        Some(self.settle(outcome, query.request.page_size))
    }

    /// Called when the owning page unmounts.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::loading::tests::CountingFlag;
    use crate::shared::notifications::tests::RecordingNotifier;
    use crate::shared::notifications::NotificationKind;
    use contracts::shared::pagination::FilterValue;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    /// Source that records which endpoint was hit and can hold responses
    /// until a gate is released.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub calls: RefCell<Vec<String>>,
        pub gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
        pub fail_with: RefCell<Option<ApiError>>,
    }

    impl FakeSource {
        async fn respond(&self, call: String, request: PageRequest) -> Result<ListResult<u32>, ApiError> {
            self.calls.borrow_mut().push(call);
            let gate = self.gates.borrow_mut().pop_front();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if let Some(err) = self.fail_with.borrow().clone() {
                return Err(err);
            }
            Ok(ListResult {
                data: vec![request.page],
                total: 5,
                current_page: request.page,
                page_size: request.page_size,
                total_records: Some(50),
            })
        }
    }

    #[async_trait(?Send)]
    impl ListSource<u32> for FakeSource {
        async fn list(&self, request: PageRequest) -> Result<ListResult<u32>, ApiError> {
            self.respond("list".into(), request).await
        }

        async fn search(&self, text: &str, request: PageRequest) -> Result<ListResult<u32>, ApiError> {
            self.respond(format!("search:{}", text), request).await
        }

        async fn filter_by(&self, filters: &Filters, request: PageRequest) -> Result<ListResult<u32>, ApiError> {
            let keys: Vec<&str> = filters.keys().map(String::as_str).collect();
            self.respond(format!("filter:{}", keys.join(",")), request).await
        }
    }

    struct Fixture {
        source: Rc<FakeSource>,
        notifier: Rc<RecordingNotifier>,
        flag: Rc<CountingFlag>,
        provider: ListProvider<u32>,
    }

    fn fixture() -> Fixture {
        let source = Rc::new(FakeSource::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let flag = Rc::new(CountingFlag::default());
        let provider = ListProvider::new(source.clone(), notifier.clone(), flag.clone());
        Fixture {
            source,
            notifier,
            flag,
            provider,
        }
    }

    #[tokio::test]
    async fn rejected_source_yields_empty_page_and_one_notification() {
        let f = fixture();
        *f.source.fail_with.borrow_mut() = Some(ApiError::Network("offline".into()));

        let result = f.provider.fetch(&ListQuery::list(PageRequest::new(3, 25))).await;

        assert!(result.data.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.page_size, 25);
        assert_eq!(f.notifier.count(), 1);
        assert_eq!(f.notifier.kinds(), vec![NotificationKind::Error]);
    }

    #[tokio::test]
    async fn dispatches_by_query_kind() {
        let f = fixture();
        let mut filters = Filters::new();
        filters.insert("status".into(), FilterValue::Text("approved".into()));

        f.provider.fetch(&ListQuery::list(PageRequest::default())).await;
        f.provider.fetch(&ListQuery::search(PageRequest::default(), " acme ")).await;
        f.provider.fetch(&ListQuery::filter(PageRequest::default(), filters)).await;
        f.provider.fetch(&ListQuery::search(PageRequest::default(), "   ")).await;

        assert_eq!(
            *f.source.calls.borrow(),
            vec!["list", "search:acme", "filter:status", "list"]
        );
        assert_eq!(f.notifier.count(), 0);
    }

    #[tokio::test]
    async fn newer_request_wins() {
        let f = fixture();
        let (release_first, gate) = oneshot::channel();
        f.source.gates.borrow_mut().push_back(gate);

        let first = f.provider.load(ListQuery::list(PageRequest::new(1, 10)));
        let second = async {
            let result = f.provider.load(ListQuery::list(PageRequest::new(2, 10))).await;
            let _ = release_first.send(());
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_none());
        assert_eq!(second.map(|r| r.current_page), Some(2));
        assert_eq!(f.flag.current.get(), 0);
        assert_eq!(f.flag.peak.get(), 2);
    }

    #[tokio::test]
    async fn stale_failure_is_not_notified() {
        let f = fixture();
        let (release_first, gate) = oneshot::channel();
        f.source.gates.borrow_mut().push_back(gate);
        *f.source.fail_with.borrow_mut() = Some(ApiError::Network("offline".into()));

        let first = f.provider.load(ListQuery::list(PageRequest::new(1, 10)));
        let second = async {
            let result = f.provider.load(ListQuery::list(PageRequest::new(2, 10))).await;
            let _ = release_first.send(());
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_none());
        assert_eq!(second.map(|r| r.total), Some(0));
        assert_eq!(f.notifier.count(), 1);
    }

    #[tokio::test]
    async fn cancelled_provider_discards_in_flight_response() {
        let f = fixture();
        let (release, gate) = oneshot::channel();
        f.source.gates.borrow_mut().push_back(gate);

        let pending = f.provider.load(ListQuery::list(PageRequest::default()));
        let cancel = async {
            f.provider.cancel();
            let _ = release.send(());
        };
        let (result, _) = tokio::join!(pending, cancel);

        assert!(result.is_none());
        assert_eq!(f.flag.current.get(), 0);
        assert!(f.provider.load(ListQuery::list(PageRequest::default())).await.is_none());
        assert_eq!(f.source.calls.borrow().len(), 1);
    }
}
