//! CRUD calls shared by every backend collection.
//!
//! `RestResource<Brand>` talks to `/api/brands`, `RestResource<Claim>` to
//! `/api/claims` and so on; the paths come from [`Resource`].

use async_trait::async_trait;
use contracts::domain::common::Resource;
use contracts::shared::api_envelope::{ApiEnvelope, ApiError};
use contracts::shared::code_reservation::{
    GenerateCodeRequest, GeneratedCode, ModelName, SaveFinalCodeRequest,
};
use contracts::shared::export::{file_name, ExportOutcome, ExportRequest};
use contracts::shared::pagination::{Filters, ListQuery, ListResult, PageRequest};
use serde::Serialize;
use std::marker::PhantomData;

use super::api_client::{delete, get_json, get_raw, post_json, put_json};
use super::api_utils::with_query;
use super::code_reservation::CodeService;
use super::date_utils::today;
use super::list_provider::ListSource;

/// Result of deleting several records one by one.
#[derive(Debug, Clone)]
pub struct BulkDeleteOutcome<Id> {
    pub deleted: Vec<Id>,
    pub failed: Vec<(Id, ApiError)>,
}

impl<Id> BulkDeleteOutcome<Id> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct RestResource<T> {
    _marker: PhantomData<T>,
}

impl<T> Default for RestResource<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

/// Create/update bodies are not always the saved record; `None` when the
/// backend answered with something else (a message, an id).
fn maybe_item<T: Resource>(envelope: ApiEnvelope) -> Option<T> {
    envelope.into_item::<T>().ok()
}

impl<T: Resource> RestResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch(&self, query: &ListQuery) -> Result<ListResult<T>, ApiError> {
        let path = with_query(&T::api_path(), &query.to_query_pairs());
        get_json(&path).await?.into_list(query.request)
    }

    pub async fn get_by_id(&self, id: &T::Id) -> Result<T, ApiError> {
        get_json(&T::item_path(id)).await?.into_item()
    }

    pub async fn create<D: Serialize>(&self, dto: &D) -> Result<Option<T>, ApiError> {
        let envelope = post_json(&T::api_path(), dto).await?;
        Ok(maybe_item(envelope))
    }

    pub async fn update<D: Serialize>(&self, id: &T::Id, dto: &D) -> Result<Option<T>, ApiError> {
        let envelope = put_json(&T::item_path(id), dto).await?;
        Ok(maybe_item(envelope))
    }

    pub async fn delete(&self, id: &T::Id) -> Result<(), ApiError> {
        delete(&T::item_path(id)).await.map(|_| ())
    }

    /// Sequential deletes; one failure does not stop the rest.
    pub async fn delete_many(&self, ids: Vec<T::Id>) -> BulkDeleteOutcome<T::Id> {
        let mut outcome = BulkDeleteOutcome {
            deleted: Vec::new(),
            failed: Vec::new(),
        };
        for id in ids {
            match self.delete(&id).await {
                Ok(()) => outcome.deleted.push(id),
                Err(err) => outcome.failed.push((id, err)),
            }
        }
        outcome
    }

    pub async fn export(&self, request: &ExportRequest) -> Result<ExportOutcome, ApiError> {
        let path = with_query(
            &format!("{}/export", T::api_path()),
            &request.to_query_pairs(),
        );
        let raw = get_raw(&path).await?;
        let name = file_name(T::collection_name(), request.format, today());
        ExportOutcome::from_response(raw.content_type.as_deref(), raw.body, request.format, name)
    }
}

#[async_trait(?Send)]
impl<T: Resource> ListSource<T> for RestResource<T> {
    async fn list(&self, request: PageRequest) -> Result<ListResult<T>, ApiError> {
        self.fetch(&ListQuery::list(request)).await
    }

    async fn search(&self, text: &str, request: PageRequest) -> Result<ListResult<T>, ApiError> {
        self.fetch(&ListQuery::search(request, text)).await
    }

    async fn filter_by(
        &self,
        filters: &Filters,
        request: PageRequest,
    ) -> Result<ListResult<T>, ApiError> {
        self.fetch(&ListQuery::filter(request, filters.clone())).await
    }
}

/// `/api/code/generate` and `/api/code/save-final`.
#[derive(Clone, Copy, Default)]
pub struct RestCodeService;

#[async_trait(?Send)]
impl CodeService for RestCodeService {
    async fn generate_code(&self, model: ModelName) -> Result<GeneratedCode, ApiError> {
        post_json("/api/code/generate", &GenerateCodeRequest::new(model))
            .await?
            .into_item()
    }

    async fn save_final_code(&self, request: &SaveFinalCodeRequest) -> Result<(), ApiError> {
        post_json("/api/code/save-final", request).await.map(|_| ())
    }
}
