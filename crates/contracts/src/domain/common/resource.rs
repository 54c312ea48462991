use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RecordId;
use crate::shared::code_reservation::ModelName;

/// Static description of a backend record type plus the per-record accessors
/// every list page needs.
pub trait Resource: Clone + Serialize + DeserializeOwned + 'static {
    type Id: RecordId;

    fn id(&self) -> Self::Id;

    /// Human-readable business code ("BR-0001").
    fn code(&self) -> &str;

    /// Entity index in the dashboard ("a001").
    fn entity_index() -> &'static str;

    /// REST collection ("brands"); also used for export file names.
    fn collection_name() -> &'static str;

    /// Singular UI name ("Brand").
    fn element_name() -> &'static str;

    /// Plural UI name ("Brands").
    fn list_name() -> &'static str;

    /// Key for code reservation; `None` for records created elsewhere.
    fn model_name() -> Option<ModelName> {
        None
    }

    fn api_path() -> String {
        format!("/api/{}", Self::collection_name())
    }

    fn item_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::api_path(), id.as_string())
    }
}
