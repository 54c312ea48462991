/// Hands an export result to the browser as a file download
use contracts::domain::common::Resource;
use contracts::shared::export::{ExportFormat, ExportOutcome, ExportRequest};
use contracts::shared::pagination::{ListQuery, QueryKind};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::notifications::{Notification, Notifier};
use super::rest_resource::RestResource;

/// Export request matching what the table currently shows
pub fn request_for(format: ExportFormat, query: &ListQuery) -> ExportRequest {
    match &query.kind {
        QueryKind::List => ExportRequest::new(format),
        QueryKind::Search(text) => ExportRequest::new(format).with_search(Some(text.clone())),
        QueryKind::Filter(filters) => ExportRequest::new(format).with_filters(filters.clone()),
    }
}

/// Fetches the export for `T` and starts the download; failures become a notification
pub async fn run_export<T: Resource>(request: ExportRequest, notifier: &dyn Notifier) {
    let format = request.format;
    let outcome = match RestResource::<T>::new().export(&request).await {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("export of {} failed: {}", T::collection_name(), err);
            notifier.notify(Notification::from_api_error(&err));
            return;
        }
    };
    match deliver(&outcome) {
        Ok(()) => notifier.notify(Notification::success(format!(
            "{} exported to {}",
            T::list_name(),
            format.display_name()
        ))),
        Err(err) => {
            log::error!("download failed: {}", err);
            notifier.notify(Notification::error("Could not start the download"));
        }
    }
}

pub fn deliver(outcome: &ExportOutcome) -> Result<(), String> {
    match outcome {
        ExportOutcome::DownloadUrl(url) => click_link(url, None),
        ExportOutcome::Payload {
            bytes,
            mime,
            file_name,
        } => {
            let blob = create_blob(bytes, mime)?;
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|e| format!("Failed to create object URL: {:?}", e))?;
            let clicked = click_link(&url, Some(file_name));
            Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
            clicked
        }
    }
}

fn create_blob(bytes: &[u8], mime: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn click_link(href: &str, file_name: Option<&str>) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(href);
    match file_name {
        Some(name) => anchor.set_download(name),
        None => anchor.set_target("_blank"),
    }
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pagination::{FilterValue, Filters, PageRequest};

    #[test]
    fn export_follows_the_visible_query() {
        let page = PageRequest::first(20);

        let search = ListQuery::search(page, "acme");
        assert_eq!(
            request_for(ExportFormat::Csv, &search),
            ExportRequest::new(ExportFormat::Csv).with_search(Some("acme".into()))
        );

        let mut filters = Filters::new();
        filters.insert("status".into(), FilterValue::Text("approved".into()));
        let filtered = ListQuery::filter(page, filters.clone());
        assert_eq!(
            request_for(ExportFormat::Xlsx, &filtered),
            ExportRequest::new(ExportFormat::Xlsx).with_filters(filters)
        );

        assert_eq!(
            request_for(ExportFormat::Csv, &ListQuery::list(page)),
            ExportRequest::new(ExportFormat::Csv)
        );
    }
}
