use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use super::tabs::tab_labels::tab_label_for_key;

/// Open tabs, panel visibility and a counter that list pages watch to
/// reload after a record was saved elsewhere.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    pub data_version: RwSignal<u64>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            data_version: RwSignal::new(0),
        }
    }

    /// Restores `?active=<key>` on load and keeps it in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active").cloned() {
            self.open_tab(&active_key, &tab_label_for_key(&active_key));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        self.opened.update(|tabs| open_in(tabs, key, title));
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        let mut next_active = None;
        let was_active = self
            .active
            .with_untracked(|active| active.as_deref() == Some(key));
        self.opened.update(|tabs| next_active = close_in(tabs, key));
        if was_active {
            self.active.set(next_active);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    /// Called after a create/update/delete so open lists refetch.
    pub fn bump_data_version(&self) {
        self.data_version.update(|v| *v += 1);
    }

    pub fn close_all(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Adds the tab unless a tab with that key is already open.
fn open_in(tabs: &mut Vec<Tab>, key: &str, title: &str) {
    if !tabs.iter().any(|tab| tab.key == key) {
        tabs.push(Tab {
            key: key.to_string(),
            title: title.to_string(),
        });
    }
}

/// Removes the tab and returns the key that should become active.
fn close_in(tabs: &mut Vec<Tab>, key: &str) -> Option<String> {
    tabs.retain(|tab| tab.key != key);
    tabs.last().map(|t| t.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_twice_keeps_one_tab() {
        let mut tabs = Vec::new();
        open_in(&mut tabs, "a001_brand", "Brands");
        open_in(&mut tabs, "a001_brand", "Brands again");
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].title, "Brands");
    }

    #[test]
    fn closing_activates_the_last_remaining_tab() {
        let mut tabs = Vec::new();
        open_in(&mut tabs, "a001_brand", "Brands");
        open_in(&mut tabs, "a006_claim", "Claims");
        open_in(&mut tabs, "a003_warehouse", "Warehouses");
        assert_eq!(close_in(&mut tabs, "a003_warehouse"), Some("a006_claim".into()));
        assert_eq!(close_in(&mut tabs, "a006_claim"), Some("a001_brand".into()));
        assert_eq!(close_in(&mut tabs, "a001_brand"), None);
    }
}
