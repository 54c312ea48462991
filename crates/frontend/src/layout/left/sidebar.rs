//! Sidebar with collapsible menu groups; every item opens a list tab.

use contracts::domain::a001_brand::Brand;
use contracts::domain::a002_route_type::RouteType;
use contracts::domain::a003_warehouse::Warehouse;
use contracts::domain::a004_distributor::Distributor;
use contracts::domain::a005_sales_order::SalesOrder;
use contracts::domain::a006_claim::Claim;
use contracts::domain::common::Resource;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::list_key;
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub key: String,
    pub label: &'static str,
    pub icon: &'static str,
}

impl MenuItem {
    fn list_of<T: Resource>(icon: &'static str) -> Self {
        Self {
            key: list_key::<T>(),
            label: T::list_name(),
            icon,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub items: Vec<MenuItem>,
}

pub fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "master_data",
            label: "Master data",
            icon: "database",
            items: vec![
                MenuItem::list_of::<Brand>("tag"),
                MenuItem::list_of::<RouteType>("truck"),
                MenuItem::list_of::<Warehouse>("layers"),
                MenuItem::list_of::<Distributor>("store"),
            ],
        },
        MenuGroup {
            id: "operations",
            label: "Operations",
            icon: "file-text",
            items: vec![
                MenuItem::list_of::<SalesOrder>("file-text"),
                MenuItem::list_of::<Claim>("alert-circle"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let expanded_groups = RwSignal::new(vec!["master_data", "operations"]);

    view! {
        <div class="app-sidebar__content">
            {menu_groups().into_iter().map(|group| {
                let group_id = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|items| {
                                    match items.iter().position(|x| *x == group_id) {
                                        Some(pos) => {
                                            items.remove(pos);
                                        }
                                        None => items.push(group_id),
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || {
                                    expanded_groups.with(|g| g.contains(&group_id))
                                }
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.with(|g| g.contains(&group_id))>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|item| {
                                    let key = StoredValue::new(item.key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                key.with_value(|k| ctx.active.with(|a| a.as_deref() == Some(k.as_str())))
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| key.with_value(|k| ctx.open_tab(k, item.label))
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(item.icon)}
                                                <span>{item.label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_opens_list_tabs() {
        let keys: Vec<String> = menu_groups()
            .into_iter()
            .flat_map(|g| g.items)
            .map(|i| i.key)
            .collect();
        assert_eq!(
            keys,
            vec![
                "a001_brands",
                "a002_route-types",
                "a003_warehouses",
                "a004_distributors",
                "a005_sales-orders",
                "a006_claims",
            ]
        );
    }
}
