//! Maps a tab key to its view. List keys come from [`list_key`], detail keys
//! from [`parse_detail_key`].

use contracts::domain::a001_brand::Brand;
use contracts::domain::a002_route_type::RouteType;
use contracts::domain::a003_warehouse::Warehouse;
use contracts::domain::a004_distributor::Distributor;
use contracts::domain::a005_sales_order::SalesOrder;
use contracts::domain::a006_claim::Claim;
use leptos::prelude::*;

use super::tab_labels::{list_key, parse_detail_key};
use crate::domain::a001_brand::ui::details::BrandDetails;
use crate::domain::a001_brand::ui::list::BrandList;
use crate::domain::a002_route_type::ui::details::RouteTypeDetails;
use crate::domain::a002_route_type::ui::list::RouteTypeList;
use crate::domain::a003_warehouse::ui::details::WarehouseDetails;
use crate::domain::a003_warehouse::ui::list::WarehouseList;
use crate::domain::a004_distributor::ui::details::DistributorDetails;
use crate::domain::a004_distributor::ui::list::DistributorList;
use crate::domain::a005_sales_order::ui::details::SalesOrderDetails;
use crate::domain::a005_sales_order::ui::list::SalesOrderList;
use crate::domain::a006_claim::ui::details::ClaimDetails;
use crate::domain::a006_claim::ui::list::ClaimList;
use crate::layout::global_context::AppGlobalContext;

/// Tab callbacks for detail forms: saving refreshes lists, both close the tab.
#[derive(Clone, Copy)]
struct DetailCallbacks {
    on_saved: Callback<()>,
    on_close: Callback<()>,
}

impl DetailCallbacks {
    fn new(key: &str, tabs_store: AppGlobalContext) -> Self {
        let key = StoredValue::new(key.to_string());
        Self {
            on_saved: Callback::new(move |_| {
                tabs_store.bump_data_version();
                key.with_value(|k| tabs_store.close_tab(k));
            }),
            on_close: Callback::new(move |_| key.with_value(|k| tabs_store.close_tab(k))),
        }
    }
}

fn not_found(what: &str) -> AnyView {
    view! { <div class="placeholder">{format!("{} not found", what)}</div> }.into_any()
}

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let cb = DetailCallbacks::new(key, tabs_store);

    if key == list_key::<Brand>() {
        return view! { <BrandList /> }.into_any();
    }
    if let Some(id) = parse_detail_key::<Brand>(key) {
        return view! { <BrandDetails id=id on_saved=cb.on_saved on_cancel=cb.on_close /> }
            .into_any();
    }

    if key == list_key::<RouteType>() {
        return view! { <RouteTypeList /> }.into_any();
    }
    if let Some(id) = parse_detail_key::<RouteType>(key) {
        return view! { <RouteTypeDetails id=id on_saved=cb.on_saved on_cancel=cb.on_close /> }
            .into_any();
    }

    if key == list_key::<Warehouse>() {
        return view! { <WarehouseList /> }.into_any();
    }
    if let Some(id) = parse_detail_key::<Warehouse>(key) {
        return view! { <WarehouseDetails id=id on_saved=cb.on_saved on_cancel=cb.on_close /> }
            .into_any();
    }

    if key == list_key::<Distributor>() {
        return view! { <DistributorList /> }.into_any();
    }
    if let Some(id) = parse_detail_key::<Distributor>(key) {
        return view! { <DistributorDetails id=id on_saved=cb.on_saved on_cancel=cb.on_close /> }
            .into_any();
    }

    // orders and claims are read-only here, so there is no add form
    if key == list_key::<SalesOrder>() {
        return view! { <SalesOrderList /> }.into_any();
    }
    if let Some(id) = parse_detail_key::<SalesOrder>(key) {
        return match id {
            Some(id) => view! { <SalesOrderDetails id=id on_close=cb.on_close /> }.into_any(),
            None => not_found("Sales order"),
        };
    }

    if key == list_key::<Claim>() {
        return view! { <ClaimList /> }.into_any();
    }
    if let Some(id) = parse_detail_key::<Claim>(key) {
        return match id {
            Some(id) => view! { <ClaimDetails id=id on_close=cb.on_close /> }.into_any(),
            None => not_found("Claim"),
        };
    }

    log::warn!("unknown tab key: {}", key);
    view! { <div class="placeholder">"Not implemented yet"</div> }.into_any()
}
