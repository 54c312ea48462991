use contracts::domain::a006_claim::{Claim, ClaimFilter};
use contracts::enums::ClaimStatus;
use contracts::shared::projection::{
    code_name, datetime_or_placeholder, name_only, number_or_placeholder,
};
use leptos::prelude::*;

use super::details::{status_variant, ClaimStatusDialog};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_key, detail_tab_label};
use crate::shared::components::data_table::{Align, Column, DataTable, RowAction};
use crate::shared::components::filter_panel::{FilterField, FilterInputs};
use crate::shared::config::config;
use crate::shared::list_controller::ListController;

pub fn columns() -> Vec<Column<Claim>> {
    vec![
        Column::text("claim_code", "Claim", |c: &Claim| c.claim_code.clone()).min_width(110.0),
        Column::text("created_at", "Created", |c: &Claim| {
            datetime_or_placeholder(c.created_at.as_deref())
        })
        .min_width(140.0),
        Column::text("customer", "Customer", |c: &Claim| code_name(c.customer.as_ref()))
            .min_width(180.0),
        Column::text("reason", "Reason", |c: &Claim| name_only(c.reason.as_ref())).min_width(180.0),
        Column::text("amount", "Amount", |c: &Claim| number_or_placeholder(c.amount, 2))
            .align(Align::Right)
            .min_width(100.0),
        Column::text("status", "Status", |c: &Claim| ClaimStatus::label(&c.status))
            .badge(|c: &Claim| status_variant(c.status()))
            .min_width(100.0),
    ]
}

pub fn filter_fields() -> Vec<FilterField> {
    vec![
        FilterField::select(
            "status",
            "Status",
            ClaimStatus::all()
                .into_iter()
                .map(|s| (s.code().to_string(), s.display_name().to_string()))
                .collect(),
        ),
        FilterField::text("customer_id", "Customer id"),
    ]
}

pub fn filter_from_inputs(inputs: &FilterInputs) -> ClaimFilter {
    ClaimFilter {
        status: inputs.get("status").and_then(|s| ClaimStatus::from_code(s)),
        customer_id: inputs.get("customer_id").cloned(),
    }
}

#[component]
pub fn ClaimList() -> impl IntoView {
    let tabs = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = ListController::<Claim>::for_resource(config().list.default_page_size);
    let editing = RwSignal::new(None::<Claim>);

    let open = move |claim: Claim| {
        tabs.open_tab(
            &detail_key::<Claim>(Some(&claim.id)),
            &detail_tab_label::<Claim>(Some(&claim.claim_code)),
        );
    };

    view! {
        <div class="page claim-list">
            <div class="page-header">
                <h2>"Claims"</h2>
            </div>
            <DataTable
                controller=controller
                columns=columns()
                on_open=Callback::new(open)
                row_actions=vec![
                    RowAction::new("View", "eye", Callback::new(open)),
                    RowAction::new(
                        "Change status",
                        "edit",
                        Callback::new(move |claim: Claim| {
                            if claim.allowed_transitions().is_empty() {
                                log::debug!("claim {} has no further transitions", claim.claim_code);
                                return;
                            }
                            editing.set(Some(claim));
                        }),
                    ),
                ]
                exportable=true
                searchable=true
                filter_fields=filter_fields()
                on_filter=Callback::new(move |inputs: FilterInputs| {
                    controller.filter(filter_from_inputs(&inputs).to_filters())
                })
            />
            // the dialog bumps the data version, which reloads this table
            <ClaimStatusDialog target=editing on_changed=Callback::new(|_| ()) />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pagination::FilterValue;

    #[test]
    fn filter_inputs_map_to_claim_filter() {
        let inputs: FilterInputs = [("status", "review"), ("customer_id", " 42 ")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let filters = filter_from_inputs(&inputs).to_filters();
        assert_eq!(filters.get("status"), Some(&FilterValue::Text("in_review".into())));
        assert_eq!(filters.get("customer_id"), Some(&FilterValue::Text("42".into())));
    }

    #[test]
    fn json_encoded_reason_is_rendered_by_name() {
        let claim: Claim = serde_json::from_value(serde_json::json!({
            "id": 2,
            "claim_code": "CL-2",
            "reason": "{\"code\":\"LATE\",\"name\":\"Late delivery\"}",
            "status": "settled"
        }))
        .unwrap();
        let cols = columns();
        assert_eq!(cols[3].cell(&claim), "Late delivery");
        assert_eq!(cols[5].cell(&claim), "Settled");
        assert_eq!(cols[5].badge_variant(&claim), Some("success"));
    }
}
