//! Claim card and the status change dialog. Claims are created in the
//! field app; the dashboard only moves them through review.

mod status_dialog;

pub use status_dialog::{build_update, ClaimStatusDialog};

use contracts::domain::a006_claim::Claim;
use contracts::enums::ClaimStatus;
use contracts::shared::projection::{
    code_name, datetime_or_placeholder, name_only, number_or_placeholder,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::rest_resource::RestResource;

pub fn status_variant(status: Option<ClaimStatus>) -> &'static str {
    match status {
        Some(ClaimStatus::Open) => "warning",
        Some(ClaimStatus::InReview) => "primary",
        Some(ClaimStatus::Approved) | Some(ClaimStatus::Settled) => "success",
        Some(ClaimStatus::Rejected) => "error",
        None => "neutral",
    }
}

pub fn summary_rows(claim: &Claim) -> Vec<(&'static str, String)> {
    vec![
        ("Claim", claim.claim_code.clone()),
        ("Created", datetime_or_placeholder(claim.created_at.as_deref())),
        ("Customer", code_name(claim.customer.as_ref())),
        ("Reason", name_only(claim.reason.as_ref())),
        ("Amount", number_or_placeholder(claim.amount, 2)),
    ]
}

#[component]
pub fn ClaimDetails(id: i64, on_close: Callback<()>) -> impl IntoView {
    let claim = RwSignal::new(None::<Claim>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let editing = RwSignal::new(None::<Claim>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match RestResource::<Claim>::new().get_by_id(&id).await {
                Ok(loaded) => {
                    claim.try_set(Some(loaded));
                    error.try_set(None);
                }
                Err(err) => {
                    log::error!("load claim {} failed: {}", id, err);
                    error.try_set(Some(err.user_message()));
                }
            }
            loading.try_set(false);
        });
    };
    load();

    let can_change = move || claim.with(|c| c.as_ref().is_some_and(|c| !c.allowed_transitions().is_empty()));

    view! {
        <div class="details-container claim-details">
            <div class="details-header">
                <h3>"Claim"</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || claim.get().map(|c| {
                let variant = status_variant(c.status());
                let status_text = ClaimStatus::label(&c.status);
                view! {
                    <dl class="details-summary">
                        {summary_rows(&c)
                            .into_iter()
                            .map(|(label, value)| view! {
                                <dt>{label}</dt>
                                <dd>{value}</dd>
                            })
                            .collect_view()}
                        <dt>"Status"</dt>
                        <dd><Badge variant=variant.to_string()>{status_text}</Badge></dd>
                    </dl>
                }
            })}

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !can_change())
                    on_click=move |_| editing.set(claim.get_untracked())
                >
                    {icon("edit")}
                    " Change status"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("x")}
                    " Close"
                </Button>
            </div>

            <ClaimStatusDialog target=editing on_changed=Callback::new(move |_| load()) />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_of_sparse_claim() {
        let claim: Claim = serde_json::from_value(json!({
            "id": 4,
            "code": "CL-0004",
            "reason": {},
            "amount": "abc",
            "status": "in_review"
        }))
        .unwrap();
        let rows = summary_rows(&claim);
        assert_eq!(rows[0].1, "CL-0004");
        assert!(rows[1..].iter().all(|(_, value)| value == "-"));
        assert_eq!(status_variant(claim.status()), "primary");
    }
}
