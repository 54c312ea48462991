use contracts::domain::a006_claim::{Claim, ClaimStatusUpdate};
use contracts::enums::ClaimStatus;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_client::put_json;
use crate::shared::components::form_field::{optional_text, SelectField, TextField};
use crate::shared::notifications::{use_notifications, Notification, Notifier};

/// Validated body for `PUT /api/claims/{id}/status`.
pub fn build_update(
    claim: &Claim,
    status_code: Option<&str>,
    note: &str,
) -> Result<ClaimStatusUpdate, FieldErrors> {
    let Some(status) = status_code.and_then(ClaimStatus::from_code) else {
        let mut errors = FieldErrors::new();
        errors.add("status", "Choose the new status");
        return Err(errors);
    };
    let update = ClaimStatusUpdate {
        status,
        note: optional_text(note.to_string()),
    };
    update.validate(claim)?;
    Ok(update)
}

fn transition_options(claim: Option<&Claim>) -> Vec<(String, String)> {
    claim
        .map(Claim::allowed_transitions)
        .unwrap_or_default()
        .into_iter()
        .map(|s| (s.code().to_string(), s.display_name().to_string()))
        .collect()
}

/// Opens while `target` holds a claim; closing clears it.
#[component]
pub fn ClaimStatusDialog(
    target: RwSignal<Option<Claim>>,
    on_changed: Callback<()>,
) -> impl IntoView {
    let notifier = use_notifications();
    let tabs = use_context::<AppGlobalContext>();
    let open = RwSignal::new(false);
    let status = RwSignal::new(None::<String>);
    let note = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        let has_target = target.with(Option::is_some);
        if has_target {
            status.set(None);
            note.set(String::new());
            errors.set(FieldErrors::new());
        }
        open.set(has_target);
    });
    Effect::new(move |_| {
        if !open.get() && target.with_untracked(Option::is_some) {
            target.set(None);
        }
    });

    let field_error = move |key: &'static str| {
        Signal::derive(move || errors.with(|e| e.get(key).map(str::to_string)))
    };

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let Some(claim) = target.get_untracked() else {
            return;
        };
        let update = match build_update(
            &claim,
            status.get_untracked().as_deref(),
            &note.get_untracked(),
        ) {
            Ok(update) => update,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            match put_json(&Claim::status_path(&claim.id), &update).await {
                Ok(_) => {
                    log::info!("claim {} moved to {}", claim.claim_code, update.status.code());
                    notifier.notify(Notification::success(format!(
                        "Claim {}: {}",
                        claim.claim_code,
                        update.status.display_name()
                    )));
                    open.try_set(false);
                    if let Some(tabs) = tabs {
                        tabs.bump_data_version();
                    }
                    on_changed.run(());
                }
                Err(err) => {
                    log::error!("claim {} status change failed: {}", claim.claim_code, err);
                    match err.field_errors() {
                        Some(found) => {
                            errors.try_set(found.clone());
                        }
                        None => notifier.notify(Notification::from_api_error(&err)),
                    }
                }
            }
            saving.try_set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        {move || target.with(|c| match c {
                            Some(c) => format!("Claim {}: change status", c.claim_code),
                            None => "Change status".to_string(),
                        })}
                    </DialogTitle>
                    <DialogContent>
                        <SelectField
                            id="claim_status"
                            label="New status"
                            options=Signal::derive(move || target.with(|c| transition_options(c.as_ref())))
                            value=status
                            on_change=Callback::new(move |v| status.set(v))
                            error=field_error("status")
                            empty_label="Select status"
                        />
                        <TextField
                            id="claim_note"
                            label="Note"
                            multiline=true
                            value=note
                            on_input=Callback::new(move |v| note.set(v))
                            error=field_error("note")
                            placeholder="Required when rejecting"
                        />
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=saving
                            on_click=move |_| submit()
                        >
                            "Apply"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claim(status: &str) -> Claim {
        serde_json::from_value(json!({"id": 1, "claim_code": "CL-1", "status": status})).unwrap()
    }

    #[test]
    fn missing_status_is_a_field_error() {
        let errors = build_update(&claim("open"), None, "").unwrap_err();
        assert_eq!(errors.get("status"), Some("Choose the new status"));
    }

    #[test]
    fn legal_move_with_blank_note_drops_the_note() {
        let update = build_update(&claim("open"), Some("in_review"), "   ").unwrap();
        assert_eq!(update.status, ClaimStatus::InReview);
        assert_eq!(update.note, None);
    }

    #[test]
    fn rejection_without_note_is_refused() {
        let errors = build_update(&claim("in_review"), Some("rejected"), "").unwrap_err();
        assert!(errors.get("note").is_some());
    }

    #[test]
    fn only_allowed_transitions_are_offered() {
        let options = transition_options(Some(&claim("approved")));
        assert_eq!(options, vec![("settled".to_string(), "Settled".to_string())]);
        assert!(transition_options(None).is_empty());
    }
}
