//! State shared by the add/edit detail forms.
//!
//! A domain form keeps its DTO in [`DetailsState::form`]; loading, validation,
//! create-with-reserved-code and update are handled here.

use contracts::domain::common::{RecordId, Resource};
use contracts::shared::api_envelope::ApiError;
use contracts::shared::code_reservation::{CodeEntryMode, FormMode, ReservationState};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use std::rc::Rc;

use super::code_reservation::{CodeReservationWorkflow, Finalize, SubmitError, Submitted};
use super::notifications::{use_notifications, Notification, NotificationService, Notifier};
use super::rest_resource::{RestCodeService, RestResource};

/// Form body of a record with a business code.
pub trait FormDto: Clone + Default + Serialize + Send + Sync + 'static {
    type Record: Resource + Send + Sync;

    fn from_record(record: &Self::Record) -> Self;

    fn validate(&self) -> Result<(), FieldErrors>;

    fn with_code(self, code: String) -> Self;
}

/// Text shown in the code input.
pub fn code_display(
    mode: FormMode,
    entry: CodeEntryMode,
    reserving: bool,
    reserved: Option<&str>,
    existing: &str,
    manual: &str,
) -> String {
    match (mode, entry) {
        (FormMode::Edit, _) => existing.to_string(),
        (FormMode::Add, CodeEntryMode::Manual) => manual.to_string(),
        (FormMode::Add, CodeEntryMode::Auto) if reserving => "Generating...".to_string(),
        (FormMode::Add, CodeEntryMode::Auto) => reserved.unwrap_or_default().to_string(),
    }
}

/// Reactive face of a [`CodeReservationWorkflow`].
#[derive(Clone, Copy)]
pub struct CodeFieldState {
    pub mode: FormMode,
    pub entry: RwSignal<CodeEntryMode>,
    pub reserving: RwSignal<bool>,
    pub reserved: RwSignal<Option<String>>,
    pub manual: RwSignal<String>,
    pub existing: RwSignal<String>,
    workflow: StoredValue<Option<CodeReservationWorkflow>, LocalStorage>,
}

impl CodeFieldState {
    fn with_workflow(mode: FormMode, workflow: Option<CodeReservationWorkflow>) -> Self {
        let entry = match (&workflow, mode) {
            (None, FormMode::Add) => CodeEntryMode::Manual,
            _ => CodeEntryMode::Auto,
        };
        Self {
            mode,
            entry: RwSignal::new(entry),
            reserving: RwSignal::new(false),
            reserved: RwSignal::new(None),
            manual: RwSignal::new(String::new()),
            existing: RwSignal::new(String::new()),
            workflow: StoredValue::new_local(workflow),
        }
    }

    /// Add form. Records without a model name get a manual code field.
    pub fn for_add<R: Resource>(notifier: NotificationService) -> Self {
        let workflow = R::model_name().map(|model| {
            CodeReservationWorkflow::new_add(model, Rc::new(RestCodeService), Rc::new(notifier))
        });
        Self::with_workflow(FormMode::Add, workflow)
    }

    pub fn for_edit() -> Self {
        Self::with_workflow(FormMode::Edit, None)
    }

    /// Reserve a code once; later calls do nothing.
    pub fn reserve(&self) {
        let Some(workflow) = self.workflow.try_get_value().flatten() else {
            return;
        };
        let state = *self;
        state.reserving.set(true);
        spawn_local(async move {
            let generated = workflow.reserve_on_mount().await;
            state.reserving.try_set(false);
            match generated {
                Some(generated) => {
                    state.reserved.try_set(Some(generated.code));
                }
                None => {
                    if matches!(workflow.snapshot().state(), ReservationState::Failed { .. }) {
                        state.entry.try_set(CodeEntryMode::Manual);
                    }
                }
            }
        });
    }

    pub fn is_editable(&self) -> bool {
        self.mode == FormMode::Add && self.entry.get() == CodeEntryMode::Manual
    }

    pub fn set_entry(&self, entry: CodeEntryMode) {
        if self.mode != FormMode::Add {
            return;
        }
        self.workflow.with_value(|w| {
            if let Some(w) = w {
                w.set_entry_mode(entry);
            }
        });
        self.entry.set(entry);
    }

    pub fn display(&self) -> String {
        code_display(
            self.mode,
            self.entry.get(),
            self.reserving.get(),
            self.reserved.get().as_deref(),
            &self.existing.get(),
            &self.manual.get(),
        )
    }

    async fn submit<R, F, Fut>(&self, add: F) -> Result<Submitted<R>, SubmitError>
    where
        F: FnOnce(String) -> Fut,
        Fut: std::future::Future<Output = Result<R, ApiError>>,
    {
        match self.workflow.try_get_value().flatten() {
            Some(workflow) => {
                let manual = self.manual.get_untracked();
                workflow.submit(&manual, add).await
            }
            None => {
                let code = self.manual.get_untracked().trim().to_string();
                if code.is_empty() {
                    return Err(SubmitError::Reservation(
                        contracts::shared::code_reservation::ReservationError::EmptyCode,
                    ));
                }
                let created = add(code.clone()).await?;
                Ok(Submitted {
                    created,
                    code,
                    finalize: Finalize::Skipped,
                })
            }
        }
    }
}

pub struct DetailsState<D: FormDto> {
    pub form: RwSignal<D>,
    pub errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub code: CodeFieldState,
    id: StoredValue<Option<<D::Record as Resource>::Id>, LocalStorage>,
    notifier: NotificationService,
}

impl<D: FormDto> Clone for DetailsState<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: FormDto> Copy for DetailsState<D> {}

impl<D: FormDto> DetailsState<D> {
    /// `None` opens an add form and reserves a code; `Some` loads the record.
    pub fn new(id: Option<<D::Record as Resource>::Id>) -> Self {
        let notifier = use_notifications();
        let code = match id {
            Some(_) => CodeFieldState::for_edit(),
            None => CodeFieldState::for_add::<D::Record>(notifier),
        };
        let state = Self {
            form: RwSignal::new(D::default()),
            errors: RwSignal::new(FieldErrors::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            code,
            id: StoredValue::new_local(id.clone()),
            notifier,
        };
        match id {
            Some(id) => state.load(id),
            None => code.reserve(),
        }
        state
    }

    pub fn is_edit_mode(&self) -> bool {
        self.code.mode == FormMode::Edit
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        self.errors.with(|e| e.get(field).map(str::to_string))
    }

    fn load(&self, id: <D::Record as Resource>::Id) {
        let state = *self;
        state.loading.set(true);
        spawn_local(async move {
            match RestResource::<D::Record>::new().get_by_id(&id).await {
                Ok(record) => {
                    state.code.existing.try_set(record.code().to_string());
                    state.form.try_set(D::from_record(&record));
                }
                Err(err) => {
                    log::warn!(
                        "load {} {} failed: {}",
                        D::Record::element_name(),
                        id.as_string(),
                        err
                    );
                    state.error.try_set(Some(err.user_message()));
                }
            }
            state.loading.try_set(false);
        });
    }

    fn show_error(&self, err: &SubmitError) {
        match err {
            SubmitError::Api(api) => match api.field_errors() {
                Some(fields) => {
                    self.errors.try_set(fields.clone());
                }
                None => {
                    self.error.try_set(Some(err.user_message()));
                }
            },
            SubmitError::Reservation(_) => {
                self.error.try_set(Some(err.user_message()));
            }
        }
    }

    /// Validate, then create (add mode) or update (edit mode).
    pub fn save(&self, on_saved: Callback<()>) {
        if self.saving.get_untracked() {
            return;
        }
        let dto = self.form.get_untracked();
        if let Err(errors) = dto.validate() {
            self.errors.set(errors);
            return;
        }
        self.errors.set(FieldErrors::new());
        self.error.set(None);
        self.saving.set(true);

        let state = *self;
        let id = self.id.get_value();
        spawn_local(async move {
            let resource = RestResource::<D::Record>::new();
            let result = match id {
                Some(id) => resource
                    .update(&id, &dto)
                    .await
                    .map(|_| ())
                    .map_err(|err| {
                        state.notifier.notify(Notification::from_api_error(&err));
                        SubmitError::Api(err)
                    }),
                None => state
                    .code
                    .submit(|code| {
                        let body = dto.with_code(code);
                        async move { RestResource::<D::Record>::new().create(&body).await }
                    })
                    .await
                    .map(|submitted| {
                        log::debug!(
                            "created {} {} ({:?})",
                            D::Record::element_name(),
                            submitted.code,
                            submitted.finalize
                        );
                    }),
            };
            state.saving.try_set(false);
            match result {
                Ok(()) => {
                    state
                        .notifier
                        .notify(Notification::success(format!("{} saved", D::Record::element_name())));
                    on_saved.run(());
                }
                Err(err) => state.show_error(&err),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_form_shows_the_existing_code() {
        let shown = code_display(FormMode::Edit, CodeEntryMode::Manual, false, Some("X"), "BR-0007", "typed");
        assert_eq!(shown, "BR-0007");
    }

    #[test]
    fn add_form_shows_reserved_or_typed_code() {
        assert_eq!(
            code_display(FormMode::Add, CodeEntryMode::Auto, true, None, "", ""),
            "Generating..."
        );
        assert_eq!(
            code_display(FormMode::Add, CodeEntryMode::Auto, false, Some("BR-0008"), "", "x"),
            "BR-0008"
        );
        assert_eq!(
            code_display(FormMode::Add, CodeEntryMode::Manual, false, Some("BR-0008"), "", "MY-1"),
            "MY-1"
        );
    }
}
