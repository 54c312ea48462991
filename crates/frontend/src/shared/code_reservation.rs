//! Code reservation workflow for add forms.
//!
//! Mounting an add form reserves a code once (`/api/code/generate`). The code
//! is committed (`/api/code/save-final`) only after the record itself was
//! created. There is no release call: a form that is abandoned or whose
//! create call fails leaves its reservation outstanding.

use async_trait::async_trait;
use contracts::shared::api_envelope::ApiError;
use contracts::shared::code_reservation::{
    CodeEntryMode, CodeReservation, GeneratedCode, ModelName, ReservationError,
    SaveFinalCodeRequest,
};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

use super::notifications::{Notification, Notifier};

#[async_trait(?Send)]
pub trait CodeService {
    async fn generate_code(&self, model: ModelName) -> Result<GeneratedCode, ApiError>;

    async fn save_final_code(&self, request: &SaveFinalCodeRequest) -> Result<(), ApiError>;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Reservation(err) => err.to_string(),
            SubmitError::Api(err) => err.user_message(),
        }
    }
}

/// What happened to the reserved code after the record was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalize {
    Committed,
    /// Nothing was reserved (generation failed, code typed by hand).
    Skipped,
    /// Record exists, `save-final` was rejected.
    Failed,
}

#[derive(Debug)]
pub struct Submitted<R> {
    pub created: R,
    pub code: String,
    pub finalize: Finalize,
}

#[derive(Clone)]
pub struct CodeReservationWorkflow {
    state: Rc<RefCell<CodeReservation>>,
    service: Rc<dyn CodeService>,
    notifier: Rc<dyn Notifier>,
}

impl CodeReservationWorkflow {
    pub fn new_add(
        model: ModelName,
        service: Rc<dyn CodeService>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(CodeReservation::for_new(model))),
            service,
            notifier,
        }
    }

    pub fn new_edit(
        model: ModelName,
        code: impl Into<String>,
        service: Rc<dyn CodeService>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(CodeReservation::for_existing(model, code))),
            service,
            notifier,
        }
    }

    pub fn snapshot(&self) -> CodeReservation {
        self.state.borrow().clone()
    }

    pub fn set_entry_mode(&self, entry: CodeEntryMode) {
        self.state.borrow_mut().set_entry_mode(entry);
    }

    /// Safe to call on every render; only the first call in add mode reaches
    /// the backend.
    pub async fn reserve_on_mount(&self) -> Option<GeneratedCode> {
        let model = {
            let mut state = self.state.borrow_mut();
            if !state.try_begin_reserve() {
                return None;
            }
            state.model()
        };

        match self.service.generate_code(model).await {
            Ok(generated) => {
                log::debug!("reserved {} code {}", model, generated.code);
                self.state.borrow_mut().reserved(generated.clone());
                Some(generated)
            }
            Err(err) => {
                log::warn!("code generation for {} failed: {}", model, err);
                self.state.borrow_mut().reservation_failed(err.user_message());
                self.notifier.notify(Notification::warning(format!(
                    "Could not reserve a code ({}). Enter one manually.",
                    err.user_message()
                )));
                None
            }
        }
    }

    /// Runs the create call with the code to use, then commits the
    /// reservation exactly once if the create call succeeded.
    pub async fn submit<R, F, Fut>(&self, manual_code: &str, add: F) -> Result<Submitted<R>, SubmitError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<R, ApiError>>,
    {
        let code = self.state.borrow_mut().begin_submit(manual_code)?;

        let created = match add(code.clone()).await {
            Ok(created) => created,
            Err(err) => {
                log::warn!("create with code {} failed: {}", code, err);
                self.state.borrow_mut().failed(err.user_message());
                // field errors are rendered inline by the form
                if err.field_errors().is_none() {
                    self.notifier.notify(Notification::from_api_error(&err));
                }
                return Err(SubmitError::Api(err));
            }
        };

        let finalize_request = self.state.borrow_mut().begin_finalize(&code);
        let finalize = match finalize_request {
            Ok(None) => {
                if let Some(held) = self.state.borrow().current_code() {
                    log::debug!("created with {}, reserved code {} left uncommitted", code, held);
                }
                Finalize::Skipped
            }
            Ok(Some(request)) => match self.service.save_final_code(&request).await {
                Ok(()) => {
                    self.state.borrow_mut().committed();
                    Finalize::Committed
                }
                Err(err) => {
                    log::warn!("save-final for {} failed: {}", request.reserved_code, err);
                    self.state.borrow_mut().failed(err.user_message());
                    self.notifier.notify(Notification::warning(format!(
                        "Record saved, but code {} could not be finalized: {}",
                        request.reserved_code,
                        err.user_message()
                    )));
                    Finalize::Failed
                }
            },
            Err(err) => {
                log::warn!("finalize skipped: {}", err);
                Finalize::Failed
            }
        };

        Ok(Submitted {
            created,
            code,
            finalize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notifications::tests::RecordingNotifier;
    use crate::shared::notifications::NotificationKind;
    use contracts::shared::code_reservation::ReservationState;
    use contracts::shared::validation::FieldErrors;
    use std::cell::Cell;

    const BRAND: ModelName = ModelName::new("brand");

    /// Shared call log so the order of create and save-final is visible.
    type CallLog = Rc<RefCell<Vec<String>>>;

    struct FakeCodes {
        log: CallLog,
        generated: Cell<u32>,
        fail_generate: bool,
        fail_save: bool,
    }

    impl FakeCodes {
        fn new(log: CallLog) -> Self {
            Self {
                log,
                generated: Cell::new(0),
                fail_generate: false,
                fail_save: false,
            }
        }
    }

    #[async_trait(?Send)]
    impl CodeService for FakeCodes {
        async fn generate_code(&self, model: ModelName) -> Result<GeneratedCode, ApiError> {
            self.generated.set(self.generated.get() + 1);
            self.log.borrow_mut().push(format!("generate:{}", model));
            if self.fail_generate {
                return Err(ApiError::Api {
                    status: 503,
                    message: "Code service unavailable".into(),
                });
            }
            Ok(GeneratedCode {
                code: format!("BR-{:04}", self.generated.get()),
                prefix: Some("BR".into()),
            })
        }

        async fn save_final_code(&self, request: &SaveFinalCodeRequest) -> Result<(), ApiError> {
            self.log
                .borrow_mut()
                .push(format!("save:{}:{}", request.model_name, request.reserved_code));
            if self.fail_save {
                return Err(ApiError::Network("timeout".into()));
            }
            Ok(())
        }
    }

    fn workflow(codes: FakeCodes) -> (CodeReservationWorkflow, Rc<FakeCodes>, Rc<RecordingNotifier>) {
        let codes = Rc::new(codes);
        let notifier = Rc::new(RecordingNotifier::default());
        let wf = CodeReservationWorkflow::new_add(BRAND, codes.clone(), notifier.clone());
        (wf, codes, notifier)
    }

    fn create_ok(log: &CallLog) -> impl FnOnce(String) -> std::future::Ready<Result<i64, ApiError>> {
        let log = log.clone();
        move |code| {
            log.borrow_mut().push(format!("add:{}", code));
            std::future::ready(Ok(7))
        }
    }

    #[tokio::test]
    async fn generate_runs_once_per_form() {
        let log = CallLog::default();
        let (wf, codes, _) = workflow(FakeCodes::new(log.clone()));

        let first = wf.reserve_on_mount().await;
        let second = wf.reserve_on_mount().await;

        assert_eq!(first.map(|g| g.code), Some("BR-0001".to_string()));
        assert!(second.is_none());
        assert_eq!(codes.generated.get(), 1);
        assert_eq!(wf.snapshot().current_code(), Some("BR-0001"));
    }

    #[tokio::test]
    async fn save_final_follows_successful_create() {
        let log = CallLog::default();
        let (wf, _, notifier) = workflow(FakeCodes::new(log.clone()));
        wf.reserve_on_mount().await;

        let submitted = wf.submit("", create_ok(&log)).await.unwrap();

        assert_eq!(submitted.created, 7);
        assert_eq!(submitted.code, "BR-0001");
        assert_eq!(submitted.finalize, Finalize::Committed);
        assert_eq!(
            *log.borrow(),
            vec!["generate:brand", "add:BR-0001", "save:brand:BR-0001"]
        );
        assert_eq!(notifier.count(), 0);
        assert_eq!(
            wf.snapshot().state(),
            &ReservationState::Committed("BR-0001".into())
        );
    }

    #[tokio::test]
    async fn failed_create_never_finalizes() {
        let log = CallLog::default();
        let (wf, _, notifier) = workflow(FakeCodes::new(log.clone()));
        wf.reserve_on_mount().await;

        let result = wf
            .submit("", |_code| async {
                Err::<i64, _>(ApiError::Api {
                    status: 500,
                    message: "Insert failed".into(),
                })
            })
            .await;

        assert!(matches!(result, Err(SubmitError::Api(_))));
        assert_eq!(*log.borrow(), vec!["generate:brand"]);
        assert_eq!(notifier.kinds(), vec![NotificationKind::Error]);
        assert!(wf.snapshot().is_dangling());
    }

    #[tokio::test]
    async fn field_errors_stay_in_the_form() {
        let log = CallLog::default();
        let (wf, _, notifier) = workflow(FakeCodes::new(log.clone()));
        wf.reserve_on_mount().await;

        let mut errors = FieldErrors::new();
        errors.add("name", "Name is required");
        let result = wf
            .submit("", move |_code| async move { Err::<i64, _>(ApiError::Validation(errors)) })
            .await;

        assert!(result.is_err());
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn finalize_failure_still_reports_created_record() {
        let log = CallLog::default();
        let mut codes = FakeCodes::new(log.clone());
        codes.fail_save = true;
        let (wf, _, notifier) = workflow(codes);
        wf.reserve_on_mount().await;

        let submitted = wf.submit("", create_ok(&log)).await.unwrap();

        assert_eq!(submitted.finalize, Finalize::Failed);
        assert_eq!(notifier.kinds(), vec![NotificationKind::Warning]);
    }

    #[tokio::test]
    async fn manual_code_after_generation_failure() {
        let log = CallLog::default();
        let mut codes = FakeCodes::new(log.clone());
        codes.fail_generate = true;
        let (wf, _, notifier) = workflow(codes);

        assert!(wf.reserve_on_mount().await.is_none());
        assert_eq!(notifier.kinds(), vec![NotificationKind::Warning]);
        assert!(wf.snapshot().is_code_editable());

        let missing = wf.submit("  ", create_ok(&log)).await;
        assert!(matches!(
            missing,
            Err(SubmitError::Reservation(ReservationError::EmptyCode))
        ));

        let submitted = wf.submit(" OWN-1 ", create_ok(&log)).await.unwrap();
        assert_eq!(submitted.code, "OWN-1");
        assert_eq!(submitted.finalize, Finalize::Skipped);
        assert_eq!(*log.borrow(), vec!["generate:brand", "add:OWN-1"]);
    }

    #[tokio::test]
    async fn typed_code_over_reservation_is_not_finalized() {
        let log = CallLog::default();
        let (wf, _, notifier) = workflow(FakeCodes::new(log.clone()));
        wf.reserve_on_mount().await;
        wf.set_entry_mode(CodeEntryMode::Manual);

        let submitted = wf.submit("MINE-7", create_ok(&log)).await.unwrap();

        assert_eq!(submitted.code, "MINE-7");
        assert_eq!(submitted.finalize, Finalize::Skipped);
        assert_eq!(*log.borrow(), vec!["generate:brand", "add:MINE-7"]);
        assert!(!log.borrow().iter().any(|c| c.starts_with("save:")));
        assert_eq!(notifier.count(), 0);
        assert!(wf.snapshot().is_dangling());
    }

    #[tokio::test]
    async fn overlapping_submit_is_refused_while_create_runs() {
        let log = CallLog::default();
        let (wf, _, _) = workflow(FakeCodes::new(log.clone()));
        wf.reserve_on_mount().await;

        let (release, hold) = tokio::sync::oneshot::channel::<()>();
        let slow_log = log.clone();
        let first = wf.submit("", move |code| {
            slow_log.borrow_mut().push(format!("add:{}", code));
            async move {
                let _ = hold.await;
                Ok::<i64, ApiError>(7)
            }
        });
        let second_wf = wf.clone();
        let second_log = log.clone();
        let second = async move {
            let result = second_wf.submit("", create_ok(&second_log)).await;
            let _ = release.send(());
            result
        };

        let (first, second) = tokio::join!(first, second);

        assert!(matches!(
            second,
            Err(SubmitError::Reservation(ReservationError::SubmitInFlight(_)))
        ));
        assert_eq!(first.unwrap().finalize, Finalize::Committed);
        assert_eq!(
            *log.borrow(),
            vec!["generate:brand", "add:BR-0001", "save:brand:BR-0001"]
        );
    }

    #[tokio::test]
    async fn second_submit_is_refused() {
        let log = CallLog::default();
        let (wf, _, _) = workflow(FakeCodes::new(log.clone()));
        wf.reserve_on_mount().await;
        wf.submit("", create_ok(&log)).await.unwrap();

        let again = wf.submit("", create_ok(&log)).await;

        assert!(matches!(
            again,
            Err(SubmitError::Reservation(ReservationError::AlreadyFinalized(_)))
        ));
        assert_eq!(log.borrow().iter().filter(|c| c.starts_with("add:")).count(), 1);
    }

    #[tokio::test]
    async fn edit_form_never_generates() {
        let log = CallLog::default();
        let codes = Rc::new(FakeCodes::new(log.clone()));
        let notifier = Rc::new(RecordingNotifier::default());
        let wf = CodeReservationWorkflow::new_edit(BRAND, "BR-0042", codes.clone(), notifier);

        assert!(wf.reserve_on_mount().await.is_none());
        assert_eq!(codes.generated.get(), 0);
        assert!(!wf.snapshot().is_code_editable());
    }
}
