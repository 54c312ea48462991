//! Entity code reservation.
//!
//! Add forms reserve a human-readable code (`generate`) before the entity
//! exists and commit it (`save-final`) once the entity has been created.
//! The backend offers no way to release a reservation, so an add that never
//! succeeds leaves its code outstanding; [`CodeReservation::is_dangling`]
//! reports that case.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Backend key for the entity type a code belongs to (`"brand"`, `"route_types"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelName(&'static str);

impl ModelName {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCodeRequest {
    pub model_name: String,
}

impl GenerateCodeRequest {
    pub fn new(model: ModelName) -> Self {
        Self {
            model_name: model.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub code: String,
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFinalCodeRequest {
    pub reserved_code: String,
    pub model_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

/// Local toggle on add forms: keep the generated code or type one by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeEntryMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationState {
    Idle,
    Reserving,
    Reserved(GeneratedCode),
    Finalizing(String),
    Committed(String),
    Failed {
        code: Option<String>,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("codes of existing {0} records cannot change")]
    EditMode(ModelName),

    #[error("no code has been reserved for {0} yet")]
    NotReserved(ModelName),

    #[error("the {0} code has already been finalized")]
    AlreadyFinalized(ModelName),

    #[error("code is required")]
    EmptyCode,

    #[error("a {0} record is already being saved")]
    SubmitInFlight(ModelName),
}

#[derive(Debug, Clone)]
pub struct CodeReservation {
    model: ModelName,
    mode: FormMode,
    entry: CodeEntryMode,
    state: ReservationState,
    latched: bool,
    submitting: bool,
}

impl CodeReservation {
    /// Add flow: nothing reserved yet.
    pub fn for_new(model: ModelName) -> Self {
        Self {
            model,
            mode: FormMode::Add,
            entry: CodeEntryMode::Auto,
            state: ReservationState::Idle,
            latched: false,
            submitting: false,
        }
    }

    /// Edit flow: the code came with the entity and is immutable.
    pub fn for_existing(model: ModelName, code: impl Into<String>) -> Self {
        Self {
            model,
            mode: FormMode::Edit,
            entry: CodeEntryMode::Auto,
            state: ReservationState::Committed(code.into()),
            latched: true,
            submitting: false,
        }
    }

    pub fn model(&self) -> ModelName {
        self.model
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &ReservationState {
        &self.state
    }

    pub fn entry_mode(&self) -> CodeEntryMode {
        self.entry
    }

    pub fn set_entry_mode(&mut self, entry: CodeEntryMode) {
        if self.mode == FormMode::Add {
            self.entry = entry;
        }
    }

    pub fn is_code_editable(&self) -> bool {
        self.mode == FormMode::Add && self.entry == CodeEntryMode::Manual
    }

    /// One-shot latch guarding `generate`. True exactly once per add form.
    pub fn try_begin_reserve(&mut self) -> bool {
        if self.mode == FormMode::Edit || self.latched {
            return false;
        }
        self.latched = true;
        self.state = ReservationState::Reserving;
        true
    }

    pub fn reserved(&mut self, code: GeneratedCode) {
        if self.state == ReservationState::Reserving {
            self.state = ReservationState::Reserved(code);
        }
    }

    /// Generation failed; the user can still type a code by hand.
    pub fn reservation_failed(&mut self, reason: impl Into<String>) {
        if self.state == ReservationState::Reserving {
            self.state = ReservationState::Failed {
                code: None,
                reason: reason.into(),
            };
            self.entry = CodeEntryMode::Manual;
        }
    }

    /// Code currently held by the form, if any.
    pub fn current_code(&self) -> Option<&str> {
        match &self.state {
            ReservationState::Reserved(generated) => Some(generated.code.as_str()),
            ReservationState::Finalizing(code) | ReservationState::Committed(code) => {
                Some(code.as_str())
            }
            ReservationState::Failed { code: Some(code), .. } => Some(code.as_str()),
            _ => None,
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        match &self.state {
            ReservationState::Reserved(generated) => generated.prefix.as_deref(),
            _ => None,
        }
    }

    /// Code to send with the create call. Refused once the code is being
    /// finalized, so a double submit cannot create a second record.
    pub fn code_for_submit(&self, manual_value: &str) -> Result<String, ReservationError> {
        if self.mode == FormMode::Edit {
            return Err(ReservationError::EditMode(self.model));
        }
        if matches!(
            self.state,
            ReservationState::Finalizing(_) | ReservationState::Committed(_)
        ) {
            return Err(ReservationError::AlreadyFinalized(self.model));
        }
        match self.entry {
            CodeEntryMode::Manual => {
                let value = manual_value.trim();
                if value.is_empty() {
                    Err(ReservationError::EmptyCode)
                } else {
                    Ok(value.to_string())
                }
            }
            CodeEntryMode::Auto => self
                .current_code()
                .map(str::to_string)
                .ok_or(ReservationError::NotReserved(self.model)),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Like [`Self::code_for_submit`], but also marks a create call as in
    /// flight until [`Self::begin_finalize`] or [`Self::failed`].
    pub fn begin_submit(&mut self, manual_value: &str) -> Result<String, ReservationError> {
        if self.submitting {
            return Err(ReservationError::SubmitInFlight(self.model));
        }
        let code = self.code_for_submit(manual_value)?;
        self.submitting = true;
        Ok(code)
    }

    /// Called after the create call with `submitted_code` succeeded. `None`
    /// means there is nothing to commit: no code is held, or the record was
    /// created with a typed code and the held one stays outstanding.
    pub fn begin_finalize(
        &mut self,
        submitted_code: &str,
    ) -> Result<Option<SaveFinalCodeRequest>, ReservationError> {
        self.submitting = false;
        if self.mode == FormMode::Edit {
            return Err(ReservationError::EditMode(self.model));
        }
        let code = match &self.state {
            ReservationState::Reserved(generated) => generated.code.clone(),
            ReservationState::Failed { code: Some(code), .. } => code.clone(),
            ReservationState::Failed { code: None, .. } => return Ok(None),
            ReservationState::Finalizing(_) | ReservationState::Committed(_) => {
                return Err(ReservationError::AlreadyFinalized(self.model))
            }
            ReservationState::Idle | ReservationState::Reserving => {
                return Err(ReservationError::NotReserved(self.model))
            }
        };
        if code != submitted_code {
            return Ok(None);
        }
        self.state = ReservationState::Finalizing(code.clone());
        Ok(Some(SaveFinalCodeRequest {
            reserved_code: code,
            model_name: self.model.as_str().to_string(),
        }))
    }

    pub fn committed(&mut self) {
        if let ReservationState::Finalizing(code) = &self.state {
            self.state = ReservationState::Committed(code.clone());
        }
    }

    /// Create call or commit failed. A held code is kept so a resubmit reuses it.
    pub fn failed(&mut self, reason: impl Into<String>) {
        self.submitting = false;
        if self.mode == FormMode::Edit {
            return;
        }
        let code = self.current_code().map(str::to_string);
        self.state = ReservationState::Failed {
            code,
            reason: reason.into(),
        };
    }

    /// A code is reserved on the backend but not committed.
    pub fn is_dangling(&self) -> bool {
        matches!(
            self.state,
            ReservationState::Reserved(_)
                | ReservationState::Finalizing(_)
                | ReservationState::Failed { code: Some(_), .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRAND: ModelName = ModelName::new("brand");

    fn generated(code: &str) -> GeneratedCode {
        GeneratedCode {
            code: code.to_string(),
            prefix: Some("BR".to_string()),
        }
    }

    #[test]
    fn latch_opens_once() {
        let mut reservation = CodeReservation::for_new(BRAND);
        assert!(reservation.try_begin_reserve());
        assert!(!reservation.try_begin_reserve());
        reservation.reserved(generated("BR-0001"));
        assert!(!reservation.try_begin_reserve());
        assert_eq!(reservation.current_code(), Some("BR-0001"));
        assert_eq!(reservation.prefix(), Some("BR"));
    }

    #[test]
    fn edit_mode_never_reserves_or_finalizes() {
        let mut reservation = CodeReservation::for_existing(BRAND, "BR-0042");
        assert!(!reservation.try_begin_reserve());
        assert!(!reservation.is_code_editable());
        reservation.set_entry_mode(CodeEntryMode::Manual);
        assert!(!reservation.is_code_editable());
        assert_eq!(
            reservation.begin_finalize("BR-0042"),
            Err(ReservationError::EditMode(BRAND))
        );
        assert_eq!(reservation.current_code(), Some("BR-0042"));
    }

    #[test]
    fn full_add_lifecycle() {
        let mut reservation = CodeReservation::for_new(BRAND);
        reservation.try_begin_reserve();
        reservation.reserved(generated("BR-0007"));
        assert!(reservation.is_dangling());
        let code = reservation.begin_submit("ignored").unwrap();
        assert_eq!(code, "BR-0007");
        assert!(reservation.is_submitting());

        let request = reservation.begin_finalize(&code).unwrap().unwrap();
        assert!(!reservation.is_submitting());
        assert_eq!(request.reserved_code, "BR-0007");
        assert_eq!(request.model_name, "brand");
        reservation.committed();

        assert_eq!(reservation.state(), &ReservationState::Committed("BR-0007".into()));
        assert!(!reservation.is_dangling());
        assert_eq!(
            reservation.code_for_submit(""),
            Err(ReservationError::AlreadyFinalized(BRAND))
        );
        assert_eq!(
            reservation.begin_finalize("BR-0007"),
            Err(ReservationError::AlreadyFinalized(BRAND))
        );
    }

    #[test]
    fn failed_submit_keeps_code_for_resubmit() {
        let mut reservation = CodeReservation::for_new(BRAND);
        reservation.try_begin_reserve();
        reservation.reserved(generated("BR-0003"));
        reservation.begin_submit("").unwrap();
        reservation.failed("network down");

        assert!(reservation.is_dangling());
        assert!(!reservation.is_submitting());
        assert_eq!(reservation.begin_submit("").unwrap(), "BR-0003");
        let request = reservation.begin_finalize("BR-0003").unwrap().unwrap();
        assert_eq!(request.reserved_code, "BR-0003");
    }

    #[test]
    fn generation_failure_switches_to_manual_entry() {
        let mut reservation = CodeReservation::for_new(BRAND);
        reservation.try_begin_reserve();
        reservation.reservation_failed("503");

        assert_eq!(reservation.entry_mode(), CodeEntryMode::Manual);
        assert!(reservation.is_code_editable());
        assert_eq!(reservation.code_for_submit("  "), Err(ReservationError::EmptyCode));
        assert_eq!(reservation.code_for_submit(" MY-1 ").unwrap(), "MY-1");
        assert_eq!(reservation.begin_finalize("MY-1"), Ok(None));
        assert!(!reservation.is_dangling());
    }

    #[test]
    fn typed_code_leaves_reserved_code_uncommitted() {
        let mut reservation = CodeReservation::for_new(BRAND);
        reservation.try_begin_reserve();
        reservation.reserved(generated("BR-0001"));
        reservation.set_entry_mode(CodeEntryMode::Manual);

        let code = reservation.begin_submit(" MINE-7 ").unwrap();
        assert_eq!(code, "MINE-7");
        assert_eq!(reservation.begin_finalize(&code), Ok(None));
        assert!(reservation.is_dangling());
        assert_eq!(reservation.current_code(), Some("BR-0001"));
    }

    #[test]
    fn overlapping_submit_is_refused() {
        let mut reservation = CodeReservation::for_new(BRAND);
        reservation.try_begin_reserve();
        reservation.reserved(generated("BR-0002"));

        assert_eq!(reservation.begin_submit("").unwrap(), "BR-0002");
        assert_eq!(
            reservation.begin_submit(""),
            Err(ReservationError::SubmitInFlight(BRAND))
        );
        reservation.failed("timeout");
        assert_eq!(reservation.begin_submit("").unwrap(), "BR-0002");
    }

    #[test]
    fn finalize_before_reservation_is_rejected() {
        let mut reservation = CodeReservation::for_new(BRAND);
        assert_eq!(
            reservation.begin_finalize(""),
            Err(ReservationError::NotReserved(BRAND))
        );
        assert_eq!(
            reservation.code_for_submit(""),
            Err(ReservationError::NotReserved(BRAND))
        );
    }
}
