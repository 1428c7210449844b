//! Create / update / activate / deactivate / delete orchestration.
//!
//! `Idle -> Submitting -> Idle` for form mutations,
//! `Idle -> AwaitingConfirmation -> Submitting -> Idle` for lifecycle actions.
//! Any phase other than `Idle` locks every row action in the table.
use contracts::domain::a001_tin_record::{TinRecordDto, TinRecordId, ValidationError};
use contracts::system::auth::{Capability, CapabilitySet};
use thiserror::Error;

use super::api::RequestError;
use crate::shared::toast::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Activate,
    Deactivate,
    Delete,
}

impl MutationKind {
    pub fn required_capability(&self) -> Capability {
        match self {
            MutationKind::Create => Capability::Create,
            MutationKind::Update => Capability::Update,
            MutationKind::Activate => Capability::Activate,
            MutationKind::Deactivate => Capability::Deactivate,
            MutationKind::Delete => Capability::Delete,
        }
    }

    /// Create and update are submitted from the form dialog
    pub fn has_dialog(&self) -> bool {
        matches!(self, MutationKind::Create | MutationKind::Update)
    }

    pub fn needs_confirmation(&self) -> bool {
        !self.has_dialog()
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "TIN created successfully",
            MutationKind::Update => "TIN updated successfully",
            MutationKind::Activate => "TIN activated successfully",
            MutationKind::Deactivate => "TIN deactivated successfully",
            MutationKind::Delete => "TIN deleted successfully",
        }
    }

    pub fn failure_fallback(&self) -> &'static str {
        match self {
            MutationKind::Create | MutationKind::Update => "Operation failed. Please try again.",
            MutationKind::Activate => "Failed to activate TIN.",
            MutationKind::Deactivate => "Failed to deactivate TIN.",
            MutationKind::Delete => "Failed to delete TIN.",
        }
    }

    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            MutationKind::Activate => Some("Are you sure you want to activate this TIN?"),
            MutationKind::Deactivate => Some("Are you sure you want to deactivate this TIN?"),
            MutationKind::Delete => Some("Are you sure you want to permanently delete this TIN?"),
            MutationKind::Create | MutationKind::Update => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MutationKind::Create => "Create",
            MutationKind::Update => "Update",
            MutationKind::Activate => "Activate",
            MutationKind::Deactivate => "Deactivate",
            MutationKind::Delete => "Delete",
        }
    }
}

/// A user intent against the TIN service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(TinRecordDto),
    Update { id: TinRecordId, dto: TinRecordDto },
    Activate(TinRecordId),
    Deactivate(TinRecordId),
    Delete(TinRecordId),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Create,
            Mutation::Update { .. } => MutationKind::Update,
            Mutation::Activate(_) => MutationKind::Activate,
            Mutation::Deactivate(_) => MutationKind::Deactivate,
            Mutation::Delete(_) => MutationKind::Delete,
        }
    }

    fn form(&self) -> Option<&TinRecordDto> {
        match self {
            Mutation::Create(dto) | Mutation::Update { dto, .. } => Some(dto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationPhase {
    Idle,
    AwaitingConfirmation(Mutation),
    Submitting(MutationKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationRejected {
    #[error("Another action is still in progress.")]
    Busy,

    #[error("{} is not available for this role.", .0.label())]
    NotPermitted(MutationKind),

    #[error("{} does not apply to this record.", .0.label())]
    NotApplicable(MutationKind),

    #[error("The record is no longer in the list.")]
    UnknownRecord,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// What the caller must do after a successful `request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Send this mutation now
    Submit(Mutation),
    /// Ask the user first; the mutation waits in `AwaitingConfirmation`
    Confirm(&'static str),
}

/// Side effects of a finished mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub kind: MutationKind,
    pub notice: Notice,
    pub close_dialog: bool,
    /// Re-fetch the whole collection
    pub refresh: bool,
    /// Inline error for the still-open form dialog
    pub form_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MutationController {
    phase: MutationPhase,
}

impl Default for MutationController {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationController {
    pub fn new() -> Self {
        Self {
            phase: MutationPhase::Idle,
        }
    }

    pub fn phase(&self) -> &MutationPhase {
        &self.phase
    }

    /// Single table-wide lock, not per row
    pub fn is_locked(&self) -> bool {
        self.phase != MutationPhase::Idle
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, MutationPhase::Submitting(_))
    }

    /// Lifecycle action waiting for the user to confirm
    pub fn pending_confirmation(&self) -> Option<&Mutation> {
        match &self.phase {
            MutationPhase::AwaitingConfirmation(mutation) => Some(mutation),
            _ => None,
        }
    }

    pub fn request(
        &mut self,
        mutation: Mutation,
        capabilities: &CapabilitySet,
    ) -> Result<Step, MutationRejected> {
        if self.is_locked() {
            return Err(MutationRejected::Busy);
        }

        let kind = mutation.kind();
        if !capabilities.contains(kind.required_capability()) {
            return Err(MutationRejected::NotPermitted(kind));
        }

        if let Some(dto) = mutation.form() {
            dto.validate()?;
        }

        match kind.confirmation_prompt() {
            Some(prompt) => {
                self.phase = MutationPhase::AwaitingConfirmation(mutation);
                Ok(Step::Confirm(prompt))
            }
            None => {
                log::debug!("submitting TIN {:?}", kind);
                self.phase = MutationPhase::Submitting(kind);
                Ok(Step::Submit(mutation))
            }
        }
    }

    /// User accepted the prompt
    pub fn confirm(&mut self) -> Option<Mutation> {
        match std::mem::replace(&mut self.phase, MutationPhase::Idle) {
            MutationPhase::AwaitingConfirmation(mutation) => {
                log::debug!("submitting TIN {:?}", mutation.kind());
                self.phase = MutationPhase::Submitting(mutation.kind());
                Some(mutation)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// User declined the prompt
    pub fn cancel(&mut self) {
        if matches!(self.phase, MutationPhase::AwaitingConfirmation(_)) {
            self.phase = MutationPhase::Idle;
        }
    }

    /// Remote call resolved. Returns `None` when nothing was in flight.
    pub fn complete(&mut self, result: Result<(), RequestError>) -> Option<Completion> {
        let kind = match self.phase {
            MutationPhase::Submitting(kind) => kind,
            _ => return None,
        };
        self.phase = MutationPhase::Idle;

        let completion = match result {
            Ok(()) => Completion {
                kind,
                notice: Notice::success(kind.success_message()),
                close_dialog: kind.has_dialog(),
                refresh: true,
                form_error: None,
            },
            Err(e) => {
                log::warn!("TIN {:?} failed: {}", kind, e);
                let message = e.user_message(kind.failure_fallback());
                Completion {
                    kind,
                    notice: Notice::error(message.clone()),
                    close_dialog: false,
                    refresh: false,
                    form_error: kind.has_dialog().then_some(message),
                }
            }
        };
        Some(completion)
    }
}
