//! The wizard's single owned view model.
//!
//! Panel visibility is not stored. It is read off [`WizardPhase`], so the
//! inconsistent combinations a set of independent flags would allow (a
//! revision form without a submitted draft, say) cannot be represented.
use aso_common::AppProfile;
use aso_generation::{GenerationRequest, SuggestionOutput};
use std::fmt;
use uuid::Uuid;

/// Where the user is in the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WizardPhase {
    /// Only the initial form is shown.
    #[default]
    Idle,
    /// First draft shown; waiting for additional instructions.
    AwaitingAdditional,
    /// Draft shown with approve / edit actions.
    Reviewing,
    /// Revision form open.
    Revising,
}

impl WizardPhase {
    pub fn label(self) -> &'static str {
        match self {
            WizardPhase::Idle => "idle",
            WizardPhase::AwaitingAdditional => "awaiting additional instructions",
            WizardPhase::Reviewing => "reviewing",
            WizardPhase::Revising => "revising",
        }
    }
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one generation call. A completion whose ticket no longer
/// matches the in-flight call is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(Uuid);

impl Ticket {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which submission a generation call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
    Initial,
    Additional,
    Revision,
}

impl PendingAction {
    pub fn of(request: &GenerationRequest) -> Self {
        match request {
            GenerationRequest::Initial { .. } => PendingAction::Initial,
            GenerationRequest::Additional { .. } => PendingAction::Additional,
            GenerationRequest::Revision { .. } => PendingAction::Revision,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PendingAction::Initial => "initial",
            PendingAction::Additional => "additional",
            PendingAction::Revision => "revision",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub ticket: Ticket,
    pub request: GenerationRequest,
}

impl PendingGeneration {
    pub fn action(&self) -> PendingAction {
        PendingAction::of(&self.request)
    }
}

/// Everything the wizard shows. Mutated only by
/// [`WizardController`](crate::controller::WizardController).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub(crate) phase: WizardPhase,
    pub(crate) output: Option<SuggestionOutput>,
    pub(crate) feedback_round: u8,
    pub(crate) profile: Option<AppProfile>,
    pub(crate) in_flight: Option<PendingGeneration>,
}

impl ViewModel {
    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn output(&self) -> Option<&SuggestionOutput> {
        self.output.as_ref()
    }

    pub fn feedback_round(&self) -> u8 {
        self.feedback_round
    }

    pub fn profile(&self) -> Option<&AppProfile> {
        self.profile.as_ref()
    }

    pub fn in_flight(&self) -> Option<&PendingGeneration> {
        self.in_flight.as_ref()
    }

    pub fn initial_submitted(&self) -> bool {
        self.phase != WizardPhase::Idle
    }

    pub fn additional_submitted(&self) -> bool {
        matches!(self.phase, WizardPhase::Reviewing | WizardPhase::Revising)
    }

    pub fn feedback_form_visible(&self) -> bool {
        self.phase == WizardPhase::Revising
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Keyword-suggestion flag of the submitted profile.
    pub fn suggest_keywords(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.suggest_keywords)
    }

    /// True when the model holds nothing from a previous session.
    pub fn is_pristine(&self) -> bool {
        *self == ViewModel::default()
    }

    pub(crate) fn reset(&mut self) {
        *self = ViewModel::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_phase() {
        let mut model = ViewModel::default();
        assert!(!model.initial_submitted());
        assert!(!model.additional_submitted());
        assert!(!model.feedback_form_visible());

        model.phase = WizardPhase::AwaitingAdditional;
        assert!(model.initial_submitted());
        assert!(!model.additional_submitted());

        model.phase = WizardPhase::Reviewing;
        assert!(model.additional_submitted());
        assert!(!model.feedback_form_visible());

        model.phase = WizardPhase::Revising;
        assert!(model.additional_submitted());
        assert!(model.feedback_form_visible());
    }

    #[test]
    fn reset_returns_to_default() {
        let mut model = ViewModel {
            phase: WizardPhase::Reviewing,
            feedback_round: 2,
            ..ViewModel::default()
        };
        assert!(!model.is_pristine());
        model.reset();
        assert!(model.is_pristine());
    }
}
