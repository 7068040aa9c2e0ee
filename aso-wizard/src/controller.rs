//! The feedback-round controller.
//!
//! Every generating action is split in two: `begin_*` validates against the
//! current phase and hands back a [`Dispatch`] describing the call to make,
//! and [`WizardController::complete`] applies the result. Nothing in the
//! view model changes until a call succeeds, so a failed call leaves the
//! wizard exactly where it was and the user can retry.
//!
//! The `submit_*` / `request_revision` wrappers run both halves against a
//! [`SuggestionGenerator`] for callers that can simply await.
use crate::{
    MAX_FEEDBACK_COUNT,
    error::WizardError,
    form::{FormField, InitialFormData, required_text},
    state::{PendingAction, PendingGeneration, Ticket, ViewModel, WizardPhase},
};
use aso_common::AsoError;
use aso_config::CountryInput;
use aso_generation::{GenerationRequest, SuggestionOutput, traits::SuggestionGenerator};

pub type Result<T> = std::result::Result<T, WizardError>;

/// A generation call the caller must run and report back via
/// [`WizardController::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub request: GenerationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied to the view model.
    Applied {
        action: PendingAction,
        output: SuggestionOutput,
    },
    /// The ticket no longer matches; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOutcome {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Revision form opened; `round` is the number of rounds used so far.
    Revising { round: u8 },
    /// The wizard was reset.
    Terminal(TerminalOutcome),
}

#[derive(Debug, Default)]
pub struct WizardController {
    model: ViewModel,
    country_input: CountryInput,
}

impl WizardController {
    pub fn new(country_input: CountryInput) -> Self {
        Self {
            model: ViewModel::default(),
            country_input,
        }
    }

    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    pub fn country_input(&self) -> CountryInput {
        self.country_input
    }

    /// Validate the initial form and start the first generation.
    pub fn begin_initial(&mut self, form: &InitialFormData) -> Result<Dispatch> {
        self.ensure_idle_slot()?;
        self.ensure_phase("submit the initial form", &[WizardPhase::Idle])?;
        let profile = form.validate(self.country_input)?;
        Ok(self.dispatch(PendingAction::Initial, GenerationRequest::Initial { profile }))
    }

    pub fn begin_additional(&mut self, text: &str) -> Result<Dispatch> {
        self.ensure_idle_slot()?;
        self.ensure_phase(
            "submit additional instructions",
            &[WizardPhase::AwaitingAdditional],
        )?;
        let instructions = required_text(
            FormField::AdditionalInstructions,
            text,
            "Please provide additional instructions",
        )?;
        let profile = self.session_profile()?;
        Ok(self.dispatch(
            PendingAction::Additional,
            GenerationRequest::Additional {
                profile,
                instructions,
            },
        ))
    }

    /// Start a revision. Allowed from the approval panel or the open
    /// revision form while rounds remain.
    pub fn begin_revision(&mut self, feedback: &str) -> Result<Dispatch> {
        self.ensure_idle_slot()?;
        self.ensure_phase(
            "request a revision",
            &[WizardPhase::Reviewing, WizardPhase::Revising],
        )?;
        if self.model.feedback_round >= MAX_FEEDBACK_COUNT {
            return Err(WizardError::RevisionLimitReached {
                max: MAX_FEEDBACK_COUNT,
            });
        }
        let feedback = required_text(FormField::Feedback, feedback, "Please provide your feedback")?;
        let profile = self.session_profile()?;
        let round = self.model.feedback_round + 1;
        Ok(self.dispatch(
            PendingAction::Revision,
            GenerationRequest::Revision {
                profile,
                round,
                feedback,
            },
        ))
    }

    /// Apply the result of the call identified by `ticket`.
    ///
    /// On success the output is replaced and the phase advances. On failure
    /// only the in-flight marker is cleared and the error is returned.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: aso_common::Result<SuggestionOutput>,
    ) -> Result<Completion> {
        let pending = match self.model.in_flight.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                self.model.in_flight = other;
                tracing::debug!(%ticket, "ignoring stale generation result");
                return Ok(Completion::Stale);
            }
        };
        let action = pending.action();

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(
                    %ticket,
                    action = action.label(),
                    phase = %self.model.phase,
                    round = self.model.feedback_round,
                    error = %err,
                    "generation failed; state left unchanged"
                );
                return Err(WizardError::Generation(err));
            }
        };

        match pending.request {
            GenerationRequest::Initial { profile } => {
                self.model.profile = Some(profile);
                self.model.phase = WizardPhase::AwaitingAdditional;
            }
            GenerationRequest::Additional { .. } => {
                self.model.phase = WizardPhase::Reviewing;
            }
            GenerationRequest::Revision { round, .. } => {
                self.model.feedback_round = round.min(MAX_FEEDBACK_COUNT);
                self.model.phase = WizardPhase::Reviewing;
            }
        }
        self.model.output = Some(output.clone());

        tracing::info!(
            %ticket,
            action = action.label(),
            phase = %self.model.phase,
            round = self.model.feedback_round,
            "generation applied"
        );
        Ok(Completion::Applied {
            action,
            output,
        })
    }

    /// Forget the in-flight call, if any. Its result will be ignored.
    pub fn cancel_in_flight(&mut self) -> Option<Ticket> {
        let pending = self.model.in_flight.take()?;
        tracing::info!(
            ticket = %pending.ticket,
            action = pending.action().label(),
            "generation cancelled"
        );
        Some(pending.ticket)
    }

    /// Accept the current draft and reset, whatever the round.
    pub fn approve(&mut self) -> Result<Outcome> {
        self.ensure_idle_slot()?;
        self.ensure_phase(
            "approve",
            &[
                WizardPhase::AwaitingAdditional,
                WizardPhase::Reviewing,
                WizardPhase::Revising,
            ],
        )?;
        tracing::info!(round = self.model.feedback_round, "suggestion approved");
        self.model.reset();
        Ok(Outcome::Terminal(TerminalOutcome::Approved))
    }

    /// Open the revision form, or reject and reset once every round is used.
    pub fn edit_or_reject(&mut self) -> Result<Outcome> {
        self.ensure_idle_slot()?;
        self.ensure_phase("edit or reject", &[WizardPhase::Reviewing])?;
        let round = self.model.feedback_round;
        if round >= MAX_FEEDBACK_COUNT {
            tracing::info!(round, "suggestion rejected after final round");
            self.model.reset();
            return Ok(Outcome::Terminal(TerminalOutcome::Rejected));
        }
        self.model.phase = WizardPhase::Revising;
        tracing::info!(round, phase = %self.model.phase, "revision form opened");
        Ok(Outcome::Revising { round })
    }

    pub async fn submit_initial_request(
        &mut self,
        form: &InitialFormData,
        generator: &dyn SuggestionGenerator,
    ) -> Result<SuggestionOutput> {
        let dispatch = self.begin_initial(form)?;
        self.run(dispatch, generator).await
    }

    pub async fn submit_additional_instructions(
        &mut self,
        text: &str,
        generator: &dyn SuggestionGenerator,
    ) -> Result<SuggestionOutput> {
        let dispatch = self.begin_additional(text)?;
        self.run(dispatch, generator).await
    }

    pub async fn request_revision(
        &mut self,
        feedback: &str,
        generator: &dyn SuggestionGenerator,
    ) -> Result<SuggestionOutput> {
        let dispatch = self.begin_revision(feedback)?;
        self.run(dispatch, generator).await
    }

    async fn run(
        &mut self,
        dispatch: Dispatch,
        generator: &dyn SuggestionGenerator,
    ) -> Result<SuggestionOutput> {
        let result = generator.generate(&dispatch.request).await;
        match self.complete(dispatch.ticket, result)? {
            Completion::Applied { output, .. } => Ok(output),
            Completion::Stale => Err(WizardError::Generation(AsoError::Cancelled)),
        }
    }

    fn dispatch(&mut self, action: PendingAction, request: GenerationRequest) -> Dispatch {
        let ticket = Ticket::new();
        self.model.in_flight = Some(PendingGeneration {
            ticket,
            request: request.clone(),
        });
        tracing::info!(
            %ticket,
            action = action.label(),
            phase = %self.model.phase,
            round = self.model.feedback_round,
            "generation started"
        );
        Dispatch { ticket, request }
    }

    fn ensure_idle_slot(&self) -> Result<()> {
        if self.model.is_busy() {
            Err(WizardError::Busy)
        } else {
            Ok(())
        }
    }

    fn ensure_phase(&self, action: &'static str, allowed: &[WizardPhase]) -> Result<()> {
        if allowed.contains(&self.model.phase) {
            Ok(())
        } else {
            Err(WizardError::InvalidAction {
                action,
                phase: self.model.phase,
            })
        }
    }

    fn session_profile(&self) -> Result<aso_common::AppProfile> {
        self.model.profile.clone().ok_or(WizardError::InvalidAction {
            action: "continue without an initial submission",
            phase: self.model.phase,
        })
    }
}
