//! Short, non-blocking messages shown after each action.
use crate::{
    controller::{Completion, Outcome, TerminalOutcome},
    error::WizardError,
    state::PendingAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new("Error", description, Severity::Destructive)
    }

    /// Notice for a completed generation. `round` is the round after the
    /// completion was applied.
    pub fn for_completion(completion: &Completion, round: u8) -> Option<Notice> {
        match completion {
            Completion::Applied { action, .. } => Some(match action {
                PendingAction::Initial => {
                    Notice::success("Success!", "Your initial data was processed successfully.")
                }
                PendingAction::Additional => Notice::success(
                    "Success!",
                    "Your additional instructions were processed successfully.",
                ),
                PendingAction::Revision => Notice::success(
                    "Feedback Processed",
                    format!("Your revision request (round {round}) was processed successfully."),
                ),
            }),
            Completion::Stale => None,
        }
    }

    pub fn for_outcome(outcome: Outcome) -> Option<Notice> {
        match outcome {
            Outcome::Terminal(TerminalOutcome::Approved) => Some(Notice::success(
                "Content Approved!",
                "The suggestion was approved. Returning to the start...",
            )),
            Outcome::Terminal(TerminalOutcome::Rejected) => Some(Notice::new(
                "Rejected",
                "The suggestion was rejected.",
                Severity::Destructive,
            )),
            Outcome::Revising { .. } => None,
        }
    }

    /// Notice for a failed generating action. Validation problems are shown
    /// inline instead, so they map to `None`.
    pub fn for_failure(action: PendingAction, err: &WizardError) -> Option<Notice> {
        match err {
            WizardError::Validation(_) => None,
            WizardError::Generation(_) => Some(Notice::error(match action {
                PendingAction::Initial => "Failed to process your request. Please try again.",
                PendingAction::Additional => {
                    "Failed to process your additional instructions. Please try again."
                }
                PendingAction::Revision => "Failed to process your feedback. Please try again.",
            })),
            WizardError::Busy => Some(Notice::info(
                "Please wait",
                "A request is already being processed.",
            )),
            other => Some(Notice::error(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aso_common::AsoError;
    use aso_generation::mock;

    #[test]
    fn revision_notice_carries_round() {
        let completion = Completion::Applied {
            action: PendingAction::Revision,
            output: mock::revision_payload(2),
        };
        let notice = Notice::for_completion(&completion, 2).unwrap();
        assert_eq!(notice.title, "Feedback Processed");
        assert_eq!(
            notice.description,
            "Your revision request (round 2) was processed successfully."
        );
        assert_eq!(Notice::for_completion(&Completion::Stale, 2), None);
    }

    #[test]
    fn reject_is_destructive() {
        let notice =
            Notice::for_outcome(Outcome::Terminal(TerminalOutcome::Rejected)).unwrap();
        assert_eq!(notice.severity, Severity::Destructive);
        assert_eq!(Notice::for_outcome(Outcome::Revising { round: 1 }), None);
    }

    #[test]
    fn generation_failure_text_depends_on_action() {
        let err = WizardError::Generation(AsoError::Generation("boom".into()));
        let notice = Notice::for_failure(PendingAction::Additional, &err).unwrap();
        assert_eq!(notice.title, "Error");
        assert_eq!(
            notice.description,
            "Failed to process your additional instructions. Please try again."
        );
    }
}
