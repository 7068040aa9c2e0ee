//! Which panels to show for a view model, and the text they carry.
use crate::{
    MAX_FEEDBACK_COUNT,
    state::{ViewModel, WizardPhase},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    InitialForm,
    AdditionalInstructions,
    Output,
    Approval,
    RevisionForm,
}

impl Panel {
    pub fn title(self) -> &'static str {
        match self {
            Panel::InitialForm => "Initial Request",
            Panel::AdditionalInstructions => "Additional Instructions",
            Panel::Output => "Suggestions",
            Panel::Approval => "Review",
            Panel::RevisionForm => "Revision Request",
        }
    }
}

/// Panels visible for `model`, top to bottom.
///
/// ```
/// use aso_wizard::composer::{visible_panels, Panel};
/// use aso_wizard::state::ViewModel;
///
/// assert_eq!(visible_panels(&ViewModel::default()), vec![Panel::InitialForm]);
/// ```
pub fn visible_panels(model: &ViewModel) -> Vec<Panel> {
    let mut panels = vec![Panel::InitialForm];
    if model.phase() == WizardPhase::AwaitingAdditional {
        panels.push(Panel::AdditionalInstructions);
    }
    if model.initial_submitted() && model.output().is_some() {
        panels.push(Panel::Output);
    }
    match model.phase() {
        WizardPhase::Reviewing => panels.push(Panel::Approval),
        WizardPhase::Revising => panels.push(Panel::RevisionForm),
        _ => {}
    }
    panels
}

/// The two buttons of the approval panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalActions {
    pub approve: &'static str,
    pub edit: &'static str,
}

pub fn approval_actions(round: u8) -> ApprovalActions {
    if round >= MAX_FEEDBACK_COUNT {
        ApprovalActions {
            approve: "Approve",
            edit: "Reject",
        }
    } else {
        ApprovalActions {
            approve: "Approve Suggestion",
            edit: "Edit Suggestion",
        }
    }
}

pub fn round_banner(round: u8) -> Option<String> {
    match round {
        0 => None,
        r if r >= MAX_FEEDBACK_COUNT => Some("Final decision required".to_string()),
        r => Some(format!("Feedback round {r} of {MAX_FEEDBACK_COUNT}")),
    }
}

pub fn revision_label(round: u8) -> String {
    format!("Revision Request (Round {})", u16::from(round) + 1)
}

pub fn submit_label(busy: bool) -> &'static str {
    if busy { "Processing..." } else { "Submit" }
}

/// Shown alongside the additional-instructions panel.
pub const ANALYSIS_GUIDANCE_TITLE: &str = "API Analysis Guidance";

pub const ANALYSIS_GUIDANCE_INTRO: &str = "Based on our analysis of your KPI goals, we recommend focusing on the following aspects in your optimization strategy:";

pub const ANALYSIS_GUIDANCE: [&str; 4] = [
    "Consider adjusting your keyword strategy to target more specific user intents",
    "Highlight unique features that differentiate your app from competitors",
    "Address user pain points mentioned in recent reviews",
    "Optimize for regional preferences in your target markets",
];

/// One labelled draft in the output panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    pub label: String,
    pub text: String,
}

/// One draft per experiment arm, all showing the current suggested text.
/// A direct application gets a single "Variation A".
pub fn variations(model: &ViewModel) -> Vec<Variation> {
    let Some(output) = model.output() else {
        return Vec::new();
    };
    let kind = model
        .profile()
        .map(|p| p.application_type)
        .unwrap_or_default();
    kind.arms()
        .into_iter()
        .map(|arm| Variation {
            label: format!("Variation {arm}"),
            text: output.suggested_text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_switch_at_the_cap() {
        assert_eq!(approval_actions(0).approve, "Approve Suggestion");
        assert_eq!(approval_actions(2).edit, "Edit Suggestion");
        assert_eq!(approval_actions(3).approve, "Approve");
        assert_eq!(approval_actions(3).edit, "Reject");
    }

    #[test]
    fn banner_tracks_round() {
        assert_eq!(round_banner(0), None);
        assert_eq!(round_banner(1).as_deref(), Some("Feedback round 1 of 3"));
        assert_eq!(round_banner(2).as_deref(), Some("Feedback round 2 of 3"));
        assert_eq!(round_banner(3).as_deref(), Some("Final decision required"));
    }

    #[test]
    fn revision_label_names_the_next_round() {
        assert_eq!(revision_label(0), "Revision Request (Round 1)");
        assert_eq!(revision_label(2), "Revision Request (Round 3)");
    }

    #[test]
    fn empty_model_has_no_variations() {
        assert!(variations(&ViewModel::default()).is_empty());
    }

    #[test]
    fn submit_label_reflects_busy() {
        assert_eq!(submit_label(true), "Processing...");
        assert_eq!(submit_label(false), "Submit");
    }
}
