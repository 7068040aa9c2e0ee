use aso_common::{AppProfile, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The three drafts returned by every generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionOutput {
    pub suggested_text: String,
    pub hypothesis: String,
    pub strategy: String,
}

impl SuggestionOutput {
    /// `(title, content)` pairs in display order.
    pub fn sections(&self) -> [(&'static str, &str); 3] {
        [
            ("Suggested Text", &self.suggested_text),
            ("Hypothesis", &self.hypothesis),
            ("Strategy", &self.strategy),
        ]
    }
}

/// What the wizard asks the generator for.
///
/// Every variant carries the validated profile so a generator never needs
/// wizard state to build its prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationRequest {
    Initial {
        profile: AppProfile,
    },
    Additional {
        profile: AppProfile,
        instructions: String,
    },
    /// `round` is the feedback round this revision produces (1-based).
    Revision {
        profile: AppProfile,
        round: u8,
        feedback: String,
    },
}

impl GenerationRequest {
    pub fn profile(&self) -> &AppProfile {
        match self {
            GenerationRequest::Initial { profile }
            | GenerationRequest::Additional { profile, .. }
            | GenerationRequest::Revision { profile, .. } => profile,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::Initial { .. } => "initial",
            GenerationRequest::Additional { .. } => "additional",
            GenerationRequest::Revision { .. } => "revision",
        }
    }
}

#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    /// Produce a fresh set of suggestions for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<SuggestionOutput>;

    /// Name shown in logs and the status bar.
    fn name(&self) -> &str;

    /// Default system prompt for store-listing work.
    fn system_prompt(&self) -> &str {
        r#"You are an app store optimization specialist with deep experience in Google Play and Apple App Store listings.

Your role:
- Write listing copy that moves the requested KPI
- State the hypothesis behind every change
- Describe the rollout strategy for the chosen application type

Guidelines:
- Respect the target language and market
- Keep copy within the limits of the selected listing section
- Prefer concrete benefits over generic claims"#
    }

    /// Flatten a request into a single user prompt.
    fn build_prompt(&self, request: &GenerationRequest) -> String {
        let p = request.profile();
        let mut prompt = format!(
            "APP: {}\nSTORE: {}\nLANGUAGE: {}\nCOUNTRY: {}\nKPI: {}\nSECTION: {}\nAPPLICATION: {} ({} variation(s))\nKEYWORDS: {}\n\nINSTRUCTIONS: \"{}\"",
            p.app_id,
            p.store.label(),
            p.language.label(),
            p.country_code,
            p.kpi.label(),
            p.optimization.label(),
            p.application_type.label(),
            p.application_type.variation_count(),
            if p.suggest_keywords { "suggest" } else { "skip" },
            p.instructions,
        );

        match request {
            GenerationRequest::Initial { .. } => {}
            GenerationRequest::Additional { instructions, .. } => {
                prompt.push_str(&format!("\n\nADDITIONAL INSTRUCTIONS: \"{instructions}\""));
            }
            GenerationRequest::Revision {
                round, feedback, ..
            } => {
                prompt.push_str(&format!("\n\nREVISION REQUEST (round {round}): \"{feedback}\""));
            }
        }
        prompt
    }
}
