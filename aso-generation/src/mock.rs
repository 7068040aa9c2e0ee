//! Canned generator standing in for a model backend.
//!
//! Each call sleeps for the configured delay and returns a static payload:
//! one for the initial submission, one for additional instructions, and a
//! `Version N:` family for revisions so every round reads differently.
use crate::traits::{GenerationRequest, SuggestionGenerator, SuggestionOutput};
use aso_common::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const MOCK_MODEL_NAME: &str = "mock-aso";

const INITIAL_TEXT: &str = "Experience our innovative app that transforms how you manage daily tasks. With intuitive design and smart features, you'll boost productivity while enjoying a seamless user experience.";
const INITIAL_HYPOTHESIS: &str = "Users are looking for productivity tools that simplify their workflow without adding complexity. Our application addresses this need by focusing on intuitive design and core functionality.";
const INITIAL_STRATEGY: &str = "Target users who value efficiency and simplicity. Emphasize how our app reduces friction in daily task management and integrates seamlessly with existing workflows.";

const ADDITIONAL_TEXT: &str = "Experience our revolutionary app that transforms daily task management. With smart features and an elegant design, you'll boost productivity while enjoying a truly seamless experience.";
const ADDITIONAL_HYPOTHESIS: &str = "Users seek productivity tools that simplify complex workflows without adding cognitive burden. Our application specifically addresses this need with intuitive design principles and focused functionality.";
const ADDITIONAL_STRATEGY: &str = "Target productivity-focused users who value efficiency and minimal friction. Emphasize how our app streamlines task management and integrates perfectly with existing digital ecosystems.";

const REVISION_TEXT: &str = "Experience our meticulously crafted app that fundamentally changes how you handle daily responsibilities. With thoughtful design and intelligent features, you'll accomplish more while enjoying a frictionless digital experience.";
const REVISION_HYPOTHESIS: &str = "Users are seeking tools that reduce cognitive load while maximizing output quality. Our application directly addresses this need through human-centered design and contextual intelligence.";
const REVISION_STRATEGY: &str = "Target discerning professionals who value both aesthetics and functionality. Emphasize our app's ability to integrate into existing workflows while reducing mental overhead and improving output quality.";

pub struct MockGenerator {
    delay: Duration,
}

impl MockGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No simulated latency; handy in tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Payload returned for a request, without the delay.
///
/// ```
/// use aso_generation::mock::initial_payload;
///
/// assert!(initial_payload().suggested_text.starts_with("Experience our innovative app"));
/// ```
pub fn initial_payload() -> SuggestionOutput {
    SuggestionOutput {
        suggested_text: INITIAL_TEXT.to_string(),
        hypothesis: INITIAL_HYPOTHESIS.to_string(),
        strategy: INITIAL_STRATEGY.to_string(),
    }
}

pub fn additional_payload() -> SuggestionOutput {
    SuggestionOutput {
        suggested_text: ADDITIONAL_TEXT.to_string(),
        hypothesis: ADDITIONAL_HYPOTHESIS.to_string(),
        strategy: ADDITIONAL_STRATEGY.to_string(),
    }
}

/// Revision payloads are labelled one past the round they produce, so the
/// first revision reads "Version 2" (the original draft being version 1).
pub fn revision_payload(round: u8) -> SuggestionOutput {
    let version = u16::from(round) + 1;
    SuggestionOutput {
        suggested_text: format!("Version {version}: {REVISION_TEXT}"),
        hypothesis: format!("Version {version}: {REVISION_HYPOTHESIS}"),
        strategy: format!("Version {version}: {REVISION_STRATEGY}"),
    }
}

#[async_trait]
impl SuggestionGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<SuggestionOutput> {
        tracing::debug!(
            kind = request.kind(),
            app_id = %request.profile().app_id,
            delay_ms = self.delay.as_millis() as u64,
            "mock generation started"
        );
        tracing::trace!("Prompt: {}", self.build_prompt(request));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let output = match request {
            GenerationRequest::Initial { .. } => initial_payload(),
            GenerationRequest::Additional { .. } => additional_payload(),
            GenerationRequest::Revision { round, .. } => revision_payload(*round),
        };
        Ok(output)
    }

    fn name(&self) -> &str {
        MOCK_MODEL_NAME
    }
}
