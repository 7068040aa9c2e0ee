//! Suggestion generation for the ASO wizard.
//!
//! This crate exposes the [`traits::SuggestionGenerator`] interface the wizard
//! talks to, and the [`mock::MockGenerator`] that stands in for a model
//! backend. [`ensure_generator_ready`] builds the configured generator.
//!
//! # Examples
//! ```
//! use aso_config::GeneratorConfig;
//! use aso_generation::ensure_generator_ready;
//!
//! # #[tokio::main]
//! # async fn main() -> aso_common::Result<()> {
//! let cfg = GeneratorConfig { delay_ms: 0, ..GeneratorConfig::default() };
//! let generator = ensure_generator_ready(&cfg)?;
//! assert_eq!(generator.name(), "mock-aso");
//! # Ok(())
//! # }
//! ```
pub mod mock;
pub mod traits;

use aso_config::{GeneratorConfig, GeneratorKind};
use mock::MockGenerator;
use std::{sync::Arc, time::Duration};
use traits::SuggestionGenerator;

pub use traits::{GenerationRequest, SuggestionOutput};

/// Build the generator named by the configuration.
pub fn ensure_generator_ready(
    config: &GeneratorConfig,
) -> aso_common::Result<Arc<dyn SuggestionGenerator + Send + Sync + 'static>> {
    match config.kind {
        GeneratorKind::Mock => {
            let delay = Duration::from_millis(config.delay_ms);
            tracing::info!(delay_ms = config.delay_ms, "using mock generator");
            Ok(Arc::new(MockGenerator::new(delay)))
        }
    }
}
