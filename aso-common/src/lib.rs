//! Common types and utilities shared across the ASO wizard crates.
//!
//! This crate defines the store-listing vocabulary (stores, languages,
//! countries, KPIs, optimization targets, application types), the validated
//! [`AppProfile`] handed to generators, observability helpers, and the shared
//! error type. It stays dependency-light so every crate in the workspace can
//! depend on it.
//!
//! # Overview
//!
//! - [`catalog`]: the fixed option lists offered by the initial form
//! - [`AppProfile`]: a fully validated initial submission
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`AsoError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use aso_common::catalog::ApplicationType;
//!
//! let kind: ApplicationType = "ABC Test".parse().unwrap();
//! assert_eq!(kind.variation_count(), 3);
//! ```
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod observability;

use catalog::{ApplicationType, CountryCode, Kpi, Language, OptimizationTarget, Store};

/// Everything the initial form collects, after validation.
///
/// Generators receive this with every request so a regeneration always has
/// the full app context, not just the latest instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppProfile {
    pub app_id: String,
    pub store: Store,
    pub language: Language,
    pub country_code: CountryCode,
    pub kpi: Kpi,
    pub optimization: OptimizationTarget,
    pub application_type: ApplicationType,
    pub instructions: String,
    pub suggest_keywords: bool,
}

/// Error types used across the wizard.
#[derive(thiserror::Error, Debug)]
pub enum AsoError {
    /// The generation collaborator failed to produce suggestions.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The in-flight generation was cancelled before it resolved.
    #[error("Generation cancelled")]
    Cancelled,

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plumbing failure (mailbox dropped, task panicked, ...).
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Convenient alias for results that use [`AsoError`].
pub type Result<T> = std::result::Result<T, AsoError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AppProfile {
        AppProfile {
            app_id: "com.example.tasks".into(),
            store: Store::Google,
            language: Language::Portuguese,
            country_code: CountryCode::new("BR"),
            kpi: Kpi::ConversionRate,
            optimization: OptimizationTarget::Title,
            application_type: ApplicationType::AbTest,
            instructions: "Lean on offline mode".into(),
            suggest_keywords: true,
        }
    }

    #[test]
    fn profile_serializes_with_option_values() {
        let json = serde_json::to_value(profile()).unwrap();
        assert_eq!(json["store"], "google");
        assert_eq!(json["language"], "portuguese");
        assert_eq!(json["country_code"], "BR");
        assert_eq!(json["kpi"], "Conversion Rate");
        assert_eq!(json["application_type"], "AB Test");
    }

    #[test]
    fn error_messages_are_prefixed() {
        let err = AsoError::Generation("upstream unavailable".into());
        assert_eq!(err.to_string(), "Generation error: upstream unavailable");
        assert_eq!(AsoError::Cancelled.to_string(), "Generation cancelled");
    }
}
