//! The ASO suggestion wizard, without any terminal I/O.
//!
//! [`controller::WizardController`] owns the [`state::ViewModel`] and is the
//! only thing that mutates it. Front ends read the model, ask
//! [`composer`] which panels to draw, and turn results into [`notice`]s.
//!
//! ```
//! use aso_config::CountryInput;
//! use aso_generation::mock::MockGenerator;
//! use aso_wizard::{controller::WizardController, form::InitialFormData};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), aso_wizard::WizardError> {
//! let mut wizard = WizardController::new(CountryInput::Picker);
//! let form = InitialFormData {
//!     app_id: "com.example.tasks".into(),
//!     store: "apple".into(),
//!     language: "English".into(),
//!     country_code: "US".into(),
//!     kpi: "Visibility".into(),
//!     optimization: "Subtitle".into(),
//!     instructions: "Mention offline sync".into(),
//!     ..InitialFormData::default()
//! };
//! wizard.submit_initial_request(&form, &MockGenerator::instant()).await?;
//! assert!(wizard.model().initial_submitted());
//! # Ok(())
//! # }
//! ```
pub mod composer;
pub mod controller;
pub mod error;
pub mod form;
pub mod notice;
pub mod rating;
pub mod state;

pub use error::{FieldError, ValidationErrors, WizardError};

/// Revision rounds allowed before only approve or reject remain.
pub const MAX_FEEDBACK_COUNT: u8 = 3;
