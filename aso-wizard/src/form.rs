//! Raw initial-form input and its validation into an [`AppProfile`].
use crate::error::ValidationErrors;
use aso_common::{
    AppProfile,
    catalog::{
        ApplicationType, CountryCode, Kpi, Language, OptimizationTarget, Store, UnknownOption,
    },
};
use aso_config::CountryInput;
use std::fmt;

/// Fields that can carry an inline validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    AppId,
    Store,
    Language,
    CountryCode,
    Kpi,
    Optimization,
    ApplicationType,
    Instructions,
    AdditionalInstructions,
    Feedback,
    Email,
    Rating,
}

impl FormField {
    /// Initial-form fields in display order.
    pub const INITIAL: [FormField; 8] = [
        FormField::AppId,
        FormField::Store,
        FormField::Language,
        FormField::CountryCode,
        FormField::Kpi,
        FormField::Optimization,
        FormField::ApplicationType,
        FormField::Instructions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::AppId => "App ID",
            FormField::Store => "Store",
            FormField::Language => "Language",
            FormField::CountryCode => "Country",
            FormField::Kpi => "Action Area (KPI)",
            FormField::Optimization => "Optimization",
            FormField::ApplicationType => "Application Type",
            FormField::Instructions => "Instructions",
            FormField::AdditionalInstructions => "Additional Instructions",
            FormField::Feedback => "Feedback",
            FormField::Email => "Email",
            FormField::Rating => "Rating",
        }
    }

    /// Key accepted by `/set`.
    pub fn key(self) -> &'static str {
        match self {
            FormField::AppId => "app_id",
            FormField::Store => "store",
            FormField::Language => "language",
            FormField::CountryCode => "country",
            FormField::Kpi => "kpi",
            FormField::Optimization => "optimization",
            FormField::ApplicationType => "type",
            FormField::Instructions => "instructions",
            FormField::AdditionalInstructions => "additional",
            FormField::Feedback => "feedback",
            FormField::Email => "email",
            FormField::Rating => "rating",
        }
    }

    /// Resolve a `/set` key to an initial-form field.
    pub fn from_key(key: &str) -> Option<FormField> {
        match key.trim().to_ascii_lowercase().as_str() {
            "app_id" | "app" | "appid" => Some(FormField::AppId),
            "store" => Some(FormField::Store),
            "language" | "lang" => Some(FormField::Language),
            "country" | "country_code" => Some(FormField::CountryCode),
            "kpi" | "action_area" => Some(FormField::Kpi),
            "optimization" | "section" => Some(FormField::Optimization),
            "application_type" | "type" => Some(FormField::ApplicationType),
            "instructions" => Some(FormField::Instructions),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The initial form as typed, before validation.
///
/// Option fields hold whatever the user entered (a label, a value or a
/// 1-based index); [`InitialFormData::validate`] resolves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialFormData {
    pub app_id: String,
    pub store: String,
    pub language: String,
    pub country_code: String,
    pub kpi: String,
    pub optimization: String,
    pub application_type: String,
    pub instructions: String,
    pub suggest_keywords: bool,
}

impl Default for InitialFormData {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            store: String::new(),
            language: String::new(),
            country_code: String::new(),
            kpi: String::new(),
            optimization: String::new(),
            application_type: ApplicationType::default().label().to_string(),
            instructions: String::new(),
            suggest_keywords: false,
        }
    }
}

fn unknown(e: UnknownOption) -> String {
    format!("Unknown {} '{}'", e.kind, e.value)
}

impl InitialFormData {
    /// Store `value` in `field`. Fields outside the initial form are ignored
    /// and reported as `false`.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            FormField::AppId => &mut self.app_id,
            FormField::Store => &mut self.store,
            FormField::Language => &mut self.language,
            FormField::CountryCode => &mut self.country_code,
            FormField::Kpi => &mut self.kpi,
            FormField::Optimization => &mut self.optimization,
            FormField::ApplicationType => &mut self.application_type,
            FormField::Instructions => &mut self.instructions,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::AppId => &self.app_id,
            FormField::Store => &self.store,
            FormField::Language => &self.language,
            FormField::CountryCode => &self.country_code,
            FormField::Kpi => &self.kpi,
            FormField::Optimization => &self.optimization,
            FormField::ApplicationType => &self.application_type,
            FormField::Instructions => &self.instructions,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Resolve every field, collecting one message per failing field.
    ///
    /// ```
    /// use aso_config::CountryInput;
    /// use aso_wizard::form::{FormField, InitialFormData};
    ///
    /// let errors = InitialFormData::default()
    ///     .validate(CountryInput::Picker)
    ///     .unwrap_err();
    /// assert_eq!(errors.get(FormField::AppId), Some("App ID is required"));
    /// assert!(!errors.contains(FormField::ApplicationType));
    /// ```
    pub fn validate(&self, country_input: CountryInput) -> Result<AppProfile, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let app_id = self.app_id.trim();
        if app_id.is_empty() {
            errors.push(FormField::AppId, "App ID is required");
        }

        let store = required(&mut errors, FormField::Store, &self.store, "Store selection is required", |s| {
            s.parse::<Store>()
        });
        let language = required(
            &mut errors,
            FormField::Language,
            &self.language,
            "Language selection is required",
            |s| s.parse::<Language>(),
        );
        let country_code = required(
            &mut errors,
            FormField::CountryCode,
            &self.country_code,
            "Country code is required",
            |s| match country_input {
                CountryInput::Picker => CountryCode::from_picker(s),
                CountryInput::FreeText => CountryCode::from_free_text(s),
            },
        );
        let kpi = required(&mut errors, FormField::Kpi, &self.kpi, "KPI selection is required", |s| {
            s.parse::<Kpi>()
        });
        let optimization = required(
            &mut errors,
            FormField::Optimization,
            &self.optimization,
            "Optimization selection is required",
            |s| s.parse::<OptimizationTarget>(),
        );
        let application_type = required(
            &mut errors,
            FormField::ApplicationType,
            &self.application_type,
            "Application type is required",
            |s| s.parse::<ApplicationType>(),
        );

        let instructions = self.instructions.trim();
        if instructions.is_empty() {
            errors.push(FormField::Instructions, "Instructions are required");
        }

        match (store, language, country_code, kpi, optimization, application_type) {
            (
                Some(store),
                Some(language),
                Some(country_code),
                Some(kpi),
                Some(optimization),
                Some(application_type),
            ) if errors.is_empty() => Ok(AppProfile {
                app_id: app_id.to_string(),
                store,
                language,
                country_code,
                kpi,
                optimization,
                application_type,
                instructions: instructions.to_string(),
                suggest_keywords: self.suggest_keywords,
            }),
            _ => Err(errors),
        }
    }
}

fn required<T>(
    errors: &mut ValidationErrors,
    field: FormField,
    raw: &str,
    missing: &str,
    parse: impl FnOnce(&str) -> Result<T, UnknownOption>,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(field, missing);
        return None;
    }
    match parse(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(field, unknown(e));
            None
        }
    }
}

/// Non-empty free text for the additional-instructions or revision form.
pub(crate) fn required_text(
    field: FormField,
    text: &str,
    missing: &str,
) -> Result<String, ValidationErrors> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ValidationErrors::single(field, missing))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> InitialFormData {
        InitialFormData {
            app_id: "com.example.tasks".into(),
            store: "google".into(),
            language: "English".into(),
            country_code: "US".into(),
            kpi: "Conversion Rate".into(),
            optimization: "Title".into(),
            application_type: "AB Test".into(),
            instructions: "Highlight offline mode".into(),
            suggest_keywords: true,
        }
    }

    #[test]
    fn complete_form_resolves_every_option() {
        let profile = filled().validate(CountryInput::Picker).unwrap();
        assert_eq!(profile.store, Store::Google);
        assert_eq!(profile.language, Language::English);
        assert_eq!(profile.country_code.as_str(), "US");
        assert_eq!(profile.application_type, ApplicationType::AbTest);
        assert!(profile.suggest_keywords);
    }

    #[test]
    fn empty_form_reports_each_required_field() {
        let mut form = InitialFormData::default();
        form.application_type.clear();
        let errors = form.validate(CountryInput::Picker).unwrap_err();
        assert_eq!(errors.len(), FormField::INITIAL.len());
        assert_eq!(errors.get(FormField::Store), Some("Store selection is required"));
        assert_eq!(errors.get(FormField::Kpi), Some("KPI selection is required"));
        assert_eq!(
            errors.get(FormField::ApplicationType),
            Some("Application type is required")
        );
        assert_eq!(errors.get(FormField::Instructions), Some("Instructions are required"));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut form = filled();
        form.app_id = "   ".into();
        let errors = form.validate(CountryInput::Picker).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(FormField::AppId));
    }

    #[test]
    fn out_of_list_value_is_rejected() {
        let mut form = filled();
        form.store = "windows".into();
        let errors = form.validate(CountryInput::Picker).unwrap_err();
        assert_eq!(errors.get(FormField::Store), Some("Unknown store 'windows'"));
    }

    #[test]
    fn country_input_mode_changes_what_is_accepted() {
        let mut form = filled();
        form.country_code = "pt".into();
        assert!(form.validate(CountryInput::Picker).is_err());
        let profile = form.validate(CountryInput::FreeText).unwrap();
        assert_eq!(profile.country_code.as_str(), "PT");

        form.country_code = "PRT".into();
        assert!(form.validate(CountryInput::FreeText).is_err());
    }

    #[test]
    fn set_routes_keys_to_fields() {
        let mut form = InitialFormData::default();
        let field = FormField::from_key("type").unwrap();
        assert!(form.set(field, "ABCD Test"));
        assert_eq!(form.get(FormField::ApplicationType), Some("ABCD Test"));
        assert!(!form.set(FormField::Email, "x@y.z"));
        assert_eq!(FormField::from_key("nope"), None);
    }
}
