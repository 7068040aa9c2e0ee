//! Fixed option lists offered by the initial form.
//!
//! Every enum parses from its display label (case-insensitive) or from its
//! 1-based position in [`ALL`](Store::ALL), which is what the terminal form
//! shows next to each option.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Returned when a form value is not one of the offered options.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownOption {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

fn lookup<T: Copy>(
    all: &[T],
    input: &str,
    kind: &'static str,
    names: impl Fn(T) -> [&'static str; 2],
) -> Result<T, UnknownOption> {
    let needle = input.trim();
    if let Ok(idx) = needle.parse::<usize>() {
        return idx
            .checked_sub(1)
            .and_then(|i| all.get(i).copied())
            .ok_or_else(|| UnknownOption::new(kind, needle));
    }
    all.iter()
        .copied()
        .find(|item| names(*item).iter().any(|n| n.eq_ignore_ascii_case(needle)))
        .ok_or_else(|| UnknownOption::new(kind, needle))
}

/// Target app store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Google,
    Apple,
}

impl Store {
    pub const ALL: [Store; 2] = [Store::Google, Store::Apple];

    /// Wire value (`google` / `apple`).
    pub fn value(self) -> &'static str {
        match self {
            Store::Google => "google",
            Store::Apple => "apple",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Store::Google => "Google Play Store",
            Store::Apple => "Apple App Store",
        }
    }
}

impl FromStr for Store {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "store", |v| [v.value(), v.label()])
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Listing language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Japanese,
    Korean,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Russian,
        Language::Japanese,
        Language::Korean,
        Language::Chinese,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Chinese => "Chinese",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "language", |v| [v.label(), v.label()])
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A country offered by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

pub const COUNTRIES: [Country; 15] = [
    Country { code: "US", name: "United States" },
    Country { code: "GB", name: "United Kingdom" },
    Country { code: "CA", name: "Canada" },
    Country { code: "AU", name: "Australia" },
    Country { code: "DE", name: "Germany" },
    Country { code: "FR", name: "France" },
    Country { code: "JP", name: "Japan" },
    Country { code: "BR", name: "Brazil" },
    Country { code: "ES", name: "Spain" },
    Country { code: "IT", name: "Italy" },
    Country { code: "MX", name: "Mexico" },
    Country { code: "IN", name: "India" },
    Country { code: "RU", name: "Russia" },
    Country { code: "CN", name: "China" },
    Country { code: "KR", name: "South Korea" },
];

/// Upper-case ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Accepts a code, a country name, or a 1-based position in [`COUNTRIES`].
    ///
    /// ```
    /// use aso_common::catalog::CountryCode;
    ///
    /// assert_eq!(CountryCode::from_picker("br").unwrap().as_str(), "BR");
    /// assert_eq!(CountryCode::from_picker("South Korea").unwrap().as_str(), "KR");
    /// assert!(CountryCode::from_picker("PT").is_err());
    /// ```
    pub fn from_picker(input: &str) -> Result<Self, UnknownOption> {
        lookup(&COUNTRIES, input, "country", |c| [c.code, c.name]).map(|c| Self::new(c.code))
    }

    /// Accepts any two ASCII letters.
    pub fn from_free_text(input: &str) -> Result<Self, UnknownOption> {
        let trimmed = input.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self::new(trimmed))
        } else {
            Err(UnknownOption::new("country code", trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Picker name for the code, if it is one of [`COUNTRIES`].
    pub fn country_name(&self) -> Option<&'static str> {
        COUNTRIES.iter().find(|c| c.code == self.0).map(|c| c.name)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.country_name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => f.write_str(&self.0),
        }
    }
}

/// KPI the optimization should move (the form's "action area").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kpi {
    #[serde(rename = "Installation Flux (AB Test)")]
    InstallationFlux,
    #[serde(rename = "Conversion Rate")]
    ConversionRate,
    #[serde(rename = "Visibility")]
    Visibility,
    #[serde(rename = "App's Page Maintenance")]
    PageMaintenance,
    #[serde(rename = "Impressions")]
    Impressions,
    #[serde(rename = "Keyword Ranking")]
    KeywordRanking,
    #[serde(rename = "Downloads (returning users)")]
    ReturningDownloads,
    #[serde(rename = "Updates")]
    Updates,
}

impl Kpi {
    pub const ALL: [Kpi; 8] = [
        Kpi::InstallationFlux,
        Kpi::ConversionRate,
        Kpi::Visibility,
        Kpi::PageMaintenance,
        Kpi::Impressions,
        Kpi::KeywordRanking,
        Kpi::ReturningDownloads,
        Kpi::Updates,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Kpi::InstallationFlux => "Installation Flux (AB Test)",
            Kpi::ConversionRate => "Conversion Rate",
            Kpi::Visibility => "Visibility",
            Kpi::PageMaintenance => "App's Page Maintenance",
            Kpi::Impressions => "Impressions",
            Kpi::KeywordRanking => "Keyword Ranking",
            Kpi::ReturningDownloads => "Downloads (returning users)",
            Kpi::Updates => "Updates",
        }
    }
}

impl FromStr for Kpi {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "KPI", |v| [v.label(), v.label()])
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Store-listing section to optimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizationTarget {
    #[serde(rename = "Long description")]
    LongDescription,
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Promotional text")]
    PromotionalText,
    #[serde(rename = "Subtitle")]
    Subtitle,
    #[serde(rename = "Keyword field")]
    KeywordField,
}

impl OptimizationTarget {
    pub const ALL: [OptimizationTarget; 5] = [
        OptimizationTarget::LongDescription,
        OptimizationTarget::Title,
        OptimizationTarget::PromotionalText,
        OptimizationTarget::Subtitle,
        OptimizationTarget::KeywordField,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OptimizationTarget::LongDescription => "Long description",
            OptimizationTarget::Title => "Title",
            OptimizationTarget::PromotionalText => "Promotional text",
            OptimizationTarget::Subtitle => "Subtitle",
            OptimizationTarget::KeywordField => "Keyword field",
        }
    }
}

impl FromStr for OptimizationTarget {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "optimization", |v| [v.label(), v.label()])
    }
}

impl fmt::Display for OptimizationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the suggestion will be shipped: directly, or as an N-arm experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationType {
    #[default]
    #[serde(rename = "Direct Application")]
    Direct,
    #[serde(rename = "AB Test")]
    AbTest,
    #[serde(rename = "ABC Test")]
    AbcTest,
    #[serde(rename = "ABCD Test")]
    AbcdTest,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 4] = [
        ApplicationType::Direct,
        ApplicationType::AbTest,
        ApplicationType::AbcTest,
        ApplicationType::AbcdTest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ApplicationType::Direct => "Direct Application",
            ApplicationType::AbTest => "AB Test",
            ApplicationType::AbcTest => "ABC Test",
            ApplicationType::AbcdTest => "ABCD Test",
        }
    }

    /// Number of parallel drafts, read off the arm letters in the label.
    pub fn variation_count(self) -> usize {
        match self {
            ApplicationType::Direct => 1,
            _ => self
                .label()
                .split_whitespace()
                .next()
                .map(|arms| arms.chars().filter(char::is_ascii_uppercase).count())
                .unwrap_or(1)
                .max(1),
        }
    }

    /// Arm letters (`A`, `B`, ...) for each draft.
    pub fn arms(self) -> Vec<char> {
        ('A'..='Z').take(self.variation_count()).collect()
    }
}

impl FromStr for ApplicationType {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "application type", |v| [v.label(), v.label()])
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
