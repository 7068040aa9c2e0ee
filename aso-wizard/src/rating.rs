//! The optional "Help Us Improve" rating form.
use crate::{error::ValidationErrors, form::FormField, notice::Notice};
use regex::Regex;
use std::sync::OnceLock;

pub const RATING_TITLE: &str = "Help Us Improve";
pub const RATING_PROMPT: &str = "Please rate your experience and share your thoughts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRating {
    pub email: String,
    pub rating: u8,
    pub comment: Option<String>,
}

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

impl FeedbackRating {
    /// Build a rating from raw input, trimming the email and dropping an
    /// empty comment.
    pub fn new(email: &str, rating: u8, comment: Option<&str>) -> Self {
        Self {
            email: email.trim().to_string(),
            rating,
            comment: comment
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email_ok = email_pattern().is_some_and(|re| re.is_match(&self.email));
        if !email_ok {
            errors.push(FormField::Email, "Please enter a valid email address");
        }
        if !(1..=5).contains(&self.rating) {
            errors.push(FormField::Rating, "Rating must be between 1 and 5");
        }
        errors.into_result()
    }
}

/// Validate and record a rating. Nothing is stored; the submission goes to
/// the log.
pub fn submit_rating(rating: &FeedbackRating) -> Result<Notice, ValidationErrors> {
    rating.validate()?;
    tracing::info!(
        email = %rating.email,
        rating = rating.rating,
        comment = rating.comment.as_deref().unwrap_or(""),
        "feedback submitted"
    );
    Ok(Notice::success(
        "Thank you for your feedback!",
        "Your response has been recorded successfully.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_rating_is_acknowledged() {
        let rating = FeedbackRating::new(" ana@example.com ", 5, Some("  "));
        assert_eq!(rating.comment, None);
        let notice = submit_rating(&rating).unwrap();
        assert_eq!(notice.title, "Thank you for your feedback!");
    }

    #[test]
    fn bad_email_and_rating_are_both_reported() {
        let rating = FeedbackRating::new("not-an-email", 0, None);
        let errors = rating.validate().unwrap_err();
        assert_eq!(
            errors.get(FormField::Email),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            errors.get(FormField::Rating),
            Some("Rating must be between 1 and 5")
        );
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(FeedbackRating::new("a@b.co", 1, None).validate().is_ok());
        assert!(FeedbackRating::new("a@b.co", 5, None).validate().is_ok());
        assert!(FeedbackRating::new("a@b.co", 6, None).validate().is_err());
        assert!(FeedbackRating::new("a b@c.d", 3, None).validate().is_err());
    }
}
