use crate::{
    command::{Command, parse_command},
    styles,
    transcript::TranscriptLine,
    view::PanelView,
};
use aso_common::catalog::{
    ApplicationType, COUNTRIES, Kpi, Language, OptimizationTarget, Store,
};
use aso_config::CountryInput;
use aso_generation::SuggestionOutput;
use aso_wizard::{
    ValidationErrors, WizardError,
    composer::{self, Panel},
    controller::{Completion, Dispatch, Outcome, WizardController},
    form::{FormField, InitialFormData},
    notice::{Notice, Severity},
    rating::{self, FeedbackRating},
    state::{PendingAction, Ticket, WizardPhase},
};
use ratatui::style::Style;

/// What the actor must do after a line was handled.
#[derive(Debug)]
pub enum Effect {
    Generate(Dispatch),
    Cancel(Ticket),
    Quit,
}

/// Wizard state plus the transcript, with no terminal attached.
pub struct WizardSession {
    wizard: WizardController,
    form: InitialFormData,
    form_errors: ValidationErrors,
    lines: Vec<TranscriptLine>,
}

impl WizardSession {
    pub fn new(country_input: CountryInput) -> Self {
        let mut session = Self {
            wizard: WizardController::new(country_input),
            form: InitialFormData::default(),
            form_errors: ValidationErrors::new(),
            lines: Vec::new(),
        };
        session.push_styled(
            "Fill the form with `/set <field> <value>`, then `/submit`. `/help` lists commands.",
            styles::system(),
        );
        session
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn is_busy(&self) -> bool {
        self.wizard.model().is_busy()
    }

    pub fn status(&self) -> String {
        let model = self.wizard.model();
        format!(
            "{} • round {}/{}",
            model.phase(),
            model.feedback_round(),
            aso_wizard::MAX_FEEDBACK_COUNT
        )
    }

    fn push_styled<S: Into<String>>(&mut self, s: S, style: Style) {
        self.lines.push(TranscriptLine::new(s.into(), style));
    }

    fn push_blank(&mut self) {
        self.push_styled(String::new(), Style::default());
    }

    fn push_notice(&mut self, notice: &Notice) {
        let style = styles::notice(notice.severity);
        self.push_styled(format!("{} {}", notice_marker(notice), notice.title), style);
        self.push_styled(format!("  {}", notice.description), style);
        self.push_blank();
    }

    fn push_validation(&mut self, errors: &ValidationErrors) {
        for e in errors.iter() {
            self.push_styled(format!("× {}: {}", e.field, e.message), styles::error());
        }
        self.push_blank();
    }

    /// Handle one submitted input line.
    pub fn submit(&mut self, line: &str) -> Option<Effect> {
        let s = line.trim();
        if s.is_empty() {
            return None;
        }
        if s.starts_with('/') {
            return self.handle_command(parse_command(s));
        }

        match self.wizard.model().phase() {
            WizardPhase::AwaitingAdditional => {
                self.echo("→ [Additional Instructions]", s);
                let result = self.wizard.begin_additional(s);
                self.dispatched(PendingAction::Additional, result)
            }
            WizardPhase::Revising => {
                let label = composer::revision_label(self.wizard.model().feedback_round());
                self.echo(&format!("→ [{label}]"), s);
                let result = self.wizard.begin_revision(s);
                self.dispatched(PendingAction::Revision, result)
            }
            WizardPhase::Reviewing => {
                let actions = composer::approval_actions(self.wizard.model().feedback_round());
                self.push_styled(
                    format!(
                        "Use `/approve` ({}) or `/edit` ({}).",
                        actions.approve, actions.edit
                    ),
                    styles::dim(),
                );
                self.push_blank();
                None
            }
            WizardPhase::Idle => {
                self.push_styled(
                    "× Fill the form with `/set <field> <value>` and send it with `/submit`.",
                    styles::error(),
                );
                self.push_blank();
                None
            }
        }
    }

    fn echo(&mut self, header: &str, text: &str) {
        self.push_styled(header.to_string(), styles::user_header());
        for line in text.lines() {
            self.push_styled(format!("  {line}"), styles::user_text());
        }
        self.push_blank();
    }

    fn dispatched(
        &mut self,
        action: PendingAction,
        result: Result<Dispatch, WizardError>,
    ) -> Option<Effect> {
        match result {
            Ok(dispatch) => {
                self.push_styled(
                    format!("{} …", composer::submit_label(true)),
                    styles::system(),
                );
                Some(Effect::Generate(dispatch))
            }
            Err(WizardError::Validation(errors)) => {
                if action == PendingAction::Initial {
                    self.form_errors = errors.clone();
                }
                self.push_validation(&errors);
                None
            }
            Err(err) => {
                if let Some(notice) = Notice::for_failure(action, &err) {
                    self.push_notice(&notice);
                }
                None
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) -> Option<Effect> {
        match cmd {
            Command::Quit => return Some(Effect::Quit),
            Command::Help => self.show_help(),
            Command::Set { field, value } => self.set_field(&field, value),
            Command::Form => self.show_form(),
            Command::Keywords(on) => {
                self.form.suggest_keywords = on;
                let state = if on { "on" } else { "off" };
                self.push_styled(format!("✓ Keyword suggestions {state}."), styles::system());
                self.push_blank();
            }
            Command::Submit => {
                let result = self.wizard.begin_initial(&self.form);
                if result.is_ok() {
                    self.form_errors = ValidationErrors::new();
                    let app_id = format!("  {}", self.form.app_id.trim());
                    self.push_styled("→ [Initial Request]", styles::user_header());
                    self.push_styled(app_id, styles::user_text());
                    self.push_blank();
                }
                return self.dispatched(PendingAction::Initial, result);
            }
            Command::Approve => match self.wizard.approve() {
                Ok(outcome) => {
                    self.after_terminal(outcome);
                }
                Err(err) => self.push_error(&err),
            },
            Command::Edit => match self.wizard.edit_or_reject() {
                Ok(outcome) => {
                    self.after_terminal(outcome);
                }
                Err(err) => self.push_error(&err),
            },
            Command::Cancel => match self.wizard.cancel_in_flight() {
                Some(ticket) => {
                    self.push_styled("✓ Request cancelled.", styles::system());
                    self.push_blank();
                    return Some(Effect::Cancel(ticket));
                }
                None => {
                    self.push_styled("Nothing to cancel.", styles::dim());
                    self.push_blank();
                }
            },
            Command::Rate {
                rating,
                email,
                comment,
            } => self.rate(&rating, &email, comment.as_deref()),
            Command::Usage(usage) => {
                self.push_styled(format!("Usage: {usage}"), styles::dim());
                self.push_blank();
            }
            Command::Unknown(s) => {
                self.push_styled(format!("× Unknown command: {s}"), styles::error());
                self.push_styled("Try `/help`.", styles::dim());
                self.push_blank();
            }
        }
        None
    }

    fn after_terminal(&mut self, outcome: Outcome) {
        match Notice::for_outcome(outcome) {
            Some(notice) => {
                self.push_notice(&notice);
                self.form = InitialFormData::default();
                self.form_errors = ValidationErrors::new();
            }
            None => {
                let round = self.wizard.model().feedback_round();
                self.push_styled(composer::revision_label(round), styles::label());
                self.push_styled("  Type your feedback and press Enter.", styles::dim());
                self.push_blank();
            }
        }
    }

    fn push_error(&mut self, err: &WizardError) {
        self.push_styled(format!("× {err}"), styles::error());
        self.push_blank();
    }

    fn set_field(&mut self, key: &str, value: String) {
        let Some(field) = FormField::from_key(key) else {
            self.push_styled(format!("× Unknown field: {key}"), styles::error());
            self.push_styled(
                "  Fields: app_id, store, language, country, kpi, optimization, type, instructions",
                styles::dim(),
            );
            self.push_blank();
            return;
        };
        let model = self.wizard.model();
        if model.initial_submitted() || model.is_busy() {
            self.push_styled(
                "× The form is locked until the suggestion is approved or rejected.",
                styles::error(),
            );
            self.push_blank();
            return;
        }
        self.push_styled(format!("✓ {field} = {value}"), styles::system());
        self.form.set(field, value);
        self.form_errors.clear(field);
    }

    fn rate(&mut self, rating: &str, email: &str, comment: Option<&str>) {
        let rating = rating.parse::<u8>().unwrap_or(0);
        let feedback = FeedbackRating::new(email, rating, comment);
        match rating::submit_rating(&feedback) {
            Ok(notice) => self.push_notice(&notice),
            Err(errors) => self.push_validation(&errors),
        }
    }

    fn show_help(&mut self) {
        self.push_styled("Commands:", styles::label());
        for line in [
            "  /set <field> <value>   fill a form field (app_id, store, language, country, kpi, optimization, type, instructions)",
            "  /form                  show the form and the available options",
            "  /keywords on|off       request keyword suggestions",
            "  /submit                send the initial request",
            "  /approve               approve the current suggestion",
            "  /edit                  request a revision, or reject after the last round",
            "  /cancel                cancel the request in progress",
            "  /rate <1-5> <email> [comment]   rate your experience",
            "  /quit                  exit",
        ] {
            self.push_styled(line, styles::value());
        }
        self.push_styled(
            "Plain text is sent as additional instructions or revision feedback.",
            styles::dim(),
        );
        self.push_blank();
    }

    fn show_form(&mut self) {
        self.push_styled("Options:", styles::label());
        let options: [(&str, Vec<&str>); 6] = [
            ("store", Store::ALL.iter().map(|s| s.label()).collect()),
            ("language", Language::ALL.iter().map(|l| l.label()).collect()),
            ("country", COUNTRIES.iter().map(|c| c.code).collect()),
            ("kpi", Kpi::ALL.iter().map(|k| k.label()).collect()),
            (
                "optimization",
                OptimizationTarget::ALL.iter().map(|o| o.label()).collect(),
            ),
            ("type", ApplicationType::ALL.iter().map(|a| a.label()).collect()),
        ];
        for (key, values) in options {
            let listed = values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{}. {v}", i + 1))
                .collect::<Vec<_>>()
                .join("  ");
            self.push_styled(format!("  {key}: {listed}"), styles::value());
        }
        if self.wizard.country_input() == CountryInput::FreeText {
            self.push_styled("  country accepts any two-letter code", styles::dim());
        }
        self.push_blank();
    }

    /// Apply a finished generation call.
    pub fn generation_finished(
        &mut self,
        ticket: Ticket,
        result: aso_common::Result<SuggestionOutput>,
    ) {
        let action = self
            .wizard
            .model()
            .in_flight()
            .filter(|p| p.ticket == ticket)
            .map(|p| p.action());

        match self.wizard.complete(ticket, result) {
            Ok(completion @ Completion::Applied { .. }) => {
                let round = self.wizard.model().feedback_round();
                if let Some(notice) = Notice::for_completion(&completion, round) {
                    self.push_notice(&notice);
                }
            }
            Ok(Completion::Stale) => {}
            Err(err) => {
                let notice = action.and_then(|a| Notice::for_failure(a, &err));
                match notice {
                    Some(notice) => self.push_notice(&notice),
                    None => self.push_error(&err),
                }
            }
        }
    }

    /// Panels for the side column, in composer order.
    pub fn panels(&self) -> Vec<PanelView> {
        let model = self.wizard.model();
        composer::visible_panels(model)
            .into_iter()
            .map(|panel| match panel {
                Panel::InitialForm => self.form_panel(),
                Panel::AdditionalInstructions => guidance_panel(),
                Panel::Output => self.output_panel(),
                Panel::Approval => approval_panel(model.feedback_round()),
                Panel::RevisionForm => revision_panel(model.feedback_round()),
            })
            .collect()
    }

    fn form_panel(&self) -> PanelView {
        let mut lines = Vec::new();
        for field in FormField::INITIAL {
            let value = self.form.get(field).unwrap_or_default();
            let shown = if value.is_empty() { "(empty)" } else { value };
            lines.push(TranscriptLine::new(
                format!("{}: {shown}", field.label()),
                styles::value(),
            ));
            if let Some(message) = self.form_errors.get(field) {
                lines.push(TranscriptLine::new(format!("  {message}"), styles::error()));
            }
        }
        let keywords = if self.form.suggest_keywords { "on" } else { "off" };
        lines.push(TranscriptLine::new(
            format!("Suggest keywords: {keywords}"),
            styles::value(),
        ));
        let model = self.wizard.model();
        if !model.initial_submitted() {
            lines.push(TranscriptLine::new(
                format!("[ {} ]", composer::submit_label(model.is_busy())),
                styles::label(),
            ));
        }
        PanelView::new(Panel::InitialForm.title(), lines)
    }

    fn output_panel(&self) -> PanelView {
        let model = self.wizard.model();
        let mut lines = Vec::new();
        if let Some(banner) = composer::round_banner(model.feedback_round()) {
            lines.push(TranscriptLine::new(banner, styles::banner()));
        }
        let variations = composer::variations(model);
        if let Some(output) = model.output() {
            for (title, content) in output.sections() {
                lines.push(TranscriptLine::new(title.to_string(), styles::suggestion_header()));
                if title == "Suggested Text" && variations.len() > 1 {
                    for v in &variations {
                        lines.push(TranscriptLine::new(
                            format!("{}: {}", v.label, v.text),
                            styles::suggestion_text(),
                        ));
                    }
                } else {
                    lines.push(TranscriptLine::new(content.to_string(), styles::suggestion_text()));
                }
            }
        }
        if model.suggest_keywords() {
            lines.push(TranscriptLine::new(
                "Keyword suggestions requested".to_string(),
                styles::dim(),
            ));
        }
        PanelView::new(Panel::Output.title(), lines)
    }
}

fn notice_marker(notice: &Notice) -> &'static str {
    match notice.severity {
        Severity::Destructive => "×",
        _ => "✓",
    }
}

fn guidance_panel() -> PanelView {
    let mut lines = vec![
        TranscriptLine::new(composer::ANALYSIS_GUIDANCE_TITLE.to_string(), styles::label()),
        TranscriptLine::new(composer::ANALYSIS_GUIDANCE_INTRO.to_string(), styles::value()),
    ];
    lines.extend(
        composer::ANALYSIS_GUIDANCE
            .iter()
            .map(|g| TranscriptLine::new(format!("• {g}"), styles::value())),
    );
    lines.push(TranscriptLine::new(
        "Type your additional instructions and press Enter.".to_string(),
        styles::dim(),
    ));
    PanelView::new(Panel::AdditionalInstructions.title(), lines)
}

fn approval_panel(round: u8) -> PanelView {
    let actions = composer::approval_actions(round);
    PanelView::new(
        Panel::Approval.title(),
        vec![
            TranscriptLine::new(format!("/approve  {}", actions.approve), styles::label()),
            TranscriptLine::new(format!("/edit     {}", actions.edit), styles::label()),
        ],
    )
}

fn revision_panel(round: u8) -> PanelView {
    PanelView::new(
        Panel::RevisionForm.title(),
        vec![
            TranscriptLine::new(composer::revision_label(round), styles::label()),
            TranscriptLine::new(
                "Type your feedback and press Enter.".to_string(),
                styles::dim(),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aso_generation::mock;

    fn text(session: &WizardSession) -> String {
        session
            .lines()
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn fill(session: &mut WizardSession) {
        for line in [
            "/set app_id com.example.tasks",
            "/set store 1",
            "/set language English",
            "/set country US",
            "/set kpi Visibility",
            "/set optimization Title",
            "/set type AB Test",
            "/set instructions Mention offline mode",
        ] {
            assert!(session.submit(line).is_none());
        }
    }

    fn generate(session: &mut WizardSession, line: &str) -> Ticket {
        match session.submit(line) {
            Some(Effect::Generate(dispatch)) => dispatch.ticket,
            other => panic!("expected a generation, got {other:?}"),
        }
    }

    fn titles(session: &WizardSession) -> Vec<String> {
        session.panels().into_iter().map(|p| p.title).collect()
    }

    #[test]
    fn submit_with_missing_fields_shows_inline_errors() {
        let mut session = WizardSession::new(CountryInput::Picker);
        session.submit("/set store apple");
        assert!(session.submit("/submit").is_none());

        let out = text(&session);
        assert!(out.contains("App ID is required"));
        assert!(!out.contains("Store selection is required"));
        let form = &session.panels()[0];
        assert!(form.lines.iter().any(|l| l.text.contains("Instructions are required")));

        session.submit("/set app_id com.example");
        let form = &session.panels()[0];
        assert!(!form.lines.iter().any(|l| l.text.contains("App ID is required")));
    }

    #[test]
    fn full_flow_through_panels() {
        let mut session = WizardSession::new(CountryInput::Picker);
        fill(&mut session);
        let ticket = generate(&mut session, "/submit");
        assert!(session.is_busy());
        assert!(session.submit("/submit").is_none());
        assert!(text(&session).contains("already being processed"));

        session.generation_finished(ticket, Ok(mock::initial_payload()));
        assert!(text(&session).contains("Your initial data was processed successfully."));
        assert_eq!(
            titles(&session),
            vec!["Initial Request", "Additional Instructions", "Suggestions"]
        );
        let output = &session.panels()[2];
        assert!(output.lines.iter().any(|l| l.text.starts_with("Variation B: ")));

        let ticket = generate(&mut session, "Lean on collaboration");
        session.generation_finished(ticket, Ok(mock::additional_payload()));
        assert_eq!(titles(&session), vec!["Initial Request", "Suggestions", "Review"]);

        session.submit("/edit");
        assert_eq!(titles(&session), vec!["Initial Request", "Suggestions", "Revision Request"]);
        let ticket = generate(&mut session, "Shorter");
        session.generation_finished(ticket, Ok(mock::revision_payload(1)));
        assert!(text(&session).contains("Your revision request (round 1) was processed successfully."));
        assert!(session.panels()[1].lines[0].text.contains("Feedback round 1 of 3"));

        session.submit("/approve");
        assert!(text(&session).contains("Content Approved!"));
        assert!(session.wizard().model().is_pristine());
        assert_eq!(titles(&session), vec!["Initial Request"]);
    }

    #[test]
    fn failed_generation_reports_and_keeps_phase() {
        let mut session = WizardSession::new(CountryInput::Picker);
        fill(&mut session);
        let ticket = generate(&mut session, "/submit");
        session.generation_finished(
            ticket,
            Err(aso_common::AsoError::Generation("offline".into())),
        );
        assert!(text(&session).contains("Failed to process your request. Please try again."));
        assert_eq!(session.wizard().model().phase(), WizardPhase::Idle);
        assert!(!session.is_busy());
    }

    #[test]
    fn cancel_returns_ticket_and_ignores_late_result() {
        let mut session = WizardSession::new(CountryInput::Picker);
        fill(&mut session);
        let ticket = generate(&mut session, "/submit");
        match session.submit("/cancel") {
            Some(Effect::Cancel(t)) => assert_eq!(t, ticket),
            other => panic!("expected cancel, got {other:?}"),
        }
        session.generation_finished(ticket, Ok(mock::initial_payload()));
        assert!(session.wizard().model().is_pristine());
    }

    #[test]
    fn rating_command_validates() {
        let mut session = WizardSession::new(CountryInput::Picker);
        session.submit("/rate 9 nope");
        let out = text(&session);
        assert!(out.contains("Please enter a valid email address"));
        assert!(out.contains("Rating must be between 1 and 5"));

        session.submit("/rate 5 ana@example.com lovely");
        assert!(text(&session).contains("Thank you for your feedback!"));
    }

    #[test]
    fn quit_is_an_effect() {
        let mut session = WizardSession::new(CountryInput::Picker);
        assert!(matches!(session.submit("/quit"), Some(Effect::Quit)));
    }
}
