use aso_wizard::notice::Severity;
use ratatui::style::{Color, Modifier, Style};

pub fn user_header() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn user_text() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn suggestion_header() -> Style {
    Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

pub fn suggestion_text() -> Style {
    Style::default().fg(Color::LightGreen)
}

pub fn label() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn value() -> Style {
    Style::default().fg(Color::White)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn system() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn banner() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn notice(severity: Severity) -> Style {
    match severity {
        Severity::Info => system(),
        Severity::Success => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Severity::Destructive => error(),
    }
}
