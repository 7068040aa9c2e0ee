use crate::transcript::TranscriptLine;
use anyhow::Result;
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use textwrap::wrap;

/// One bordered panel in the side column.
#[derive(Clone, Debug)]
pub struct PanelView {
    pub title: String,
    pub lines: Vec<TranscriptLine>,
}

impl PanelView {
    pub fn new(title: &str, lines: Vec<TranscriptLine>) -> Self {
        Self {
            title: title.to_string(),
            lines,
        }
    }
}

pub struct ViewSnap {
    pub input: String,
    pub input_cursor: usize,
    pub lines: Vec<TranscriptLine>,
    pub panels: Vec<PanelView>,
    pub scroll: usize,
    pub busy: bool,
    pub spinner: &'static str,
    pub status: String,
}

pub fn draw<B: Backend>(term: &mut Terminal<B>, snap: &ViewSnap) -> Result<()> {
    term.draw(|frame| {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new(Line::from(vec![Span::styled(
            " AI Suggestion Assistant ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .wrap(Wrap { trim: true });
        frame.render_widget(header, layout[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[1]);

        // Transcript window
        let visible_h = body[0].height.saturating_sub(2) as usize;
        let content_width = body[0].width.saturating_sub(2) as usize;
        let wrapped = wrap_transcript(&snap.lines, content_width);
        let total = wrapped.len();
        let start = total.saturating_sub(visible_h + snap.scroll);
        let end = total.saturating_sub(snap.scroll);

        let items: Vec<ListItem> = wrapped[start..end]
            .iter()
            .map(|(text, style)| ListItem::new(Line::from(Span::styled(text.clone(), *style))))
            .collect();
        let transcript =
            List::new(items).block(Block::default().borders(Borders::ALL).title(" Transcript "));
        frame.render_widget(transcript, body[0]);

        // Wizard panels
        for (panel, rect) in snap.panels.iter().zip(panel_rects(body[1], &snap.panels)) {
            let width = rect.width.saturating_sub(2) as usize;
            let items: Vec<ListItem> = wrap_transcript(&panel.lines, width)
                .into_iter()
                .map(|(text, style)| ListItem::new(Line::from(Span::styled(text, style))))
                .collect();
            let widget = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", panel.title)),
            );
            frame.render_widget(widget, rect);
        }

        // Input box
        let input_box = Paragraph::new(snap.input.clone())
            .block(Block::default().borders(Borders::ALL).title(" Input "));
        frame.render_widget(Clear, layout[2]);
        frame.render_widget(input_box, layout[2]);

        let caret_x = layout[2].x + 1 + visual_caret_col(&snap.input, snap.input_cursor);
        let caret_y = layout[2].y + 1;
        frame.set_cursor_position(Position {
            x: caret_x,
            y: caret_y,
        });

        // Status bar
        let status_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(snap.spinner, Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            if snap.busy {
                Span::styled("Processing...", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("Ready", Style::default().fg(Color::Green))
            },
            Span::raw(format!(" • {}", snap.status)),
        ]);
        let status = Paragraph::new(status_line)
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        frame.render_widget(status, layout[3]);
    })?;

    Ok(())
}

/// Split the side column between panels, the last one taking the slack.
fn panel_rects(area: Rect, panels: &[PanelView]) -> Vec<Rect> {
    if panels.is_empty() {
        return Vec::new();
    }
    let constraints: Vec<Constraint> = panels
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i + 1 == panels.len() {
                Constraint::Min(3)
            } else {
                Constraint::Length((p.lines.len() as u16).saturating_add(2))
            }
        })
        .collect();
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

fn visual_caret_col(input: &str, cursor: usize) -> u16 {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(&input[..cursor]) as u16
}

fn wrap_transcript(lines: &[TranscriptLine], width: usize) -> Vec<(String, Style)> {
    let effective_width = width.max(1);
    let mut out = Vec::new();

    for entry in lines {
        let style = entry.style;
        for raw_line in entry.text.split('\n') {
            if raw_line.is_empty() {
                out.push((String::new(), style));
                continue;
            }
            let segments = wrap(raw_line, effective_width);
            if segments.is_empty() {
                out.push((String::new(), style));
            } else {
                out.extend(segments.into_iter().map(|seg| (seg.into_owned(), style)));
            }
        }
    }

    out
}
