use crate::{
    session::{Effect, WizardSession},
    styles,
    transcript::TranscriptLine,
    view::{self, ViewSnap},
};
use anyhow::Result;
use aso_actors::{
    GenerateCmd, GeneratorActor,
    actor::{Actor, Addr, Context},
    system::ShutdownHandle,
};
use aso_config::CountryInput;
use aso_generation::SuggestionOutput;
use aso_wizard::{controller::Dispatch, state::Ticket};
use async_trait::async_trait;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum TuiMsg {
    InputEvent(CtEvent),
    Tick,
    Submit(String),
    GenerationDone {
        ticket: Ticket,
        result: aso_common::Result<SuggestionOutput>,
    },
    OpError(String),
    Shutdown,
}

pub struct TuiActor {
    session: WizardSession,

    // deps
    generator: Addr<GeneratorActor>,
    in_flight: Option<(Ticket, CancellationToken)>,

    // terminal
    term: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,

    // ui state
    input: String,
    input_cursor: usize,
    scroll: usize, // from bottom
    dirty: bool,
    spin_idx: usize,
    op_errors: Vec<String>,

    // shutdown coordination
    shutdown: ShutdownHandle,
}

impl TuiActor {
    pub fn new(
        generator: Addr<GeneratorActor>,
        country_input: CountryInput,
        shutdown: ShutdownHandle,
    ) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        Ok(Self {
            session: WizardSession::new(country_input),
            generator,
            in_flight: None,
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
            input: String::new(),
            input_cursor: 0,
            scroll: 0,
            dirty: true,
            spin_idx: 0,
            op_errors: Vec::new(),
            shutdown,
        })
    }

    fn cursor_left(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        self.input_cursor -= 1;
        while self.input_cursor > 0 && !self.input.is_char_boundary(self.input_cursor) {
            self.input_cursor -= 1;
        }
    }

    fn cursor_right(&mut self) {
        if self.input_cursor >= self.input.len() {
            return;
        }
        self.input_cursor += 1;
        while self.input_cursor < self.input.len()
            && !self.input.is_char_boundary(self.input_cursor)
        {
            self.input_cursor += 1;
        }
    }

    fn insert_char(&mut self, ch: char) {
        self.input.insert(self.input_cursor, ch);
        self.input_cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let mut prev = self.input_cursor.saturating_sub(1);
        while prev > 0 && !self.input.is_char_boundary(prev) {
            prev -= 1;
        }
        self.input.drain(prev..self.input_cursor);
        self.input_cursor = prev;
    }

    fn delete(&mut self) {
        if self.input_cursor >= self.input.len() {
            return;
        }
        let start = self.input_cursor;
        let mut end = start + 1;
        while end < self.input.len() && !self.input.is_char_boundary(end) {
            end += 1;
        }
        self.input.drain(start..end);
    }

    fn spinner(&self) -> &'static str {
        if self.session.is_busy() {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn step_spinner(&mut self) {
        if self.session.is_busy() {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let mut lines = self.session.lines().to_vec();
        lines.extend(
            self.op_errors
                .iter()
                .map(|e| TranscriptLine::new(format!("× Error: {e}"), styles::error())),
        );
        let snap = ViewSnap {
            input: self.input.clone(),
            input_cursor: self.input_cursor,
            lines,
            panels: self.session.panels(),
            scroll: self.scroll,
            busy: self.session.is_busy(),
            spinner: self.spinner(),
            status: self.session.status(),
        };

        view::draw(&mut self.term, &snap)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<TuiMsg> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(TuiMsg::Shutdown),
            (KeyCode::PageUp, _) => self.scroll = self.scroll.saturating_add(5),
            (KeyCode::PageDown, _) => self.scroll = self.scroll.saturating_sub(5),
            (KeyCode::Up, _) => self.scroll = self.scroll.saturating_add(1),
            (KeyCode::Down, _) => self.scroll = self.scroll.saturating_sub(1),
            (KeyCode::Enter, _) => {
                let line = std::mem::take(&mut self.input);
                self.input_cursor = 0;
                self.dirty = true;
                return Some(TuiMsg::Submit(line));
            }
            (KeyCode::Left, _) => self.cursor_left(),
            (KeyCode::Right, _) => self.cursor_right(),
            (KeyCode::Home, _) => self.input_cursor = 0,
            (KeyCode::End, _) => self.input_cursor = self.input.len(),
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Esc, _) => {
                self.input.clear();
                self.input_cursor = 0;
            }
            (KeyCode::Char(ch), _) => self.insert_char(ch),
            _ => return None,
        }
        self.dirty = true;
        None
    }

    fn route_submit(&mut self, line: String, me: Addr<TuiActor>) {
        self.scroll = 0;
        self.dirty = true;
        match self.session.submit(&line) {
            Some(Effect::Generate(dispatch)) => self.start_generation(dispatch, me),
            Some(Effect::Cancel(ticket)) => self.cancel_generation(ticket),
            Some(Effect::Quit) => {
                let _ = me.try_send(TuiMsg::Shutdown);
            }
            None => {}
        }
    }

    fn start_generation(&mut self, dispatch: Dispatch, me: Addr<TuiActor>) {
        let Dispatch { ticket, request } = dispatch;
        let cancel = CancellationToken::new();
        let (tx, rx) = oneshot::channel();
        let cmd = GenerateCmd {
            id: ticket.id(),
            request,
            cancel: cancel.clone(),
            reply: tx,
        };
        if self.generator.try_send(cmd).is_err() {
            // Generator mailbox closed or full; fail the ticket immediately.
            let _ = me.try_send(TuiMsg::GenerationDone {
                ticket,
                result: Err(aso_common::AsoError::Generation(
                    "generator unavailable".into(),
                )),
            });
            return;
        }
        self.in_flight = Some((ticket, cancel));

        tokio::spawn(async move {
            let result = match rx.await {
                Ok(result) => result,
                Err(e) => Err(aso_common::AsoError::Internal(anyhow::anyhow!(
                    "generator reply dropped: {e}"
                ))),
            };
            let _ = me.send(TuiMsg::GenerationDone { ticket, result }).await;
        });
    }

    fn cancel_generation(&mut self, ticket: Ticket) {
        if let Some((current, token)) = self.in_flight.take() {
            if current == ticket {
                token.cancel();
            } else {
                self.in_flight = Some((current, token));
            }
        }
    }
}

#[async_trait]
impl Actor for TuiActor {
    type Msg = TuiMsg;

    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
        match msg {
            TuiMsg::InputEvent(ev) => {
                if let CtEvent::Key(k) = ev {
                    if let Some(next) = self.handle_key(k) {
                        let _ = ctx.addr().try_send(next);
                    }
                }
            }
            TuiMsg::Submit(line) => self.route_submit(line, ctx.addr()),
            TuiMsg::GenerationDone { ticket, result } => {
                if self.in_flight.as_ref().is_some_and(|(t, _)| *t == ticket) {
                    self.in_flight = None;
                }
                self.session.generation_finished(ticket, result);
                self.dirty = true;
            }
            TuiMsg::OpError(e) => {
                tracing::warn!(error = %e, "tui operation failed");
                self.op_errors.push(e);
                self.dirty = true;
            }
            TuiMsg::Tick => {
                self.step_spinner();
                if self.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.dirty = false;
                }
            }
            TuiMsg::Shutdown => {
                if let Some((_, token)) = self.in_flight.take() {
                    token.cancel();
                }
                disable_raw_mode().ok();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                self.shutdown.signal();
                ctx.stop();
            }
        }

        Ok(())
    }
}
