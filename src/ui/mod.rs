//! Terminal display surface — grid, filter box, response pane, alerts.
//!
//! The loop polls the keyboard with a short timeout and, between key
//! events, drains any completions that arrived so a resolved request shows
//! up without waiting for input.

mod input;
mod render;

pub use input::{InputOutcome, LineInput};

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::TableState;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::grid::{self, SortDirection};
use crate::llm::CompletionClient;
use crate::pipeline::{self, CompletionEvent, Pipeline};
use crate::session::Session;

const EVENT_POLL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Grid,
}

pub struct App {
    session: Session,
    client: CompletionClient,
    pipeline: Pipeline,
    events: UnboundedReceiver<CompletionEvent>,
    input: LineInput,
    focus: Focus,
    table_state: TableState,
    selected_col: usize,
    sort: Option<(String, SortDirection)>,
    should_quit: bool,
}

impl App {
    pub fn new(
        session: Session,
        client: CompletionClient,
        pipeline: Pipeline,
        events: UnboundedReceiver<CompletionEvent>,
    ) -> Self {
        Self {
            session,
            client,
            pipeline,
            events,
            input: LineInput::default(),
            focus: Focus::Input,
            table_state: TableState::default().with_selected(Some(0)),
            selected_col: 0,
            sort: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Dataset indices in the order the grid shows them.
    fn view_order(&self) -> Vec<usize> {
        let rows = self.session.rows();
        match &self.sort {
            Some((field, direction)) => grid::sorted_order(rows, field, *direction),
            None => (0..rows.len()).collect(),
        }
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<(), UiError> {
        while !self.should_quit {
            pipeline::drain(&mut self.events, &mut self.session);

            terminal.draw(|frame| render::draw(self, frame))?;

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                // crossterm also reports key release/repeat on Windows
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Any key dismisses an alert
        if self.session.alert().is_some() {
            self.session.dismiss_alert();
            return;
        }

        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Input => Focus::Grid,
                Focus::Grid => Focus::Input,
            };
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Grid => self.handle_grid_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match self.input.read(key) {
            InputOutcome::Edited | InputOutcome::Cleared => {
                self.session.set_filter_input(self.input.text());
            }
            InputOutcome::Submitted => {
                self.pipeline.submit(&mut self.session, &self.client);
            }
            InputOutcome::Moved | InputOutcome::Ignored => {}
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.focus = Focus::Input,
            KeyCode::Up | KeyCode::Char('k') => self.move_row(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_row(1),
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_col = self.selected_col.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let last = self.session.columns().len().saturating_sub(1);
                self.selected_col = (self.selected_col + 1).min(last);
            }
            KeyCode::Char('s') => self.sort_by_selected(),
            KeyCode::Char('a') => self.apply_candidate(),
            _ => {}
        }
    }

    fn move_row(&mut self, delta: isize) {
        let len = self.session.rows().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn sort_by_selected(&mut self) {
        let Some(col) = self.session.columns().get(self.selected_col) else {
            return;
        };
        if !col.sortable {
            return;
        }
        let field = col.field.clone();
        self.sort = match self.sort.take() {
            Some((current, direction)) if current == field => Some((field, direction.toggled())),
            _ => Some((field, SortDirection::Ascending)),
        };
        log::debug!("[UI] Sort: {:?}", self.sort);
    }

    fn apply_candidate(&mut self) {
        if self.session.apply_candidate().is_ok() {
            self.sort = None;
            self.selected_col = 0;
            let selected = if self.session.rows().is_empty() { None } else { Some(0) };
            self.table_state.select(selected);
        }
    }
}

/// Take over the terminal and run until the user quits.
pub fn run(mut app: App) -> Result<(), UiError> {
    let mut terminal = ratatui::try_init()?;
    log::info!("[UI] Terminal initialized");
    let result = app.event_loop(&mut terminal);
    ratatui::restore();
    result
}

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
