//! Event loop and task plumbing.
//!
//! The [`App`] owns the [`PageView`] and is the only place it is mutated.
//! Network work runs on spawned tasks that report back over a channel, each
//! result tagged with the ticket it was issued for.

use std::sync::Arc;
use std::time::Duration;

use artic_lib::error::Error;
use artic_lib::model::PageResult;
use artic_lib::selection::BulkOutcome;
use artic_lib::selection::accumulate;
use artic_lib::source::PageSource;
use artic_lib::view::BulkStatus;
use artic_lib::view::BulkTicket;
use artic_lib::view::PageOutcome;
use artic_lib::view::PageTicket;
use artic_lib::view::PageView;
use crossterm::event::{Event as TermEvent, EventStream};
use futures::StreamExt;
use log::{debug, info};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::input::{self, Focus, Intent};
use crate::terminal::TerminalGuard;

/// Spinner frame duration.
const SPINNER_FRAME: Duration = Duration::from_millis(80);

/// Errors that end the event loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Results delivered from spawned tasks.
#[derive(Debug)]
pub enum AppEvent {
    PageLoaded {
        ticket: PageTicket,
        result: Result<PageResult, Error>,
    },
    BulkFinished {
        ticket: BulkTicket,
        result: Result<BulkOutcome, Error>,
    },
}

/// Presentation state that is not part of the page view.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Focused row on the displayed page.
    pub cursor: usize,
    pub focus: Focus,
    /// Raw contents of the bulk count field.
    pub bulk_input: String,
    /// Transient feedback shown in the status line.
    pub message: Option<String>,
    pub spinner_frame: usize,
}

pub struct App {
    source: Arc<dyn PageSource>,
    view: PageView,
    ui: UiState,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            view: PageView::new(),
            ui: UiState::default(),
            tx,
            rx,
            should_quit: false,
        }
    }

    fn is_busy(&self) -> bool {
        self.view.is_loading() || self.view.is_bulk_running()
    }

    /// Runs until the user quits or the terminal goes away.
    pub async fn run(mut self, terminal: &mut TerminalGuard) -> Result<(), AppError> {
        let mut events = EventStream::new();
        let mut spinner = tokio::time::interval(SPINNER_FRAME);

        self.start();
        self.draw(terminal)?;

        loop {
            let busy = self.is_busy();
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_terminal_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(message) = self.rx.recv() => self.handle_event(message),
                _ = spinner.tick(), if busy => {
                    self.ui.spinner_frame = self.ui.spinner_frame.wrapping_add(1);
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
            self.draw(terminal)?;
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut TerminalGuard) -> Result<(), AppError> {
        terminal.draw(&self.view, &self.ui)?;
        Ok(())
    }

    /// Issues the initial page load.
    pub fn start(&mut self) {
        if let Some(ticket) = self.view.reload() {
            self.spawn_page_fetch(ticket);
        }
    }

    fn handle_terminal_event(&mut self, event: TermEvent) {
        if let TermEvent::Key(key) = event
            && let Some(intent) = input::map_key(key, self.ui.focus)
        {
            self.dispatch(intent);
        }
    }

    /// Applies one user intent.
    pub fn dispatch(&mut self, intent: Intent) {
        debug!("Intent: {:?}", intent);
        match intent {
            Intent::CursorUp => {
                self.ui.cursor = self.ui.cursor.saturating_sub(1);
            }
            Intent::CursorDown => {
                let last = self.view.records().len().saturating_sub(1);
                self.ui.cursor = (self.ui.cursor + 1).min(last);
            }
            Intent::ToggleRow => {
                if let Some(id) = self.view.records().get(self.ui.cursor).map(|r| r.id) {
                    self.view.toggle_row(id);
                }
            }
            Intent::TogglePage => {
                self.view.toggle_page();
            }
            Intent::PrevPage => {
                if let Some(ticket) = self.view.prev_page() {
                    self.spawn_page_fetch(ticket);
                }
            }
            Intent::NextPage => {
                if let Some(ticket) = self.view.next_page() {
                    self.spawn_page_fetch(ticket);
                }
            }
            Intent::Reload => {
                if let Some(ticket) = self.view.reload() {
                    self.spawn_page_fetch(ticket);
                }
            }
            Intent::FocusBulk => self.ui.focus = Focus::BulkField,
            Intent::LeaveBulk => self.ui.focus = Focus::Table,
            Intent::BulkInput(c) => {
                if self.ui.bulk_input.len() < input::MAX_BULK_DIGITS {
                    self.ui.bulk_input.push(c);
                }
            }
            Intent::BulkBackspace => {
                self.ui.bulk_input.pop();
            }
            Intent::SubmitBulk => self.submit_bulk(),
            Intent::ClearAll => {
                self.view.clear_selection();
                self.ui.message = Some("Selection cleared".to_string());
            }
            Intent::Quit => self.should_quit = true,
        }
    }

    fn submit_bulk(&mut self) {
        let count = input::parse_bulk_count(&self.ui.bulk_input);
        if count == 0 {
            self.ui.message = Some("Enter a positive number of rows".to_string());
            return;
        }
        let Some((ticket, request)) = self.view.begin_bulk(count) else {
            debug!("Bulk select refused while busy");
            return;
        };

        self.ui.message = Some(format!(
            "Selecting {} rows from page {}…",
            count, request.start_page
        ));
        let source = self.source.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = accumulate(source.as_ref(), &request).await;
            let _ = tx.send(AppEvent::BulkFinished { ticket, result });
        });
    }

    fn spawn_page_fetch(&self, ticket: PageTicket) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(ticket.page()).await;
            let _ = tx.send(AppEvent::PageLoaded { ticket, result });
        });
    }

    /// Applies a result delivered by a spawned task.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PageLoaded { ticket, result } => {
                if self.view.complete_page(ticket, result) == PageOutcome::Applied {
                    let last = self.view.records().len().saturating_sub(1);
                    self.ui.cursor = self.ui.cursor.min(last);
                }
            }
            AppEvent::BulkFinished { ticket, result } => {
                match self.view.complete_bulk(ticket, result) {
                    BulkStatus::Applied { added, exhausted } => {
                        self.ui.message = Some(if exhausted {
                            format!("Selected {} rows; no more artworks to select", added)
                        } else {
                            format!("Selected {} more rows", added)
                        });
                    }
                    BulkStatus::Discarded => {}
                    BulkStatus::Failed => self.ui.message = None,
                }
            }
        }
    }
}
