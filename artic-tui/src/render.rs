//! Screen composition.
//!
//! Rendering is a pure function of the page view and UI state drawn into a
//! ratatui [`Frame`]; widgets clip to their area, so nothing spills past the
//! terminal edge.

use artic_lib::model::Artwork;
use artic_lib::view::PageCheck;
use artic_lib::view::PageView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::app::UiState;
use crate::input::{self, Focus};
use crate::text::{fit_to_width, single_line, truncate_to_width};

/// Dark theme with purple accents.
struct Theme;

impl Theme {
    const PRIMARY: Color = Color::Rgb(230, 230, 230);
    const MUTED: Color = Color::Rgb(115, 110, 130);
    const ACCENT: Color = Color::Rgb(140, 110, 220);
    const SUCCESS: Color = Color::Rgb(90, 190, 110);
    const ERROR: Color = Color::Rgb(230, 90, 80);
    const BADGE_BG: Color = Color::Rgb(0, 0, 0);
}

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const COLUMN_SPACING: u16 = 1;
const FIELD_WIDTH: usize = 12;

const HEADERS: [&str; 7] = [
    "",
    "Title",
    "Place of Origin",
    "Artist Display",
    "Inscriptions",
    "Date Start",
    "Date End",
];

fn column_constraints() -> [Constraint; 7] {
    [
        Constraint::Length(3),
        Constraint::Fill(6),
        Constraint::Fill(3),
        Constraint::Fill(6),
        Constraint::Fill(5),
        Constraint::Length(10),
        Constraint::Length(10),
    ]
}

/// Column widths for a table `width` columns wide.
fn column_widths(width: u16) -> Vec<usize> {
    Layout::horizontal(column_constraints())
        .spacing(COLUMN_SPACING)
        .split(Rect::new(0, 0, width, 1))
        .iter()
        .map(|r| r.width as usize)
        .collect()
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn header_checkbox(state: PageCheck) -> &'static str {
    match state {
        PageCheck::None => "[ ]",
        PageCheck::Some => "[-]",
        PageCheck::All => "[x]",
    }
}

fn text_cell(value: Option<&str>, width: usize) -> String {
    value
        .map(|v| truncate_to_width(&single_line(v), width))
        .unwrap_or_default()
}

fn date_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn artwork_row(artwork: &Artwork, selected: bool, widths: &[usize]) -> Row<'static> {
    let width = |i: usize| widths.get(i).copied().unwrap_or(0);
    Row::new(vec![
        Cell::from(checkbox(selected)),
        Cell::from(text_cell(artwork.title.as_deref(), width(1))),
        Cell::from(text_cell(artwork.place_of_origin.as_deref(), width(2))),
        Cell::from(text_cell(artwork.artist_display.as_deref(), width(3))),
        Cell::from(text_cell(artwork.inscriptions.as_deref(), width(4))),
        Cell::from(date_cell(artwork.date_start)),
        Cell::from(date_cell(artwork.date_end)),
    ])
    .style(Style::default().fg(Theme::PRIMARY))
}

fn title_line(view: &PageView) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Artworks",
        Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(total) = view.total_records() {
        spans.push(Span::styled(
            format!("  {} in catalog", total),
            Style::default().fg(Theme::MUTED),
        ));
    }
    Line::from(spans)
}

fn draw_table(frame: &mut Frame, area: Rect, view: &PageView, ui: &UiState) {
    let widths = column_widths(area.width);
    let mut header: Vec<Cell> = HEADERS.iter().map(|h| Cell::from(*h)).collect();
    header[0] = Cell::from(header_checkbox(view.page_check_state()));

    let records = view.records();
    let rows: Vec<Row> = if records.is_empty() {
        let note = if view.is_loading() { "Loading…" } else { "No artworks" };
        vec![Row::new(vec![Cell::from(""), Cell::from(note)]).style(Style::default().fg(Theme::MUTED))]
    } else {
        records
            .iter()
            .map(|artwork| artwork_row(artwork, view.is_selected(artwork.id), &widths))
            .collect()
    };

    let highlight = match ui.focus {
        Focus::Table => Style::default().add_modifier(Modifier::REVERSED),
        Focus::BulkField => Style::default(),
    };

    let table = Table::new(rows, column_constraints())
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(Theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(highlight)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(Theme::MUTED)),
        );

    let mut state = TableState::default();
    if !records.is_empty() {
        state.select(Some(ui.cursor.min(records.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// A footer control: label plus whether it is enabled.
fn control(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Theme::MUTED)
            .add_modifier(Modifier::DIM)
    };
    Span::styled(format!("[{}]", label), style)
}

fn badge(view: &PageView, ui: &UiState) -> Line<'static> {
    let mut spans = Vec::with_capacity(2);
    if view.is_loading() || view.is_bulk_running() {
        let frame = SPINNER_FRAMES[ui.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{} ", frame),
            Style::default().fg(Theme::ACCENT),
        ));
    }
    spans.push(Span::styled(
        format!(" Selected: {} ", view.selected_count()),
        Style::default()
            .fg(Theme::PRIMARY)
            .bg(Theme::BADGE_BG)
            .add_modifier(Modifier::BOLD),
    ));
    Line::from(spans)
}

/// Pager on the left, selected badge pinned to the right.
fn draw_pager(frame: &mut Frame, area: Rect, view: &PageView, ui: &UiState) {
    let badge = badge(view, ui);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(badge.width() as u16)])
            .areas(area);

    let pager = Line::from(vec![
        control("‹ Prev", view.can_go_prev()),
        Span::raw(format!("  Page {} / {}  ", view.page(), view.total_pages())),
        control("Next ›", view.can_go_next()),
    ]);
    frame.render_widget(Paragraph::new(pager), left);
    frame.render_widget(Paragraph::new(badge), right);
}

fn bulk_line(view: &PageView, ui: &UiState) -> Line<'static> {
    let count = input::parse_bulk_count(&ui.bulk_input);
    let field_style = match ui.focus {
        Focus::BulkField => Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::REVERSED),
        Focus::Table => Style::default().fg(Theme::MUTED),
    };
    let field_text = if ui.bulk_input.is_empty() && ui.focus == Focus::Table {
        "Select rows..."
    } else {
        ui.bulk_input.as_str()
    };

    Line::from(vec![
        Span::raw("Rows: "),
        Span::styled(fit_to_width(field_text, FIELD_WIDTH), field_style),
        Span::raw(" "),
        control("Submit", count > 0 && view.can_bulk_select()),
        Span::raw(" "),
        control("Clear All", !view.selection().is_empty()),
    ])
}

fn status_line(view: &PageView, ui: &UiState) -> Line<'static> {
    if let Some(error) = view.last_error() {
        return Line::styled(format!("Error: {}", error), Style::default().fg(Theme::ERROR));
    }
    if let Some(message) = &ui.message {
        return Line::styled(message.clone(), Style::default().fg(Theme::SUCCESS));
    }
    let help = match ui.focus {
        Focus::Table => "↑↓ move  space toggle  a page  ←→ page  b rows  c clear  g reload  q quit",
        Focus::BulkField => "type a count  enter submit  esc back",
    };
    Line::styled(help, Style::default().fg(Theme::MUTED))
}

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, view: &PageView, ui: &UiState) {
    let [title, table, pager, bulk, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Paragraph::new(title_line(view)), title);
    draw_table(frame, table, view, ui);
    draw_pager(frame, pager, view, ui);
    frame.render_widget(Paragraph::new(bulk_line(view, ui)), bulk);
    frame.render_widget(Paragraph::new(status_line(view, ui)), status);
}
