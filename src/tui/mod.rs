//! Ratatui-based terminal UI.
//!
//! The TUI provides a controls panel for choosing a category, chart kind, and
//! month window, then renders the four dashboard panels in a 2×2 grid. Every
//! key event that changes the selection synchronously recomputes all four
//! panels through the shared pipeline.

use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{self, compute_dashboard};
use crate::cli::DashArgs;
use crate::domain::{Background, ChartKind, ChartSpec, DashboardCharts, Dataset, Selection};
use crate::error::AppError;
use crate::report::format::month_label;

mod plotters_chart;

use plotters_chart::SalesChart;

/// Where the `s` key writes the current dashboard state.
const SNAPSHOT_PATH: &str = "dashboard_snapshot.json";

/// Controls: category, chart kind, window start, window end.
const FIELD_COUNT: usize = 4;

/// Start the TUI.
pub fn run(args: DashArgs) -> Result<(), AppError> {
    let dataset = crate::app::resolve_dataset(&args)?;
    let selection = crate::app::selection_from_args(&dataset, &args);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dataset, selection);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    dataset: Dataset,
    selection: Selection,
    /// Distinct months of the selected category; what the window handles index.
    months: Vec<NaiveDate>,
    charts: DashboardCharts,
    selected_field: usize,
    status: String,
}

impl App {
    fn new(dataset: Dataset, mut selection: Selection) -> Self {
        let months = pipeline::distinct_months(&dataset, &selection.category);
        // CLI-provided window indices may be out of range; clamp them up front
        // so the handle controls always index a valid month.
        if let Some(clamped) = pipeline::clamp_range(selection.range, months.len()) {
            selection.range = clamped;
        }
        let charts = compute_dashboard(&dataset, &selection);
        let status = format!(
            "Loaded {} rows across {} categories.",
            dataset.stats().n_records,
            dataset.stats().n_categories
        );
        Self {
            dataset,
            selection,
            months,
            charts,
            selected_field: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('b') => {
                self.selection.clicks += 1;
                self.recompute();
                self.status = format!(
                    "Background: {}",
                    Background::from_clicks(self.selection.clicks).display_name()
                );
            }
            KeyCode::Char('s') => {
                match crate::io::snapshot::write_snapshot_json(
                    Path::new(SNAPSHOT_PATH),
                    &self.charts,
                    &self.selection,
                ) {
                    Ok(()) => self.status = format!("Wrote snapshot: {SNAPSHOT_PATH}"),
                    Err(err) => self.status = format!("Snapshot write failed: {err}"),
                }
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => self.cycle_category(delta),
            1 => {
                self.selection.chart_kind = self.selection.chart_kind.toggled();
                self.recompute();
                self.status = format!("Chart kind: {}", self.selection.chart_kind.display_name());
            }
            2 => self.move_handle(true, delta),
            3 => self.move_handle(false, delta),
            _ => {}
        }
    }

    fn cycle_category(&mut self, delta: i32) {
        let categories = self.dataset.categories();
        let len = categories.len();
        // A stale CLI-provided category is not in the list; cycling from it
        // lands on a real one.
        let current = categories
            .iter()
            .position(|c| c == &self.selection.category)
            .unwrap_or(0);
        let next = if delta >= 0 {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.selection.category = categories[next].clone();
        self.recompute();
        self.status = format!("Category: {}", self.selection.category);
    }

    fn move_handle(&mut self, start: bool, delta: i32) {
        let len = self.months.len();
        if len == 0 {
            return;
        }
        let (lo, hi) = self.selection.range;
        if start {
            let next = if delta >= 0 { (lo + 1).min(hi) } else { lo.saturating_sub(1) };
            self.selection.range = (next, hi);
        } else {
            let next = if delta >= 0 { (hi + 1).min(len - 1) } else { hi.saturating_sub(1).max(lo) };
            self.selection.range = (lo, next);
        }
        self.recompute();
        let (lo, hi) = self.selection.range;
        self.status = format!(
            "Window: {} → {}",
            month_label(self.months[lo]),
            month_label(self.months[hi])
        );
    }

    /// Re-derive the month list and all four panels from the selection.
    fn recompute(&mut self) {
        self.months = pipeline::distinct_months(&self.dataset, &self.selection.category);
        // Keep the handles valid when the category's month list changes.
        if let Some(clamped) = pipeline::clamp_range(self.selection.range, self.months.len()) {
            self.selection.range = clamped;
        }
        self.charts = compute_dashboard(&self.dataset, &self.selection);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(6),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_charts(frame, chunks[1]);
        self.draw_controls(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let stats = self.dataset.stats();
        let n_points = self.charts.monthly_line.points.len();

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("sdash", Style::default().fg(Color::Cyan)),
            Span::raw(" — Monthly Sales Dashboard"),
        ]));
        lines.push(Line::from(Span::styled(
            crate::report::format_selection(&self.selection, &self.months),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "rows: {} | categories: {} | months: {} → {} | shown: {n_points}",
                stats.n_records,
                stats.n_categories,
                month_label(stats.month_min),
                month_label(stats.month_max),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let panels = self.charts.panels();
        for (row_idx, row_area) in rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row_area);
            for (col_idx, col_area) in cols.iter().enumerate() {
                self.draw_panel(frame, *col_area, panels[row_idx * 2 + col_idx]);
            }
        }
    }

    fn draw_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect, spec: &ChartSpec) {
        let block = Block::default()
            .title(spec.title.clone())
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if spec.is_empty() {
            let msg = Paragraph::new("No data for the current selection.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let widget = SalesChart {
            points: &spec.points,
            kind: spec.kind,
            background: spec.background,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_controls(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let categories = self.dataset.categories();
        let category_pos = categories
            .iter()
            .position(|c| c == &self.selection.category)
            .map(|i| i + 1)
            .unwrap_or(0);

        let (lo, hi) = self.selection.range;
        let handle_label = |idx: usize| -> String {
            match self.months.get(idx) {
                Some(month) => format!("{} ({}/{})", month_label(*month), idx + 1, self.months.len()),
                None => "-".to_string(),
            }
        };

        let items = vec![
            ListItem::new(format!(
                "Category: {} ({category_pos}/{})",
                self.selection.category,
                categories.len()
            )),
            ListItem::new(kind_radio(self.selection.chart_kind)),
            ListItem::new(format!("Window start: {}", handle_label(lo))),
            ListItem::new(format!("Window end: {}", handle_label(hi))),
        ];

        let list = List::new(items)
            .block(Block::default().title("Controls").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  b background  s snapshot  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Radio-style label for the two-option chart kind control.
fn kind_radio(kind: ChartKind) -> String {
    let (line_marker, bar_marker) = match kind {
        ChartKind::Line => ("●", "○"),
        ChartKind::Bar => ("○", "●"),
    };
    format!("Chart kind: {line_marker} Lines   {bar_marker} Bars")
}
