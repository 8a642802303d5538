//! Ratatui-based terminal UI.
//!
//! Two tabs (currency exchange rates, RV industry indicators) share one
//! point-in-time anchor. Changing the anchor re-fetches on a background thread;
//! results tagged with an outdated selection are dropped on arrival.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
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
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use tracing::debug;

use crate::app::pipeline::{SeriesOutcome, latest_date_or_today, run_catalog};
use crate::app::session::{SelectionGuard, Ticket};
use crate::cli::{Tab, TuiArgs};
use crate::data::{FredClient, ObservationSource};
use crate::data::catalog::LATEST_DATE_SERIES;
use crate::domain::{MissingDataPolicy, SeriesConfig, format_date_for_api, format_display_date};
use crate::error::AppError;
use crate::metrics::ChartWindow;
use crate::report::{format_change, format_percent, format_value};

mod plotters_chart;

use plotters_chart::SeriesChart;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let client = FredClient::from_env(args.connection.base_url.as_deref())?;
    let today = crate::app::today();
    let latest = latest_date_or_today(&client, LATEST_DATE_SERIES, today);
    let anchor = crate::app::resolve_anchor(args.as_of, latest)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let source: Arc<dyn ObservationSource + Send> = Arc::new(client);
    let mut app = App::new(source, args.tab, anchor, latest, today, args.policy());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

/// Results of one background tab fetch.
struct Loaded {
    ticket: Ticket,
    tab: Tab,
    outcomes: Vec<SeriesOutcome>,
}

/// Per-tab card state.
#[derive(Default)]
struct TabState {
    outcomes: Option<Vec<SeriesOutcome>>,
    loading: bool,
    selected: usize,
}

struct App {
    source: Arc<dyn ObservationSource + Send>,
    policy: MissingDataPolicy,
    today: NaiveDate,
    tab: Tab,
    anchor: NaiveDate,
    max_date: NaiveDate,
    date_input: String,
    editing_date: bool,
    status: String,
    selection: SelectionGuard,
    ticket: Ticket,
    currency: TabState,
    rv: TabState,
    /// Fetches requested since the last loop iteration.
    pending: Vec<(Ticket, Tab)>,
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,
}

impl App {
    fn new(
        source: Arc<dyn ObservationSource + Send>,
        tab: Tab,
        anchor: NaiveDate,
        max_date: NaiveDate,
        today: NaiveDate,
        policy: MissingDataPolicy,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut selection = SelectionGuard::new();
        let ticket = selection.begin(anchor);
        let mut app = Self {
            source,
            policy,
            today,
            tab,
            anchor,
            max_date,
            date_input: String::new(),
            editing_date: false,
            status: "Fetching FRED data...".to_string(),
            selection,
            ticket,
            currency: TabState::default(),
            rv: TabState::default(),
            pending: Vec::new(),
            tx,
            rx,
        };
        app.ensure_loaded(tab);
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            self.dispatch_pending();
            if self.drain_results() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Store finished fetches that still match the current selection.
    fn drain_results(&mut self) -> bool {
        let mut changed = false;
        while let Ok(loaded) = self.rx.try_recv() {
            if !self.selection.accepts(&loaded.ticket) {
                debug!(anchor = %loaded.ticket.anchor(), "dropping stale results");
                continue;
            }
            let failed = loaded.outcomes.iter().filter(|o| o.result.is_err()).count();
            self.status = if failed == 0 {
                format!("{}: loaded {} series.", loaded.tab.title(), loaded.outcomes.len())
            } else {
                format!(
                    "{}: loaded {} series, {failed} failed.",
                    loaded.tab.title(),
                    loaded.outcomes.len()
                )
            };
            let state = self.tab_state_mut(loaded.tab);
            state.outcomes = Some(loaded.outcomes);
            state.loading = false;
            changed = true;
        }
        changed
    }

    fn tab_state(&self, tab: Tab) -> &TabState {
        match tab {
            Tab::Currency => &self.currency,
            Tab::Rv => &self.rv,
        }
    }

    fn tab_state_mut(&mut self, tab: Tab) -> &mut TabState {
        match tab {
            Tab::Currency => &mut self.currency,
            Tab::Rv => &mut self.rv,
        }
    }

    /// Queue a fetch for `tab` unless it already has (or awaits) data.
    fn ensure_loaded(&mut self, tab: Tab) {
        let state = self.tab_state(tab);
        if state.loading || state.outcomes.is_some() {
            return;
        }
        self.tab_state_mut(tab).loading = true;
        self.status = format!("Fetching {}...", tab.title());
        self.pending.push((self.ticket, tab));
    }

    /// Start a background thread per queued fetch that is still current.
    fn dispatch_pending(&mut self) {
        for (ticket, tab) in std::mem::take(&mut self.pending) {
            if self.selection.accepts(&ticket) {
                self.spawn_fetch(ticket, tab);
            }
        }
    }

    fn spawn_fetch(&self, ticket: Ticket, tab: Tab) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let policy = self.policy;
        let today = self.today;
        let configs = crate::app::tab_series(tab);
        thread::spawn(move || {
            let outcomes = run_catalog(&*source, configs, ticket.anchor(), policy, today);
            // The receiver is gone once the UI has exited.
            let _ = tx.send(Loaded { ticket, tab, outcomes });
        });
    }

    /// Move the anchor and invalidate everything fetched for the old one.
    fn set_anchor(&mut self, anchor: NaiveDate) {
        if anchor > self.max_date {
            self.status = format!(
                "Latest available data is {}.",
                format_display_date(self.max_date)
            );
            return;
        }
        self.anchor = anchor;
        self.ticket = self.selection.begin(anchor);
        self.currency = TabState::default();
        self.rv = TabState::default();
        self.ensure_loaded(self.tab);
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_date {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Char('t') => {
                self.tab = self.tab.next();
                self.ensure_loaded(self.tab);
            }
            KeyCode::Up => {
                let state = self.tab_state_mut(self.tab);
                state.selected = state.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let count = crate::app::tab_series(self.tab).len();
                let state = self.tab_state_mut(self.tab);
                if state.selected + 1 < count {
                    state.selected += 1;
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.anchor.pred_opt() {
                    self.set_anchor(prev);
                }
            }
            KeyCode::Right => {
                if let Some(next) = self.anchor.succ_opt() {
                    self.set_anchor(next);
                }
            }
            KeyCode::Enter => {
                self.editing_date = true;
                self.date_input = format_date_for_api(self.anchor);
                self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('r') => self.set_anchor(self.anchor),
            _ => {}
        }

        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.date_input.trim();
        if trimmed.is_empty() {
            self.set_anchor(self.max_date);
            return;
        }
        match crate::domain::parse_local_date(trimmed) {
            Ok(date) => self.set_anchor(date),
            Err(e) => self.status = e.to_string(),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            " Economic Data Dashboard ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let titles = [Tab::Currency, Tab::Rv].map(|t| Line::from(t.title()));
        let selected = match self.tab {
            Tab::Currency => 0,
            Tab::Rv => 1,
        };
        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(tabs, rows[0]);

        let date = if self.editing_date {
            format!("{}_", self.date_input)
        } else {
            format_display_date(self.anchor)
        };
        let line = Line::from(vec![
            Span::raw("Point in time: "),
            Span::styled(date, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("  (Latest available: {})", format_display_date(self.max_date)),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), rows[1]);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(area);

        self.draw_card_list(frame, chunks[0]);
        self.draw_card(frame, chunks[1]);
    }

    fn draw_card_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let state = self.tab_state(self.tab);
        let configs = crate::app::tab_series(self.tab);
        let items: Vec<ListItem> = configs
            .iter()
            .enumerate()
            .map(|(idx, config)| {
                let outcome = state.outcomes.as_ref().and_then(|o| o.get(idx));
                let (label, style) = card_list_label(config, outcome, state.loading);
                ListItem::new(label).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Series").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("» ");

        let mut list_state = ListState::default();
        list_state.select(Some(state.selected.min(configs.len().saturating_sub(1))));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_card(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let state = self.tab_state(self.tab);
        let configs = crate::app::tab_series(self.tab);
        let Some(config) = configs.get(state.selected) else {
            return;
        };

        let block = Block::default()
            .title(format!(" {} ", config.name))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let outcome = state.outcomes.as_ref().and_then(|o| o.get(state.selected));
        let Some(outcome) = outcome else {
            let msg = Paragraph::new(format!("Loading {}...", config.short_name))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let metric = match &outcome.result {
            Ok(metric) => metric,
            Err(err) => {
                let msg = Paragraph::new(err.to_string())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true });
                frame.render_widget(msg, inner);
                return;
            }
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(inner);

        let good = config.is_favorable(metric.yoy_change);
        let change_style = Style::default().fg(if good { Color::Green } else { Color::Red });
        let decimals = config.decimals;
        let metrics = Text::from(vec![
            Line::from(vec![
                Span::styled(format!("As of: {}", metric.data_as_of), Style::default().fg(Color::Gray)),
                Span::raw("   "),
                Span::styled(
                    format!("Source: {}", config.source_name),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(vec![
                Span::raw(format!("Current: {}  ", format_value(metric.current, decimals))),
                Span::raw(format!("Prior Year: {}  ", format_value(metric.prior_year, decimals))),
                Span::styled(
                    format!("YOY: {}  ", format_change(metric.yoy_change, decimals)),
                    change_style,
                ),
                Span::styled(
                    format!(
                        "YOY %: {}",
                        format_percent(metric.yoy_percent, config.kind.percent_decimals())
                    ),
                    change_style,
                ),
            ]),
            Line::from(Span::styled(
                if metric.gaps.any() {
                    "Some values had no data and are shown as 0."
                } else {
                    "Prior year reflects the closest reporting day with available data."
                },
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(Paragraph::new(metrics), rows[0]);

        self.draw_charts(frame, rows[1], config, &outcome.windows());
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect, config: &SeriesConfig, windows: &[ChartWindow]) {
        if windows.is_empty() {
            return;
        }
        let row_count = windows.len().div_ceil(2);
        let row_constraints = vec![Constraint::Ratio(1, row_count as u32); row_count];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(area);

        for (row_idx, pair) in windows.chunks(2).enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, pair.len() as u32); pair.len()])
                .split(rows[row_idx]);

            for (window, cell) in pair.iter().zip(cols.iter()) {
                let block = Block::default()
                    .title(window_title(window, config.decimals))
                    .borders(Borders::ALL);
                let inner = block.inner(*cell);
                frame.render_widget(block, *cell);

                let Some((line, x_bounds, y_bounds)) = chart_series(window, self.anchor) else {
                    frame.render_widget(
                        Paragraph::new("No data available").style(Style::default().fg(Color::Gray)),
                        inner,
                    );
                    continue;
                };
                let chart = SeriesChart {
                    line: &line,
                    x_bounds,
                    y_bounds,
                    fmt_x: fmt_axis_days,
                    fmt_y: fmt_axis_value,
                };
                frame.render_widget(chart, inner);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab switch  ↑/↓ series  ←/→ day  Enter edit date  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// List entry for a card: name plus a short status.
fn card_list_label(config: &SeriesConfig, outcome: Option<&SeriesOutcome>, loading: bool) -> (String, Style) {
    match outcome.map(|o| &o.result) {
        Some(Ok(m)) => (
            format!(
                "{} {}",
                config.short_name,
                format_percent(m.yoy_percent, config.kind.percent_decimals())
            ),
            Style::default().fg(if config.is_favorable(m.yoy_change) {
                Color::Green
            } else {
                Color::Red
            }),
        ),
        Some(Err(_)) => (format!("{} (error)", config.short_name), Style::default().fg(Color::Red)),
        None if loading => (format!("{} …", config.short_name), Style::default().fg(Color::Yellow)),
        None => (config.short_name.to_string(), Style::default().fg(Color::Gray)),
    }
}

/// Chart block title: `label  first → last (+change)`.
fn window_title(window: &ChartWindow, decimals: usize) -> String {
    match window.summary() {
        Some(s) => format!(
            " {}  {} → {} ({}) ",
            window.label,
            format_value(s.first, decimals),
            format_value(s.last, decimals),
            format_change(s.change, decimals),
        ),
        None => format!(" {} ", window.label),
    }
}

/// Build the plotted line and bounds for a window.
///
/// x is measured in days relative to `anchor` so every window ends at 0.
fn chart_series(window: &ChartWindow, anchor: NaiveDate) -> Option<(Vec<(f64, f64)>, [f64; 2], [f64; 2])> {
    let summary = window.summary()?;
    let line: Vec<(f64, f64)> = window
        .points
        .iter()
        .map(|o| ((o.date - anchor).num_days() as f64, o.value))
        .collect();

    let x_bounds = [-(window.days.max(1) as f64), 0.0];

    let span = summary.max - summary.min;
    let mut pad = span * 0.1;
    if pad <= 0.0 {
        pad = (summary.max.abs() * 0.05).max(0.01);
    }
    let y_bounds = [summary.min - pad, summary.max + pad];

    Some((line, x_bounds, y_bounds))
}

fn fmt_axis_days(v: f64) -> String {
    format!("{v:.0}d")
}

fn fmt_axis_value(v: f64) -> String {
    format!("{v:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::EXCHANGE_RATES;
    use crate::domain::{DateRange, Observation, RawObservation};
    use crate::error::SeriesError;

    struct EmptySource;

    impl ObservationSource for EmptySource {
        fn fetch_series(&self, _series_id: &str, _range: DateRange) -> Result<Vec<RawObservation>, SeriesError> {
            Ok(Vec::new())
        }
    }

    fn app_at(anchor: NaiveDate) -> App {
        App::new(
            Arc::new(EmptySource),
            Tab::Currency,
            anchor,
            d(2024, 3, 12),
            d(2024, 3, 12),
            MissingDataPolicy::Strict,
        )
    }

    fn loaded(ticket: Ticket, anchor: NaiveDate) -> Loaded {
        Loaded {
            ticket,
            tab: Tab::Currency,
            outcomes: vec![SeriesOutcome {
                config: EXCHANGE_RATES[0].clone(),
                anchor,
                result: Err(SeriesError::no_data("DEXCAUS", "empty")),
            }],
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window(values: &[(u32, f64)]) -> ChartWindow {
        ChartWindow {
            days: 14,
            label: "14 Days".to_string(),
            points: values
                .iter()
                .map(|&(day, value)| Observation { date: d(2024, 1, day), value })
                .collect(),
        }
    }

    #[test]
    fn late_results_for_an_old_anchor_are_dropped() {
        let old = d(2024, 3, 1);
        let new = d(2024, 3, 4);
        let mut app = app_at(old);
        let old_ticket = app.ticket;
        assert!(app.currency.loading);

        app.set_anchor(new);
        assert!(app.currency.loading);
        assert!(app.currency.outcomes.is_none());
        let new_ticket = app.ticket;

        app.tx.send(loaded(new_ticket, new)).unwrap();
        app.tx.send(loaded(old_ticket, old)).unwrap();
        assert!(app.drain_results());

        let outcomes = app.currency.outcomes.as_ref().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].anchor, new);
        assert!(!app.currency.loading);
    }

    #[test]
    fn stale_only_results_leave_the_tab_loading() {
        let mut app = app_at(d(2024, 3, 1));
        let old_ticket = app.ticket;
        app.set_anchor(d(2024, 3, 4));

        app.tx.send(loaded(old_ticket, d(2024, 3, 1))).unwrap();
        assert!(!app.drain_results());
        assert!(app.currency.outcomes.is_none());
        assert!(app.currency.loading);
    }

    #[test]
    fn superseded_fetches_are_never_dispatched() {
        let mut app = app_at(d(2024, 3, 1));
        app.set_anchor(d(2024, 3, 4));
        assert_eq!(app.pending.len(), 2);
        assert!(!app.selection.accepts(&app.pending[0].0));
        assert!(app.selection.accepts(&app.pending[1].0));
    }

    #[test]
    fn anchor_after_latest_data_is_refused() {
        let mut app = app_at(d(2024, 3, 1));
        let ticket = app.ticket;
        app.set_anchor(d(2024, 3, 13));
        assert_eq!(app.anchor, d(2024, 3, 1));
        assert_eq!(app.ticket, ticket);
        assert_eq!(app.pending.len(), 1);
    }

    #[test]
    fn chart_series_is_relative_to_anchor() {
        let (line, x_bounds, y_bounds) = chart_series(&window(&[(10, 1.0), (15, 2.0)]), d(2024, 1, 15)).unwrap();
        assert_eq!(line, vec![(-5.0, 1.0), (0.0, 2.0)]);
        assert_eq!(x_bounds, [-14.0, 0.0]);
        assert!((y_bounds[0] - 0.9).abs() < 1e-12);
        assert!((y_bounds[1] - 2.1).abs() < 1e-12);
    }

    #[test]
    fn flat_series_gets_nonzero_bounds() {
        let (_, _, y_bounds) = chart_series(&window(&[(10, 2.0), (11, 2.0)]), d(2024, 1, 11)).unwrap();
        assert!(y_bounds[1] > y_bounds[0]);
        assert!(chart_series(&window(&[]), d(2024, 1, 11)).is_none());
    }

    #[test]
    fn window_titles() {
        assert_eq!(window_title(&window(&[(1, 1.30), (2, 1.31)]), 4), " 14 Days  1.3000 → 1.3100 (+0.0100) ");
        assert_eq!(window_title(&window(&[]), 4), " 14 Days ");
    }

    #[test]
    fn card_list_labels_reflect_state() {
        let config = &EXCHANGE_RATES[0];
        let (label, _) = card_list_label(config, None, true);
        assert_eq!(label, "CAD-USD …");

        let failed = SeriesOutcome {
            config: config.clone(),
            anchor: d(2024, 1, 2),
            result: Err(SeriesError::no_data("DEXCAUS", "empty")),
        };
        let (label, style) = card_list_label(config, Some(&failed), false);
        assert_eq!(label, "CAD-USD (error)");
        assert_eq!(style.fg, Some(Color::Red));
    }
}
