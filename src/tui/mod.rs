//! Ratatui-based terminal UI.
//!
//! A sidebar holds the filters (region selector + product multi-select); the
//! main area shows four tabs: KPI overview, sales by product, monthly trend and
//! the filtered rows. Every filter change re-runs the aggregation engine
//! synchronously before the next draw.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, Tabs},
};

use crate::app::pipeline::{build_dataset, initial_selection};
use crate::data::Dataset;
use crate::domain::{AggregationResult, DashConfig, Dimension, FilterSelection};
use crate::engine::{aggregate, first_region};
use crate::error::{AppError, ErrorKind};
use crate::report::{NO_DATA, fmt_count, fmt_currency};

mod plotters_chart;

use plotters_chart::MonthlyTrendChart;

const EXPORT_PATH: &str = "dash_export.csv";

/// Start the TUI.
pub fn run(config: DashConfig) -> Result<(), AppError> {
    let mut app = App::new(config)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Kpi,
    Distribution,
    Trend,
    Data,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Kpi, Tab::Distribution, Tab::Trend, Tab::Data];

    fn title(self) -> &'static str {
        match self {
            Tab::Kpi => "KPI Overview",
            Tab::Distribution => "Sales Distribution",
            Tab::Trend => "Monthly Trend",
            Tab::Data => "Sales Data",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

struct App {
    dataset: Dataset,
    regions: Vec<String>,
    products: Vec<String>,
    selection: FilterSelection,
    product_cursor: usize,
    tab: Tab,
    table_offset: usize,
    status: String,
    result: Option<AggregationResult>,
}

impl App {
    fn new(config: DashConfig) -> Result<Self, AppError> {
        let dataset = build_dataset(&config)?;
        let regions = dataset.distinct_values(Dimension::Region)?;
        let products = dataset.distinct_values(Dimension::Product)?;
        let selection = initial_selection(&dataset, &config)?;

        let mut app = Self {
            dataset,
            regions,
            products,
            selection,
            product_cursor: 0,
            tab: Tab::Kpi,
            table_offset: 0,
            status: format!("seed {} | {} records", config.sample_seed, config.sample_count),
            result: None,
        };
        app.recompute()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
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
                    if self.handle_key(key.code)? {
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

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.tab = Tab::ALL[idx];
            }
            KeyCode::Left => self.step_region(-1)?,
            KeyCode::Right => self.step_region(1)?,
            KeyCode::Up => {
                self.product_cursor = self.product_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.product_cursor + 1 < self.products.len() {
                    self.product_cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(product) = self.products.get(self.product_cursor).cloned() {
                    self.selection.toggle_product(&product);
                    self.recompute()?;
                }
            }
            KeyCode::Char('a') => {
                self.selection.products = self.products.clone();
                self.recompute()?;
            }
            KeyCode::Char('c') => {
                self.selection.products.clear();
                self.recompute()?;
            }
            KeyCode::PageDown => {
                let rows = self.result.as_ref().map_or(0, |r| r.filtered_records.len());
                self.table_offset = (self.table_offset + 10).min(rows.saturating_sub(1));
            }
            KeyCode::PageUp => {
                self.table_offset = self.table_offset.saturating_sub(10);
            }
            KeyCode::Char('e') => self.export_rows(),
            _ => {}
        }

        Ok(false)
    }

    fn step_region(&mut self, delta: isize) -> Result<(), AppError> {
        if self.regions.is_empty() {
            return Ok(());
        }
        let n = self.regions.len() as isize;
        let cur = self
            .regions
            .iter()
            .position(|r| *r == self.selection.region)
            .unwrap_or(0) as isize;
        let next = (cur + delta).rem_euclid(n) as usize;
        self.selection.region = self.regions[next].clone();
        self.recompute()?;
        self.status = format!("region: {}", self.selection.region);
        Ok(())
    }

    /// Re-run the engine for the current selection.
    ///
    /// An unknown region is reset to the first region instead of aborting.
    fn recompute(&mut self) -> Result<(), AppError> {
        self.table_offset = 0;
        match aggregate(&self.dataset, &self.selection) {
            Ok(result) => {
                self.result = Some(result);
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(region = %self.selection.region, "resetting unknown region");
                self.status = format!("{err} Reset to default region.");
                self.selection.region = first_region(&self.dataset)?;
                self.result = Some(aggregate(&self.dataset, &self.selection)?);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn export_rows(&mut self) {
        let Some(result) = &self.result else {
            self.status = "Nothing to export.".to_string();
            return;
        };
        let path = PathBuf::from(EXPORT_PATH);
        match crate::io::write_records_csv(&path, &result.filtered_records) {
            Ok(()) => {
                self.status = format!("Wrote {} rows to {}", result.filtered_records.len(), path.display());
            }
            Err(err) => {
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = self.result.as_ref().map_or(0, |r| r.filtered_records.len());
        let line = Line::from(vec![
            Span::styled(
                "FMCG Sales Dashboard",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  region: {} | products: {} | rows: {rows}/{}",
                    self.selection.region,
                    self.selection.products.len(),
                    self.dataset.len()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(0)])
            .split(area);

        self.draw_filters(frame, chunks[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(chunks[1]);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, main[0]);

        let content = main[1];
        let Some(result) = &self.result else {
            frame.render_widget(Paragraph::new("Waiting for data..."), content);
            return;
        };

        match self.tab {
            Tab::Kpi => self.draw_kpis(frame, content, result),
            Tab::Distribution => self.draw_distribution(frame, content, result),
            Tab::Trend => self.draw_trend(frame, content, result),
            Tab::Data => self.draw_table(frame, content, result),
        }
    }

    fn draw_filters(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let region = Paragraph::new(format!("◀ {} ▶", self.selection.region))
            .alignment(Alignment::Center)
            .block(Block::default().title("Region").borders(Borders::ALL));
        frame.render_widget(region, chunks[0]);

        let items: Vec<ListItem> = self
            .products
            .iter()
            .map(|p| {
                let mark = if self.selection.products.contains(p) { "[x]" } else { "[ ]" };
                ListItem::new(format!("{mark} {p}"))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Products").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.product_cursor));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect, result: &AggregationResult) {
        let block = Block::default()
            .title(format!("Key Performance Indicators for {}", self.selection.region))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
            .split(Rect {
                height: inner.height.min(5),
                ..inner
            });

        let metrics = [
            ("Total Sales", fmt_currency(result.totals.sales_amount)),
            ("Total Units Sold", fmt_count(result.totals.units_sold)),
            ("Total Target", fmt_currency(result.totals.target)),
        ];
        for (rect, (label, value)) in cols.iter().zip(metrics) {
            let text = Text::from(vec![
                Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
                Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
            ]);
            let p = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(p, *rect);
        }

        if result.is_empty() {
            render_no_data(frame, Rect {
                y: inner.y + inner.height.min(5),
                height: inner.height.saturating_sub(5),
                ..inner
            });
        }
    }

    fn draw_distribution(&self, frame: &mut ratatui::Frame<'_>, area: Rect, result: &AggregationResult) {
        let block = Block::default()
            .title(format!("Sales Distribution by Product in {}", self.selection.region))
            .borders(Borders::ALL);
        if result.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            render_no_data(frame, inner);
            return;
        }

        let bars: Vec<Bar> = result
            .by_product
            .iter()
            .map(|(product, &sales)| {
                Bar::default()
                    .value(sales.round() as u64)
                    .label(Line::from(product.clone()))
                    .text_value(fmt_compact(sales))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .bar_width(10)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Red))
            .value_style(Style::default().fg(Color::White).bg(Color::Red))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }

    fn draw_trend(&self, frame: &mut ratatui::Frame<'_>, area: Rect, result: &AggregationResult) {
        let block = Block::default()
            .title(format!("Monthly Sales Trend for {}", self.selection.region))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if result.is_empty() {
            render_no_data(frame, inner);
            return;
        }

        let (points, y_max) = MonthlyTrendChart::series(&result.by_month);
        let widget = MonthlyTrendChart {
            points: &points,
            y_max,
            y_label: "sales",
            fmt_y: fmt_compact,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect, result: &AggregationResult) {
        let block = Block::default()
            .title(format!(
                "Sales Data for {} ({} rows)",
                self.selection.region,
                result.filtered_records.len()
            ))
            .borders(Borders::ALL);

        let header = Row::new(["Product", "Region", "Month", "SalesAmount", "UnitsSold", "Target"])
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = result
            .filtered_records
            .iter()
            .skip(self.table_offset)
            .map(|r| {
                Row::new(vec![
                    r.product.clone(),
                    r.region.clone(),
                    r.month.to_string(),
                    format!("{:.2}", r.sales_amount),
                    r.units_sold.to_string(),
                    format!("{:.2}", r.target),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ region  ↑/↓ product  space toggle  a all  c clear  Tab/1-4 view  PgUp/PgDn rows  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn render_no_data(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let msg = Paragraph::new(NO_DATA)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(msg, area);
}

/// Short axis/bar label: `12.3k`, `1.2M`.
fn fmt_compact(v: f64) -> String {
    let a = v.abs();
    if a >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if a >= 1_000.0 {
        format!("{:.1}k", v / 1_000.0)
    } else {
        format!("{v:.0}")
    }
}
