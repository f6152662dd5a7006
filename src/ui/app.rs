//! ratatui dashboard - live floor map, throughput chart, log feed
//!
//! Controls:
//!   Space: pause/resume
//!   1/2/5: clock speed
//!   Tab:   select next worker
//!   o:     select next order
//!   e:     expedite selected order
//!   m:     message selected worker
//!   Esc:   clear selection
//!   q:     quit

use std::io;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points, Rectangle};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, List, ListItem, Paragraph};
use ratatui::{Frame, Terminal};

use crate::core::error::Result;
use crate::simulation::scheduler::{Scheduler, SpeedMultiplier};
use crate::ui::panel::{order_detail, worker_detail};
use crate::ui::projection::{build_map_view, MapView, MarkerUrgency};
use crate::ui::state::{LogCategory, Selection, UiState};
use crate::world::order::QualityCheck;
use crate::world::worker::WorkerStatus;
use crate::world::zone::ZoneColor;

/// Floor height, used to flip the y axis (canvas y grows upward,
/// floor coordinates grow downward)
const FLOOR_HEIGHT: f64 = 80.0;

/// Run the dashboard until the user quits
pub fn run(mut scheduler: Scheduler) -> Result<()> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut scheduler);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    scheduler: &mut Scheduler,
) -> Result<()> {
    let mut ui = UiState::new();
    let mut next_tick = Instant::now() + scheduler.tick_period();

    loop {
        terminal.draw(|frame| draw(frame, scheduler, &ui))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(key.code, scheduler, &mut ui) {
                    return Ok(());
                }
            }
        }

        if Instant::now() >= next_tick {
            if scheduler.is_running() {
                let events = scheduler.tick();
                ui.apply_events(scheduler.state().world.current_tick, &events);
            }
            // Rescheduling picks up speed changes made since the last tick
            next_tick = Instant::now() + scheduler.tick_period();
        }
    }
}

/// Returns true when the app should quit
fn handle_key(code: KeyCode, scheduler: &mut Scheduler, ui: &mut UiState) -> bool {
    let tick = scheduler.state().world.current_tick;
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') => scheduler.toggle(),
        KeyCode::Char('1') => scheduler.set_speed(SpeedMultiplier::X1),
        KeyCode::Char('2') => scheduler.set_speed(SpeedMultiplier::X2),
        KeyCode::Char('5') => scheduler.set_speed(SpeedMultiplier::X5),
        KeyCode::Tab => ui.select_next_worker(&scheduler.state().world),
        KeyCode::Char('o') => ui.select_next_order(&scheduler.state().world),
        KeyCode::Esc => ui.deselect(),
        KeyCode::Char('e') => {
            if let Some(Selection::Order(id)) = ui.selection {
                if let Ok(event) = scheduler.expedite_order(id) {
                    ui.apply_events(tick, &[event]);
                }
            }
        }
        KeyCode::Char('m') => {
            if let Some(Selection::Worker(id)) = ui.selection {
                if let Ok(event) = scheduler.message_worker(id) {
                    ui.apply_events(tick, &[event]);
                }
            }
        }
        _ => {}
    }
    false
}

fn draw(frame: &mut Frame, scheduler: &Scheduler, ui: &UiState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(frame.size());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(outer[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Min(5),
        ])
        .split(columns[1]);

    let view = build_map_view(
        &scheduler.state().world,
        scheduler.config(),
        ui.selection,
    );
    draw_map(frame, columns[0], &view);
    draw_chart(frame, right[0], scheduler);
    draw_detail(frame, right[1], scheduler, ui);
    draw_log(frame, right[2], ui);
    draw_status_bar(frame, outer[1], scheduler);
}

fn zone_color(color: ZoneColor) -> Color {
    match color {
        ZoneColor::Slate => Color::DarkGray,
        ZoneColor::Amber => Color::Yellow,
        ZoneColor::Cyan => Color::Cyan,
        ZoneColor::Violet => Color::Magenta,
        ZoneColor::Rose => Color::Red,
        ZoneColor::Emerald => Color::Green,
    }
}

fn urgency_color(urgency: MarkerUrgency) -> Color {
    match urgency {
        MarkerUrgency::Normal => Color::Gray,
        MarkerUrgency::Late => Color::Yellow,
        MarkerUrgency::Stalled => Color::Red,
    }
}

fn draw_map(frame: &mut Frame, area: Rect, view: &MapView) {
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" Floor "))
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, FLOOR_HEIGHT])
        .paint(|ctx| {
            for zone in &view.zones {
                let y = FLOOR_HEIGHT - f64::from(zone.y) - f64::from(zone.height);
                ctx.draw(&Rectangle {
                    x: f64::from(zone.x),
                    y,
                    width: f64::from(zone.width),
                    height: f64::from(zone.height),
                    color: zone_color(zone.color),
                });
                ctx.print(
                    f64::from(zone.x) + 1.0,
                    FLOOR_HEIGHT - f64::from(zone.y) - 1.0,
                    Line::from(Span::styled(
                        zone.label,
                        Style::default().fg(zone_color(zone.color)),
                    )),
                );
            }

            for heading in &view.headings {
                ctx.draw(&CanvasLine {
                    x1: f64::from(heading.from.x),
                    y1: FLOOR_HEIGHT - f64::from(heading.from.y),
                    x2: f64::from(heading.to.x),
                    y2: FLOOR_HEIGHT - f64::from(heading.to.y),
                    color: Color::DarkGray,
                });
            }

            if view.trail.len() > 1 {
                let coords: Vec<(f64, f64)> = view
                    .trail
                    .iter()
                    .map(|p| (f64::from(p.x), FLOOR_HEIGHT - f64::from(p.y)))
                    .collect();
                ctx.draw(&Points {
                    coords: &coords,
                    color: Color::Blue,
                });
            }

            for order in &view.orders {
                let style = Style::default().fg(urgency_color(order.urgency));
                let glyph = if order.selected { "▣" } else { "□" };
                ctx.print(
                    f64::from(order.position.x),
                    FLOOR_HEIGHT - f64::from(order.position.y),
                    Line::from(Span::styled(glyph, style)),
                );
            }

            for worker in &view.workers {
                let color = match worker.status {
                    WorkerStatus::Busy => Color::Green,
                    WorkerStatus::Idle => Color::White,
                    WorkerStatus::Charging => Color::Yellow,
                    WorkerStatus::Offline => Color::DarkGray,
                };
                let mut style = Style::default().fg(color);
                if worker.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                // Robots render as their digit glyph, humans as initials
                ctx.print(
                    f64::from(worker.position.x),
                    FLOOR_HEIGHT - f64::from(worker.position.y),
                    Line::from(Span::styled(worker.glyph.to_string(), style)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_chart(frame: &mut Frame, area: Rect, scheduler: &Scheduler) {
    let config = scheduler.config();
    let chart_state = &scheduler.state().chart;

    let points: Vec<(f64, f64)> = chart_state
        .points()
        .enumerate()
        .map(|(i, p)| (i as f64, f64::from(p.value)))
        .collect();
    let window = chart_state.window() as f64;
    let target = f64::from(config.throughput_target);
    let target_line = [(0.0, target), (window, target)];

    let datasets = vec![
        Dataset::default()
            .name("target")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&target_line),
        Dataset::default()
            .name("units/hr")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
    ];

    let x_labels = match (
        chart_state.points().next(),
        chart_state.latest(),
    ) {
        (Some(first), Some(last)) => vec![
            Span::raw(first.label.clone()),
            Span::raw(last.label.clone()),
        ],
        _ => Vec::new(),
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Throughput "),
        )
        .x_axis(Axis::default().bounds([0.0, window]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds([f64::from(config.chart_min), f64::from(config.chart_max)])
                .labels(vec![
                    Span::raw(format!("{:.0}", config.chart_min)),
                    Span::raw(format!("{:.0}", config.chart_max)),
                ]),
        );
    frame.render_widget(chart, area);
}

fn draw_detail(frame: &mut Frame, area: Rect, scheduler: &Scheduler, ui: &UiState) {
    let block = Block::default().borders(Borders::ALL).title(" Detail ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match ui.selection {
        Some(Selection::Worker(id)) => {
            let Some(detail) = worker_detail(&scheduler.state().world, id) else {
                return;
            };
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Length(2),
                    Constraint::Length(2),
                ])
                .split(inner);

            let lines = vec![
                Line::from(vec![
                    Span::styled(detail.name, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  ({})", detail.role)),
                ]),
                Line::from(format!("Status: {:?}", detail.status)),
                Line::from(format!("Device: {}", detail.device)),
                Line::from(format!(
                    "Order: {}   Efficiency: {:.0}%",
                    detail.current_order.as_deref().unwrap_or("-"),
                    detail.efficiency * 100.0
                )),
            ];
            frame.render_widget(Paragraph::new(lines), rows[0]);
            frame.render_widget(
                Gauge::default()
                    .label(format!("battery {:>3.0}%", detail.battery * 100.0))
                    .gauge_style(Style::default().fg(Color::Green))
                    .ratio(detail.battery),
                rows[1],
            );
            frame.render_widget(
                Gauge::default()
                    .label(format!("signal {:>3.0}%", detail.signal * 100.0))
                    .gauge_style(Style::default().fg(Color::Cyan))
                    .ratio(detail.signal),
                rows[2],
            );
        }
        Some(Selection::Order(id)) => {
            let Some(detail) = order_detail(&scheduler.state().world, scheduler.config(), id)
            else {
                return;
            };
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(6), Constraint::Length(2)])
                .split(inner);

            let deadline_style = if detail.late {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let quality = match detail.quality {
                QualityCheck::Pending => "pending",
                QualityCheck::Pass => "pass",
                QualityCheck::Fail => "fail",
            };
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(detail.title, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  {}", detail.kind.label())),
                ]),
                Line::from(format!(
                    "Status: {:?}   Priority: {:?}",
                    detail.status, detail.priority
                )),
                Line::from(format!("Quality: {}", quality)),
                Line::from(vec![Span::styled(
                    format!("Ship deadline in {}s", detail.deadline_secs),
                    deadline_style,
                )]),
            ];
            if detail.stalled {
                lines.push(Line::from(Span::styled(
                    "STALLED",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            }
            if let Some(worker) = detail.assigned_to {
                lines.push(Line::from(format!("Assigned: {}", worker)));
            }
            frame.render_widget(Paragraph::new(lines), rows[0]);

            if let (Some(progress), Some(stage)) = (detail.progress, detail.stage) {
                frame.render_widget(
                    Gauge::default()
                        .label(stage)
                        .gauge_style(Style::default().fg(Color::Magenta))
                        .ratio(progress),
                    rows[1],
                );
            }
        }
        None => {
            frame.render_widget(
                Paragraph::new("Tab: select worker   o: select order"),
                inner,
            );
        }
    }
}

fn draw_log(frame: &mut Frame, area: Rect, ui: &UiState) {
    let items: Vec<ListItem> = ui
        .log
        .iter()
        .map(|entry| {
            let color = match entry.category {
                LogCategory::Info => Color::Gray,
                LogCategory::Warn => Color::Yellow,
                LogCategory::Success => Color::Green,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Events "));
    frame.render_widget(list, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, scheduler: &Scheduler) {
    let world = &scheduler.state().world;
    let state = if scheduler.is_running() {
        Span::styled("RUNNING", Style::default().fg(Color::Green))
    } else {
        Span::styled("PAUSED", Style::default().fg(Color::Yellow))
    };
    let line = Line::from(vec![
        state,
        Span::raw(format!(
            "  {}  tick {}  speed {}  |  space pause  1/2/5 speed  e expedite  m message  q quit",
            world.shift.time_label(),
            world.current_tick,
            scheduler.speed().label(),
        )),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
