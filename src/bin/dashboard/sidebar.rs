// src/bin/dashboard/sidebar.rs - Controls, push banner and quick messages
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use safety_cockpit::metrics::push_banner;
use safety_cockpit::notifications::MessageTemplate;
use safety_cockpit::scenario::Scenario;
use safety_cockpit::types::ViewMode;

use crate::app::App;

pub fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Persona
            Constraint::Length(6),  // Scenario
            Constraint::Length(5),  // View mode
            Constraint::Length(5),  // Push banner
            Constraint::Length(7),  // Quick messages
            Constraint::Min(3),     // Status
        ])
        .split(area);

    render_persona(f, app, chunks[0]);
    render_scenarios(f, app, chunks[1]);
    render_view_modes(f, app, chunks[2]);
    render_push_banner(f, app, chunks[3]);
    render_quick_messages(f, app, chunks[4]);
    render_status(f, app, chunks[5]);
}

fn option_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("● {}", label),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(format!("○ {}", label), Style::default().fg(Color::Gray)))
    }
}

fn render_persona(f: &mut Frame, app: &App, area: Rect) {
    let persona = app.session.persona();
    let text = Paragraph::new(persona.name()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("👤 Persona [p]"),
    );
    f.render_widget(text, area);
}

fn render_scenarios(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_scenario();
    let lines: Vec<Line> = Scenario::SELECTABLE
        .iter()
        .map(|s| option_line(s.display_name(), *s == selected))
        .collect();

    let list = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("🎬 Scenario [s/S]"));
    f.render_widget(list, area);
}

fn render_view_modes(f: &mut Frame, app: &App, area: Rect) {
    let current = app.session.view_mode();
    let lines: Vec<Line> = ViewMode::ALL
        .iter()
        .map(|mode| option_line(mode.title(), *mode == current))
        .collect();

    let list = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("🖥️  View [v/1-3]"));
    f.render_widget(list, area);
}

fn render_push_banner(f: &mut Frame, app: &App, area: Rect) {
    let banner = push_banner(&app.bundle.reports);
    let text = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{}: ", banner.zone),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(banner.message),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("📣 Push")
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(text, area);
}

fn render_quick_messages(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = MessageTemplate::ALL
        .iter()
        .map(|t| option_line(t.text(), *t == app.selected_template))
        .collect();

    let channel = if app.notifications.is_enabled() { "🟢" } else { "⚪" };
    let list = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("💬 Quick messages {} [m/x]", channel)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match &app.status {
        Some(status) => (status.text.clone(), status.kind.color()),
        None => (
            format!("Session {}", &app.session.id().to_string()[..8]),
            Color::DarkGray,
        ),
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title("ℹ️  Status"))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}
