// src/bin/dashboard/ui.rs - Rendering for login, cockpit views and the feedback popup
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        canvas::{Canvas, Circle},
        Axis, BarChart, Block, Borders, Cell, Chart, Clear, Dataset, Gauge, GraphType, Paragraph,
        Row, Table, Wrap,
    },
    Frame,
};

use safety_cockpit::metrics::{
    battery_histogram, fleet_pivot, map_center, reports_by_priority, risk_profile, top_hotspots,
    trend_series, BATTERY_BINS, HOTSPOT_LIMIT,
};
use safety_cockpit::roles::Role;
use safety_cockpit::types::{FleetStatus, RiskLevel, ViewMode};

use crate::app::App;
use crate::forms::{FeedbackField, LoginField};
use crate::sidebar::render_sidebar;
use crate::types::{priority_color, RiskLevelExt, Screen};

// Half extents of the map viewport in degrees around the zone centroid
const MAP_HALF_LON: f64 = 1.9;
const MAP_HALF_LAT: f64 = 0.9;
const METERS_PER_DEGREE: f64 = 111_000.0;

pub fn ui(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => ui_login(f, app),
        Screen::Dashboard => {
            ui_dashboard(f, app);
            if app.show_feedback() {
                render_feedback_popup(f, app, f.size());
            }
        }
    }
}

fn ui_login(f: &mut Frame, app: &App) {
    let size = f.size();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(size);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(3), // Role
            Constraint::Length(3), // Error
            Constraint::Min(3),    // Help
        ])
        .split(columns[0]);

    let title = Paragraph::new("🛴 Safety Heatmap Cockpit")
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(title, left[0]);

    let form = &app.login_form;
    render_input(f, left[1], "Username", &form.username, form.focus == LoginField::Username);
    render_input(f, left[2], "Password", &form.masked_password(), form.focus == LoginField::Password);
    render_input(
        f,
        left[3],
        "Role (←/→)",
        &format!("{} ({})", form.role.name(), form.role.label()),
        form.focus == LoginField::Role,
    );

    if let Some(error) = &form.error {
        let error = Paragraph::new(format!("⚠️  {}", error))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(error, left[4]);
    }

    let help = Paragraph::new("Tab/↑↓ switch field | ←/→ change role | Enter login | Esc quit")
        .block(Block::default().borders(Borders::ALL).title("🔧 Controls"))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(help, left[5]);

    let mut lines = vec![
        Line::from(Span::styled(
            "Real-time view of e-scooter safety risk across city zones",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("• Heatmap of risk and incidents per zone"),
        Line::from("• Trends for rides, reports and technical issues"),
        Line::from("• Fleet status, battery health and decision summaries"),
        Line::from(""),
        Line::from(Span::styled("Roles", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for role in Role::ALL {
        let marker = if role == form.role { "▶" } else { " " };
        lines.push(Line::from(format!("{} {} – {}", marker, role.name(), role.logo_path())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Prototype with synthetic data. Any username and password are accepted.",
        Style::default().fg(Color::DarkGray),
    )));

    let info = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("ℹ️  About"))
        .wrap(Wrap { trim: true });
    f.render_widget(info, columns[1]);
}

fn render_input(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border = if focused { Color::Yellow } else { Color::Gray };
    let cursor = if focused { "▏" } else { "" };
    let input = Paragraph::new(format!("{}{}", value, cursor)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, area);
}

fn ui_dashboard(f: &mut Frame, app: &App) {
    let size = f.size();

    let sidebar_width = if size.width > 140 { 40 } else { 34 };
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(60)])
        .split(size);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Metrics
            Constraint::Min(10),   // View
            Constraint::Length(3), // Controls
        ])
        .split(main_chunks[1]);

    render_sidebar(f, app, main_chunks[0]);
    render_header(f, app, right_chunks[0]);
    render_metrics(f, app, right_chunks[1]);

    match app.session.view_mode() {
        ViewMode::Heatmap => render_heatmap_view(f, app, right_chunks[2]),
        ViewMode::Trend => render_trend_view(f, app, right_chunks[2]),
        ViewMode::Reporting => render_reporting_view(f, app, right_chunks[2]),
    }

    render_dashboard_help(f, right_chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("🛴 {}", app.session.header_title()))
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(Color::Cyan));

    let user = app
        .session
        .login_state()
        .map(|l| l.username.as_str())
        .unwrap_or("-");
    let header_text = format!(
        "User: {} | Logo: {} | Scenario: {} | Data age: {}s | Time: {}",
        user,
        app.logo_path().unwrap_or("-"),
        app.selected_scenario().display_name(),
        app.last_update.elapsed().as_secs(),
        Local::now().format("%H:%M:%S"),
    );

    let header = Paragraph::new(header_text)
        .block(header_block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    f.render_widget(header, area);
}

fn render_metrics(f: &mut Frame, app: &App, area: Rect) {
    let m = &app.metrics;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(24),
            Constraint::Percentage(19),
            Constraint::Percentage(19),
            Constraint::Percentage(19),
            Constraint::Percentage(19),
        ])
        .split(area);

    let index_color = match m.safety_index {
        0..=39 => Color::Red,
        40..=69 => Color::Yellow,
        _ => Color::Green,
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Safety index"))
        .gauge_style(Style::default().fg(index_color))
        .percent(m.safety_index as u16)
        .label(format!("{}/100", m.safety_index));
    f.render_widget(gauge, cells[0]);

    let tiles = [
        ("Critical zones", m.num_critical.to_string(), RiskLevel::Critical.color()),
        ("High zones", m.num_high.to_string(), RiskLevel::High.color()),
        ("Ø blocked min", m.avg_blocked_minutes.to_string(), Color::White),
        ("Scooters", m.total_scooters.to_string(), Color::Cyan),
    ];
    for (i, (title, value, color)) in tiles.into_iter().enumerate() {
        let tile = Paragraph::new(value)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(tile, cells[i + 1]);
    }
}

fn render_heatmap_view(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_zone_map(f, app, chunks[0]);
    render_hotspot_table(f, app, chunks[1]);
}

fn render_zone_map(f: &mut Frame, app: &App, area: Rect) {
    let (center_lat, center_lon) = map_center(&app.bundle.zones).unwrap_or((47.0, 8.2));
    let points = &app.bundle.map;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🗺️  Risk heatmap (radius ∝ risk)")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([center_lon - MAP_HALF_LON, center_lon + MAP_HALF_LON])
        .y_bounds([center_lat - MAP_HALF_LAT, center_lat + MAP_HALF_LAT])
        .paint(|ctx| {
            for point in points {
                ctx.draw(&Circle {
                    x: point.longitude,
                    y: point.latitude,
                    radius: point.radius_m / METERS_PER_DEGREE,
                    color: point.risk_label.color(),
                });
            }
            ctx.layer();
            for point in points {
                ctx.print(
                    point.longitude,
                    point.latitude,
                    Span::styled(
                        format!("{} {}", point.risk_score, point.zone),
                        Style::default().fg(Color::White),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_hotspot_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Zone", "Risk", "5m", "30m", "24h", "Blocked"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = top_hotspots(&app.bundle.zones, HOTSPOT_LIMIT)
        .into_iter()
        .map(|zone| {
            let level = zone.risk_label;
            Row::new(vec![
                Cell::from(zone.name.clone()),
                Cell::from(format!("{} {}", level.symbol(), level.label()))
                    .style(Style::default().fg(level.color())),
                Cell::from(zone.incidents_5min.to_string()),
                Cell::from(zone.incidents_30min.to_string()),
                Cell::from(zone.incidents_24h.to_string()),
                Cell::from(format!("{:.1}", zone.blocked_minutes)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(12),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(8),
    ];
    let table = Table::new(rows)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("🔥 Top {} hotspots", HOTSPOT_LIMIT))
                .border_style(Style::default().fg(Color::Red)),
        )
        .widths(&widths);

    f.render_widget(table, area);
}

fn render_trend_view(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_trend_chart(f, app, chunks[0]);
    render_risk_profile(f, app, bottom[0]);
    render_report_feed(f, app, bottom[1]);
}

fn render_trend_chart(f: &mut Frame, app: &App, area: Rect) {
    let series = trend_series(&app.bundle.trend);
    let x_min = series.rides.first().map(|(x, _)| *x).unwrap_or(-120.0);
    let y_max = (series.max_value * 1.1).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Rides")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&series.rides),
        Dataset::default()
            .name("Reports")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&series.reports),
        Dataset::default()
            .name("Tech issues")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&series.tech_issues),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("📈 Rides, reports & technical issues (last 2 h)")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("min")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, 0.0])
                .labels(vec![
                    Span::raw(format!("{:.0}", x_min)),
                    Span::raw(format!("{:.0}", x_min / 2.0)),
                    Span::raw("now"),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_risk_profile(f: &mut Frame, app: &App, area: Rect) {
    let max_score = RiskLevel::Critical.score() as usize;
    let rows: Vec<Row> = risk_profile(&app.bundle.zones)
        .into_iter()
        .map(|(zone, score)| {
            let level = RiskLevel::from_score(score);
            let bar = format!(
                "{}{}",
                "█".repeat(score as usize * 3),
                "░".repeat((max_score - score as usize) * 3)
            );
            Row::new(vec![
                Cell::from(zone),
                Cell::from(bar).style(Style::default().fg(level.color())),
                Cell::from(score.to_string()),
            ])
        })
        .collect();

    let widths = [Constraint::Min(18), Constraint::Length(12), Constraint::Length(2)];
    let table = Table::new(rows)
        .header(
            Row::new(vec!["Zone", "Risk", ""])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("📊 Risk by zone"))
        .widths(&widths);

    f.render_widget(table, area);
}

fn render_report_feed(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = reports_by_priority(&app.bundle.reports)
        .into_iter()
        .map(|report| {
            Row::new(vec![
                Cell::from(report.time.clone()),
                Cell::from(report.priority.label())
                    .style(Style::default().fg(priority_color(report.priority))),
                Cell::from(report.zone.clone()),
                Cell::from(report.message.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(18),
        Constraint::Min(20),
    ];
    let table = Table::new(rows)
        .header(
            Row::new(vec!["Time", "Prio", "Zone", "Report"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("🧾 Reports & incidents"))
        .widths(&widths);

    f.render_widget(table, area);
}

fn render_reporting_view(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[0]);

    render_fleet_pivot(f, app, top[0]);
    render_decision_summary(f, app, top[1]);
    render_battery_histogram(f, app, chunks[1]);
}

fn render_fleet_pivot(f: &mut Frame, app: &App, area: Rect) {
    let mut header_cells = vec![Cell::from("Zone")];
    header_cells.extend(FleetStatus::ALL.iter().map(|s| Cell::from(s.label())));
    header_cells.push(Cell::from("Total"));
    let header = Row::new(header_cells)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = fleet_pivot(&app.bundle.fleet)
        .into_iter()
        .map(|row| {
            let mut cells = vec![Cell::from(row.zone.clone())];
            cells.extend(FleetStatus::ALL.iter().map(|s| Cell::from(row.count(*s).to_string())));
            cells.push(
                Cell::from(row.total().to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
            );
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(6),
    ];
    let table = Table::new(rows)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🛴 Fleet status by zone")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .widths(&widths);

    f.render_widget(table, area);
}

fn render_decision_summary(f: &mut Frame, app: &App, area: Rect) {
    let m = &app.metrics;
    let hotspot = top_hotspots(&app.bundle.zones, 1)
        .into_iter()
        .next()
        .map(|z| z.name)
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(Span::styled(
            format!("Summary for {}", app.role_label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Scenario: {}", app.selected_scenario().display_name())),
        Line::from(format!("Safety index: {}/100", m.safety_index)),
        Line::from(format!(
            "{} critical and {} high-risk zones, main hotspot {}",
            m.num_critical, m.num_high, hotspot
        )),
        Line::from(format!("Average blocked time: {} min", m.avg_blocked_minutes)),
        Line::from(format!(
            "{} scooters in the area, {}% below 20% battery",
            m.total_scooters, m.low_battery_percent
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Cosmetic prototype output, synthetic data only.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let summary = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("🧭 Decision summary"))
        .wrap(Wrap { trim: true });
    f.render_widget(summary, area);
}

fn render_battery_histogram(f: &mut Frame, app: &App, area: Rect) {
    let histogram = battery_histogram(&app.bundle.battery, BATTERY_BINS);
    let labels: Vec<String> = histogram.iter().map(|bin| format!("{:.0}", bin.lower)).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(histogram.iter())
        .map(|(label, bin)| (label.as_str(), bin.count as u64))
        .collect();

    let bar_width = (area.width.saturating_sub(2) / BATTERY_BINS as u16).saturating_sub(1).max(1);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "🔋 Battery levels (%) | {}% below 20%",
                    app.metrics.low_battery_percent
                ))
                .border_style(Style::default().fg(Color::Green)),
        )
        .data(data.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        .label_style(Style::default().fg(Color::Gray));

    f.render_widget(chart, area);
}

fn render_dashboard_help(f: &mut Frame, area: Rect) {
    let help_block = Block::default()
        .borders(Borders::ALL)
        .title("🔧 Controls")
        .border_style(Style::default().fg(Color::Gray));

    let help_text = "'q' quit | 's'/'S' scenario | 'v' or '1-3' view | 'p' persona | 'r' reload | 'm' message | 'x' send | 'f' feedback | 'l' logout";
    let help = Paragraph::new(help_text)
        .block(help_block)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}

fn render_feedback_popup(f: &mut Frame, app: &App, size: Rect) {
    let width = size.width.saturating_mul(3) / 5;
    let height = 18.min(size.height);
    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    f.render_widget(Clear, area);

    let form = &app.feedback_form;
    let mut lines = Vec::new();
    for field in FeedbackField::ALL {
        let focused = form.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, field.question()), style)));

        let value = match form.rating(field) {
            Some(rating) => {
                let stars = "★".repeat(rating.value() as usize);
                let empty = "☆".repeat((5 - rating.value()) as usize);
                format!("    {}{}  {}   ({})", stars, empty, rating.value(), field.hint())
            }
            None if form.comments.is_empty() => format!("    {}", field.hint()),
            None => format!("    {}", form.comments),
        };
        lines.push(Line::from(Span::styled(value, Style::default().fg(Color::Gray))));
        lines.push(Line::from(""));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("⚠️  {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab/↑↓ field | ←/→ rating | Enter submit | Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("📝 Feedback")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(popup, area);
}
