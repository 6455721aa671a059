// src/bin/dashboard/main.rs - Terminal cockpit entry point
use std::io;
use tokio::time::{Duration, Instant};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use tracing::info;

use safety_cockpit::config::CockpitConfig;
use safety_cockpit::logging::init_logging;
use safety_cockpit::types::ViewMode;

mod app;
mod forms;
mod sidebar;
mod types;
mod ui;

use app::App;
use types::Screen;
use ui::ui;

enum Flow {
    Continue,
    Quit,
}

fn handle_login_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Tab | KeyCode::Down => app.login_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.login_form.previous_field(),
        KeyCode::Left => app.login_form.cycle_role(false),
        KeyCode::Right => app.login_form.cycle_role(true),
        KeyCode::Backspace => app.login_form.backspace(),
        KeyCode::Enter => app.submit_login(),
        KeyCode::Char(c) => app.login_form.input(c),
        _ => {}
    }
    Flow::Continue
}

fn handle_feedback_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_feedback(),
        KeyCode::Tab | KeyCode::Down => app.feedback_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.feedback_form.previous_field(),
        KeyCode::Left => app.feedback_form.decrease(),
        KeyCode::Right => app.feedback_form.increase(),
        KeyCode::Backspace => app.feedback_form.backspace(),
        KeyCode::Enter => app.submit_feedback(),
        KeyCode::Char(c) => app.feedback_form.input(c),
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('s') => app.cycle_scenario(true),
        KeyCode::Char('S') => app.cycle_scenario(false),
        KeyCode::Char('v') => app.next_view_mode(),
        KeyCode::Char('1') => app.set_view_mode(ViewMode::Heatmap),
        KeyCode::Char('2') => app.set_view_mode(ViewMode::Trend),
        KeyCode::Char('3') => app.set_view_mode(ViewMode::Reporting),
        KeyCode::Char('p') => app.cycle_persona(true),
        KeyCode::Char('P') => app.cycle_persona(false),
        KeyCode::Char('r') => app.reload_live_data(),
        KeyCode::Char('m') => app.next_template(),
        KeyCode::Char('x') => app.send_selected_template(),
        KeyCode::Char('f') => app.open_feedback(),
        KeyCode::Char('l') => app.logout(),
        _ => {}
    }
    Flow::Continue
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(1000);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let screen = app.screen;
                let flow = match screen {
                    Screen::Login => handle_login_key(&mut app, key),
                    Screen::Dashboard if app.show_feedback() => {
                        handle_feedback_key(&mut app, key);
                        Flow::Continue
                    }
                    Screen::Dashboard => handle_dashboard_key(&mut app, key),
                };

                if let Flow::Quit = flow {
                    return Ok(());
                }
            }
        }

        // Redraw once a second so the clock and data age stay current
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = CockpitConfig::from_env();
    if let Err(e) = init_logging(&config.log_dir, "dashboard", false) {
        eprintln!("Failed to initialize file logging: {}", e);
    }
    info!("🛴 Starting safety cockpit dashboard");
    config.log_summary();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(&config);

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    info!("🛴 Dashboard closed");
    Ok(())
}
