// Terminal UI for my-zt
//
// Three screens (dashboard, settings, about) over one event loop. Input
// events come from a dedicated reader thread over a channel; refresh
// cycles run as spawned tasks so a slow or hung request never blocks key
// handling. At most one refresh is in flight at a time: timer ticks and
// manual refreshes while one is running are dropped, and a still-running
// task is aborted when the app quits.

mod dashboard;
mod refresh;
mod settings;

pub use refresh::{run_refresh, RefreshOutcome};

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use crate::zerotier::ZeroTier;
use dashboard::DashboardState;
use settings::{SettingsAction, SettingsState};

const REFRESH_INTERVAL_SECS: u64 = 10;

const ABOUT_TEXT: &str = "\
my-zt, a ZeroTier network dashboard

A terminal application for viewing your ZeroTier networks and the devices \
joined to them. Configure an API token on the settings screen; the \
dashboard then shows your preferred network and refreshes it every few \
seconds.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Dashboard,
    Settings,
    About,
}

struct App {
    zt: ZeroTier,
    mode: Mode,
    dashboard: DashboardState,
    settings: SettingsState,
    should_quit: bool,
}

/// Take over the terminal and run the app until the user quits.
pub async fn run(zt: ZeroTier) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let app = App {
        zt,
        mode: Mode::Dashboard,
        dashboard: DashboardState::default(),
        settings: SettingsState::default(),
        should_quit: false,
    };
    let result = run_app(&mut terminal, app).await;

    // Always restore the terminal, even when the loop errored.
    disable_raw_mode().ok();
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
) -> Result<()> {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_input_reader(input_tx);

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let mut ticker = tokio::time::interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            // First tick fires immediately, populating the dashboard on start.
            _ = ticker.tick() => {
                app.spawn_refresh(&outcome_tx, &mut in_flight);
            }
            Some(outcome) = outcome_rx.recv() => {
                in_flight = None;
                app.dashboard.apply(outcome);
            }
            Some(event) = input_rx.recv() => {
                if let Event::Key(key) = event {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key, &outcome_tx, &mut in_flight);
                    }
                }
            }
        }

        if app.should_quit {
            if let Some(task) = in_flight.take() {
                task.abort();
            }
            return Ok(());
        }
    }
}

// Crossterm's event::read() blocks, so it lives on its own thread and
// feeds the async loop over a channel.
fn spawn_input_reader(tx: UnboundedSender<Event>) {
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

impl App {
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.mode {
            Mode::Dashboard => dashboard::render(frame, area, &self.dashboard),
            Mode::Settings => settings::render(frame, area, &self.settings),
            Mode::About => render_about(frame, area),
        }
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        outcome_tx: &UnboundedSender<RefreshOutcome>,
        in_flight: &mut Option<JoinHandle<()>>,
    ) {
        match self.mode {
            // The settings screen owns every key while it is open, so
            // letters type into the token field instead of switching modes.
            Mode::Settings => match self.settings.handle_key(key) {
                SettingsAction::Save(token) => {
                    self.save_token(&token);
                    self.mode = Mode::Dashboard;
                    self.spawn_refresh(outcome_tx, in_flight);
                }
                SettingsAction::Cancel => self.mode = Mode::Dashboard,
                SettingsAction::None => {}
            },
            Mode::Dashboard | Mode::About => match key.code {
                KeyCode::Char('d') => self.mode = Mode::Dashboard,
                KeyCode::Char('s') => {
                    self.settings.input = self.current_token();
                    self.mode = Mode::Settings;
                }
                KeyCode::Char('a') => self.mode = Mode::About,
                KeyCode::Char('r') => self.spawn_refresh(outcome_tx, in_flight),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn spawn_refresh(
        &mut self,
        outcome_tx: &UnboundedSender<RefreshOutcome>,
        in_flight: &mut Option<JoinHandle<()>>,
    ) {
        if in_flight.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }
        self.dashboard.refreshing = true;
        let zt = self.zt.clone();
        let tx = outcome_tx.clone();
        *in_flight = Some(tokio::spawn(async move {
            let outcome = refresh::run_refresh(&zt).await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(outcome);
        }));
    }

    fn save_token(&mut self, token: &str) {
        let token = token.trim();
        let result = self.zt.load_config().and_then(|mut config| {
            config.zerotier_token = if token.is_empty() {
                None
            } else {
                Some(token.to_string())
            };
            self.zt.save_config(&config)
        });
        match result {
            Ok(()) => {
                tracing::info!("ZeroTier token updated");
                self.dashboard.notice = Some("ZeroTier token updated".to_string());
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to update token");
                self.dashboard.notice = Some(format!("Error updating token: {e}"));
            }
        }
    }

    fn current_token(&self) -> String {
        self.zt
            .load_config()
            .ok()
            .and_then(|config| config.zerotier_token)
            .unwrap_or_default()
    }
}

fn render_about(frame: &mut Frame, area: Rect) {
    let about = Paragraph::new(ABOUT_TEXT)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" About "));
    frame.render_widget(about, area);
}
