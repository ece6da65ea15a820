use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jam_core::{update, AppState, Msg, ViewLocation};
use jam_engine::ApiSettings;
use jam_logging::jam_info;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::effects::EffectRunner;
use super::ui::constants::{INPUT_POLL, TICK_INTERVAL};
use super::ui::keys::{map_key, KeyAction};
use super::ui::render;

type JamTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct AppConfig {
    pub settings: ApiSettings,
    pub location: ViewLocation,
    pub poll_interval: Duration,
    pub state_file: PathBuf,
}

pub fn run_app(config: AppConfig) -> Result<()> {
    jam_info!(
        "Starting at {} against {}",
        config.location,
        config.settings.base_url
    );
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(&config.settings, config.state_file, msg_tx.clone())
        .context("failed to start the request engine")?;

    spawn_timer(msg_tx.clone(), TICK_INTERVAL, Msg::Tick);
    spawn_timer(
        msg_tx.clone(),
        config.poll_interval,
        Msg::RefetchIntervalElapsed,
    );

    let mut terminal = setup_terminal()?;
    let mut session = Session {
        state: AppState::with_location(config.location),
        runner,
        last_sync: None,
        needs_draw: true,
    };
    session.dispatch(Msg::Started);
    let result = session.run(&mut terminal, &msg_rx);

    cleanup_terminal(&mut terminal)?;
    result
}

/// Sends `msg` every `interval` until the receiver is gone.
fn spawn_timer(msg_tx: mpsc::Sender<Msg>, interval: Duration, msg: Msg) {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if msg_tx.send(msg.clone()).is_err() {
            break;
        }
    });
}

fn setup_terminal() -> Result<JamTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut JamTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    last_sync: Option<String>,
    needs_draw: bool,
}

impl Session {
    fn run(&mut self, terminal: &mut JamTerminal, msg_rx: &mpsc::Receiver<Msg>) -> Result<()> {
        loop {
            while let Ok(msg) = msg_rx.try_recv() {
                self.dispatch(msg);
            }

            if self.needs_draw {
                let view = self.state.view();
                let last_sync = self.last_sync.as_deref();
                terminal.draw(|frame| render::render(frame, &view, last_sync))?;
                self.needs_draw = false;
            }

            if event::poll(INPUT_POLL)? {
                match event::read()? {
                    Event::Key(key) => match map_key(key, &self.state.view()) {
                        KeyAction::Quit => break,
                        KeyAction::Dispatch(msg) => self.dispatch(msg),
                        KeyAction::Ignore => {}
                    },
                    Event::Resize(..) => self.needs_draw = true,
                    _ => {}
                }
            }
        }
        jam_info!("Quit requested");
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::CollectionPageLoaded { result: Ok(_), .. }) {
            self.last_sync = Some(Local::now().format("%H:%M:%S").to_string());
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_draw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }
}
