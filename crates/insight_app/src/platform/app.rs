use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use insight_core::{update, AppState, Msg, SessionState};

use super::effects::EffectRunner;
use super::ui::constants::{CMD_QUIT, CMD_REVEAL};
use super::ui::render::{render, TerminalStyle};
use super::{config, logging};

/// How long the loop waits for input before polling the engine again.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load()?;
    logging::initialize(config.log, config.level_filter()?);
    engine_info!("Using insight service at {}", config.base_url);

    let effects = EffectRunner::new(config.fetch_settings())?;
    let style = if use_color(config.color, io::stdout().is_terminal()) {
        TerminalStyle::colored()
    } else {
        TerminalStyle::plain()
    };

    let (input_tx, input_rx) = mpsc::channel::<InputEvent>();
    spawn_stdin_reader(input_tx);

    let mut app = App::new(effects, style);
    app.render()?;

    let mut input_closed = false;
    loop {
        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(InputEvent::Line(line)) => match translate_line(&line) {
                LineAction::Quit => break,
                LineAction::Dispatch(msgs) => msgs.into_iter().for_each(|msg| app.apply(msg)),
            },
            Ok(InputEvent::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                input_closed = true;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        for msg in app.effects.poll() {
            app.apply(msg);
        }
        app.render_if_dirty()?;

        // Piped input ends early; let the last search settle before leaving.
        if input_closed && app.state.session() != SessionState::Loading {
            break;
        }
    }

    engine_info!("Leaving insight_app");
    Ok(())
}

/// Escape codes only make sense when stdout is a terminal, not a file or pipe.
fn use_color(configured: bool, stdout_is_terminal: bool) -> bool {
    configured && stdout_is_terminal
}

enum InputEvent {
    Line(String),
    Closed,
}

fn spawn_stdin_reader(tx: mpsc::Sender<InputEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(InputEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    engine_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(InputEvent::Closed);
    });
}

#[derive(Debug, PartialEq, Eq)]
enum LineAction {
    Quit,
    Dispatch(Vec<Msg>),
}

/// Maps one input line to messages. Anything that is not a command is a query.
fn translate_line(line: &str) -> LineAction {
    match line.trim() {
        CMD_QUIT => LineAction::Quit,
        CMD_REVEAL => LineAction::Dispatch(vec![Msg::RevealApproachClicked]),
        _ => LineAction::Dispatch(vec![
            Msg::QueryChanged(line.to_string()),
            Msg::SearchSubmitted,
        ]),
    }
}

struct App {
    state: AppState,
    effects: EffectRunner,
    style: TerminalStyle,
    needs_render: bool,
}

impl App {
    fn new(effects: EffectRunner, style: TerminalStyle) -> Self {
        Self {
            state: AppState::new(),
            effects,
            style,
            needs_render: false,
        }
    }

    fn apply(&mut self, msg: Msg) {
        let (mut state, effects) = update(std::mem::take(&mut self.state), msg);
        self.needs_render |= state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);
    }

    fn render_if_dirty(&mut self) -> io::Result<()> {
        if std::mem::take(&mut self.needs_render) {
            self.render()?;
        }
        Ok(())
    }

    fn render(&self) -> io::Result<()> {
        let text = render(&self.state.view(), &self.style);
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.write_all(b"> ")?;
        stdout.flush()
    }
}
