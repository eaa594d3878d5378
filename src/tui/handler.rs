//! Async event handler for the editor.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    judge::{watch, JudgeClient},
    printer,
    session::EditorSession,
};
use super::{
    app::{App, Focus},
    events::TuiEvent,
    ui::render_ui,
};

/// Run the full-screen editor until the user quits.
pub async fn run_editor(cfg: &Config, session: EditorSession) -> Result<()> {
    // Check if we're in a proper terminal environment
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!("the editor requires a proper terminal environment"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = JudgeClient::from_config(cfg)?;
    let poll_interval = cfg.poll_interval();
    let mut app = App::new(session);

    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    // Invalidated on teardown so no scheduled poll fires afterwards.
    let cancel = CancellationToken::new();

    let result = run_app(
        &mut terminal,
        &mut app,
        client,
        poll_interval,
        event_tx,
        event_rx,
        &cancel,
    )
    .await;

    cancel.cancel();

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: JudgeClient,
    poll_interval: Duration,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
    cancel: &CancellationToken,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || {
        loop {
            // Poll for keyboard events
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if input_tx.send(TuiEvent::Key(key)).is_err() {
                        break; // Channel closed
                    }
                }
            }
        }
    });

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;
        app.tick(Instant::now());

        if let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &client, poll_interval, &event_tx, cancel) {
                        break; // Quit requested
                    }
                    app.sync_session();
                }
                TuiEvent::RunFinished(result) => {
                    app.session.finish_run(result);
                    app.notify(printer::success_notice());
                }
                TuiEvent::RunFailed(err) => {
                    app.session.fail_run();
                    app.notify(printer::error_notice(&err));
                }
            }
        }

        // Small delay to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(16)).await; // ~60 FPS
    }
    Ok(())
}

/// Handle one key event. Returns true when the user asked to quit.
fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    client: &JudgeClient,
    poll_interval: Duration,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
    cancel: &CancellationToken,
) -> bool {
    // Any key closes the help overlay
    if app.show_help {
        app.show_help = false;
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q') | KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
            return true;
        }
        (KeyCode::F(1), _) => app.toggle_help(),
        (KeyCode::F(2), _) => app.toggle_focus(),
        (KeyCode::F(3), _) => app.cycle_language(),
        (KeyCode::F(4), _) => app.cycle_theme(),
        // Ctrl+Enter: crossterm delivers the chord as Enter with the CONTROL
        // modifier concurrently held, same trigger as F5.
        (KeyCode::F(5), _) => trigger_run(app, client, poll_interval, event_tx, cancel),
        (KeyCode::Enter, m) if m.contains(KeyModifiers::CONTROL) => {
            trigger_run(app, client, poll_interval, event_tx, cancel)
        }
        (KeyCode::Enter, _) => app.focused_buffer().insert_newline(),
        (KeyCode::Tab, _) if app.focus == Focus::Code => app.code.insert_str("  "),
        (KeyCode::Backspace, _) => app.focused_buffer().backspace(),
        (KeyCode::Delete, _) => app.focused_buffer().delete(),
        (KeyCode::Left, _) => app.focused_buffer().move_left(),
        (KeyCode::Right, _) => app.focused_buffer().move_right(),
        (KeyCode::Up, _) => app.focused_buffer().move_up(),
        (KeyCode::Down, _) => app.focused_buffer().move_down(),
        (KeyCode::Home, _) => app.focused_buffer().move_home(),
        (KeyCode::End, _) => app.focused_buffer().move_end(),
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            app.focused_buffer().insert_char(c);
        }
        _ => {}
    }
    false
}

/// Submit the current session and poll it to completion in a background
/// task. A no-op while a submission is already in flight.
fn trigger_run(
    app: &mut App,
    client: &JudgeClient,
    poll_interval: Duration,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
    cancel: &CancellationToken,
) {
    app.sync_session();
    if !app.session.begin_run() {
        return;
    }

    let language_id = app.session.language.id;
    let code = app.session.code.clone();
    let stdin_text = app.session.stdin.clone();
    let client = client.clone();
    let tx = event_tx.clone();
    let cancel = cancel.child_token();

    tokio::spawn(async move {
        let token = match client.submit(language_id, &code, &stdin_text).await {
            Ok(token) => token,
            Err(err) => {
                let _ = tx.send(TuiEvent::RunFailed(err));
                return;
            }
        };
        let mut poller = client;
        match watch(&mut poller, &token, poll_interval, &cancel).await {
            Ok(Some(result)) => {
                let _ = tx.send(TuiEvent::RunFinished(result));
            }
            // Teardown: no event, no state mutation.
            Ok(None) => {}
            Err(err) => {
                let _ = tx.send(TuiEvent::RunFailed(err));
            }
        }
    });
}
