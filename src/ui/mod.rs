//! ratatui front-end: terminal setup, the event loop, and input dispatch.

mod hit;
mod render;
mod theme;

pub use hit::{pointer_units, HitAction, HitRegistry, UNITS_PER_COLUMN};
pub use render::{draw, KNOB_COLS, MIN_PHONE_HEIGHT, PHONE_WIDTH};
pub use theme::{fade, Palette, PhoneTheme};

use crate::app::{PhoneApp, ANIMATION_FRAME, KEY_STEP};
use crate::log_debug;
use crate::terminal_restore::TerminalRestoreGuard;
use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Longest the loop sleeps waiting for input.
const MAX_POLL: Duration = Duration::from_millis(100);

/// Configure the terminal, run the drawing loop, and tear everything down.
pub fn run_app(app: &mut PhoneApp) -> Result<()> {
    let terminal_guard = TerminalRestoreGuard::new();
    let mut stdout = io::stdout();
    terminal_guard
        .enter_phone_mode(&mut stdout)
        .context("failed to prepare the terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app_loop(&mut terminal, app);

    drop(terminal);
    terminal_guard.restore();

    result
}

fn app_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut PhoneApp) -> Result<()> {
    let mut hits = HitRegistry::new();
    draw_frame(terminal, app, &mut hits)?;
    let mut last_draw = Instant::now();

    loop {
        let now = Instant::now();
        app.tick(now);
        let timeout = poll_timeout(app.next_deadline(), app.is_animating(), now);

        let mut should_quit = false;
        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    should_quit = handle_key_event(app, key, now);
                }
                Event::Mouse(mouse) => handle_mouse_event(app, &hits, mouse, now),
                Event::Resize(width, height) => {
                    log_debug(&format!("terminal resized to {width}x{height}"));
                    app.request_remeasure();
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }

        let frame_due = app.is_animating() && last_draw.elapsed() >= ANIMATION_FRAME;
        if app.take_redraw_request() || frame_due {
            draw_frame(terminal, app, &mut hits)?;
            last_draw = Instant::now();
        }
    }
    Ok(())
}

fn draw_frame<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut PhoneApp,
    hits: &mut HitRegistry,
) -> Result<()> {
    terminal.draw(|frame| draw(frame, app, hits, Instant::now()))?;
    app.layout_ready(&*hits, hits.has_track());
    Ok(())
}

/// Sleep until the nearest timer, capped so input never waits long.
fn poll_timeout(next_deadline: Option<Instant>, animating: bool, now: Instant) -> Duration {
    let mut timeout = MAX_POLL;
    if let Some(deadline) = next_deadline {
        timeout = timeout.min(deadline.saturating_duration_since(now));
    }
    if animating {
        timeout = timeout.min(ANIMATION_FRAME);
    }
    timeout
}

/// Apply a key press. Returns true when the app should exit.
fn handle_key_event(app: &mut PhoneApp, key: KeyEvent, now: Instant) -> bool {
    log_debug(&format!(
        "Key event: {:?} with modifiers: {:?}",
        key.code, key.modifiers
    ));

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return key.code == KeyCode::Char('c');
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('e') => app.hang_up(now),
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Char('s') => app.toggle_speaker(),
        KeyCode::Char('c') => app.copy_contract(now),
        KeyCode::Char('r') => app.restart(now),
        KeyCode::Char(ch @ '1'..='3') => {
            app.open_app(ch as usize - '1' as usize);
        }
        KeyCode::Right => app.nudge_knob(KEY_STEP),
        KeyCode::Left => app.nudge_knob(-KEY_STEP),
        KeyCode::Enter | KeyCode::Char(' ') => app.release_knob(now),
        _ => {}
    }
    false
}

/// Press, drag and release with the left button. A drag that wanders off
/// the slider counts as letting go.
fn handle_mouse_event(app: &mut PhoneApp, hits: &HitRegistry, mouse: MouseEvent, now: Instant) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hits.find_at(x, y) {
            Some(HitAction::Knob) => app.grab_knob(pointer_units(x)),
            Some(HitAction::Mute) => app.toggle_mute(),
            Some(HitAction::Speaker) => app.toggle_speaker(),
            Some(HitAction::EndCall) => app.hang_up(now),
            Some(HitAction::CopyContract) => app.copy_contract(now),
            Some(HitAction::OpenApp(index)) => {
                app.open_app(index);
            }
            None => {}
        },
        MouseEventKind::Drag(MouseButton::Left) if app.is_dragging() => {
            if hits.in_slider(x, y) {
                app.drag_knob(pointer_units(x));
            } else {
                app.release_knob(now);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.release_knob(now),
        _ => {}
    }
}
