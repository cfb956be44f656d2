use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Rect;
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::loader;
use crate::sched::{self, Scheduler, Task};
use crate::scroll::{Geometry, ScrollAffordances, Trigger};
use crate::session::{Dialog, Phase, Screen, SessionState, SubmitOutcome};
use crate::ui;

/// Probe result for a question's image, delivered from a background
/// thread.
#[derive(Debug, Clone, Copy)]
pub enum ImageStatus {
    Loading,
    Loaded(u64),
    Missing,
}

#[derive(Debug)]
pub struct ImageEvent {
    pub index: usize,
    pub result: Option<u64>,
}

pub struct App {
    pub session: SessionState,
    pub affordances: ScrollAffordances,
    pub scheduler: Scheduler,
    pub base_dir: PathBuf,
    pub images: HashMap<usize, ImageStatus>,
    /// Content geometry from the most recent measurement pass.
    pub geometry: Geometry,
    image_tx: mpsc::Sender<ImageEvent>,
}

impl App {
    fn new(session: SessionState, base_dir: PathBuf, image_tx: mpsc::Sender<ImageEvent>) -> Self {
        Self {
            session,
            affordances: ScrollAffordances::new(),
            scheduler: Scheduler::new(),
            base_dir,
            images: HashMap::new(),
            geometry: Geometry::default(),
            image_tx,
        }
    }

    /// Full per-screen setup: cancel everything the previous screen
    /// scheduled, re-arm the affordances, schedule the settle re-checks and
    /// kick off the image probe where one applies.
    pub fn screen_built(&mut self, now: Instant) {
        self.scheduler.cancel_all();
        self.affordances.rearm();
        self.scheduler
            .schedule_in(now, sched::SETTLE_CHECK_EARLY, Task::AffordanceCheck);
        self.scheduler
            .schedule_in(now, sched::SETTLE_CHECK_LATE, Task::AffordanceCheck);
        self.spawn_image_probe(now);
    }

    /// The image slot only exists while selecting; the feedback swap hides
    /// it. A locator probed earlier in the session re-checks immediately,
    /// the way an already-complete image must not be missed.
    fn spawn_image_probe(&mut self, now: Instant) {
        if self.session.screen != Screen::Question || self.session.phase != Phase::Selecting {
            return;
        }
        let question = self.session.current_question();
        if !question.has_image() {
            return;
        }
        let index = self.session.current;
        if self.images.contains_key(&index) {
            self.scheduler
                .schedule_in(now, Duration::ZERO, Task::ImageRecheck);
            return;
        }

        self.images.insert(index, ImageStatus::Loading);
        let locator = question.image.clone().unwrap_or_default();
        let path = loader::resolve_image(&self.base_dir, &locator);
        let tx = self.image_tx.clone();
        thread::spawn(move || {
            let result = std::fs::metadata(&path).ok().map(|m| m.len());
            let _ = tx.send(ImageEvent { index, result });
        });
    }
}

pub fn run_tui(session: SessionState, base_dir: PathBuf) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let (image_tx, image_rx) = mpsc::channel::<ImageEvent>();
    let mut app = App::new(session, base_dir, image_tx);
    app.screen_built(Instant::now());

    let result = main_loop(&mut terminal, &mut app, &image_rx);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    image_rx: &mpsc::Receiver<ImageEvent>,
) -> Result<(), String> {
    loop {
        let now = Instant::now();
        for task in app.scheduler.pop_due(now) {
            handle_task(task, app, now);
        }

        app.session.tick_progress();

        // One coalesced measurement + affordance recompute per iteration.
        let size = terminal.size().map_err(|e| format!("Size error: {}", e))?;
        let area = Rect::new(0, 0, size.width, size.height);
        let layout = ui::layout::compute_layout(area);
        let geometry = ui::measure_content(app, layout.content);
        let max_scroll = geometry
            .content_rows
            .saturating_sub(geometry.viewport_rows);
        if app.session.view_scroll > max_scroll {
            app.session.view_scroll = max_scroll;
            app.affordances.mark_dirty(Trigger::Scroll);
        }
        app.geometry = Geometry {
            scroll_offset: app.session.view_scroll,
            ..geometry
        };
        let geometry = app.geometry;
        app.affordances.recompute(&geometry);

        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| format!("Draw error: {}", e))?;

        if app.session.should_quit {
            break;
        }

        // Wake early for a pending deadline so staged transitions fire on
        // time instead of at the next poll tick.
        let timeout = app
            .scheduler
            .next_deadline()
            .and_then(|at| at.checked_duration_since(Instant::now()))
            .map(|d| d.min(Duration::from_millis(100)))
            .unwrap_or(Duration::from_millis(100));

        if event::poll(timeout).map_err(|e| format!("Poll error: {}", e))? {
            match event::read().map_err(|e| format!("Read error: {}", e))? {
                Event::Key(key) => handle_key(key, app),
                Event::Mouse(mouse) => {
                    let size = terminal.size().unwrap_or_default();
                    let area = Rect::new(0, 0, size.width, size.height);
                    handle_mouse(mouse, app, area);
                }
                Event::Resize(_, _) => {
                    app.affordances.mark_dirty(Trigger::Resize);
                    // The viewport is still settling; check again shortly.
                    app.scheduler.cancel(Task::ResizeSettle);
                    app.scheduler
                        .schedule_in(Instant::now(), sched::RESIZE_SETTLE, Task::ResizeSettle);
                }
                _ => {}
            }
        }

        while let Ok(ev) = image_rx.try_recv() {
            handle_image_event(ev, app);
        }
    }

    Ok(())
}

fn handle_task(task: Task, app: &mut App, now: Instant) {
    match task {
        Task::SwapFeedback => {
            app.session.swap_feedback();
            app.affordances.mark_dirty(Trigger::ScreenBuilt);
            app.scheduler
                .schedule_in(now, sched::FEEDBACK_SETTLE, Task::FeedbackSettle);
        }
        Task::FeedbackSettle => {
            app.session.feedback_settled();
            // Listeners were torn down and the geometry changed: re-run the
            // full screen setup.
            app.screen_built(now);
        }
        Task::AffordanceCheck => {
            app.affordances.mark_dirty(Trigger::SettleCheck);
        }
        Task::ResizeSettle => {
            app.affordances.mark_dirty(Trigger::Resize);
        }
        Task::ImageRecheck => {
            app.affordances.mark_dirty(Trigger::ImageLoaded);
        }
    }
}

fn handle_image_event(ev: ImageEvent, app: &mut App) {
    let status = match ev.result {
        Some(bytes) => ImageStatus::Loaded(bytes),
        None => ImageStatus::Missing,
    };
    app.images.insert(ev.index, status);
    // Only the current screen's layout is affected by this probe.
    if app.session.screen == Screen::Question && app.session.current == ev.index {
        app.affordances.mark_dirty(Trigger::ImageLoaded);
    }
}

fn handle_key(key: KeyEvent, app: &mut App) {
    let now = Instant::now();

    if app.session.dialog.is_some() {
        handle_dialog_key(key, app, now);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match app.session.screen {
        Screen::Opening => match key.code {
            KeyCode::Enter => {
                app.session.start();
                app.screen_built(now);
            }
            KeyCode::Char('q') if ctrl => {
                app.session.should_quit = true;
            }
            KeyCode::Tab => activate_hint(app),
            _ => {}
        },
        Screen::Question => handle_question_key(key, app, now),
        Screen::Final => {
            if key.code == KeyCode::Enter {
                app.session.should_quit = true;
            }
        }
    }
}

fn handle_question_key(key: KeyEvent, app: &mut App, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app.session.phase {
        Phase::Selecting => handle_selecting_key(key, app, now),
        // The staged transition ignores input until it settles.
        Phase::FadingOut | Phase::Feedback { settled: false } => {}
        Phase::Feedback { settled: true } => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.session.next();
                app.screen_built(now);
            }
            KeyCode::Char('q') if ctrl => {
                app.session.dialog = Some(Dialog::ConfirmQuit);
            }
            KeyCode::Tab => activate_hint(app),
            _ => handle_view_scroll_key(key, app),
        },
    }
}

fn handle_selecting_key(key: KeyEvent, app: &mut App, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') if ctrl => {
            app.session.dialog = Some(Dialog::ConfirmQuit);
        }
        KeyCode::Char('l') if ctrl => {
            if app.session.offers_clear() {
                app.session.clear_selections();
            }
        }
        KeyCode::Char(' ') => {
            let cursor = app.session.cursor;
            app.session.toggle_answer(cursor);
        }
        KeyCode::Char(c) if c.is_ascii_lowercase() && !ctrl => {
            let idx = (c as u8 - b'a') as usize;
            if idx < app.session.current_question().answers.len() {
                app.session.cursor = idx;
                app.session.toggle_answer(idx);
            }
        }
        KeyCode::Up => app.session.move_cursor_up(),
        KeyCode::Down => app.session.move_cursor_down(),
        KeyCode::Enter => submit(app, now),
        KeyCode::Tab => activate_hint(app),
        _ => handle_view_scroll_key(key, app),
    }
}

fn handle_view_scroll_key(key: KeyEvent, app: &mut App) {
    let page = app.geometry.viewport_rows.max(1);
    match key.code {
        KeyCode::PageUp => scroll_view_by(app, -(page as isize)),
        KeyCode::PageDown => scroll_view_by(app, page as isize),
        KeyCode::Home => {
            app.session.view_scroll = 0;
            app.affordances.mark_dirty(Trigger::Scroll);
        }
        KeyCode::End => {
            app.session.view_scroll = usize::MAX / 2; // clamped on next measure
            app.affordances.mark_dirty(Trigger::Scroll);
        }
        _ => {}
    }
}

fn scroll_view_by(app: &mut App, delta: isize) {
    let current = app.session.view_scroll as isize;
    app.session.view_scroll = (current + delta).max(0) as usize;
    app.affordances.mark_dirty(Trigger::Scroll);
}

/// Clicking the hint nudges the view by roughly 70% of one viewport
/// height.
fn activate_hint(app: &mut App) {
    if !app.affordances.hint_visible() {
        return;
    }
    let nudge = ScrollAffordances::nudge(app.geometry.viewport_rows);
    scroll_view_by(app, nudge as isize);
}

fn submit(app: &mut App, now: Instant) {
    if let SubmitOutcome::Graded = app.session.request_submit() {
        app.scheduler
            .schedule_in(now, sched::FADE_OUT, Task::SwapFeedback);
    }
}

fn handle_dialog_key(key: KeyEvent, app: &mut App, now: Instant) {
    match app.session.dialog {
        Some(Dialog::ConfirmSingle) => match key.code {
            KeyCode::Enter => {
                if let SubmitOutcome::Graded = app.session.confirm_single_submit() {
                    app.scheduler
                        .schedule_in(now, sched::FADE_OUT, Task::SwapFeedback);
                }
            }
            KeyCode::Esc => {
                app.session.cancel_dialog();
            }
            _ => {}
        },
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                app.session.should_quit = true;
            }
            KeyCode::Esc => {
                app.session.cancel_dialog();
            }
            _ => {}
        },
        None => {}
    }
}

fn handle_mouse(mouse: MouseEvent, app: &mut App, area: Rect) {
    if app.session.dialog.is_some() {
        return;
    }

    let layout = ui::layout::compute_layout(area);
    let content = layout.content;
    let inside = mouse.column >= content.x
        && mouse.column < content.x + content.width
        && mouse.row >= content.y
        && mouse.row < content.y + content.height;

    match mouse.kind {
        MouseEventKind::ScrollUp if inside => scroll_view_by(app, -2),
        MouseEventKind::ScrollDown if inside => scroll_view_by(app, 2),
        MouseEventKind::Down(MouseButton::Left) if inside => {
            let now = Instant::now();
            match ui::hit_test(app, content, mouse.column, mouse.row) {
                Some(ui::HitTarget::Option(idx)) => {
                    app.session.cursor = idx;
                    app.session.toggle_answer(idx);
                }
                Some(ui::HitTarget::Button) => press_primary_button(app, now),
                Some(ui::HitTarget::Hint) => activate_hint(app),
                None => {}
            }
        }
        _ => {}
    }
}

/// The primary action button: start, confirm, or next, depending on state.
fn press_primary_button(app: &mut App, now: Instant) {
    match app.session.screen {
        Screen::Opening => {
            app.session.start();
            app.screen_built(now);
        }
        Screen::Question => match app.session.phase {
            Phase::Selecting => submit(app, now),
            Phase::Feedback { settled: true } => {
                app.session.next();
                app.screen_built(now);
            }
            _ => {}
        },
        Screen::Final => {
            app.session.should_quit = true;
        }
    }
}
