pub mod dialog;
pub mod finale;
pub mod keybar;
pub mod layout;
pub mod opening;
pub mod question;
pub mod richtext;
pub mod titlebar;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::scroll::Geometry;
use crate::session::{Phase, Screen};
use crate::tui::App;

/// Maps content lines to clickable regions for mouse handling.
#[derive(Debug, Default)]
pub struct HitMap {
    /// (first_line, end_line_exclusive, option_index) per answer option.
    pub option_rows: Vec<(usize, usize, usize)>,
    /// Content line of the primary action button, in inline flow.
    pub button_line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Option(usize),
    Button,
    Hint,
}

/// Build the current screen's content lines. The action button is always
/// counted in normal flow here; stickiness only changes presentation, so
/// the affordance decision cannot feed back into its own input.
pub fn content_lines(app: &App, width: u16) -> (Vec<Line<'static>>, HitMap) {
    match app.session.screen {
        Screen::Opening => opening::build(app, width),
        Screen::Question => match app.session.phase {
            Phase::Selecting | Phase::FadingOut => question::build_selecting(app, width),
            Phase::Feedback { .. } => question::build_feedback(app, width),
        },
        Screen::Final => finale::build(app, width),
    }
}

pub fn measure_content(app: &App, content: Rect) -> Geometry {
    let (lines, _) = content_lines(app, content.width);
    Geometry {
        content_rows: lines.len(),
        viewport_rows: content.height as usize,
        scroll_offset: app.session.view_scroll,
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, app);
    draw_content(f, layout.content, app);
    keybar::draw_keybar(f, layout.keybar, app);

    if app.session.dialog.is_some() {
        dialog::draw_dialog(f, area, app);
    }
}

/// The sticky decision applies to the question screen's confirm/next
/// button only; opening and final buttons stay in normal flow.
fn sticky_active(app: &App) -> bool {
    app.session.screen == Screen::Question && app.affordances.is_sticky()
}

fn draw_content(f: &mut Frame, area: Rect, app: &App) {
    let (mut lines, map) = content_lines(app, area.width);

    // Pull the button out of flow when pinned.
    let mut pinned: Option<Line<'static>> = None;
    if sticky_active(app) {
        if let Some(idx) = map.button_line {
            if idx < lines.len() {
                pinned = Some(lines.remove(idx));
            }
        }
    }

    let (view_area, bar_area) = if pinned.is_some() {
        (
            Rect {
                height: area.height.saturating_sub(1),
                ..area
            },
            Some(Rect {
                y: area.y + area.height.saturating_sub(1),
                height: 1,
                ..area
            }),
        )
    } else {
        (area, None)
    };

    let total = lines.len();
    let visible = view_area.height as usize;
    let scroll = app.session.view_scroll.min(total.saturating_sub(visible));
    let display: Vec<Line> = lines.into_iter().skip(scroll).collect();

    let mut widget = Paragraph::new(display);
    if app.session.screen == Screen::Question && app.session.phase == Phase::FadingOut {
        widget = widget.style(Style::default().add_modifier(Modifier::DIM));
    }
    f.render_widget(widget, view_area);

    if total > visible {
        let mut scrollbar_state = ScrollbarState::new(total)
            .position(scroll)
            .viewport_content_length(visible);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, view_area, &mut scrollbar_state);
    }

    if let (Some(bar), Some(line)) = (bar_area, pinned) {
        f.render_widget(Paragraph::new(line), bar);
    }

    if app.affordances.hint_visible() {
        let rect = hint_rect(view_area);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(Span::styled(
                "▼ more",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            rect,
        );
    }
}

fn hint_rect(view_area: Rect) -> Rect {
    let width = 8u16.min(view_area.width);
    Rect {
        x: view_area.x + view_area.width.saturating_sub(width),
        y: view_area.y + view_area.height.saturating_sub(1),
        width,
        height: 1,
    }
}

/// Resolve a click inside the content region, mirroring draw_content's
/// layout.
pub fn hit_test(app: &App, content: Rect, x: u16, y: u16) -> Option<HitTarget> {
    let (lines, map) = content_lines(app, content.width);
    let sticky = sticky_active(app) && map.button_line.is_some();

    let view_height = if sticky {
        content.height.saturating_sub(1)
    } else {
        content.height
    };
    let view_area = Rect {
        height: view_height,
        ..content
    };

    if app.affordances.hint_visible() {
        let hr = hint_rect(view_area);
        if y == hr.y && x >= hr.x {
            return Some(HitTarget::Hint);
        }
    }

    if sticky && y == content.y + content.height.saturating_sub(1) {
        return Some(HitTarget::Button);
    }

    let rel = y.saturating_sub(content.y) as usize;
    if rel >= view_height as usize {
        return None;
    }

    let total = lines.len().saturating_sub(if sticky { 1 } else { 0 });
    let visible = view_height as usize;
    let scroll = app.session.view_scroll.min(total.saturating_sub(visible));
    let displayed = rel + scroll;

    // When the button was pulled out of flow, displayed indices at or past
    // it map one line later in the built content.
    let content_idx = match (sticky, map.button_line) {
        (true, Some(b)) if displayed >= b => displayed + 1,
        _ => displayed,
    };

    if !sticky && Some(content_idx) == map.button_line {
        return Some(HitTarget::Button);
    }
    for (start, end, option) in &map.option_rows {
        if content_idx >= *start && content_idx < *end {
            return Some(HitTarget::Option(*option));
        }
    }
    None
}
