use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::{Phase, Screen};
use crate::tui::App;

pub fn draw_keybar(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.session;

    let mut bindings: Vec<(&str, &str)> = if s.dialog.is_some() {
        vec![("Enter", "confirm"), ("Esc", "cancel")]
    } else {
        match s.screen {
            Screen::Opening => vec![("Enter", "start"), ("Ctrl+Q", "quit")],
            Screen::Question => match s.phase {
                Phase::Selecting => {
                    let mut b = vec![
                        ("a-z", "answer"),
                        ("↑/↓", "cursor"),
                        ("Space", "select"),
                        ("Enter", "submit"),
                    ];
                    if s.offers_clear() {
                        b.push(("Ctrl+L", "clear"));
                    }
                    b.push(("PgUp/PgDn", "scroll"));
                    b.push(("Ctrl+Q", "quit"));
                    b
                }
                Phase::FadingOut | Phase::Feedback { settled: false } => vec![],
                Phase::Feedback { settled: true } => {
                    let next = if s.is_last_question() {
                        "see result"
                    } else {
                        "next"
                    };
                    vec![
                        ("Enter", next),
                        ("PgUp/PgDn", "scroll"),
                        ("Ctrl+Q", "quit"),
                    ]
                }
            },
            Screen::Final => vec![("Enter", "exit")],
        }
    };

    if app.affordances.hint_visible() {
        bindings.push(("Tab", "more below"));
    }

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
