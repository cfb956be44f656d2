use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markup::{self, RenderMode};
use crate::tui::{App, ImageStatus};
use crate::ui::richtext;
use crate::ui::HitMap;

/// Content lines for the selection phase (also shown, dimmed, while the
/// screen fades out).
pub fn build_selecting(app: &App, width: u16) -> (Vec<Line<'static>>, HitMap) {
    let s = &app.session;
    let q = s.current_question();
    let w = width as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut map = HitMap::default();

    push_progress(&mut lines, app, w);

    if q.has_image() {
        lines.push(image_line(app));
        lines.push(Line::from(""));
    }

    push_prompt(&mut lines, app, w);

    if q.is_multiple() {
        lines.push(Line::from(Span::styled(
            format!("  {}", s.texts.interface.multi_notice),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    for (i, answer) in q.answers.iter().enumerate() {
        let selected = s.selected.contains(&i);
        let marker = if q.is_multiple() {
            if selected {
                "[x]"
            } else {
                "[ ]"
            }
        } else if selected {
            "(●)"
        } else {
            "( )"
        };
        let cursor = if s.cursor == i { "▸" } else { " " };
        let letter = (b'a' + i as u8) as char;
        let prefix = format!(" {} {} {}. ", cursor, marker, letter);
        let prefix_style = if selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };

        let rich = markup::render(&answer.text, RenderMode::Explanation);
        let indent = " ".repeat(prefix.chars().count());
        let mut rendered = richtext::rich_to_lines(&rich, w, &indent);
        if selected {
            for line in &mut rendered {
                for span in &mut line.spans {
                    span.style = span.style.fg(Color::Green);
                }
            }
        }
        if let Some(first) = rendered.first_mut() {
            first.spans[0] = Span::styled(prefix.clone(), prefix_style);
        } else {
            rendered.push(Line::from(Span::styled(prefix.clone(), prefix_style)));
        }

        let start = lines.len();
        lines.extend(rendered);
        map.option_rows.push((start, lines.len(), i));
    }

    lines.push(Line::from(""));

    if s.offers_clear() {
        lines.push(Line::from(Span::styled(
            format!("  [Ctrl+L] {}", s.texts.interface.clear_button),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    map.button_line = Some(lines.len());
    lines.push(button_line(&s.texts.interface.confirm_button, s.can_submit(), w));

    (lines, map)
}

/// Content lines for the feedback phase: result banner, correct answers
/// with terminal punctuation, the explanation if present, and the
/// next/see-result control.
pub fn build_feedback(app: &App, width: u16) -> (Vec<Line<'static>>, HitMap) {
    let s = &app.session;
    let w = width as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut map = HitMap::default();

    push_progress(&mut lines, app, w);

    let Some(fb) = &s.feedback else {
        return (lines, map);
    };

    let banner_style = if fb.positive {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let banner = markup::render(&fb.banner, RenderMode::Explanation);
    let symbol = if fb.positive { "✔ " } else { "" };
    for (i, mut line) in richtext::rich_to_lines(&banner, w, "  ").into_iter().enumerate() {
        for span in &mut line.spans {
            span.style = span.style.patch(banner_style);
        }
        if i == 0 && !symbol.is_empty() {
            line.spans
                .insert(1, Span::styled(symbol.to_string(), banner_style));
        }
        lines.push(line);
    }
    lines.push(Line::from(""));

    let label = if fb.correct_answers.len() == 1 {
        &s.texts.interface.correct_label_one
    } else {
        &s.texts.interface.correct_label_many
    };
    lines.push(Line::from(Span::styled(
        format!("  {}", label),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )));
    for answer in &fb.correct_answers {
        let rich = markup::render(answer, RenderMode::CorrectAnswer);
        lines.extend(richtext::rich_to_lines(&rich, w, "    "));
    }

    if let Some(explanation) = &fb.explanation {
        lines.push(Line::from(""));
        let rich = markup::render(explanation, RenderMode::Explanation);
        lines.extend(richtext::rich_to_lines(&rich, w, "  "));
    }

    lines.push(Line::from(""));
    map.button_line = Some(lines.len());
    lines.push(button_line(&fb.next_label, true, w));

    (lines, map)
}

fn push_progress(lines: &mut Vec<Line<'static>>, app: &App, width: usize) {
    let s = &app.session;
    lines.push(Line::from(Span::styled(
        format!("  {}", s.progress_text()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(progress_bar_line(s.progress_pct, width));
    lines.push(Line::from(""));
}

fn push_prompt(lines: &mut Vec<Line<'static>>, app: &App, width: usize) {
    let s = &app.session;
    let q = s.current_question();

    let prefix = format!("  {}. ", s.current + 1);
    let indent = " ".repeat(prefix.chars().count());
    let rich = markup::render(&q.text, RenderMode::Explanation);
    let mut rendered = richtext::rich_to_lines(&rich, width, &indent);
    if let Some(first) = rendered.first_mut() {
        first.spans[0] = Span::styled(
            prefix,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    }
    lines.extend(rendered);
    lines.push(Line::from(""));
}

fn progress_bar_line(pct: f32, width: usize) -> Line<'static> {
    let bar_width = width.saturating_sub(4).max(10);
    let filled = ((pct / 100.0) * bar_width as f32).round() as usize;
    let filled = filled.min(bar_width);
    Line::from(vec![
        Span::raw("  "),
        Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn image_line(app: &App) -> Line<'static> {
    let s = &app.session;
    let name = s.current_question().image.as_deref().unwrap_or("");
    let text = match app.images.get(&s.current) {
        Some(ImageStatus::Loaded(bytes)) => {
            format!("  ▣ {} ({} KB)", name, (bytes / 1024).max(1))
        }
        Some(ImageStatus::Missing) => format!("  ▣ {} (unavailable)", name),
        _ => format!("  ▣ {} (loading...)", name),
    };
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
}

/// The primary action button, centered. Shared by every screen.
pub fn button_line(label: &str, enabled: bool, width: usize) -> Line<'static> {
    let label = markup::render(label, RenderMode::Explanation).plain_text();
    let text = format!("[ {} ]", label);
    let style = if enabled {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .bg(Color::Rgb(50, 50, 50))
    };
    let pad = width.saturating_sub(text.chars().count()) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(text, style),
    ])
}
