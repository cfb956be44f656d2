use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markup::{self, RenderMode};
use crate::tui::App;
use crate::ui::richtext;
use crate::ui::HitMap;

pub fn build(app: &App, width: u16) -> (Vec<Line<'static>>, HitMap) {
    let s = &app.session;
    let w = width as usize;
    let mut lines: Vec<Line<'static>> = vec![Line::from(""), Line::from("")];
    let map = HitMap::default();

    let Some(view) = &s.final_view else {
        return (lines, map);
    };

    if let Some(title) = &view.title {
        let rich = markup::render(title, RenderMode::Explanation);
        for mut line in richtext::rich_to_lines(&rich, w.saturating_sub(4), "") {
            for span in &mut line.spans {
                span.style = span.style.add_modifier(Modifier::BOLD);
            }
            lines.push(richtext::center_line(line, w));
        }
        lines.push(Line::from(""));
    }

    let score = markup::render(&view.score_line, RenderMode::Explanation);
    for line in richtext::rich_to_lines(&score, w.saturating_sub(4), "") {
        lines.push(richtext::center_line(line, w));
    }

    lines.push(richtext::center_line(
        Line::from(Span::styled(
            format!("{}%", view.percentage),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        w,
    ));
    lines.push(Line::from(""));

    let evaluation = markup::render(&view.evaluation, RenderMode::Explanation);
    for line in richtext::rich_to_lines(&evaluation, w.saturating_sub(4), "") {
        lines.push(richtext::center_line(line, w));
    }

    lines.push(Line::from(""));
    lines.push(richtext::center_line(
        Line::from(Span::styled(
            "[Enter] Exit",
            Style::default().fg(Color::DarkGray),
        )),
        w,
    ));

    (lines, map)
}
