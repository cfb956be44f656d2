use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markup::{self, RenderMode};
use crate::tui::App;
use crate::ui::question::button_line;
use crate::ui::richtext;
use crate::ui::HitMap;

pub fn build(app: &App, width: u16) -> (Vec<Line<'static>>, HitMap) {
    let s = &app.session;
    let w = width as usize;
    let mut lines: Vec<Line<'static>> = vec![Line::from(""), Line::from("")];
    let mut map = HitMap::default();

    let title = markup::render(&s.quiz.series_title, RenderMode::Explanation);
    for mut line in richtext::rich_to_lines(&title, w.saturating_sub(4), "") {
        for span in &mut line.spans {
            span.style = span.style.add_modifier(Modifier::BOLD);
        }
        lines.push(richtext::center_line(line, w));
    }

    lines.push(richtext::center_line(
        Line::from(Span::styled(
            s.quiz_line(),
            Style::default().fg(Color::DarkGray),
        )),
        w,
    ));

    if let Some(quiz_title) = &s.quiz.quiz_title {
        let rich = markup::render(quiz_title, RenderMode::Explanation);
        for mut line in richtext::rich_to_lines(&rich, w.saturating_sub(4), "") {
            for span in &mut line.spans {
                span.style = span.style.add_modifier(Modifier::ITALIC);
            }
            lines.push(richtext::center_line(line, w));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));

    map.button_line = Some(lines.len());
    lines.push(button_line(&s.texts.interface.start_button, true, w));

    (lines, map)
}
