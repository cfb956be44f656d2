use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::App;

pub fn draw_titlebar(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("[ {} ]", app.session.full_title());
    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}
