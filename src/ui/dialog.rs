use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::session::Dialog;
use crate::tui::App;
use crate::ui::richtext;

pub fn draw_dialog(f: &mut Frame, area: Rect, app: &App) {
    match app.session.dialog {
        Some(Dialog::ConfirmSingle) => draw_confirm_single(f, area, app),
        Some(Dialog::ConfirmQuit) => draw_confirm_quit(f, area),
        None => {}
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_confirm_single(f: &mut Frame, area: Rect, app: &App) {
    let ui = &app.session.texts.interface;

    let mut lines: Vec<Line> = vec![Line::from("")];
    for wrapped in richtext::wrap_text(&ui.confirm_single_message, 40) {
        lines.push(Line::from(Span::styled(
            format!("   {}", wrapped),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("   [Enter] {}", ui.confirm_single_yes),
            Style::default().fg(Color::Green),
        ),
        Span::raw("    "),
        Span::styled(
            format!("[Esc] {}", ui.confirm_single_back),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(""));

    let rect = centered_rect(48, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}

fn draw_confirm_quit(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Quit?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   Progress will be lost."),
        Line::from(""),
        Line::from(vec![
            Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
            Span::raw("    "),
            Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    let rect = centered_rect(38, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}
