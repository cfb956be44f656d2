//! Maps presentation-neutral rich text to ratatui lines, with word
//! wrapping that preserves span styles across breaks.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markup::{Emphasis, RichText};

pub fn emphasis_style(emphasis: Emphasis) -> Style {
    match emphasis {
        Emphasis::Plain => Style::default(),
        Emphasis::Italic => Style::default().add_modifier(Modifier::ITALIC),
        Emphasis::Bold => Style::default().add_modifier(Modifier::BOLD),
        Emphasis::Positive => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Emphasis::Negative => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    }
}

/// Render rich text into wrapped lines, each prefixed with `indent`.
pub fn rich_to_lines(text: &RichText, width: usize, indent: &str) -> Vec<Line<'static>> {
    let mut out: Vec<Line<'static>> = Vec::new();
    let wrap_width = width.saturating_sub(indent.chars().count()).max(1);

    for rich_line in &text.lines {
        let spans: Vec<Span<'static>> = rich_line
            .iter()
            .map(|seg| Span::styled(seg.text.clone(), emphasis_style(seg.emphasis)))
            .collect();
        for wrapped in wrap_styled_line(Line::from(spans), wrap_width) {
            let mut spans = vec![Span::raw(indent.to_string())];
            spans.extend(wrapped.spans);
            out.push(Line::from(spans));
        }
    }

    out
}

/// Wrap a styled line at `width` columns, preserving span styles.
pub fn wrap_styled_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line];
    }

    let total_width: usize = line
        .spans
        .iter()
        .map(|s| s.content.chars().count())
        .sum();
    if total_width <= width {
        return vec![line];
    }

    // Flatten into (char, style) pairs.
    let mut chars: Vec<(char, Style)> = Vec::new();
    for span in &line.spans {
        for c in span.content.chars() {
            chars.push((c, span.style));
        }
    }

    let mut result: Vec<Line<'static>> = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if chars.len() - pos <= width {
            result.push(styled_chars_to_line(&chars[pos..]));
            break;
        }

        let chunk_end = pos + width;
        let break_at = if chars[chunk_end].0 == ' ' {
            chunk_end
        } else if let Some(sp) = chars[pos..chunk_end].iter().rposition(|(c, _)| *c == ' ') {
            if sp > 0 {
                pos + sp
            } else {
                chunk_end
            }
        } else {
            chunk_end
        };

        result.push(styled_chars_to_line(&chars[pos..break_at]));
        pos = break_at;
        if pos < chars.len() && chars[pos].0 == ' ' {
            pos += 1;
        }
    }

    if result.is_empty() {
        result.push(Line::from(""));
    }

    result
}

/// Rebuild a line from (char, style) pairs, grouping same-style runs.
fn styled_chars_to_line(chars: &[(char, Style)]) -> Line<'static> {
    if chars.is_empty() {
        return Line::from("");
    }

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current_text = String::new();
    let mut current_style = chars[0].1;

    for &(c, style) in chars {
        if style == current_style {
            current_text.push(c);
        } else {
            if !current_text.is_empty() {
                spans.push(Span::styled(current_text, current_style));
                current_text = String::new();
            }
            current_style = style;
            current_text.push(c);
        }
    }
    if !current_text.is_empty() {
        spans.push(Span::styled(current_text, current_style));
    }

    Line::from(spans)
}

/// Center a line within `width` columns by left padding.
pub fn center_line(line: Line<'static>, width: usize) -> Line<'static> {
    let line_width: usize = line
        .spans
        .iter()
        .map(|s| s.content.chars().count())
        .sum();
    let pad = width.saturating_sub(line_width) / 2;
    let mut spans = vec![Span::raw(" ".repeat(pad))];
    spans.extend(line.spans);
    Line::from(spans)
}

/// Word-wrap plain text at `width` columns.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        let word_len = word.chars().count();
        if current.is_empty() {
            current = word.to_string();
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            result.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}
