//! Restricted plain-text markup: emphasis, two highlight markers,
//! always-bold spans and literal newlines. Output is presentation-neutral
//! rich text; the rendering surface maps emphasis kinds to styles.

/// Emphasis kind of a rendered segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Italic,
    Bold,
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasis: Emphasis,
}

/// Rendered rich text: lines of styled segments. Segments carry plain text
/// only, so no markup from the data can reach the rendering surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    pub lines: Vec<Vec<Segment>>,
}

impl RichText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for seg in line {
                out.push_str(&seg.text);
            }
        }
        out
    }
}

/// `{{...}}` is bold in the correct-answer display and stripped to plain
/// text everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Explanation,
    CorrectAnswer,
}

/// Marker pairs in substitution order. `**` must precede `*`.
const MARKERS: [(&str, &str); 5] = [
    ("++", "++"),
    ("--", "--"),
    ("**", "**"),
    ("*", "*"),
    ("{{", "}}"),
];

fn marker_emphasis(marker: usize, mode: RenderMode) -> Emphasis {
    match marker {
        0 => Emphasis::Positive,
        1 => Emphasis::Negative,
        2 => Emphasis::Bold,
        3 => Emphasis::Italic,
        _ => match mode {
            RenderMode::CorrectAnswer => Emphasis::Bold,
            RenderMode::Explanation => Emphasis::Plain,
        },
    }
}

pub fn render(raw: &str, mode: RenderMode) -> RichText {
    if raw.is_empty() {
        return RichText::default();
    }
    let lines = raw.split('\n').map(|line| parse_line(line, mode)).collect();
    RichText { lines }
}

/// Find the leftmost marker span in `text`. Ties at the same position go to
/// the earlier marker in substitution order. Returns
/// (start, content_range, marker_index).
fn find_span(text: &str) -> Option<(usize, std::ops::Range<usize>, usize)> {
    let mut best: Option<(usize, std::ops::Range<usize>, usize)> = None;
    for (mi, &(open, close)) in MARKERS.iter().enumerate() {
        let mut search_from = 0;
        while let Some(rel) = text[search_from..].find(open) {
            let start = search_from + rel;
            let content_start = start + open.len();
            // Non-empty content followed by the closing marker.
            match text[content_start..].find(close) {
                Some(0) => {
                    // Empty span: not a match, keep scanning.
                    search_from = content_start;
                    continue;
                }
                Some(off) => {
                    let content = content_start..content_start + off;
                    let better = match &best {
                        Some((bs, _, _)) => start < *bs,
                        None => true,
                    };
                    if better {
                        best = Some((start, content, mi));
                    }
                    break;
                }
                None => break,
            }
        }
    }
    best
}

fn parse_line(line: &str, mode: RenderMode) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        match find_span(rest) {
            Some((start, content, marker)) => {
                if start > 0 {
                    push_segment(&mut segments, &rest[..start], Emphasis::Plain);
                }
                let emphasis = marker_emphasis(marker, mode);
                push_segment(&mut segments, &rest[content.clone()], emphasis);
                rest = &rest[content.end + MARKERS[marker].1.len()..];
            }
            None => {
                push_segment(&mut segments, rest, Emphasis::Plain);
                break;
            }
        }
    }

    segments
}

fn push_segment(segments: &mut Vec<Segment>, text: &str, emphasis: Emphasis) {
    if text.is_empty() {
        return;
    }
    // Merge adjacent same-emphasis runs so stripped {{...}} spans do not
    // fragment the surrounding plain text.
    if let Some(last) = segments.last_mut() {
        if last.emphasis == emphasis {
            last.text.push_str(text);
            return;
        }
    }
    segments.push(Segment {
        text: text.to_string(),
        emphasis,
    });
}

/// Sentence-terminal and closing punctuation, including the locale's
/// geresh/gershayim abbreviation marks.
const TERMINAL_PUNCTUATION: [char; 14] = [
    '.', '!', '?', '…', ',', ':', ';', '׃', '"', '\'', ')', ']', '\u{05F4}', '\u{05F3}',
];

const DELIMITERS: [&str; 6] = ["{{", "}}", "++", "--", "**", "*"];

/// Append a period to `text` unless its last *visible* character (markup
/// delimiters and trailing whitespace stripped) already terminates the
/// sentence. The returned text keeps its markup intact.
pub fn ensure_period(text: &str) -> String {
    let mut plain = text.to_string();
    for delim in DELIMITERS {
        plain = plain.replace(delim, "");
    }
    let plain = plain.trim_end();
    match plain.chars().last() {
        None => text.to_string(),
        Some(c) if TERMINAL_PUNCTUATION.contains(&c) => text.to_string(),
        Some(_) => format!("{}.", text),
    }
}
