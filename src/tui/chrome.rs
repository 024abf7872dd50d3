// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

/// Pane title, footer, filter, and minimap helpers used by TUI rendering.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Prompt,
    Canvas,
    Queries,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Prompt => Self::Canvas,
            Self::Canvas => Self::Queries,
            Self::Queries => Self::Prompt,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Prompt => Self::Queries,
            Self::Canvas => Self::Prompt,
            Self::Queries => Self::Canvas,
        }
    }
}

fn panel_border_style_for_focus(active: Focus, panel: Focus) -> Style {
    if active != panel {
        return Style::default();
    }
    Style::default().fg(FOCUS_COLOR)
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn clamp_positive_i32_to_u16(value: i32) -> u16 {
    value.max(0).min(u16::MAX as i32) as u16
}

fn pad_text(mut text: Text<'static>, left_pad: usize, top_pad: usize) -> Text<'static> {
    if left_pad == 0 && top_pad == 0 {
        return text;
    }

    if left_pad > 0 {
        let pad = " ".repeat(left_pad);
        for line in &mut text.lines {
            line.spans.insert(0, Span::raw(pad.clone()));
        }
    }

    if top_pad > 0 {
        let mut lines = Vec::with_capacity(top_pad + text.lines.len());
        for _ in 0..top_pad {
            lines.push(Line::from(String::new()));
        }
        lines.extend(text.lines);
        text.lines = lines;
    }

    text
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, key: &str) {
    spans.push(Span::styled(format!("{label} "), Style::default().fg(FOOTER_LABEL_COLOR)));
    spans.push(Span::styled(
        format!("{key}  "),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match app.focus {
        Focus::Prompt => {
            push_footer_entry(&mut spans, "SEND", "Enter");
            push_footer_entry(&mut spans, "CLEAR", "Esc");
        }
        Focus::Canvas => {
            let minimap = if app.minimap_visible { "m◼" } else { "m◻" };
            push_footer_entry(&mut spans, "PAN", "hjkl");
            push_footer_entry(&mut spans, "FIT", "c");
            push_footer_entry(&mut spans, "NODE", "n/N");
            push_footer_entry(&mut spans, "NUDGE", "⇧arrows");
            push_footer_entry(&mut spans, "MAP", minimap);
        }
        Focus::Queries => {
            push_footer_entry(&mut spans, "REPLAY", "Enter");
            push_footer_entry(&mut spans, "FILTER", "/");
            push_footer_entry(&mut spans, "MOVE", "j/k");
        }
    }

    let output = if app.shell.output_visible() { "o◼" } else { "o◻" };
    push_footer_entry(&mut spans, "OUTPUT", output);
    push_footer_entry(&mut spans, "FOCUS", "Tab");
    push_footer_entry(&mut spans, "QUIT", "q");

    append_toast(&mut spans, toast_suffix);
    Line::from(spans)
}

fn filter_footer_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            "/".to_owned(),
            Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::raw(app.filter_query.clone()),
        Span::raw("   ".to_owned()),
        Span::styled(
            format!("{}/{}", app.visible_query_indices.len(), app.shell.cache().len()),
            Style::default().fg(Color::LightGreen),
        ),
        Span::raw("  ".to_owned()),
    ];
    push_footer_entry(&mut spans, "ACCEPT", "Enter");
    push_footer_entry(&mut spans, "CLOSE", "Esc");

    append_toast(&mut spans, toast_suffix);
    Line::from(spans)
}

fn append_toast(spans: &mut Vec<Span<'static>>, toast_suffix: &str) {
    let message = toast_suffix.strip_prefix(" | ").unwrap_or(toast_suffix).trim();
    if message.is_empty() {
        return;
    }
    spans.push(Span::styled("| ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    spans.push(Span::raw(message.to_owned()));
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

/// Score a cached prompt against the sidebar filter. `None` means the entry
/// is filtered out.
fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let haystack = haystack.to_lowercase();

    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    let mut score = (ratio * 10.0).round() as i64;
    if haystack.contains(&needle) {
        score += 1000;
    } else if ratio < 45.0 {
        return None;
    }

    Some(score)
}

/// Scales the layout onto a small character map: node boxes become `▪`, the
/// current viewport is shaded with `░`.
fn minimap_rows(
    layout: &FlowchartLayout,
    pan_x: i32,
    pan_y: i32,
    viewport_width: usize,
    viewport_height: usize,
    map_width: usize,
    map_height: usize,
) -> Vec<String> {
    if map_width == 0 || map_height == 0 {
        return Vec::new();
    }

    let scale_x = layout.width().div_ceil(map_width).max(1);
    let scale_y = layout.height().div_ceil(map_height).max(1);

    let mut cells = vec![vec![' '; map_width]; map_height];

    let vx0 = (pan_x.max(0) as usize) / scale_x;
    let vy0 = (pan_y.max(0) as usize) / scale_y;
    let vx1 = ((pan_x.max(0) as usize + viewport_width.saturating_sub(1)) / scale_x)
        .min(map_width.saturating_sub(1));
    let vy1 = ((pan_y.max(0) as usize + viewport_height.saturating_sub(1)) / scale_y)
        .min(map_height.saturating_sub(1));
    for row in cells.iter_mut().take(vy1 + 1).skip(vy0) {
        for cell in row.iter_mut().take(vx1 + 1).skip(vx0) {
            *cell = '░';
        }
    }

    for node_box in layout.boxes() {
        let bx0 = node_box.left() / scale_x;
        let by0 = node_box.top() / scale_y;
        let bx1 = (node_box.right() / scale_x).min(map_width.saturating_sub(1));
        let by1 = (node_box.bottom() / scale_y).min(map_height.saturating_sub(1));
        for row in cells.iter_mut().take(by1 + 1).skip(by0) {
            for cell in row.iter_mut().take(bx1 + 1).skip(bx0) {
                *cell = '▪';
            }
        }
    }

    cells.into_iter().map(|row| row.into_iter().collect()).collect()
}
