// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! Interactive shell (ratatui + crossterm): a sidebar listing the session's
//! cached queries, a prompt pane, a collapsible raw-output pane, and the
//! diagram canvas. Prompt submissions run on the tokio runtime while the UI
//! keeps polling events; completions are applied between draws.

use std::{
    collections::BTreeMap,
    error::Error,
    io,
    sync::{mpsc, Arc},
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::runtime::Handle;

use crate::layout::FlowchartLayout;
use crate::llm::{GenerateError, Generator};
use crate::render::render_flow;
use crate::ui::ShellState;

const FOCUS_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🆃 🆁 🅸 🆃 🅾 🅽 ";
const CENTER_BORDER_PADDING: i32 = 1;
const SIDEBAR_WIDTH: u16 = 32;
const RESPONSE_PANE_HEIGHT: u16 = 8;
const MINIMAP_WIDTH: u16 = 24;
const MINIMAP_HEIGHT: u16 = 8;
const TOAST_TTL: Duration = Duration::from_secs(2);

/// Runs the interactive terminal UI until the user quits.
pub fn run(generator: Arc<dyn Generator>, runtime: Handle) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(generator, runtime);

    while !app.should_quit {
        app.drain_completions();
        app.sync_render_state();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let status_area = rows[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(main_area);
    let sidebar_area = columns[0];
    let right_area = columns[1];

    let response_height = if app.shell.output_visible() { RESPONSE_PANE_HEIGHT } else { 0 };
    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(response_height),
            Constraint::Min(0),
        ])
        .split(right_area);
    let prompt_area = panes[0];
    let response_area = panes[1];
    let canvas_area = panes[2];

    draw_sidebar(frame, app, sidebar_area);
    draw_prompt(frame, app, prompt_area);
    if app.shell.output_visible() {
        draw_response(frame, app, response_area);
    }
    draw_canvas(frame, app, canvas_area);

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    let status = if app.filter_editing {
        Paragraph::new(filter_footer_line(app, &toast_suffix))
    } else {
        Paragraph::new(footer_help_line(app, &toast_suffix))
    };
    frame.render_widget(status, status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let filter_tail = if app.filter_query.trim().is_empty() {
        format!("[{}]", app.shell.cache().len())
    } else {
        format!("[{}/{}]", app.visible_query_indices.len(), app.shell.cache().len())
    };
    let title = view_title("Queries", Some(&filter_tail));
    let border_style = panel_border_style_for_focus(app.focus, Focus::Queries);

    let item_width = area.width.saturating_sub(2) as usize;
    let items = app
        .visible_query_indices
        .iter()
        .filter_map(|&idx| app.shell.cache().get(idx).map(|entry| (idx, entry)))
        .map(|(idx, entry)| {
            let label = format!("{:>2} {}", idx + 1, entry.prompt());
            ListItem::new(truncate_with_ellipsis(&label, item_width))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border_style))
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut app.queries_state);
}

fn draw_prompt(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let border_style = panel_border_style_for_focus(app.focus, Focus::Prompt);
    let prompt = Paragraph::new(app.shell.prompt().to_owned()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(view_title("Prompt", None))
            .border_style(border_style),
    );
    frame.render_widget(prompt, area);

    if app.focus == Focus::Prompt && !app.filter_editing {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(app.shell.prompt().chars().count() as u16)
            .min(area.x.saturating_add(area.width.saturating_sub(2)));
        frame.set_cursor(cursor_x, area.y.saturating_add(1));
    }
}

fn draw_response(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let tail = app.shell.is_submitting().then_some("(generating…)");
    let response = Paragraph::new(app.shell.response_text().to_owned())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(view_title("Output", tail)));
    frame.render_widget(response, area);
}

fn draw_canvas(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let border_style = panel_border_style_for_focus(app.focus, Focus::Canvas);

    let (canvas_text, layout) = if app.shell.render().is_empty() {
        ("Type a prompt and press Enter to generate a flowchart.".to_owned(), None)
    } else {
        match render_flow(app.shell.render(), &app.node_offsets) {
            Ok(flow) => (flow.text, Some(flow.layout)),
            Err(err) => (format!("cannot render diagram: {err}"), None),
        }
    };

    let selected_tail = app
        .selected_node_id()
        .map(|id| format!("node: {id}"))
        .unwrap_or_else(|| format!("{}n/{}e", app.shell.render().nodes.len(), app.shell.render().edges.len()));
    let title = view_title("Canvas", Some(&selected_tail));

    let viewport_width = area.width.saturating_sub(2) as usize;
    let viewport_height = area.height.saturating_sub(2) as usize;
    app.center_diagram_if_needed(viewport_width, viewport_height, &canvas_text);

    let (scroll_x, scroll_y, left_pad, top_pad) = app.canvas_render_offsets();
    let mut text = Text::from(canvas_text);
    if left_pad > 0 || top_pad > 0 {
        text = pad_text(text, left_pad, top_pad);
    }

    let canvas = Paragraph::new(text)
        .scroll((scroll_y, scroll_x))
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border_style));
    frame.render_widget(canvas, area);

    if app.minimap_visible {
        if let Some(layout) = layout {
            draw_minimap(frame, app, area, &layout, viewport_width, viewport_height);
        }
    }
}

fn draw_minimap(
    frame: &mut Frame<'_>,
    app: &App,
    canvas_area: Rect,
    layout: &FlowchartLayout,
    viewport_width: usize,
    viewport_height: usize,
) {
    let map_outer_width = MINIMAP_WIDTH + 2;
    let map_outer_height = MINIMAP_HEIGHT + 2;
    if canvas_area.width < map_outer_width + 2 || canvas_area.height < map_outer_height + 2 {
        return;
    }

    let map_area = Rect {
        x: canvas_area.x + canvas_area.width - map_outer_width - 1,
        y: canvas_area.y + 1,
        width: map_outer_width,
        height: map_outer_height,
    };

    let rows = minimap_rows(
        layout,
        app.pan_x,
        app.pan_y,
        viewport_width,
        viewport_height,
        MINIMAP_WIDTH as usize,
        MINIMAP_HEIGHT as usize,
    );
    let map = Paragraph::new(rows.join("\n"))
        .block(Block::default().borders(Borders::ALL).title(view_title("Map", None)));
    frame.render_widget(Clear, map_area);
    frame.render_widget(map, map_area);
}

// Extracted title/footer/filter/minimap helpers.
include!("chrome.rs");

#[derive(Debug)]
struct Completion {
    prompt: String,
    outcome: Result<String, GenerateError>,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    shell: ShellState,
    generator: Arc<dyn Generator>,
    runtime: Handle,
    completions_tx: mpsc::Sender<Completion>,
    completions_rx: mpsc::Receiver<Completion>,
    focus: Focus,
    filter_editing: bool,
    filter_query: String,
    visible_query_indices: Vec<usize>,
    queries_state: ListState,
    pan_x: i32,
    pan_y: i32,
    center_diagram_on_next_draw: bool,
    node_offsets: BTreeMap<String, (i32, i32)>,
    selected_node: Option<usize>,
    minimap_visible: bool,
    seen_render_rev: u64,
    seen_cache_len: usize,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(generator: Arc<dyn Generator>, runtime: Handle) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel();
        Self {
            shell: ShellState::default(),
            generator,
            runtime,
            completions_tx,
            completions_rx,
            focus: Focus::Prompt,
            filter_editing: false,
            filter_query: String::new(),
            visible_query_indices: Vec::new(),
            queries_state: ListState::default(),
            pan_x: 0,
            pan_y: 0,
            center_diagram_on_next_draw: true,
            node_offsets: BTreeMap::new(),
            selected_node: None,
            minimap_visible: false,
            seen_render_rev: 0,
            seen_cache_len: 0,
            toast: None,
            should_quit: false,
        }
    }

    /// Applies every finished generate call. Completions are processed in
    /// arrival order; with overlapping submissions the last applied one wins.
    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            let notice = self.shell.complete_submission(&completion.prompt, completion.outcome);
            self.set_toast(notice.message());
        }
    }

    /// Reconciles presentation state with the shell: a replaced render state
    /// drops node offsets and re-fits the viewport, a grown cache refreshes
    /// the sidebar.
    fn sync_render_state(&mut self) {
        if self.shell.render_rev() != self.seen_render_rev {
            self.seen_render_rev = self.shell.render_rev();
            self.node_offsets.clear();
            self.selected_node = None;
            self.pan_x = 0;
            self.pan_y = 0;
            self.center_diagram_on_next_draw = true;
        }

        if self.shell.cache().len() != self.seen_cache_len {
            self.seen_cache_len = self.shell.cache().len();
            self.refresh_visible_queries();
            if let Some(newest) = self
                .visible_query_indices
                .iter()
                .position(|&idx| idx + 1 == self.seen_cache_len)
            {
                self.queries_state.select(Some(newest));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.filter_editing {
            self.handle_filter_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.cycle();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.cycle_back();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Prompt => self.handle_prompt_key(key.code),
            Focus::Canvas => self.handle_canvas_key(key),
            Focus::Queries => self.handle_queries_key(key.code),
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Esc => self.shell.set_prompt(String::new()),
            KeyCode::Backspace => {
                let mut prompt = self.shell.prompt().to_owned();
                prompt.pop();
                self.shell.set_prompt(prompt);
            }
            KeyCode::Char(ch) => {
                let mut prompt = self.shell.prompt().to_owned();
                prompt.push(ch);
                self.shell.set_prompt(prompt);
            }
            _ => {}
        }
    }

    fn handle_canvas_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::SHIFT) {
            match key.code {
                KeyCode::Up => return self.nudge_selected(0, -1),
                KeyCode::Down => return self.nudge_selected(0, 1),
                KeyCode::Left => return self.nudge_selected(-1, 0),
                KeyCode::Right => return self.nudge_selected(1, 0),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.pan_y = self.pan_y.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.pan_y = self.pan_y.saturating_add(1),
            KeyCode::Left | KeyCode::Char('h') => self.pan_x = self.pan_x.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => self.pan_x = self.pan_x.saturating_add(1),
            KeyCode::Char('K') | KeyCode::PageUp => self.pan_y = self.pan_y.saturating_sub(10),
            KeyCode::Char('J') | KeyCode::PageDown => self.pan_y = self.pan_y.saturating_add(10),
            KeyCode::Char('H') => self.pan_x = self.pan_x.saturating_sub(10),
            KeyCode::Char('L') => self.pan_x = self.pan_x.saturating_add(10),
            KeyCode::Home => {
                self.pan_x = 0;
                self.pan_y = 0;
            }
            KeyCode::Char('c') => self.center_diagram_on_next_draw = true,
            KeyCode::Char('m') => {
                self.minimap_visible = !self.minimap_visible;
                self.set_toast(if self.minimap_visible { "Map shown" } else { "Map hidden" });
            }
            KeyCode::Char('n') => self.cycle_node_selection(1),
            KeyCode::Char('N') => self.cycle_node_selection(-1),
            KeyCode::Esc => self.selected_node = None,
            KeyCode::Char('o') => {
                self.shell.toggle_output();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_queries_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_query_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_query_selection(1),
            KeyCode::Enter => self.replay_selected(),
            KeyCode::Char('/') => self.filter_editing = true,
            KeyCode::Esc => {
                self.filter_query.clear();
                self.refresh_visible_queries();
            }
            KeyCode::Char('o') => {
                self.shell.toggle_output();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.filter_editing = false;
                self.filter_query.clear();
                self.refresh_visible_queries();
            }
            KeyCode::Enter => self.filter_editing = false,
            KeyCode::Backspace => {
                self.filter_query.pop();
                self.refresh_visible_queries();
            }
            KeyCode::Char(ch) => {
                self.filter_query.push(ch);
                self.refresh_visible_queries();
            }
            _ => {}
        }
    }

    fn submit_prompt(&mut self) {
        let prompt = self.shell.prompt().trim().to_owned();
        if prompt.is_empty() {
            self.set_toast("Prompt is empty");
            return;
        }

        self.shell.begin_submission();
        let generator = Arc::clone(&self.generator);
        let completions_tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let outcome = generator.generate(&prompt).await;
            // Receiver gone means the UI already shut down.
            let _ = completions_tx.send(Completion { prompt, outcome });
        });
        self.set_toast("Generating…");
    }

    fn replay_selected(&mut self) {
        let Some(cache_index) = self
            .queries_state
            .selected()
            .and_then(|visible| self.visible_query_indices.get(visible).copied())
        else {
            self.set_toast("No cached query selected");
            return;
        };

        let notice = self.shell.replay(cache_index);
        self.set_toast(notice.message());
    }

    fn move_query_selection(&mut self, delta: i64) {
        let count = self.visible_query_indices.len();
        if count == 0 {
            return;
        }
        let current = self.queries_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, count as i64 - 1) as usize;
        self.queries_state.select(Some(next));
    }

    fn refresh_visible_queries(&mut self) {
        let cache_len = self.shell.cache().len();
        let query = self.filter_query.trim();

        self.visible_query_indices = if query.is_empty() {
            (0..cache_len).collect()
        } else {
            let mut scored: Vec<(i64, usize)> = (0..cache_len)
                .filter_map(|idx| {
                    let entry = self.shell.cache().get(idx)?;
                    fuzzy_score(query, entry.prompt()).map(|score| (score, idx))
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
            scored.into_iter().map(|(_, idx)| idx).collect()
        };

        match self.queries_state.selected() {
            Some(selected) if !self.visible_query_indices.is_empty() => {
                self.queries_state.select(Some(selected.min(self.visible_query_indices.len() - 1)));
            }
            _ if !self.visible_query_indices.is_empty() => {
                self.queries_state.select(Some(0));
            }
            _ => self.queries_state.select(None),
        }
    }

    fn cycle_node_selection(&mut self, delta: i64) {
        let count = self.shell.render().nodes.len();
        if count == 0 {
            self.set_toast("No nodes on the canvas");
            return;
        }
        let current = self.selected_node.map(|idx| idx as i64).unwrap_or(-delta.signum());
        let next = (current + delta).rem_euclid(count as i64) as usize;
        self.selected_node = Some(next);
    }

    /// Moves the selected node by whole cells. The offset is canvas-local
    /// presentation state; it is dropped when the render state is replaced.
    fn nudge_selected(&mut self, dx: i32, dy: i32) {
        let Some(node_id) = self.selected_node_id().map(str::to_owned) else {
            self.set_toast("No node selected (press n)");
            return;
        };

        let offset = self.node_offsets.entry(node_id).or_insert((0, 0));
        offset.0 = offset.0.saturating_add(dx);
        offset.1 = offset.1.saturating_add(dy);
    }

    fn selected_node_id(&self) -> Option<&str> {
        self.selected_node
            .and_then(|idx| self.shell.render().nodes.get(idx))
            .map(|node| node.id.as_str())
    }

    fn center_diagram_if_needed(
        &mut self,
        viewport_width: usize,
        viewport_height: usize,
        canvas_text: &str,
    ) {
        if !self.center_diagram_on_next_draw {
            return;
        }
        if viewport_width == 0 || viewport_height == 0 {
            return;
        }

        let diagram_width =
            canvas_text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0) as i32;
        let diagram_height = canvas_text.split('\n').count() as i32;
        let centered_pan_x = (diagram_width - viewport_width as i32) / 2;
        let centered_pan_y = (diagram_height - viewport_height as i32) / 2;
        // Never start clipped on the left/top; align with a one-cell margin
        // when full centering would do that.
        let max_pan = -CENTER_BORDER_PADDING;
        self.pan_x = centered_pan_x.min(max_pan);
        self.pan_y = centered_pan_y.min(max_pan);
        self.center_diagram_on_next_draw = false;
    }

    fn canvas_render_offsets(&self) -> (u16, u16, usize, usize) {
        let scroll_x = clamp_positive_i32_to_u16(self.pan_x);
        let scroll_y = clamp_positive_i32_to_u16(self.pan_y);
        let left_pad = self.pan_x.saturating_neg().max(0) as usize;
        let top_pad = self.pan_y.saturating_neg().max(0) as usize;
        (scroll_x, scroll_y, left_pad, top_pad)
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
