// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Runtime;

use crate::layout::layout_flowchart;
use crate::llm::{GenerateError, ScriptedGenerator};
use crate::model::{FlowResponse, NodeData, NodeSpec, Position};
use crate::ui::GENERIC_FAILURE_TEXT;

use super::{fuzzy_score, minimap_rows, truncate_with_ellipsis, App, Focus};

const ONE_NODE: &str = r#"{
    "nodes": [{"id": "1", "position": {"x": 0, "y": 0}, "data": {"label": "Start"}}],
    "edges": []
}"#;

const TWO_NODES: &str = r#"{
    "nodes": [
        {"id": "a", "position": {"x": 0, "y": 0}, "data": {"label": "Ask"}},
        {"id": "b", "position": {"x": 0, "y": 150}, "data": {"label": "Answer"}}
    ],
    "edges": [{"id": "e", "source": "a", "target": "b"}]
}"#;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("test runtime")
}

fn app_with(
    runtime: &Runtime,
    responses: Vec<Result<String, GenerateError>>,
) -> (App, Arc<ScriptedGenerator>) {
    let generator = Arc::new(ScriptedGenerator::queued(responses));
    let dyn_generator: Arc<dyn crate::llm::Generator> = generator.clone();
    let app = App::new(dyn_generator, runtime.handle().clone());
    (app, generator)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

fn type_prompt(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
}

/// Lets the current-thread runtime run the spawned generate task, then
/// applies its completion.
fn pump(runtime: &Runtime, app: &mut App) {
    runtime.block_on(async {
        tokio::time::sleep(Duration::from_millis(5)).await;
    });
    app.drain_completions();
    app.sync_render_state();
}

#[test]
fn tab_cycles_focus_through_all_panes() {
    let runtime = runtime();
    let (mut app, _) = app_with(&runtime, Vec::new());

    assert_eq!(app.focus, Focus::Prompt);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Canvas);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Queries);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Prompt);
    app.handle_key(key(KeyCode::BackTab));
    assert_eq!(app.focus, Focus::Queries);
}

#[test]
fn typing_edits_the_prompt_without_triggering_hotkeys() {
    let runtime = runtime();
    let (mut app, _) = app_with(&runtime, Vec::new());

    type_prompt(&mut app, "quote flow");
    assert_eq!(app.shell.prompt(), "quote flow");
    // 'q' and 'o' are text while the prompt pane has focus.
    assert!(!app.should_quit);
    assert!(app.shell.output_visible());

    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.shell.prompt(), "quote flo");
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.shell.prompt(), "");
}

#[test]
fn submission_round_trip_appends_and_renders() {
    let runtime = runtime();
    let (mut app, generator) = app_with(&runtime, vec![Ok(ONE_NODE.to_owned())]);

    type_prompt(&mut app, "draw a login flow");
    app.handle_key(key(KeyCode::Enter));
    assert!(app.shell.is_submitting());
    pump(&runtime, &mut app);

    assert_eq!(generator.calls(), 1);
    assert!(!app.shell.is_submitting());
    assert_eq!(app.shell.cache().len(), 1);
    assert_eq!(app.shell.render().nodes.len(), 1);
    assert_eq!(app.shell.response_text(), ONE_NODE);
    // Sidebar picked up the new entry and selected it.
    assert_eq!(app.visible_query_indices, vec![0]);
    assert_eq!(app.queries_state.selected(), Some(0));
}

#[test]
fn empty_prompt_is_not_submitted() {
    let runtime = runtime();
    let (mut app, generator) = app_with(&runtime, vec![Ok(ONE_NODE.to_owned())]);

    type_prompt(&mut app, "   ");
    app.handle_key(key(KeyCode::Enter));
    pump(&runtime, &mut app);

    assert_eq!(generator.calls(), 0);
    assert!(app.shell.cache().is_empty());
}

#[test]
fn failed_generation_shows_the_generic_error() {
    let runtime = runtime();
    let (mut app, _) = app_with(
        &runtime,
        vec![Err(GenerateError::Status { status: 500, body: "boom".to_owned() })],
    );

    type_prompt(&mut app, "anything");
    app.handle_key(key(KeyCode::Enter));
    pump(&runtime, &mut app);

    assert!(app.shell.cache().is_empty());
    assert_eq!(app.shell.response_text(), GENERIC_FAILURE_TEXT);
    assert!(app.shell.render().is_empty());
}

#[test]
fn replay_issues_no_generator_call() {
    let runtime = runtime();
    let (mut app, generator) = app_with(&runtime, vec![Ok(ONE_NODE.to_owned())]);

    type_prompt(&mut app, "draw a login flow");
    app.handle_key(key(KeyCode::Enter));
    pump(&runtime, &mut app);
    app.shell.set_prompt("something else");

    app.focus = Focus::Queries;
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(generator.calls(), 1);
    assert_eq!(app.shell.cache().len(), 1);
    assert_eq!(app.shell.prompt(), "draw a login flow");
    assert_eq!(app.shell.response_text(), ONE_NODE);
}

#[test]
fn sidebar_filter_narrows_and_escape_clears() {
    let runtime = runtime();
    let (mut app, _) = app_with(
        &runtime,
        vec![Ok(ONE_NODE.to_owned()), Ok(ONE_NODE.to_owned()), Ok(ONE_NODE.to_owned())],
    );

    for prompt in ["login flow", "checkout pipeline", "password reset"] {
        app.shell.set_prompt(prompt);
        app.submit_prompt();
        pump(&runtime, &mut app);
    }
    assert_eq!(app.visible_query_indices.len(), 3);

    app.focus = Focus::Queries;
    app.handle_key(key(KeyCode::Char('/')));
    assert!(app.filter_editing);
    for ch in "login".chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
    assert_eq!(app.visible_query_indices, vec![0]);

    app.handle_key(key(KeyCode::Enter));
    assert!(!app.filter_editing);
    assert_eq!(app.visible_query_indices, vec![0]);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.visible_query_indices.len(), 3);
}

#[test]
fn canvas_pan_and_reset() {
    let runtime = runtime();
    let (mut app, _) = app_with(&runtime, Vec::new());
    app.focus = Focus::Canvas;

    app.handle_key(key(KeyCode::Char('l')));
    app.handle_key(key(KeyCode::Char('j')));
    app.handle_key(key(KeyCode::Char('L')));
    assert_eq!((app.pan_x, app.pan_y), (11, 1));

    app.handle_key(key(KeyCode::Home));
    assert_eq!((app.pan_x, app.pan_y), (0, 0));
}

#[test]
fn nudge_moves_the_selected_node_and_new_render_discards_offsets() {
    let runtime = runtime();
    let (mut app, _) =
        app_with(&runtime, vec![Ok(TWO_NODES.to_owned()), Ok(ONE_NODE.to_owned())]);

    app.shell.set_prompt("two nodes");
    app.submit_prompt();
    pump(&runtime, &mut app);

    app.focus = Focus::Canvas;
    app.handle_key(shift_key(KeyCode::Right));
    // No node selected yet; nothing moves.
    assert!(app.node_offsets.is_empty());

    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.selected_node, Some(0));
    app.handle_key(shift_key(KeyCode::Right));
    app.handle_key(shift_key(KeyCode::Down));
    app.handle_key(shift_key(KeyCode::Down));
    assert_eq!(app.node_offsets.get("a"), Some(&(1, 2)));

    // A replaced render state drops the presentational offsets wholesale.
    app.shell.set_prompt("one node");
    app.submit_prompt();
    pump(&runtime, &mut app);
    assert!(app.node_offsets.is_empty());
    assert_eq!(app.selected_node, None);
    assert!(app.center_diagram_on_next_draw);
}

#[test]
fn node_selection_cycles_and_escape_deselects() {
    let runtime = runtime();
    let (mut app, _) = app_with(&runtime, vec![Ok(TWO_NODES.to_owned())]);
    app.shell.set_prompt("p");
    app.submit_prompt();
    pump(&runtime, &mut app);
    app.focus = Focus::Canvas;

    app.handle_key(key(KeyCode::Char('n')));
    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.selected_node_id(), Some("b"));
    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.selected_node_id(), Some("a"));

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.selected_node, None);
}

#[test]
fn output_toggle_works_outside_the_prompt_pane() {
    let runtime = runtime();
    let (mut app, _) = app_with(&runtime, Vec::new());
    app.focus = Focus::Canvas;

    app.handle_key(key(KeyCode::Char('o')));
    assert!(!app.shell.output_visible());
    app.handle_key(key(KeyCode::Char('o')));
    assert!(app.shell.output_visible());
}

#[test]
fn ctrl_c_quits_from_any_focus() {
    let runtime = runtime();
    let (mut app, _) = app_with(&runtime, Vec::new());

    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

#[test]
fn centering_fits_the_diagram_into_the_viewport() {
    let runtime = runtime();
    let (mut app, _) = app_with(&runtime, Vec::new());

    app.center_diagram_on_next_draw = true;
    app.center_diagram_if_needed(80, 20, "┌───┐\n│ A │\n└───┘");

    // Small diagram in a large viewport pans negative (padding), with the
    // one-cell margin cap.
    assert!(app.pan_x < 0);
    assert!(app.pan_y < 0);
    assert!(!app.center_diagram_on_next_draw);
}

#[test]
fn fuzzy_score_prefers_substrings_and_drops_noise() {
    let substring = fuzzy_score("login", "draw a login flow").expect("substring matches");
    let fuzzy = fuzzy_score("lgn flw", "draw a login flow");
    assert!(fuzzy.is_none() || substring > fuzzy.expect("score"));
    assert!(fuzzy_score("zzzzqqqq", "draw a login flow").is_none());
    assert!(fuzzy_score("", "anything").is_none());
}

#[test]
fn truncation_appends_an_ellipsis() {
    assert_eq!(truncate_with_ellipsis("short", 10), "short");
    assert_eq!(truncate_with_ellipsis("a longer label", 8), "a longe…");
    assert_eq!(truncate_with_ellipsis("abc", 0), "");
}

#[test]
fn minimap_marks_boxes_and_viewport() {
    let response = FlowResponse {
        nodes: vec![
            NodeSpec {
                id: "a".to_owned(),
                node_type: None,
                position: Position { x: 0.0, y: 0.0 },
                data: NodeData { label: "A".to_owned() },
            },
            NodeSpec {
                id: "b".to_owned(),
                node_type: None,
                position: Position { x: 400.0, y: 300.0 },
                data: NodeData { label: "B".to_owned() },
            },
        ],
        edges: Vec::new(),
    };
    let layout = layout_flowchart(&response).expect("layout");

    let rows = minimap_rows(&layout, 0, 0, 10, 4, 16, 8);
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row.chars().count() == 16));
    assert!(rows.iter().any(|row| row.contains('▪')));
    assert!(rows.iter().any(|row| row.contains('░')));
}
