// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! End-to-end scenarios: prompt submission through validation, cache, and
//! canvas, driven by a scripted generator (no network).

use triton::llm::{GenerateError, Generator, ScriptedGenerator};
use triton::render::render_flow;
use triton::ui::{Notice, ShellState, GENERIC_FAILURE_TEXT};

const START_ONLY: &str = r#"{
    "nodes": [{"id": "1", "position": {"x": 0, "y": 0}, "data": {"label": "Start"}}],
    "edges": []
}"#;

async fn submit(state: &mut ShellState, generator: &ScriptedGenerator, prompt: &str) -> Notice {
    state.set_prompt(prompt);
    state.begin_submission();
    let outcome = generator.generate(prompt).await;
    state.complete_submission(prompt, outcome)
}

#[tokio::test]
async fn successful_prompt_lands_in_cache_and_on_canvas() {
    let generator = ScriptedGenerator::queued(vec![Ok(START_ONLY.to_owned())]);
    let mut state = ShellState::default();

    let notice = submit(&mut state, &generator, "draw a login flow").await;

    assert_eq!(notice, Notice::Rendered { nodes: 1, edges: 0 });
    assert_eq!(state.cache().len(), 1);
    let entry = state.cache().get(0).expect("cached entry");
    assert_eq!(entry.prompt(), "draw a login flow");
    assert_eq!(entry.json(), START_ONLY);
    assert_eq!(state.render().nodes.len(), 1);
    assert_eq!(state.render().nodes[0].data.label, "Start");
    assert!(state.render().edges.is_empty());

    // The render state draws as a single labeled box.
    let drawn = render_flow(state.render(), &Default::default()).expect("render");
    assert!(drawn.text.contains("Start"));
    assert!(drawn.text.contains('┌'));
}

#[tokio::test]
async fn malformed_response_shows_generic_error_and_keeps_state() {
    let generator = ScriptedGenerator::queued(vec![
        Ok(START_ONLY.to_owned()),
        Ok("{not json".to_owned()),
    ]);
    let mut state = ShellState::default();

    submit(&mut state, &generator, "good one").await;
    let notice = submit(&mut state, &generator, "bad one").await;

    assert!(matches!(notice, Notice::InvalidResponse { .. }));
    assert_eq!(state.cache().len(), 1);
    assert_eq!(state.response_text(), GENERIC_FAILURE_TEXT);
    // The previous diagram is still the render state.
    assert_eq!(state.render().nodes.len(), 1);
}

#[tokio::test]
async fn malformed_response_on_empty_session_keeps_cache_empty() {
    let generator = ScriptedGenerator::queued(vec![Ok("{not json".to_owned())]);
    let mut state = ShellState::default();

    submit(&mut state, &generator, "first try").await;

    assert!(state.cache().is_empty());
    assert_eq!(state.response_text(), GENERIC_FAILURE_TEXT);
    assert!(state.render().is_empty());
}

#[tokio::test]
async fn replay_restores_the_session_without_a_network_call() {
    let generator = ScriptedGenerator::queued(vec![Ok(START_ONLY.to_owned())]);
    let mut state = ShellState::default();

    submit(&mut state, &generator, "draw a login flow").await;
    assert_eq!(generator.calls(), 1);

    // Scribble over the panes, then replay the cached entry.
    state.set_prompt("unrelated typing");
    let notice = state.replay(0);

    assert_eq!(notice, Notice::Replayed { ordinal: 1 });
    assert_eq!(generator.calls(), 1);
    assert_eq!(state.cache().len(), 1);
    assert_eq!(state.prompt(), "draw a login flow");
    assert_eq!(state.response_text(), START_ONLY);
    assert_eq!(state.render().nodes.len(), 1);
}

#[tokio::test]
async fn network_failures_do_not_grow_the_cache() {
    let generator = ScriptedGenerator::queued(vec![
        Err(GenerateError::Network { detail: "connection refused".to_owned() }),
        Err(GenerateError::Status { status: 429, body: "slow down".to_owned() }),
        Ok(START_ONLY.to_owned()),
    ]);
    let mut state = ShellState::default();

    submit(&mut state, &generator, "one").await;
    submit(&mut state, &generator, "two").await;
    submit(&mut state, &generator, "three").await;

    assert_eq!(state.cache().len(), 1);
    assert_eq!(state.cache().get(0).expect("entry").prompt(), "three");
}

#[tokio::test]
async fn demo_generator_drives_the_full_loop() {
    let generator = ScriptedGenerator::demo();
    let mut state = ShellState::default();

    let notice = submit(&mut state, &generator, "show me the demo").await;

    assert!(matches!(notice, Notice::Rendered { .. }));
    assert_eq!(state.cache().len(), 1);
    assert!(!state.render().is_empty());
    let drawn = render_flow(state.render(), &Default::default()).expect("render");
    assert!(!drawn.text.is_empty());
}
