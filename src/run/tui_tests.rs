#![allow(clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_decimal_macros::dec;

use super::*;
use crate::controller::{Completion, Request};
use crate::source::fake::make_txn;

fn press(app: &mut App, code: KeyCode) {
    handle_key(KeyEvent::new(code, KeyModifiers::NONE), app).unwrap();
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn loaded_app() -> App {
    let mut app = App::new();
    app.reload();
    let Some(Request::List { ticket }) = app.take_requests().pop() else {
        unreachable!("reload queues a list request");
    };
    app.apply_completion(Completion::Listed {
        ticket,
        result: Ok(vec![
            make_txn(1, "Grocery store", dec!(-45.20), "Food"),
            make_txn(2, "Salary", dec!(2000), "Income"),
            make_txn(3, "Restaurant", dec!(-30), "Food"),
        ]),
    });
    app
}

#[test]
fn test_search_applies_on_enter_only() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "food");
    assert_eq!(app.input_mode, InputMode::Search);
    assert_eq!(app.visible().len(), 3);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.visible().len(), 2);
}

#[test]
fn test_search_escape_clears() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "salary");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.controller.state().filter_query, "");
    assert_eq!(app.visible().len(), 3);
}

#[test]
fn test_search_backspace_edits_query() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "foox");
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.controller.state().filter_query, "foo");
}

#[test]
fn test_x_clears_applied_filter() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "2000");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.visible().len(), 1);

    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.visible().len(), 3);
}

#[test]
fn test_cursor_movement() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.cursor, 2);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.cursor, 1);
    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.cursor, 0);
    press(&mut app, KeyCode::Char('G'));
    assert_eq!(app.cursor, 2);
}

#[test]
fn test_space_toggles_cursor_row() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char(' '));
    assert!(app.controller.state().all[1].internal);
    assert!(matches!(
        app.take_requests().as_slice(),
        [Request::SetInternal {
            id: 2,
            internal: true,
            ..
        }]
    ));
}

#[test]
fn test_detail_keys() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Enter);
    assert!(app.detail_open());
    assert_eq!(app.controller.state().selected_id, Some(1));

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.controller.state().selected_id, Some(2));

    // list keys are inert while the detail is open
    press(&mut app, KeyCode::Char(' '));
    assert!(!app.controller.state().all[0].internal);

    press(&mut app, KeyCode::Esc);
    assert!(!app.detail_open());
}

#[test]
fn test_command_mode_runs_command() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "see 3");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.controller.state().selected_id, Some(3));
}

#[test]
fn test_command_error_propagates() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "toggle 99");
    let err = handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut app);
    assert!(err.is_err());
}

#[test]
fn test_help_swallows_next_key() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);
    press(&mut app, KeyCode::Char('j'));
    assert!(!app.show_help);
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = App::new();
    handle_key(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut app,
    )
    .unwrap();
    assert!(!app.running);
}
