use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::dispatch::Dispatcher;
use crate::source::TransactionSource;
use crate::ui::app::{App, InputMode};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long the loop waits for a key before checking for finished requests.
const TICK: Duration = Duration::from_millis(100);

pub(crate) fn as_tui(source: Arc<dyn TransactionSource>) -> Result<()> {
    let dispatcher = Dispatcher::new(source);
    let mut app = App::new();
    app.reload();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &dispatcher);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
) -> Result<()> {
    while app.running {
        for request in app.take_requests() {
            dispatcher.submit(request);
        }
        for completion in dispatcher.drain() {
            app.apply_completion(completion);
        }

        terminal.draw(|f| {
            // 1 title + 3 search + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(9) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Err(e) = handle_key(key, app) {
                warn!("{e:#}");
                app.set_error(e.to_string());
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

pub(crate) fn handle_key(key: event::KeyEvent, app: &mut App) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        app.running = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Command => handle_command_input(key, app),
        InputMode::Search => {
            handle_search_input(key, app);
            Ok(())
        }
        InputMode::Normal if app.detail_open() => {
            handle_detail_input(key, app);
            Ok(())
        }
        InputMode::Normal => handle_normal_input(key, app),
    }
}

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') | KeyCode::Home => scroll_to_top(&mut app.cursor, &mut app.scroll),
        KeyCode::Char('G') | KeyCode::End => {
            let len = app.visible().len();
            scroll_to_bottom(&mut app.cursor, &mut app.scroll, len, app.visible_rows);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('t') => app.toggle_cursor()?,
        KeyCode::Enter | KeyCode::Char('s') => app.see_cursor()?,
        KeyCode::Char('x') | KeyCode::Esc
            if !app.controller.state().filter_query.is_empty() =>
        {
            app.clear_filter();
        }
        KeyCode::Char('R') => app.reload(),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
    Ok(())
}

fn handle_detail_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Right => app.show_next(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => app.close_detail(),
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
}

fn handle_search_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.apply_filter();
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.clear_filter();
        }
        KeyCode::Backspace => {
            let mut query = app.controller.state().filter_query.clone();
            query.pop();
            app.edit_query(query);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_query(String::new());
        }
        KeyCode::Char(c) => {
            let mut query = app.controller.state().filter_query.clone();
            query.push(c);
            app.edit_query(query);
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_move_down(app: &mut App) {
    let len = app.visible().len();
    scroll_down(&mut app.cursor, &mut app.scroll, len, app.visible_rows);
}

fn handle_move_up(app: &mut App) {
    scroll_up(&mut app.cursor, &mut app.scroll);
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tui_tests;
