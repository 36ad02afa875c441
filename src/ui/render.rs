use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode};
use super::commands;
use super::theme;

const SEARCH_PLACEHOLDER: &str = "Search by description, category, or amount...";

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Transaction list
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app);
    render_search_box(f, chunks[1], app);
    super::screens::transactions::render(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
    render_command_bar(f, chunks[4], app);

    if app.detail_open() {
        super::screens::detail::render(f, chunks[2], app);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(" Transactions ", theme::header_style())];
    if app.controller.is_loading() {
        spans.push(Span::styled(
            " loading… ",
            Style::default().fg(theme::YELLOW).bg(theme::HEADER_BG),
        ));
    }
    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(bar, area);
}

fn render_search_box(f: &mut Frame, area: Rect, app: &App) {
    let query = &app.controller.state().filter_query;
    let editing = app.input_mode == InputMode::Search;

    let mut spans = if query.is_empty() {
        vec![Span::styled(SEARCH_PLACEHOLDER, theme::dim_style())]
    } else {
        vec![Span::styled(query.as_str(), theme::normal_style())]
    };
    spans.push(Span::styled("   [Enter] Filter", theme::dim_style()));
    if !query.is_empty() {
        spans.push(Span::styled(
            if editing { "  [Esc] Clear" } else { "  [x] Clear" },
            theme::dim_style(),
        ));
    }

    let border = if editing { theme::YELLOW } else { theme::OVERLAY };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(" / Search ", theme::label_style()));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if editing {
        let offset = query.chars().count() as u16;
        f.set_cursor_position((area.x + 1 + offset, area.y + 1));
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (mode_label, mode_bg) = if app.detail_open() {
        (" DETAIL ".to_string(), theme::GREEN)
    } else {
        let bg = match app.input_mode {
            InputMode::Normal => theme::ACCENT,
            InputMode::Command => theme::GREEN,
            InputMode::Search => theme::YELLOW,
        };
        (format!(" {} ", app.input_mode), bg)
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let state = app.controller.state();
    let info = format!(" {} shown | {} total", state.visible.len(), state.all.len());

    let right = if app.detail_open() {
        " n next | Esc close "
    } else {
        match app.input_mode {
            InputMode::Normal => " Space toggle | Enter see | /search | ? help ",
            InputMode::Search => " Enter filter | Esc clear ",
            InputMode::Command => " Enter run | Esc cancel ",
        }
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Search | InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, / to search, ? for help",
                    theme::dim_style(),
                ))
            } else if app.status_is_error {
                Line::from(Span::styled(
                    format!(" {}", app.status_message),
                    theme::error_style(),
                ))
            } else {
                Line::from(Span::styled(
                    format!(" {}", app.status_message),
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(" TxnView Help ", theme::title_style())),
        Line::from(""),
        section("List"),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Space or t       Toggle internal       Enter or s See details",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  /                Edit search           x          Clear filter",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  R                Reload                Ctrl-q     Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        section("Details"),
        Line::from(Span::styled(
            "  n                Show next             Esc or q   Close",
            theme::normal_style(),
        )),
        Line::from(""),
        section("Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
