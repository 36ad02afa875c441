use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let query = state.filter_query.trim();

    if state.visible.is_empty() {
        let msg = if app.controller.is_loading() {
            vec![
                Line::from(""),
                Line::from(Span::styled("Loading transactions…", theme::dim_style())),
            ]
        } else if !state.all.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions matching '{query}'"),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled("Press x to clear the filter", theme::dim_style())),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled("Press R to fetch them again", theme::dim_style())),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Transactions (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["", "Description", "Category", "Amount", ""]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = state
        .visible
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_cursor = i == app.cursor;

            let marker = if txn.internal { "\u{25cf}" } else { "\u{25cb}" };
            let description_style = if txn.internal {
                theme::internal_style()
            } else {
                Style::default()
            };
            let amount_style = if txn.is_credit() {
                theme::credit_style()
            } else {
                theme::debit_style()
            };

            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!(" {marker}")),
                Cell::from(Span::styled(truncate(&txn.description, 40), description_style)),
                Cell::from(Span::styled(txn.category.clone(), theme::dim_style())),
                Cell::from(Span::styled(format_amount(txn.amount), amount_style)),
                Cell::from(if is_cursor { "See \u{203a}" } else { "" }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(6),
    ];

    let internal_count = state.visible.iter().filter(|t| t.internal).count();
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Transactions ({}{}) {}",
                    state.visible.len(),
                    if state.visible.len() != state.all.len() {
                        format!(" of {}", state.all.len())
                    } else {
                        String::new()
                    },
                    if internal_count > 0 {
                        format!("[{internal_count} internal] ")
                    } else {
                        String::new()
                    }
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
