use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::TransactionDetail;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_timestamp};

/// Modal over the list while a transaction is selected.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let Some(id) = state.selected_id else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(" Transaction Details ", theme::title_style())),
        Line::from(""),
    ];
    match &state.selected_detail {
        Some(detail) => lines.extend(detail_lines(detail)),
        None => lines.push(Line::from(Span::styled(
            format!(" Loading transaction #{id}…"),
            theme::dim_style(),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" n ", theme::selected_style()),
        Span::styled(" Show next   ", theme::normal_style()),
        Span::styled(" Esc ", theme::selected_style()),
        Span::styled(" Close", theme::normal_style()),
    ]));

    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 64.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let modal = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(modal, popup_area);
}

fn field(label: &str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<18}"), theme::label_style()),
        Span::styled(value, style),
    ])
}

fn detail_lines(detail: &TransactionDetail) -> Vec<Line<'static>> {
    let txn = &detail.summary;
    let amount_style = if txn.is_credit() {
        theme::credit_style()
    } else {
        theme::debit_style()
    };

    let mut lines = vec![
        field("Description", txn.description.clone(), theme::normal_style()),
        field("Amount", format_amount(txn.amount), amount_style),
        field("Category", txn.category.clone(), theme::normal_style()),
        field("Merchant", detail.merchant_label().to_string(), theme::normal_style()),
        field("Payment Method", detail.payment_method_label(), theme::normal_style()),
        field("Reference Number", detail.reference_number.clone(), theme::normal_style()),
    ];
    if let Some(notes) = detail.notes() {
        lines.push(field("Notes", notes.to_string(), theme::normal_style()));
    }
    lines.push(field("Type", txn.kind().to_string(), theme::normal_style()));
    lines.push(field("Created", format_timestamp(&txn.created_at), theme::dim_style()));
    lines
}
