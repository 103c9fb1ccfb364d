//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::{App, FeedStatus};
use super::panels;
use crate::preferences::PanelKind;

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(10),   // Panels
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    render_header(frame, main_layout[0], app);
    render_panels(frame, main_layout[1], app);
    render_keybindings(frame, main_layout[2]);
}

/// Header: symbol name, feed status, pending error.
fn render_header(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let status_color = match app.feed_status {
        FeedStatus::Connected => Color::Green,
        FeedStatus::Connecting => Color::Yellow,
        FeedStatus::Down => Color::Red,
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.current_symbol().display),
            Style::default()
                .fg(Color::White)
                .add_modifier(ratatui::style::Modifier::BOLD),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {} ", app.feed_status.label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        Span::raw(format!(" interval: {} ", app.interval.as_str())),
    ];

    if let Some(ref error) = app.error_message {
        spans.push(Span::raw("│"));
        spans.push(Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Lays out the visible panels: order book left, chart center, ticker and
/// trades stacked on the right.
fn render_panels(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let show_book = app.is_visible(PanelKind::OrderBook);
    let show_chart = app.is_visible(PanelKind::Chart);
    let show_ticker = app.is_visible(PanelKind::Ticker);
    let show_trades = app.is_visible(PanelKind::Trades);
    let show_right = show_ticker || show_trades;

    let mut constraints = Vec::new();
    if show_book {
        constraints.push(Constraint::Percentage(25));
    }
    if show_chart {
        constraints.push(Constraint::Min(30));
    }
    if show_right {
        constraints.push(Constraint::Percentage(25));
    }
    if constraints.is_empty() {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let mut column = 0;
    if show_book {
        panels::render_orderbook(frame, columns[column], app);
        column += 1;
    }
    if show_chart {
        panels::render_chart(frame, columns[column], app);
        column += 1;
    }
    if show_right {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints(if show_ticker && show_trades {
                vec![Constraint::Length(7), Constraint::Min(5)]
            } else {
                vec![Constraint::Min(5)]
            })
            .split(columns[column]);

        let mut row = 0;
        if show_ticker {
            panels::render_ticker(frame, right[row], app);
            row += 1;
        }
        if show_trades {
            panels::render_trades(frame, right[row], app);
        }
    }
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: ratatui::layout::Rect) {
    let help = Paragraph::new(Line::from(vec![Span::styled(
        " ←/→ symbol │ 1-4 panels │ i interval │ r reconnect │ q quit ",
        Style::default().fg(Color::DarkGray),
    )]));
    frame.render_widget(help, area);
}
