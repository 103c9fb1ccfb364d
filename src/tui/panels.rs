//! Render functions for the four dashboard panels.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::app::App;
use crate::models::trade::Side;

/// Renders the ticker panel: last price, 24h change, high/low, volume.
pub fn render_ticker(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Ticker ");

    let lines = if let Some(ref t) = app.ticker {
        let change_color = if t.change_24h >= Decimal::ZERO {
            Color::Green
        } else {
            Color::Red
        };
        let arrow = if t.change_24h >= Decimal::ZERO {
            "▲"
        } else {
            "▼"
        };
        vec![
            Line::from(vec![
                Span::styled(arrow, Style::default().fg(change_color)),
                Span::styled(
                    format!(" {}", t.last_price),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::raw("24h: "),
                Span::styled(
                    format!("{:+} ({:+}%)", t.change_24h, t.change_pct_24h),
                    Style::default().fg(change_color),
                ),
            ]),
            Line::from(vec![
                Span::raw("High: "),
                Span::styled(t.high_24h.to_string(), Style::default().fg(Color::Green)),
            ]),
            Line::from(vec![
                Span::raw("Low:  "),
                Span::styled(t.low_24h.to_string(), Style::default().fg(Color::Red)),
            ]),
            Line::from(Span::raw(format!("Vol:  {}", t.volume_24h))),
        ]
    } else {
        vec![Line::from(Span::styled(
            "waiting for stream...",
            Style::default().fg(Color::DarkGray),
        ))]
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the order book panel: asks on top (reversed), bids below.
pub fn render_orderbook(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Order Book ");

    let mut lines = Vec::new();
    if let Some(ref book) = app.book {
        for level in book.asks.iter().rev() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>14}", level.price),
                    Style::default().fg(Color::Red),
                ),
                Span::raw(format!("  {:>12}", level.qty)),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!("{:─>28}", ""),
            Style::default().fg(Color::DarkGray),
        )));
        for level in &book.bids {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>14}", level.price),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(format!("  {:>12}", level.qty)),
            ]));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "loading...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the recent trades panel, newest first.
pub fn render_trades(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Trades ");

    let lines: Vec<Line> = if app.trades.is_empty() {
        vec![Line::from(Span::styled(
            "loading...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.trades
            .iter()
            .rev()
            .map(|trade| {
                let (color, tag) = match trade.side() {
                    Side::Buy => (Color::Green, "B"),
                    Side::Sell => (Color::Red, "S"),
                };
                Line::from(vec![
                    Span::styled(format!("{tag} "), Style::default().fg(color)),
                    Span::styled(
                        format!("{:>12}", trade.price),
                        Style::default().fg(color),
                    ),
                    Span::raw(format!("  {:>10}", trade.qty)),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the chart panel: close-price sparkline plus indicator readout.
pub fn render_chart(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Chart ({}) ", app.interval.as_str()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.candles.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "loading...",
                Style::default().fg(Color::DarkGray),
            )),
            inner,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(inner);

    // Sparkline wants u64 samples; rescale closes into the panel height.
    let closes: Vec<f64> = app.candles.iter().map(|c| c.close_f64()).collect();
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);
    let samples: Vec<u64> = closes
        .iter()
        .map(|c| (((c - min) / span) * 100.0).round() as u64)
        .collect();

    let width = rows[0].width.saturating_sub(2) as usize;
    let visible = &samples[samples.len().saturating_sub(width)..];
    frame.render_widget(
        Sparkline::default()
            .data(visible)
            .style(Style::default().fg(Color::Cyan)),
        rows[0],
    );

    if let Some(ref ind) = app.indicators {
        let rsi_color = if ind.rsi14 >= 70.0 {
            Color::Red
        } else if ind.rsi14 <= 30.0 {
            Color::Green
        } else {
            Color::White
        };
        let last = app
            .candles
            .last()
            .map(|c| c.close.to_f64().unwrap_or_default())
            .unwrap_or_default();
        let macd_color = if ind.macd.histogram >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };

        let lines = vec![
            Line::from(vec![
                Span::raw("RSI(14): "),
                Span::styled(format!("{:.1}", ind.rsi14), Style::default().fg(rsi_color)),
                Span::raw(format!("   MA(20): {:.2}   Last: {last:.2}", ind.ma20)),
            ]),
            Line::from(Span::raw(format!(
                "BB: {:.2} / {:.2} / {:.2}",
                ind.bollinger.upper, ind.bollinger.middle, ind.bollinger.lower
            ))),
            Line::from(vec![
                Span::raw(format!(
                    "MACD: {:.2}  Signal: {:.2}  Hist: ",
                    ind.macd.macd, ind.macd.signal
                )),
                Span::styled(
                    format!("{:+.2}", ind.macd.histogram),
                    Style::default().fg(macd_color),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), rows[1]);
    }
}
