//! UI rendering for the front panel.

use super::app::PanelApp;
use crate::cpu::registers::NUM_INPUTS;
use crate::logic::Bit;
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &PanelApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(frame.area());

    // Left side: monitor, inputs, help
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(NUM_INPUTS as u16 + 2),
            Constraint::Length(4),
        ])
        .split(chunks[0]);

    draw_monitor(frame, left_chunks[0], app);
    draw_inputs(frame, left_chunks[1], app);
    draw_help(frame, left_chunks[2]);

    // Right side: trace and status
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(chunks[1]);

    draw_trace(frame, right_chunks[0], app);
    draw_status(frame, right_chunks[1], app);
}

/// Draw the register monitor.
fn draw_monitor(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let snap = app.machine.snapshot();

    let power = if snap.running {
        Span::styled("ON ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("OFF", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    };

    let content = vec![
        Line::from(vec![
            Span::raw("POWER: "),
            power,
            Span::raw(format!("   Tick: {}", app.tick)),
        ]),
        Line::from(format!("Bank: {}    PC: {}", snap.bank, snap.pc)),
        Line::from(vec![
            Span::raw("ACC:  "),
            bit_span(snap.acc),
            Span::raw("    RAM: "),
            bit_span(snap.ram),
        ]),
        Line::from(vec![
            Span::raw("OUT0: "),
            lamp_span(snap.outputs[0]),
            Span::raw("  OUT1: "),
            lamp_span(snap.outputs[1]),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Monitor ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw the input switch bank.
fn draw_inputs(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let items: Vec<ListItem> = app
        .machine
        .regs
        .inputs
        .iter()
        .enumerate()
        .map(|(index, &level)| {
            let (mark, style) = if level.is_set() {
                ("[x]", Style::default().fg(Color::Yellow))
            } else {
                ("[ ]", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(format!("{} IN_{}", mark, index)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Inputs ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(list, area);
}

/// Draw the recent trace, newest first.
fn draw_trace(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let items: Vec<ListItem> = app
        .machine
        .trace
        .recent()
        .enumerate()
        .map(|(index, record)| {
            let style = if index == 0 {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(record.to_string()).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Trace (latest 20) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );

    frame.render_widget(list, area);
}

/// Draw the status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default().title(" Status ").borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw the help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("p: Power  0-6: Toggle input  s: Single step"),
        Line::from("e: Export log  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().title(" Help ").borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// Style a register bit as text.
fn bit_span(bit: Bit) -> Span<'static> {
    let style = if bit.is_set() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(bit.to_string(), style)
}

/// Style an output bit as a lamp.
fn lamp_span(bit: Bit) -> Span<'static> {
    if bit.is_set() {
        Span::styled("● 1", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("○ 0", Style::default().fg(Color::DarkGray))
    }
}
