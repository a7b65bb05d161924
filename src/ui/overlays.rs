//! Popups, banners and chrome drawn over or around the page

use chrono::Datelike;
use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::RenderState;
use crate::notification::NotificationKind;
use crate::shortcuts::SHORTCUTS;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Palette;

pub fn draw_help_popup(f: &mut Frame, pal: Palette, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    let mut lines = vec![
        Line::styled(" Keyboard Shortcuts", pal.heading()),
        Line::default(),
    ];
    for shortcut in SHORTCUTS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", shortcut.keys.display()), pal.emphasis()),
            Span::styled(shortcut.label, pal.text()),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::styled(" Contact form", pal.heading()));
    for (keys, label) in [
        ("Tab", "Next field"),
        ("Enter / E", "Edit field"),
        ("Esc", "Stop editing"),
        ("Ctrl + S", "Send message"),
        ("Ctrl + W", "Delete word"),
        ("X", "Dismiss notification"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", keys), pal.emphasis()),
            Span::styled(label, pal.text()),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::styled(" Press K or Esc to close", pal.dim()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pal.border_style(true))
        .title(format!(" {} {} ", APP_NAME, APP_VERSION))
        .style(pal.base());

    let help = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

/// Toast in the top-right corner, below the nav bar
pub fn draw_notification(f: &mut Frame, state: &RenderState, pal: Palette, area: Rect) {
    let Some(notification) = state.notification.as_ref() else {
        return;
    };

    let (icon, color) = match notification.kind {
        NotificationKind::Success => ("✓", pal.success),
        NotificationKind::Error => ("✗", pal.error),
    };
    let text = format!(" {} {} ", icon, notification.message);
    let width = (text.chars().count() as u16 + 4).min(area.width);
    let toast_area = Rect::new(area.x + area.width - width, area.y + 3, width, 3).intersection(area);

    let toast = Paragraph::new(Line::styled(text, Style::default().fg(color).bold())).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title_bottom(Line::from(" x ").right_aligned())
            .style(pal.base()),
    );
    f.render_widget(Clear, toast_area);
    f.render_widget(toast, toast_area);
}

/// Full-screen replacement shown after a drawing failure
pub fn draw_recovery_screen(f: &mut Frame, error: &str, pal: Palette) {
    let area = f.area();
    let lines = vec![
        Line::default(),
        Line::styled("Something went wrong", pal.heading()),
        Line::default(),
        Line::styled(error.to_string(), Style::default().fg(pal.error)),
        Line::default(),
        Line::from(vec![
            Span::styled(" R ", pal.chip()),
            Span::styled(" Reload   ", pal.text()),
            Span::styled(" B ", pal.chip()),
            Span::styled(" Go back   ", pal.text()),
            Span::styled(" Q ", pal.chip()),
            Span::styled(" Quit", pal.text()),
        ]),
    ];

    let screen = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(pal.error))
                .style(pal.base()),
        );
    f.render_widget(Clear, area);
    f.render_widget(screen, area);
}

pub fn footer_text(year: i32) -> String {
    format!("© {} Portfolio. Built with Rust & Ratatui.", year)
}

pub fn draw_footer(f: &mut Frame, state: &RenderState, pal: Palette, area: Rect) {
    let year = chrono::Local::now().year();

    let mut hint = Vec::new();
    if state.pending_sequence {
        hint.push(Span::styled(" g… ", pal.chip()));
        hint.push(Span::raw(" "));
    }
    hint.push(Span::styled("Press ", pal.dim()));
    hint.push(Span::styled("K", pal.emphasis()));
    hint.push(Span::styled(" for shortcuts ", pal.dim()));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", footer_text(year)), pal.dim())).style(pal.base()),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(hint).right_aligned()).style(pal.base()),
        chunks[1],
    );
}

pub fn draw_progress(f: &mut Frame, ratio: f64, pal: Palette, area: Rect) {
    let gauge = LineGauge::default()
        .filled_style(Style::default().fg(pal.accent))
        .unfilled_style(Style::default().fg(pal.border))
        .label("")
        .ratio(ratio.clamp(0.0, 1.0))
        .style(pal.base());
    f.render_widget(gauge, area);
}
