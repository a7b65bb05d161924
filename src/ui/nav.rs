//! Navigation bar and the collapsed menu

use ratatui::{prelude::*, widgets::*};

use crate::constants::APP_NAME;
use crate::messages::RenderState;
use crate::nav::Route;
use crate::ui::layout;
use crate::ui::theme::Palette;

pub fn draw_nav_bar(f: &mut Frame, state: &RenderState, pal: Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pal.border_style(false))
        .title(Span::styled(format!(" {} ", APP_NAME), pal.emphasis()))
        .style(pal.base());

    let mut spans = Vec::new();
    if layout::is_narrow(area.width) {
        let icon = if state.is_menu_open { "✕" } else { "☰" };
        spans.push(Span::styled(format!(" {} Menu ", icon), pal.chip()));
        spans.push(Span::styled(" m ", pal.dim()));
        spans.push(Span::styled(format!(" {}", state.route.label()), pal.emphasis()));
    } else {
        for (i, route) in Route::ALL.iter().enumerate() {
            let style = if *route == state.route {
                Style::default().fg(pal.bg).bg(pal.accent).bold()
            } else {
                pal.text()
            };
            spans.push(Span::styled(format!(" {} ", i + 1), pal.dim()));
            spans.push(Span::styled(format!(" {} ", route.label()), style));
            spans.push(Span::raw(" "));
        }
    }

    let links = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(links, area);

    let theme = if state.is_dark_mode { "☾ Dark " } else { "☀ Light " };
    let mut right = vec![Span::styled(theme, pal.emphasis()), Span::styled("T ", pal.dim())];
    if state.can_go_back {
        right.insert(0, Span::styled("← B  ", pal.dim()));
    }
    let width = right.iter().map(|s| s.width() as u16).sum::<u16>() + 1;
    if area.width > width + 2 {
        let toggle_area = Rect::new(area.x + area.width - width - 1, area.y + 1, width, 1);
        f.render_widget(Paragraph::new(Line::from(right)), toggle_area);
    }
}

/// Dropdown shown while the menu is open
pub fn draw_menu(f: &mut Frame, state: &RenderState, pal: Palette, area: Rect) {
    let items: Vec<ListItem> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let marker = if *route == state.route { "●" } else { " " };
            let style = if i == state.menu_selected {
                Style::default().fg(pal.bg).bg(pal.accent).bold()
            } else {
                pal.text()
            };
            ListItem::new(format!(" {} {} ", marker, route.label())).style(style)
        })
        .collect();

    let height = Route::ALL.len() as u16 + 2;
    let menu_area = Rect::new(area.x + 1, area.y + 2, 20, height).intersection(area);

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pal.border_style(true))
            .title(" Go to ")
            .style(pal.base()),
    );
    f.render_widget(Clear, menu_area);
    f.render_widget(menu, menu_area);
}
