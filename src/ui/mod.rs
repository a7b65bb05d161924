//! UI layer - draws a [`RenderState`] with ratatui

pub mod layout;
pub mod nav;
pub mod overlays;
pub mod pages;
pub mod theme;

use ratatui::{prelude::*, widgets::*};

use crate::messages::RenderState;
use theme::Palette;

pub fn draw(f: &mut Frame, state: &RenderState) {
    let pal = Palette::for_mode(state.is_dark_mode);

    if let Some(error) = &state.fault {
        overlays::draw_recovery_screen(f, error, pal);
        return;
    }

    let area = f.area();
    f.render_widget(Block::default().style(pal.base()), area);

    let regions = layout::split(area);

    nav::draw_nav_bar(f, state, pal, regions.nav);
    overlays::draw_progress(f, scroll_ratio(state, regions.page.height), pal, regions.progress);
    pages::draw_page(f, state, pal, regions.page);
    overlays::draw_footer(f, state, pal, regions.footer);

    if state.is_menu_open {
        nav::draw_menu(f, state, pal, area);
    }
    overlays::draw_notification(f, state, pal, area);
    if state.show_help {
        overlays::draw_help_popup(f, pal, area);
    }
}

/// How far down the page the viewport is, 0.0 to 1.0
pub fn scroll_ratio(state: &RenderState, viewport: u16) -> f64 {
    let doc = pages::document_layout(state.route, &state.portfolio, &state.form);
    let max = doc.max_scroll(viewport);
    if max == 0 {
        return 0.0;
    }
    f64::from(state.scroll.min(max)) / f64::from(max)
}
