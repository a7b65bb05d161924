//! Screen regions

use ratatui::prelude::*;

use crate::constants::{CONTENT_WIDTH, NARROW_WIDTH};

/// Regions of the main screen, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub nav: Rect,
    pub progress: Rect,
    pub page: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Nav bar
            Constraint::Length(1), // Scroll progress
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        nav: chunks[0],
        progress: chunks[1],
        page: chunks[2],
        footer: chunks[3],
    }
}

/// Rows available to page content for a terminal of `height` rows
pub fn page_height(width: u16, height: u16) -> u16 {
    split(Rect::new(0, 0, width, height)).page.height
}

/// Below this width the nav links collapse into the menu
pub fn is_narrow(width: u16) -> bool {
    width < NARROW_WIDTH
}

/// Horizontally centered column for page text
pub fn content_column(area: Rect) -> Rect {
    let width = (CONTENT_WIDTH as u16 + 4).min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
