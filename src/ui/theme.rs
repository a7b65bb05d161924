//! Color palettes for the light and dark themes

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
    pub chip_bg: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        bg: Color::Rgb(17, 24, 39),
        fg: Color::Rgb(243, 244, 246),
        muted: Color::Rgb(156, 163, 175),
        accent: Color::Rgb(96, 165, 250),
        accent_alt: Color::Rgb(192, 132, 252),
        border: Color::Rgb(55, 65, 81),
        success: Color::Rgb(74, 222, 128),
        error: Color::Rgb(248, 113, 113),
        chip_bg: Color::Rgb(31, 41, 55),
    };

    pub const LIGHT: Palette = Palette {
        bg: Color::Rgb(249, 250, 251),
        fg: Color::Rgb(17, 24, 39),
        muted: Color::Rgb(75, 85, 99),
        accent: Color::Rgb(37, 99, 235),
        accent_alt: Color::Rgb(147, 51, 234),
        border: Color::Rgb(209, 213, 219),
        success: Color::Rgb(22, 163, 74),
        error: Color::Rgb(220, 38, 38),
        chip_bg: Color::Rgb(229, 231, 235),
    };

    pub fn for_mode(is_dark_mode: bool) -> Palette {
        if is_dark_mode {
            Palette::DARK
        } else {
            Palette::LIGHT
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn emphasis(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn link(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::UNDERLINED)
    }

    pub fn chip(&self) -> Style {
        Style::default().fg(self.accent).bg(self.chip_bg)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }
}
