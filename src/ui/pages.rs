//! Page documents.
//!
//! Every page is a list of named sections pre-wrapped to [`CONTENT_WIDTH`],
//! so section positions do not depend on the terminal size. The App layer
//! uses [`document_layout`] to scroll between sections; the UI layer renders
//! the same sections with colors.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::constants::CONTENT_WIDTH;
use crate::form::{ContactFormState, Field, FormFocus};
use crate::messages::RenderState;
use crate::models::Portfolio;
use crate::nav::Route;
use crate::ui::layout;
use crate::ui::theme::Palette;

/// A named block of page content
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub lines: Vec<Line<'static>>,
}

impl Section {
    fn new(title: impl Into<String>, lines: Vec<Line<'static>>) -> Self {
        Section {
            title: title.into(),
            lines,
        }
    }

    /// Rows taken by the heading, body and trailing gap
    fn height(&self) -> u16 {
        (self.lines.len() + 3) as u16
    }
}

/// Inputs shared by the page builders
pub struct PageContext<'a> {
    pub portfolio: &'a Portfolio,
    pub form: &'a ContactFormState,
    pub palette: Palette,
}

/// Section start rows and total height of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    pub offsets: Vec<u16>,
    pub height: u16,
}

impl DocumentLayout {
    pub fn of(sections: &[Section]) -> Self {
        let mut offsets = Vec::with_capacity(sections.len());
        let mut row = 0u16;
        for section in sections {
            offsets.push(row);
            row = row.saturating_add(section.height());
        }
        DocumentLayout {
            offsets,
            height: row,
        }
    }

    pub fn max_scroll(&self, viewport: u16) -> u16 {
        self.height.saturating_sub(viewport)
    }

    /// Section under the reading line, a third of the way down the viewport
    pub fn active_section(&self, scroll: u16, viewport: u16) -> usize {
        let probe = scroll.saturating_add(viewport / 3);
        self.offsets
            .iter()
            .rposition(|&start| start <= probe)
            .unwrap_or(0)
    }
}

pub fn document_layout(route: Route, portfolio: &Portfolio, form: &ContactFormState) -> DocumentLayout {
    let ctx = PageContext {
        portfolio,
        form,
        palette: Palette::LIGHT,
    };
    DocumentLayout::of(&build_document(route, &ctx))
}

pub fn build_document(route: Route, ctx: &PageContext) -> Vec<Section> {
    match route {
        Route::Home => home(ctx),
        Route::About => about(ctx),
        Route::Projects => projects(ctx),
        Route::Contact => contact(ctx),
    }
}

// ========================
// Pages
// ========================

fn home(ctx: &PageContext) -> Vec<Section> {
    let p = ctx.portfolio;
    let pal = ctx.palette;

    let mut hero = vec![
        Line::styled(p.headline.clone(), pal.heading()),
        Line::styled(p.headline_accent.clone(), pal.emphasis()),
        Line::default(),
    ];
    hero.extend(paragraph(&p.tagline, pal.dim()));
    hero.push(Line::default());
    hero.push(Line::from(vec![
        Span::styled(" View My Work ", pal.chip()),
        Span::styled(" 3 ", pal.dim()),
        Span::raw("  "),
        Span::styled(" Get in Touch ", pal.chip()),
        Span::styled(" 4 ", pal.dim()),
    ]));

    let stats = p
        .stats
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(format!("{:>6}  ", s.value), pal.emphasis()),
                Span::styled(s.label.clone(), pal.text()),
            ])
        })
        .collect();

    vec![
        Section::new("Welcome", hero),
        Section::new("Technologies", chips(&p.technologies, pal)),
        Section::new("At a Glance", stats),
    ]
}

fn about(ctx: &PageContext) -> Vec<Section> {
    let p = ctx.portfolio;
    let pal = ctx.palette;

    let bio = highlight_terms(&p.bio, &p.bio_highlights, CONTENT_WIDTH, pal.text(), pal.emphasis());

    let mut skills = Vec::new();
    for category in &p.skills {
        skills.push(Line::styled(category.category.clone(), pal.heading()));
        skills.extend(chips(&category.items, pal));
        skills.push(Line::default());
    }
    skills.pop();

    let mut experience = Vec::new();
    for job in &p.experience {
        experience.push(Line::from(vec![
            Span::styled(job.title.clone(), pal.heading()),
            Span::styled(" @ ", pal.dim()),
            Span::styled(job.company.clone(), pal.emphasis()),
        ]));
        experience.push(Line::styled(job.period.clone(), pal.dim()));
        for achievement in &job.achievements {
            experience.extend(bullet(achievement, pal));
        }
        experience.push(Line::default());
    }
    experience.pop();

    let education = p
        .education
        .iter()
        .flat_map(|e| {
            [
                Line::styled(e.degree.clone(), pal.heading()),
                Line::from(vec![
                    Span::styled(e.school.clone(), pal.text()),
                    Span::styled(format!("  {}", e.year), pal.dim()),
                ]),
            ]
        })
        .collect();

    let certifications = p
        .certifications
        .iter()
        .map(|c| {
            Line::from(vec![
                Span::raw(format!("{} ", c.badge)),
                Span::styled(c.name.clone(), pal.heading()),
                Span::styled(format!("  {} ({})", c.issuer, c.year), pal.dim()),
            ])
        })
        .collect();

    vec![
        Section::new("About Me", bio),
        Section::new("Skills", skills),
        Section::new("Experience", experience),
        Section::new("Education", education),
        Section::new("Certifications", certifications),
    ]
}

fn projects(ctx: &PageContext) -> Vec<Section> {
    let pal = ctx.palette;

    ctx.portfolio
        .projects
        .iter()
        .map(|project| {
            let mut lines = paragraph(&project.description, pal.text());
            lines.push(Line::default());
            lines.extend(chips(&project.technologies, pal));
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Code  ", pal.dim()),
                Span::styled(project.repository_url.clone(), pal.link()),
            ]));
            if let Some(live) = &project.live_url {
                lines.push(Line::from(vec![
                    Span::styled("Live  ", pal.dim()),
                    Span::styled(live.clone(), pal.link()),
                ]));
            }
            if let Some(image) = &project.image {
                lines.push(Line::styled(format!("Image {}", image), pal.dim()));
            }
            Section::new(project.title.clone(), lines)
        })
        .collect()
}

fn contact(ctx: &PageContext) -> Vec<Section> {
    let pal = ctx.palette;

    let mut links = paragraph(
        "Have a project in mind or want to chat? Reach out through any of these channels or send a message below.",
        pal.dim(),
    );
    links.push(Line::default());
    for link in &ctx.portfolio.contact_links {
        links.push(Line::from(vec![
            Span::raw(format!("{} ", link.icon)),
            Span::styled(format!("{:<10}", link.label), pal.heading()),
            Span::styled(link.value.clone(), pal.link()),
        ]));
    }

    vec![
        Section::new("Get in Touch", links),
        Section::new("Send a Message", form_lines(ctx.form, pal)),
    ]
}

fn form_lines(form: &ContactFormState, pal: Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for field in Field::ALL {
        let focused = form.focus == FormFocus::Field(field);
        let editing = focused && form.editing;

        let marker = if focused { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, pal.emphasis()),
            Span::styled(field.label(), pal.heading()),
            Span::styled(" *", Style::default().fg(pal.error)),
        ]));

        let value = form.value(field);
        let bar = Span::styled("  │ ", pal.border_style(focused));
        if value.is_empty() && !editing {
            lines.push(Line::from(vec![bar, Span::styled(field.placeholder(), pal.dim())]));
        } else {
            let shown = if editing {
                let cursor = form.cursor.min(value.len());
                format!("{}█{}", &value[..cursor], &value[cursor..])
            } else {
                value.to_string()
            };
            for row in wrap_text(&shown, CONTENT_WIDTH - 4) {
                lines.push(Line::from(vec![bar.clone(), Span::styled(row, pal.text())]));
            }
        }

        if let Some(error) = form.errors.get(field) {
            lines.push(Line::styled(format!("    {}", error), Style::default().fg(pal.error)));
        }
        lines.push(Line::default());
    }

    let label = if form.is_submitting {
        " Sending... "
    } else {
        " Send Message "
    };
    let style = if form.focus == FormFocus::Submit {
        Style::default().fg(pal.bg).bg(pal.accent).bold()
    } else {
        pal.chip()
    };
    lines.push(Line::from(vec![Span::raw("  "), Span::styled(label, style)]));
    lines.push(Line::styled(
        "  Tab: next field  Enter/e: edit  Esc: done  Ctrl+S: send",
        pal.dim(),
    ));

    lines
}

// ========================
// Text helpers
// ========================

/// Byte ranges of whitespace-separated words
fn word_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                ranges.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        ranges.push((s, text.len()));
    }
    ranges
}

/// Greedy word wrap of one paragraph into byte ranges. A word longer than
/// `width` gets a row of its own.
/// Split a word wider than `width` into `width`-column pieces
fn hard_break(text: &str, start: usize, end: usize, width: usize) -> Vec<(usize, usize)> {
    let width = width.max(1);
    let mut pieces = Vec::new();
    let mut piece_start = start;
    for (count, (offset, _)) in text[start..end].char_indices().enumerate() {
        if count > 0 && count % width == 0 {
            pieces.push((piece_start, start + offset));
            piece_start = start + offset;
        }
    }
    pieces.push((piece_start, end));
    pieces
}

fn wrap_ranges(text: &str, width: usize) -> Vec<(usize, usize)> {
    let mut rows = Vec::new();
    let mut current: Option<(usize, usize, usize)> = None;

    for (start, end) in word_ranges(text).into_iter().flat_map(|(s, e)| hard_break(text, s, e, width)) {
        let len = text[start..end].chars().count();
        current = match current {
            None => Some((start, end, len)),
            Some((row_start, row_end, row_len)) => {
                if row_len + 1 + len > width {
                    rows.push((row_start, row_end));
                    Some((start, end, len))
                } else {
                    Some((row_start, end, row_len + 1 + len))
                }
            }
        };
    }
    if let Some((row_start, row_end, _)) = current {
        rows.push((row_start, row_end));
    }
    rows
}

/// Word-wrap `text` to `width` columns. Newlines start a new row; blank
/// lines are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let wrapped = wrap_ranges(line, width);
        if wrapped.is_empty() {
            rows.push(String::new());
        }
        rows.extend(wrapped.into_iter().map(|(s, e)| line[s..e].to_string()));
    }
    rows
}

fn paragraph(text: &str, style: Style) -> Vec<Line<'static>> {
    wrap_text(text, CONTENT_WIDTH)
        .into_iter()
        .map(|row| Line::styled(row, style))
        .collect()
}

fn bullet(text: &str, pal: Palette) -> Vec<Line<'static>> {
    wrap_text(text, CONTENT_WIDTH - 2)
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let lead = if i == 0 { "• " } else { "  " };
            Line::from(vec![
                Span::styled(lead, pal.emphasis()),
                Span::styled(row, pal.text()),
            ])
        })
        .collect()
}

/// Tag chips, wrapped across rows
fn chips(items: &[String], pal: Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut width = 0;

    for item in items {
        let chip = format!(" {} ", item);
        let len = chip.chars().count();
        if width > 0 && width + 1 + len > CONTENT_WIDTH {
            lines.push(Line::from(std::mem::take(&mut spans)));
            width = 0;
        }
        if width > 0 {
            spans.push(Span::raw(" "));
            width += 1;
        }
        spans.push(Span::styled(chip, pal.chip()));
        width += len;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Byte mask of every occurrence of every term in `text`
pub fn highlight_mask(text: &str, terms: &[String]) -> Vec<bool> {
    let mut mask = vec![false; text.len()];
    for term in terms.iter().filter(|t| !t.is_empty()) {
        for (start, matched) in text.match_indices(term.as_str()) {
            mask[start..start + matched.len()].fill(true);
        }
    }
    mask
}

/// Wrap `text` and emphasize the highlighted terms
pub fn highlight_terms(
    text: &str,
    terms: &[String],
    width: usize,
    base: Style,
    emphasis: Style,
) -> Vec<Line<'static>> {
    let mask = highlight_mask(text, terms);

    wrap_ranges(text, width)
        .into_iter()
        .map(|(start, end)| {
            let mut spans = Vec::new();
            let mut run_start = start;
            for i in start..end {
                if !text.is_char_boundary(i) || i == run_start {
                    continue;
                }
                if mask[i] != mask[run_start] {
                    spans.push(styled_run(text, run_start, i, mask[run_start], base, emphasis));
                    run_start = i;
                }
            }
            spans.push(styled_run(text, run_start, end, mask[run_start], base, emphasis));
            Line::from(spans)
        })
        .collect()
}

fn styled_run(text: &str, start: usize, end: usize, marked: bool, base: Style, emphasis: Style) -> Span<'static> {
    let style = if marked { emphasis } else { base };
    Span::styled(text[start..end].to_string(), style)
}

// ========================
// Rendering
// ========================

pub fn draw_page(f: &mut Frame, state: &RenderState, pal: Palette, area: Rect) {
    let ctx = PageContext {
        portfolio: &state.portfolio,
        form: &state.form,
        palette: pal,
    };
    let sections = build_document(state.route, &ctx);
    let doc = DocumentLayout::of(&sections);
    let active = doc.active_section(state.scroll, area.height);

    let mut lines = Vec::with_capacity(doc.height as usize);
    for (i, section) in sections.into_iter().enumerate() {
        let (marker, style) = if i == active {
            ("▍ ", pal.emphasis())
        } else {
            ("  ", pal.heading())
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(pal.accent_alt)),
            Span::styled(section.title, style),
        ]));
        lines.push(Line::default());
        lines.extend(section.lines);
        lines.push(Line::default());
    }

    let scroll = state.scroll.min(doc.max_scroll(area.height));
    let page = Paragraph::new(lines).style(pal.base()).scroll((scroll, 0));
    f.render_widget(page, layout::content_column(area));
}
