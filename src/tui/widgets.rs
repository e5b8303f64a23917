use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::surface::{Border, Label, LabelAnchor};

use super::scene::Scene;

const ANNOTATION_BG: AppColor = AppColor::new(0.9, 0.9, 0.9);
const ANNOTATION_FG: AppColor = AppColor::new(0.1, 0.1, 0.1);

fn to_color(c: &AppColor) -> Color {
    let srgb = c.to_srgb_u8();
    Color::Rgb(srgb.red, srgb.green, srgb.blue)
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: &AppColor) -> Color {
    if c.relative_luminance() > 0.4 {
        Color::Black
    } else {
        Color::White
    }
}

/// Draws every region of a [`Scene`], then the visible labels on top.
pub struct SceneWidget<'a> {
    scene: &'a Scene,
}

impl<'a> SceneWidget<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }
}

/// Outline a selected region, or mark its center when it is too small to outline.
fn draw_selection(rect: Rect, fill: &AppColor, buf: &mut Buffer) {
    let style = Style::default()
        .fg(contrast_fg(fill))
        .add_modifier(Modifier::BOLD);
    if rect.width >= 3 && rect.height >= 3 {
        Block::bordered().border_style(style).render(rect, buf);
    } else {
        let x = rect.x + rect.width / 2;
        let y = rect.y + rect.height / 2;
        buf.set_string(x, y, "◆", style);
    }
}

fn draw_label(rect: Rect, label: &Label, area: Rect, buf: &mut Buffer) {
    let (text, style) = if label.boxed {
        (
            format!(" {} ", label.text),
            Style::default()
                .bg(to_color(&ANNOTATION_BG))
                .fg(to_color(&ANNOTATION_FG)),
        )
    } else {
        (label.text.clone(), Style::default())
    };

    let width = text.chars().count() as u16;
    let y = rect.y + rect.height / 2;
    let x = match label.anchor {
        LabelAnchor::Center => (rect.x + rect.width / 2).saturating_sub(width / 2),
        LabelAnchor::Right => rect.right() + 1,
    };
    let x = x.max(area.x);
    if y >= area.bottom() || x >= area.right() {
        return;
    }
    buf.set_stringn(x, y, &text, (area.right() - x) as usize, style);
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut labels = Vec::new();
        for (id, _, region) in self.scene.regions() {
            let Some(rect) = self.scene.region_rect(id, area) else {
                continue;
            };
            buf.set_style(rect, Style::default().bg(to_color(&region.fill)));
            if region.border == Border::Selected {
                draw_selection(rect, &region.fill, buf);
            }
            if let Some(label) = region.label.as_ref().filter(|l| l.visible) {
                labels.push((rect, label));
            }
        }
        for (rect, label) in labels {
            draw_label(rect, label, area, buf);
        }
    }
}

/// One-line summary of the current selection plus key hints.
pub struct StatusLine {
    selected: Option<(String, AppColor)>,
}

impl StatusLine {
    pub fn new(name: Option<String>, color: Option<AppColor>) -> Self {
        Self {
            selected: name.zip(color),
        }
    }
}

impl Widget for StatusLine {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hint = Style::default().fg(Color::DarkGray);
        let mut spans = vec![Span::raw(" ")];
        match &self.selected {
            Some((name, color)) => {
                spans.push(Span::styled(
                    "    ",
                    Style::default().bg(to_color(color)),
                ));
                spans.push(Span::styled(
                    format!(" {name} "),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(color.to_hex()));
            }
            None => spans.push(Span::styled("no selection", hint)),
        }
        spans.push(Span::styled(
            "   click swatch: select  left-click slot: find  right-click slot: paste  q: quit",
            hint,
        ));
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
