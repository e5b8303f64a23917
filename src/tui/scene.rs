//! Retained-mode [`Surface`] drawn into terminal cells.

use std::collections::BTreeSet;

use ratatui::layout::Rect;

use crate::color::Color;
use crate::surface::{
    Aspect, Border, Bounds, Panel, PanelId, Point, Redraw, Region, RegionId, Surface,
};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Pending redraw work since the last frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Damage {
    #[default]
    None,
    Regions(BTreeSet<RegionId>),
    Full,
}

impl Damage {
    fn add(&mut self, redraw: Redraw) {
        match redraw {
            Redraw::Full => *self = Damage::Full,
            Redraw::Region(id) => match self {
                Damage::Full => {}
                Damage::Regions(ids) => {
                    ids.insert(id);
                }
                Damage::None => *self = Damage::Regions(BTreeSet::from([id])),
            },
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Damage::None
    }
}

#[derive(Debug, Clone)]
struct Placed {
    panel: PanelId,
    region: Region,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    panels: Vec<Panel>,
    regions: Vec<Option<Placed>>,
    damage: Damage,
}

/// Maps one panel's data coordinates to fractional cell coordinates.
#[derive(Debug, Clone, Copy)]
struct Transform {
    left: f32,
    top: f32,
    /// Columns per data unit.
    sx: f32,
    /// Rows per data unit.
    sy: f32,
    limits: Bounds,
}

impl Transform {
    fn new(panel: &Panel, area: Rect) -> Option<Self> {
        let vx = area.x as f32 + panel.viewport.x * area.width as f32;
        let vy = area.y as f32 + panel.viewport.y * area.height as f32;
        let vw = panel.viewport.width * area.width as f32;
        let vh = panel.viewport.height * area.height as f32;
        let limits = panel.limits;
        let xr = limits.x1 - limits.x0;
        let yr = limits.y1 - limits.y0;
        if xr <= 0.0 || yr <= 0.0 || vw <= 0.0 || vh <= 0.0 {
            return None;
        }

        Some(match panel.aspect {
            Aspect::Auto => Self {
                left: vx,
                top: vy,
                sx: vw / xr,
                sy: vh / yr,
                limits,
            },
            Aspect::Equal => {
                let sx = (vw / xr).min(CELL_ASPECT * vh / yr);
                Self {
                    left: vx + (vw - xr * sx) / 2.0,
                    top: vy,
                    sx,
                    sy: sx / CELL_ASPECT,
                    limits,
                }
            }
        })
    }

    fn to_cell(&self, p: Point) -> (f32, f32) {
        (
            self.left + (p.x - self.limits.x0) * self.sx,
            self.top + (self.limits.y1 - p.y) * self.sy,
        )
    }

    /// Data point at the center of a cell.
    fn from_cell(&self, column: u16, row: u16) -> Point {
        Point::new(
            self.limits.x0 + (column as f32 + 0.5 - self.left) / self.sx,
            self.limits.y1 - (row as f32 + 0.5 - self.top) / self.sy,
        )
    }
}

fn viewport_rect(panel: &Panel, area: Rect) -> Rect {
    let x = area.x as f32 + panel.viewport.x * area.width as f32;
    let y = area.y as f32 + panel.viewport.y * area.height as f32;
    let w = panel.viewport.width * area.width as f32;
    let h = panel.viewport.height * area.height as f32;
    Rect::new(
        x.round() as u16,
        y.round() as u16,
        w.round() as u16,
        h.round() as u16,
    )
    .intersection(area)
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id.0)
    }

    /// Live regions in insertion order.
    pub fn regions(&self) -> impl Iterator<Item = (RegionId, PanelId, &Region)> {
        self.regions.iter().enumerate().filter_map(|(i, placed)| {
            placed
                .as_ref()
                .map(|p| (RegionId(i), p.panel, &p.region))
        })
    }

    pub fn damage(&self) -> &Damage {
        &self.damage
    }

    /// Hand the pending damage to the caller, leaving none behind.
    pub fn take_damage(&mut self) -> Damage {
        std::mem::take(&mut self.damage)
    }

    /// Cells covered by a region when the scene is drawn into `area`.
    pub fn region_rect(&self, id: RegionId, area: Rect) -> Option<Rect> {
        let placed = self.regions.get(id.0)?.as_ref()?;
        let panel = self.panels.get(placed.panel.0)?;
        let t = Transform::new(panel, area)?;
        let r = &placed.region;

        let (left, top) = t.to_cell(Point::new(r.origin.x, r.origin.y + r.height));
        let (right, bottom) = t.to_cell(Point::new(r.origin.x + r.width, r.origin.y));
        let x0 = left.round().max(0.0);
        let y0 = top.round().max(0.0);
        let width = (right.round() - x0).max(1.0);
        let height = (bottom.round() - y0).max(1.0);

        let rect = Rect::new(x0 as u16, y0 as u16, width as u16, height as u16)
            .intersection(viewport_rect(panel, area));
        (!rect.is_empty()).then_some(rect)
    }

    /// Find the panel under a terminal cell and the data point at its center.
    pub fn locate(&self, area: Rect, column: u16, row: u16) -> Option<(PanelId, Point)> {
        self.panels.iter().enumerate().rev().find_map(|(i, panel)| {
            let vp = viewport_rect(panel, area);
            let inside = column >= vp.x && column < vp.right() && row >= vp.y && row < vp.bottom();
            if !inside {
                return None;
            }
            let t = Transform::new(panel, area)?;
            Some((PanelId(i), t.from_cell(column, row)))
        })
    }

    fn placed_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions
            .get_mut(id.0)
            .and_then(|p| p.as_mut())
            .map(|p| &mut p.region)
    }
}

impl Surface for Scene {
    fn add_panel(&mut self, panel: Panel) -> PanelId {
        self.panels.push(panel);
        self.damage.add(Redraw::Full);
        PanelId(self.panels.len() - 1)
    }

    fn set_limits(&mut self, panel: PanelId, limits: Bounds) {
        if let Some(panel) = self.panels.get_mut(panel.0) {
            panel.limits = limits;
        }
    }

    fn add_region(&mut self, panel: PanelId, region: Region) -> RegionId {
        self.regions.push(Some(Placed { panel, region }));
        let id = RegionId(self.regions.len() - 1);
        self.damage.add(Redraw::Region(id));
        id
    }

    fn remove_region(&mut self, id: RegionId) -> Option<Region> {
        let removed = self.regions.get_mut(id.0)?.take()?;
        self.damage.add(Redraw::Full);
        Some(removed.region)
    }

    fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)?.as_ref().map(|p| &p.region)
    }

    fn set_fill(&mut self, id: RegionId, color: Color) {
        if let Some(region) = self.placed_mut(id) {
            region.fill = color;
        }
    }

    fn set_border(&mut self, id: RegionId, border: Border) {
        if let Some(region) = self.placed_mut(id) {
            region.border = border;
        }
    }

    fn set_label_visible(&mut self, id: RegionId, visible: bool) {
        if let Some(label) = self.placed_mut(id).and_then(|r| r.label.as_mut()) {
            label.visible = visible;
        }
    }

    fn request_redraw(&mut self, redraw: Redraw) {
        self.damage.add(redraw);
    }
}
