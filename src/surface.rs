//! The drawing capability widgets are built on.
//!
//! A surface holds panels, each with its own data coordinate system (y up),
//! and rectangular regions placed inside them. Widgets receive the surface
//! explicitly; nothing is looked up globally.

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Data limits of a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
}

impl Bounds {
    pub const fn new(x0: f32, x1: f32, y0: f32, y1: f32) -> Self {
        Self { x0, x1, y0, y1 }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
}

/// Placement of a panel as fractions of the surface, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const FULL: Viewport = Viewport::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// How panel data units map onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aspect {
    /// Stretch the limits to fill the viewport.
    #[default]
    Auto,
    /// One data unit has the same physical size on both axes; the panel is
    /// anchored to the top of its viewport.
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub viewport: Viewport,
    pub limits: Bounds,
    pub aspect: Aspect,
}

impl Panel {
    pub fn new(viewport: Viewport, aspect: Aspect) -> Self {
        Self {
            viewport,
            limits: Bounds::default(),
            aspect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

/// Outline style of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    #[default]
    Normal,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Centered on the region.
    Center,
    /// Just past the region's right edge.
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: LabelAnchor,
    /// Drawn on a light box instead of the panel background.
    pub boxed: bool,
    pub visible: bool,
}

impl Label {
    /// A hidden boxed label shown on hover.
    pub fn annotation(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: LabelAnchor::Center,
            boxed: true,
            visible: false,
        }
    }

    /// An always-visible caption to the right of the region.
    pub fn caption(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: LabelAnchor::Right,
            boxed: false,
            visible: true,
        }
    }
}

/// A filled rectangle in panel data coordinates; `origin` is its lower-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub fill: Color,
    pub border: Border,
    pub label: Option<Label>,
}

impl Region {
    pub fn new(origin: Point, width: f32, height: f32, fill: Color) -> Self {
        Self {
            origin,
            width,
            height,
            fill,
            border: Border::Normal,
            label: None,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Only the given region changed.
    Region(RegionId),
    Full,
}

/// Drawing capability handed to widgets at construction and to event handlers.
///
/// Mutators on an unknown region id are ignored.
pub trait Surface {
    fn add_panel(&mut self, panel: Panel) -> PanelId;

    fn set_limits(&mut self, panel: PanelId, limits: Bounds);

    fn add_region(&mut self, panel: PanelId, region: Region) -> RegionId;

    fn remove_region(&mut self, id: RegionId) -> Option<Region>;

    fn region(&self, id: RegionId) -> Option<&Region>;

    fn set_fill(&mut self, id: RegionId, color: Color);

    fn set_border(&mut self, id: RegionId, border: Border);

    fn set_label_visible(&mut self, id: RegionId, visible: bool);

    fn request_redraw(&mut self, redraw: Redraw);

    fn fill(&self, id: RegionId) -> Option<Color> {
        self.region(id).map(|r| r.fill)
    }

    /// Hit test in the region's panel coordinates.
    fn contains(&self, id: RegionId, p: Point) -> bool {
        self.region(id).is_some_and(|r| r.contains(p))
    }

    fn label_visible(&self, id: RegionId) -> bool {
        self.region(id)
            .and_then(|r| r.label.as_ref())
            .is_some_and(|l| l.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_contains_its_edges() {
        let region = Region::new(Point::new(1.1, 2.1), 0.8, 0.8, Color::WHITE);
        assert!(region.contains(Point::new(1.5, 2.5)));
        assert!(region.contains(Point::new(1.1, 2.1)));
        assert!(!region.contains(Point::new(1.0, 2.5)));
        assert!(!region.contains(Point::new(1.5, 3.0)));
    }

    #[test]
    fn label_constructors() {
        let hover = Label::annotation("navy");
        assert!(!hover.visible && hover.boxed);
        let caption = Label::caption("accent");
        assert!(caption.visible && caption.anchor == LabelAnchor::Right);
    }
}
