//! Swatch grid of a palette, grouped by hue.
//!
//! Clicking a swatch selects it; hovering shows its name. The selected color
//! is what the picker's slots paste.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::color::{Color, ColorKey};
use crate::error::{Error, Result};
use crate::events::{Button, Dispatcher, EventKind, PointerEvent, PointerKind, Subscription};
use crate::index::{self, IndexOptions, NamedColor, Palette};
use crate::selection::{Mark, Marker, SelectionState, SwatchId, Transition};
use crate::surface::{
    Border, Bounds, Label, PanelId, Point, Redraw, Region, RegionId, Surface,
};

const SWATCH_INSET: f32 = 0.1;
const SWATCH_SIZE: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub palette: Palette,
    pub index: IndexOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            palette: Palette::named(),
            index: IndexOptions::default(),
        }
    }
}

/// What to highlight: a swatch name or an exact color.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Name(String),
    Color(Color),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl From<Color> for Target {
    fn from(color: Color) -> Self {
        Target::Color(color)
    }
}

/// Public view of one placed swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SwatchInfo {
    pub id: SwatchId,
    pub name: String,
    pub color: Color,
    pub region: RegionId,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug)]
struct Swatch {
    entry: NamedColor,
    region: RegionId,
    x: usize,
    y: usize,
}

#[derive(Debug)]
struct ViewerState {
    panel: PanelId,
    grid: (usize, usize),
    swatches: Vec<Swatch>,
    by_name: HashMap<String, SwatchId>,
    by_color: HashMap<ColorKey, SwatchId>,
    selection: SelectionState,
    hovered: Option<SwatchId>,
}

/// Pushes selection marks onto the swatch regions.
struct RegionMarker<'a> {
    swatches: &'a [Swatch],
    surface: &'a mut dyn Surface,
}

impl Marker for RegionMarker<'_> {
    fn mark(&mut self, swatch: SwatchId, mark: Mark) {
        let Some(swatch) = self.swatches.get(swatch.0) else {
            return;
        };
        let border = match mark {
            Mark::Normal => Border::Normal,
            Mark::Selected => Border::Selected,
        };
        self.surface.set_border(swatch.region, border);
        self.surface.request_redraw(Redraw::Region(swatch.region));
    }
}

impl ViewerState {
    fn hit(&self, surface: &dyn Surface, position: Point) -> Option<SwatchId> {
        self.swatches
            .iter()
            .position(|s| surface.contains(s.region, position))
            .map(SwatchId)
    }

    fn lookup(&self, target: &Target) -> Result<SwatchId> {
        match target {
            Target::Name(name) if name.is_empty() => {
                Err(Error::InvalidArgument("empty swatch name".into()))
            }
            Target::Name(name) => self
                .by_name
                .get(name)
                .copied()
                .ok_or_else(|| Error::NotFound(format!("no swatch named {name}"))),
            Target::Color(color) if !color.is_valid() => Err(Error::InvalidArgument(format!(
                "color channels must be finite and within [0, 1]: {color:?}"
            ))),
            Target::Color(color) => self
                .by_color
                .get(&color.key())
                .copied()
                .ok_or_else(|| Error::NotFound(format!("no swatch with color {color}"))),
        }
    }

    fn select(&mut self, id: SwatchId, surface: &mut dyn Surface) {
        let ViewerState {
            swatches,
            selection,
            ..
        } = self;
        let Some(swatch) = swatches.get(id.0) else {
            return;
        };
        let color = swatch.entry.color;
        let mut marker = RegionMarker { swatches, surface };
        if let Transition::Selected { previous } = selection.select(id, color, &mut marker) {
            tracing::debug!(
                swatch = %swatches[id.0].entry.name,
                previous = ?previous.map(|p| &swatches[p.0].entry.name),
                "selected swatch"
            );
        }
    }

    fn hide_hover(&mut self, surface: &mut dyn Surface) {
        if let Some(id) = self.hovered.take() {
            let region = self.swatches[id.0].region;
            surface.set_label_visible(region, false);
            surface.request_redraw(Redraw::Region(region));
        }
    }

    fn on_press(&mut self, event: &PointerEvent, surface: &mut dyn Surface) {
        if event.panel != Some(self.panel) {
            return;
        }
        let PointerKind::Press(button) = event.kind else {
            return;
        };
        let hit = self.hit(surface, event.position);
        self.hide_hover(surface);
        if let (Button::Primary, Some(id)) = (button, hit) {
            self.select(id, surface);
        }
    }

    fn on_move(&mut self, event: &PointerEvent, surface: &mut dyn Surface) {
        let hit = if event.panel == Some(self.panel) {
            self.hit(surface, event.position)
        } else {
            None
        };
        if hit == self.hovered {
            return;
        }
        self.hide_hover(surface);
        if let Some(id) = hit {
            let region = self.swatches[id.0].region;
            surface.set_label_visible(region, true);
            surface.request_redraw(Redraw::Region(region));
            self.hovered = Some(id);
        }
    }
}

/// Shared handle to a viewer's state, used by widgets that read or drive the
/// selection without owning the viewer.
#[derive(Debug, Clone)]
pub struct ViewerHandle(Rc<RefCell<ViewerState>>);

impl ViewerHandle {
    /// Select the swatch matching `target`.
    ///
    /// Fails with [`Error::NotFound`] when no swatch matches, leaving the
    /// current selection untouched.
    pub fn highlight(&self, surface: &mut dyn Surface, target: impl Into<Target>) -> Result<()> {
        let mut state = self.0.borrow_mut();
        let id = state.lookup(&target.into())?;
        state.select(id, surface);
        Ok(())
    }

    /// RGB of the selected swatch.
    pub fn selected(&self) -> Option<Color> {
        self.0.borrow().selection.current()
    }

    pub fn selected_with_alpha(&self, alpha: f32) -> Option<Color> {
        self.0.borrow().selection.current_with_alpha(alpha)
    }

    pub fn selected_name(&self) -> Option<String> {
        let state = self.0.borrow();
        let id = state.selection.selected()?;
        Some(state.swatches[id.0].entry.name.clone())
    }

    /// Name of the swatch whose label is showing.
    pub fn hovered_name(&self) -> Option<String> {
        let state = self.0.borrow();
        let id = state.hovered?;
        Some(state.swatches[id.0].entry.name.clone())
    }

    pub fn swatches(&self) -> Vec<SwatchInfo> {
        self.0
            .borrow()
            .swatches
            .iter()
            .enumerate()
            .map(|(i, s)| SwatchInfo {
                id: SwatchId(i),
                name: s.entry.name.clone(),
                color: s.entry.color,
                region: s.region,
                x: s.x,
                y: s.y,
            })
            .collect()
    }

    pub fn swatch(&self, name: &str) -> Option<SwatchInfo> {
        self.swatches().into_iter().find(|s| s.name == name)
    }

    /// Grid extents as `(columns, rows)`.
    pub fn grid_size(&self) -> (usize, usize) {
        self.0.borrow().grid
    }

    pub fn panel(&self) -> PanelId {
        self.0.borrow().panel
    }
}

/// The swatch grid widget. Dropping it unsubscribes its event handlers.
#[derive(Debug)]
pub struct ColorViewer {
    handle: ViewerHandle,
    _subscriptions: Vec<Subscription>,
}

impl ColorViewer {
    pub fn new(
        surface: &mut dyn Surface,
        events: &Dispatcher,
        panel: PanelId,
        config: &ViewerConfig,
    ) -> Result<Self> {
        let index = index::index(&config.palette, &config.index)?;
        let (columns, rows) = index.grid_size();
        surface.set_limits(
            panel,
            Bounds::new(0.0, columns.max(1) as f32, 0.0, rows.max(1) as f32),
        );

        let mut swatches = Vec::with_capacity(index.len());
        let mut by_name = HashMap::new();
        let mut by_color = HashMap::new();
        for cell in index.cells() {
            let origin = Point::new(cell.x as f32 + SWATCH_INSET, cell.y as f32 + SWATCH_INSET);
            let region = surface.add_region(
                panel,
                Region::new(origin, SWATCH_SIZE, SWATCH_SIZE, cell.entry.color)
                    .with_label(Label::annotation(&cell.entry.name)),
            );
            let id = SwatchId(swatches.len());
            by_name.insert(cell.entry.name.clone(), id);
            // identical colors resolve to the swatch placed last
            by_color.insert(cell.entry.color.key(), id);
            swatches.push(Swatch {
                entry: cell.entry.clone(),
                region,
                x: cell.x,
                y: cell.y,
            });
        }
        surface.request_redraw(Redraw::Full);

        tracing::info!(
            swatches = swatches.len(),
            bins = index.bins(),
            columns,
            rows,
            "laid out color viewer"
        );

        let state = Rc::new(RefCell::new(ViewerState {
            panel,
            grid: (columns, rows),
            swatches,
            by_name,
            by_color,
            selection: SelectionState::new(),
            hovered: None,
        }));

        let on_press = Rc::clone(&state);
        let on_move = Rc::clone(&state);
        let subscriptions = vec![
            events.subscribe(EventKind::Press, move |event, surface| {
                on_press.borrow_mut().on_press(event, surface)
            }),
            events.subscribe(EventKind::Move, move |event, surface| {
                on_move.borrow_mut().on_move(event, surface)
            }),
        ];

        Ok(Self {
            handle: ViewerHandle(state),
            _subscriptions: subscriptions,
        })
    }

    pub fn handle(&self) -> ViewerHandle {
        self.handle.clone()
    }

    pub fn highlight(&self, surface: &mut dyn Surface, target: impl Into<Target>) -> Result<()> {
        self.handle.highlight(surface, target)
    }

    pub fn selected(&self) -> Option<Color> {
        self.handle.selected()
    }

    pub fn selected_with_alpha(&self, alpha: f32) -> Option<Color> {
        self.handle.selected_with_alpha(alpha)
    }

    pub fn selected_name(&self) -> Option<String> {
        self.handle.selected_name()
    }

    pub fn swatches(&self) -> Vec<SwatchInfo> {
        self.handle.swatches()
    }

    pub fn grid_size(&self) -> (usize, usize) {
        self.handle.grid_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Aspect, Panel, Viewport};
    use crate::tui::scene::Scene;

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    struct Fixture {
        scene: Scene,
        events: Dispatcher,
        viewer: ColorViewer,
        panel: PanelId,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let events = Dispatcher::new();
        let panel = scene.add_panel(Panel::new(Viewport::FULL, Aspect::Auto));
        let config = ViewerConfig {
            palette: [
                ("red", RED),
                ("green", GREEN),
                ("blue", BLUE),
                ("grey", Color::new(0.5, 0.5, 0.5)),
            ]
            .into_iter()
            .collect(),
            index: IndexOptions::default(),
        };
        let viewer = ColorViewer::new(&mut scene, &events, panel, &config).unwrap();
        Fixture {
            scene,
            events,
            viewer,
            panel,
        }
    }

    impl Fixture {
        fn center_of(&self, name: &str) -> Point {
            let swatch = self.viewer.handle().swatch(name).unwrap();
            self.scene.region(swatch.region).unwrap().center()
        }

        fn press(&mut self, position: Point, button: Button) {
            let event = PointerEvent::press(self.panel, position, button);
            self.events.dispatch(&event, &mut self.scene);
        }

        fn hover(&mut self, position: Point) {
            let event = PointerEvent::motion(Some(self.panel), position);
            self.events.dispatch(&event, &mut self.scene);
        }

        fn selected_regions(&self) -> Vec<String> {
            self.viewer
                .swatches()
                .into_iter()
                .filter(|s| self.scene.region(s.region).unwrap().border == Border::Selected)
                .map(|s| s.name)
                .collect()
        }

        fn visible_labels(&self) -> usize {
            self.viewer
                .swatches()
                .iter()
                .filter(|s| self.scene.label_visible(s.region))
                .count()
        }
    }

    #[test]
    fn lays_out_chromatic_swatches() {
        let f = fixture();
        let names: Vec<String> = f.viewer.swatches().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["red", "green", "blue"]);
        assert_eq!(f.viewer.grid_size(), (3, 1));
        let limits = f.scene.panel(f.panel).unwrap().limits;
        assert_eq!(limits, Bounds::new(0.0, 3.0, 0.0, 1.0));

        let green = f.viewer.handle().swatch("green").unwrap();
        let region = f.scene.region(green.region).unwrap();
        assert_eq!(region.origin, Point::new(1.1, 0.1));
        assert_eq!(region.fill, GREEN);
    }

    #[test]
    fn click_selects_and_moves_selection() {
        let mut f = fixture();
        assert_eq!(f.viewer.selected(), None);

        let red = f.center_of("red");
        f.press(red, Button::Primary);
        assert_eq!(f.viewer.selected(), Some(RED));
        assert_eq!(f.selected_regions(), ["red"]);

        let green = f.center_of("green");
        f.press(green, Button::Primary);
        assert_eq!(f.viewer.selected(), Some(GREEN));
        assert_eq!(f.viewer.selected_name().as_deref(), Some("green"));
        assert_eq!(f.selected_regions(), ["green"]);
    }

    #[test]
    fn secondary_click_does_not_select() {
        let mut f = fixture();
        let red = f.center_of("red");
        f.press(red, Button::Secondary);
        assert_eq!(f.viewer.selected(), None);
    }

    #[test]
    fn click_between_swatches_keeps_selection() {
        let mut f = fixture();
        let red = f.center_of("red");
        f.press(red, Button::Primary);
        f.press(Point::new(1.0, 0.5), Button::Primary);
        assert_eq!(f.viewer.selected(), Some(RED));
    }

    #[test]
    fn hover_is_exclusive() {
        let mut f = fixture();
        for name in ["red", "green", "blue", "green"] {
            let p = f.center_of(name);
            f.hover(p);
            assert_eq!(f.visible_labels(), 1);
            assert_eq!(f.viewer.handle().hovered_name().as_deref(), Some(name));
        }
        f.hover(Point::new(2.0, 0.5));
        assert_eq!(f.visible_labels(), 0);
    }

    #[test]
    fn leaving_the_panel_hides_the_label() {
        let mut f = fixture();
        let p = f.center_of("blue");
        f.hover(p);
        let outside = PointerEvent::motion(None, Point::default());
        f.events.dispatch(&outside, &mut f.scene);
        assert_eq!(f.visible_labels(), 0);
    }

    #[test]
    fn press_hides_the_hover_label() {
        let mut f = fixture();
        let p = f.center_of("blue");
        f.hover(p);
        f.press(p, Button::Primary);
        assert_eq!(f.visible_labels(), 0);
        assert_eq!(f.viewer.selected(), Some(BLUE));
    }

    #[test]
    fn events_for_other_panels_are_ignored() {
        let mut f = fixture();
        let red = f.center_of("red");
        let other = PointerEvent::press(PanelId(f.panel.0 + 1), red, Button::Primary);
        f.events.dispatch(&other, &mut f.scene);
        assert_eq!(f.viewer.selected(), None);
    }

    #[test]
    fn highlight_by_name_and_color() {
        let mut f = fixture();
        f.viewer.highlight(&mut f.scene, "blue").unwrap();
        assert_eq!(f.viewer.selected(), Some(BLUE));
        f.viewer.highlight(&mut f.scene, RED.with_alpha(0.4)).unwrap();
        assert_eq!(f.viewer.selected(), Some(RED));
        assert_eq!(f.selected_regions(), ["red"]);
    }

    #[test]
    fn highlight_misses_leave_selection_unchanged() {
        let mut f = fixture();
        f.viewer.highlight(&mut f.scene, "red").unwrap();

        let grey = f.viewer.highlight(&mut f.scene, Color::new(0.5, 0.5, 0.5));
        assert!(matches!(grey, Err(Error::NotFound(_))));
        let missing = f.viewer.highlight(&mut f.scene, "chartreuse");
        assert!(matches!(missing, Err(Error::NotFound(_))));
        assert_eq!(f.viewer.selected(), Some(RED));

        let invalid = f.viewer.highlight(&mut f.scene, Color::new(f32::NAN, 0.0, 0.0));
        assert!(matches!(invalid, Err(Error::InvalidArgument(_))));
        let empty = f.viewer.highlight(&mut f.scene, "");
        assert!(matches!(empty, Err(Error::InvalidArgument(_))));
        assert_eq!(f.selected_regions(), ["red"]);
    }

    #[test]
    fn selected_with_alpha_appends_alpha() {
        let mut f = fixture();
        assert_eq!(f.viewer.selected_with_alpha(0.5), None);
        f.viewer.highlight(&mut f.scene, "green").unwrap();
        let selected = f.viewer.selected_with_alpha(0.5).unwrap();
        assert_eq!(selected, GREEN);
        assert_eq!(selected.alpha, Some(0.5));
    }

    #[test]
    fn dropping_viewer_releases_handlers() {
        let f = fixture();
        assert_eq!(f.events.len(), 2);
        let Fixture { events, viewer, .. } = f;
        drop(viewer);
        assert!(events.is_empty());
    }

    #[test]
    fn invalid_options_fail_construction() {
        let mut scene = Scene::new();
        let panel = scene.add_panel(Panel::new(Viewport::FULL, Aspect::Auto));
        let config = ViewerConfig {
            palette: Palette::new(),
            index: IndexOptions {
                bin_width: 0.0,
                ..IndexOptions::default()
            },
        };
        let result = ColorViewer::new(&mut scene, &Dispatcher::new(), panel, &config);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
