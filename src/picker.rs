//! Named color map editor next to a swatch viewer.
//!
//! Each slot shows a name and a color. Left-clicking a slot highlights the
//! matching swatch in the viewer; right-clicking pastes the viewer's current
//! selection into the slot.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::events::{Button, Dispatcher, EventKind, PointerEvent, PointerKind, Subscription};
use crate::surface::{
    Aspect, Bounds, Label, Panel, PanelId, Point, Redraw, Region, RegionId, Surface, Viewport,
};
use crate::viewer::{ColorViewer, Target, ViewerConfig, ViewerHandle};

/// Points per layout unit used to turn font size and padding into row height.
const DPI: f32 = 72.0;
const SLOT_X: f32 = 0.05;

const MAP_WIDTH: f32 = 0.39;
const PAD_WIDTH: f32 = 0.01;
const VIEWER_WIDTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    pub font_size: f32,
    pub pad: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            font_size: 8.0,
            pad: 4.0,
        }
    }
}

impl DisplayConfig {
    fn validate(&self) -> Result<()> {
        let row = self.font_size + self.pad;
        if !row.is_finite() || row <= 0.0 || self.font_size < 0.0 || self.pad < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "font size and padding must be non-negative with a positive sum, got {} and {}",
                self.font_size, self.pad
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Slot {
    name: String,
    region: RegionId,
}

#[derive(Debug)]
struct DisplayState {
    panel: PanelId,
    row: f32,
    rect_height: f32,
    rect_width: f32,
    slots: Vec<Slot>,
}

/// The column of named slots.
#[derive(Debug)]
pub struct MapDisplay {
    state: Rc<RefCell<DisplayState>>,
    viewer: ViewerHandle,
    events: Dispatcher,
    subscriptions: Vec<Subscription>,
}

fn on_slot_press(
    region: RegionId,
    panel: PanelId,
    viewer: &ViewerHandle,
    event: &PointerEvent,
    surface: &mut dyn Surface,
) {
    if event.panel != Some(panel) || !surface.contains(region, event.position) {
        return;
    }
    let PointerKind::Press(button) = event.kind else {
        return;
    };

    match button {
        Button::Primary => {
            let Some(color) = surface.fill(region) else {
                return;
            };
            match viewer.highlight(surface, Target::Color(color)) {
                Ok(()) => {}
                // hand-set slot colors need not exist in the viewer
                Err(Error::NotFound(reason)) => tracing::debug!("slot highlight ignored: {reason}"),
                Err(err) => {
                    tracing::warn!("slot highlight failed: {err}");
                    return;
                }
            }
        }
        Button::Secondary => {
            if let Some(color) = viewer.selected() {
                surface.set_fill(region, color);
                tracing::debug!(%color, "pasted selection into slot");
            }
        }
        Button::Middle => return,
    }
    surface.request_redraw(Redraw::Region(region));
}

impl MapDisplay {
    pub fn new(
        events: &Dispatcher,
        panel: PanelId,
        viewer: ViewerHandle,
        config: DisplayConfig,
    ) -> Result<Self> {
        config.validate()?;
        let row = (config.font_size + config.pad) / DPI;
        let rect_height = row * 0.8;
        Ok(Self {
            state: Rc::new(RefCell::new(DisplayState {
                panel,
                row,
                rect_height,
                rect_width: rect_height * 1.5,
                slots: Vec::new(),
            })),
            viewer,
            events: events.clone(),
            subscriptions: Vec::new(),
        })
    }

    /// Add a slot, or recolor it when `name` already exists. A slot with no
    /// color is shown white.
    pub fn add_item(&mut self, surface: &mut dyn Surface, name: &str, color: Option<Color>) {
        let fill = color.map_or(Color::WHITE, Color::rgb);
        let mut state = self.state.borrow_mut();

        if let Some(slot) = state.slots.iter().find(|s| s.name == name) {
            surface.set_fill(slot.region, fill);
            surface.request_redraw(Redraw::Region(slot.region));
            return;
        }

        let row_index = state.slots.len() + 1;
        let offset_y = 1.0 - state.row * row_index as f32;
        let region = surface.add_region(
            state.panel,
            Region::new(
                Point::new(SLOT_X, offset_y),
                state.rect_width,
                state.rect_height,
                fill,
            )
            .with_label(Label::caption(name)),
        );
        surface.set_limits(
            state.panel,
            Bounds::new(0.0, 1.0, offset_y - state.row * 0.5, 1.0),
        );
        surface.request_redraw(Redraw::Full);

        let panel = state.panel;
        let viewer = self.viewer.clone();
        self.subscriptions.push(self.events.subscribe(
            EventKind::Press,
            move |event, surface| on_slot_press(region, panel, &viewer, event, surface),
        ));
        state.slots.push(Slot {
            name: name.to_string(),
            region,
        });
    }

    /// Slot names in display order.
    pub fn names(&self) -> Vec<String> {
        self.state
            .borrow()
            .slots
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    pub fn region(&self, name: &str) -> Option<RegionId> {
        self.state
            .borrow()
            .slots
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.region)
    }

    /// Slot name → displayed color.
    pub fn to_map(&self, surface: &dyn Surface) -> BTreeMap<String, Color> {
        self.state
            .borrow()
            .slots
            .iter()
            .filter_map(|s| surface.fill(s.region).map(|c| (s.name.clone(), c.rgb())))
            .collect()
    }

    pub fn panel(&self) -> PanelId {
        self.state.borrow().panel
    }
}

#[derive(Debug, Clone, Default)]
pub struct PickerConfig {
    pub viewer: ViewerConfig,
    pub display: DisplayConfig,
    /// Initial slots in display order.
    pub slots: Vec<(String, Option<Color>)>,
}

/// Slots on the left, swatch grid on the right.
#[derive(Debug)]
pub struct ColorPicker {
    map: MapDisplay,
    viewer: ColorViewer,
}

impl ColorPicker {
    pub fn new(
        surface: &mut dyn Surface,
        events: &Dispatcher,
        viewport: Viewport,
        config: &PickerConfig,
    ) -> Result<Self> {
        // fail before the surface gains any panels
        config.display.validate()?;
        config.viewer.index.validate()?;

        let map_panel = surface.add_panel(Panel::new(
            Viewport {
                width: viewport.width * MAP_WIDTH,
                ..viewport
            },
            Aspect::Equal,
        ));
        let viewer_panel = surface.add_panel(Panel::new(
            Viewport {
                x: viewport.x + viewport.width * (MAP_WIDTH + PAD_WIDTH),
                width: viewport.width * VIEWER_WIDTH,
                ..viewport
            },
            Aspect::Auto,
        ));

        let viewer = ColorViewer::new(surface, events, viewer_panel, &config.viewer)?;
        let mut map = MapDisplay::new(events, map_panel, viewer.handle(), config.display)?;
        for (name, color) in &config.slots {
            map.add_item(surface, name, *color);
        }

        Ok(Self { map, viewer })
    }

    pub fn add_item(&mut self, surface: &mut dyn Surface, name: &str, color: Option<Color>) {
        self.map.add_item(surface, name, color);
    }

    pub fn to_map(&self, surface: &dyn Surface) -> BTreeMap<String, Color> {
        self.map.to_map(surface)
    }

    pub fn viewer(&self) -> &ColorViewer {
        &self.viewer
    }

    pub fn map(&self) -> &MapDisplay {
        &self.map
    }
}
