pub mod scene;
pub mod widgets;

use std::collections::BTreeMap;
use std::io;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::{Frame, Terminal};

use crate::color::Color;
use crate::events::{Button, Dispatcher, PointerEvent, PointerKind};
use crate::picker::{ColorPicker, PickerConfig};
use crate::surface::{Point, Viewport};

use scene::Scene;
use widgets::{SceneWidget, StatusLine};

/// State for the interactive TUI application.
pub struct TuiApp {
    scene: Scene,
    events: Dispatcher,
    picker: ColorPicker,
    /// Where the scene was last drawn; pointer events are mapped through it.
    scene_area: Rect,
}

impl TuiApp {
    pub fn new(config: &PickerConfig) -> Result<Self> {
        let mut scene = Scene::new();
        let events = Dispatcher::new();
        let picker = ColorPicker::new(&mut scene, &events, Viewport::FULL, config)
            .context("failed to build color picker")?;
        Ok(Self {
            scene,
            events,
            picker,
            scene_area: Rect::default(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    /// Slot name → color as currently shown.
    pub fn color_map(&self) -> BTreeMap<String, Color> {
        self.picker.to_map(&self.scene)
    }

    /// Translate a terminal mouse event into a pointer event and dispatch it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Press(Button::Primary),
            MouseEventKind::Down(MouseButton::Right) => PointerKind::Press(Button::Secondary),
            MouseEventKind::Down(MouseButton::Middle) => PointerKind::Press(Button::Middle),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerKind::Move,
            _ => return,
        };

        let event = match self.scene.locate(self.scene_area, mouse.column, mouse.row) {
            Some((panel, position)) => PointerEvent {
                panel: Some(panel),
                position,
                kind,
            },
            // motion outside every panel still clears hover state
            None if kind == PointerKind::Move => PointerEvent::motion(None, Point::default()),
            None => return,
        };
        self.events.dispatch(&event, &mut self.scene);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [scene_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
        self.scene_area = scene_area;

        frame.render_widget(SceneWidget::new(&self.scene), scene_area);
        let viewer = self.picker.viewer();
        frame.render_widget(
            StatusLine::new(viewer.selected_name(), viewer.selected()),
            status_area,
        );
    }
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
            .context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        let _ = disable_raw_mode();
    }
}

/// Launch the TUI application. Returns when the user quits.
pub fn run(app: &mut TuiApp) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to open terminal")?;
    tracing::info!("terminal session started");

    let mut resized = true;
    loop {
        // ratatui diffs against the previous frame, so only damaged cells
        // reach the terminal
        if resized || !app.scene.damage().is_none() {
            app.scene.take_damage();
            terminal.draw(|frame| app.draw(frame))?;
            resized = false;
        }

        match event::read().context("failed to read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(..) => resized = true,
            _ => {}
        }
    }

    tracing::info!(slots = app.color_map().len(), "terminal session ended");
    Ok(())
}
